//! Implementation of a simple, undirected graph data structure with the static queries and
//! the derivations used by the cover solvers, plus the plain-text graph format and random
//! generation.
//!
//! Vertices are iterated in ascending id order and edges in lexicographic order, so every
//! algorithm built on top of `Graph` is deterministic for a given input.

use crate::cust_error::{ImportError, ProcessingError};
use fxhash::{FxHashMap, FxHashSet};
use rand::Rng;
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

const HEADER_NUM_NODES: &str = "Nombre de sommets\n";
const HEADER_NODES: &str = "Sommets\n";
const HEADER_NUM_EDGES: &str = "Nombre d aretes\n";
const HEADER_EDGES: &str = "Aretes\n";

/// A simple undirected graph without self-loops or parallel edges.
#[derive(Debug, Default, Eq, PartialEq, Clone)]
pub struct Graph {
    adj_list: BTreeMap<usize, FxHashSet<usize>>,
    num_edges: usize,
}

// Static functions
impl Graph {

    /// Creates a graph with nodes `0..n` and no edges.
    pub fn with_vertices(n: usize) -> Self {
        Graph {
            adj_list: (0..n).map(|node| (node, FxHashSet::default())).collect(),
            num_edges: 0,
        }
    }

    /// Creates a graph from an edge list, adding endpoints as needed. Self-loops are ignored.
    pub fn from_edges(edges: &[(usize, usize)]) -> Self {
        let mut graph = Graph::default();
        for &(src, trg) in edges {
            graph.add_vertex(src);
            graph.add_vertex(trg);
            if src != trg {
                graph.insert_edge(src, trg);
            }
        }
        graph
    }

    /// Returns an `Iterator` over all nodes in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item=usize> + '_ {
        self.adj_list.keys().copied()
    }

    pub fn num_nodes(&self) -> usize {
        self.adj_list.len()
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn contains(&self, node: usize) -> bool {
        self.adj_list.contains_key(&node)
    }

    /// Checks if `self` holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.adj_list.is_empty()
    }

    pub fn has_edges(&self) -> bool {
        self.num_edges > 0
    }

    /// Returns the neighborhood of `node`, or `None` if `node` is not in the graph.
    pub fn neighbors(&self, node: usize) -> Option<&FxHashSet<usize>> {
        self.adj_list.get(&node)
    }

    /// Returns the degree of `node`, or `None` if `node` is not in the graph.
    pub fn degree(&self, node: usize) -> Option<usize> {
        self.adj_list.get(&node).map(|neighbors| neighbors.len())
    }

    /// Returns the degree of every node.
    pub fn degrees(&self) -> FxHashMap<usize, usize> {
        self.adj_list
            .iter()
            .map(|(node, neighbors)| (*node, neighbors.len()))
            .collect()
    }

    /// Returns the highest degree, or `None` for a graph without nodes, on which the query is
    /// undefined.
    pub fn max_degree(&self) -> Option<usize> {
        self.adj_list.values().map(|neighbors| neighbors.len()).max()
    }

    /// Returns a node with the highest degree. Like `max_degree()`, this is undefined on a graph
    /// without nodes and returns `None` there.
    /// Among nodes of equal degree the one with the lowest id wins.
    pub fn max_degree_node(&self) -> Option<usize> {
        self.adj_list
            .iter()
            .max_by(|(a, a_neighs), (b, b_neighs)| {
                a_neighs.len().cmp(&b_neighs.len()).then(b.cmp(a))
            })
            .map(|(node, _)| *node)
    }

    /// Returns an iterator over all edges `(src, trg)` with `src < trg`, in lexicographic order.
    pub fn edges(&self) -> impl Iterator<Item=(usize, usize)> + '_ {
        self.adj_list
            .iter()
            .flat_map(|(&node, neighbors)| {
                let mut higher: Vec<usize> = neighbors
                    .iter()
                    .copied()
                    .filter(|neigh| *neigh > node)
                    .collect();
                higher.sort_unstable();
                higher.into_iter().map(move |neigh| (node, neigh))
            })
    }

    /// Returns the lexicographically smallest edge.
    pub fn first_edge(&self) -> Option<(usize, usize)> {
        self.edges().next()
    }

    /// Checks if `edge` exists.
    pub fn edge_exists(&self, edge: (usize, usize)) -> bool {
        self.adj_list
            .get(&edge.0)
            .map_or(false, |neighs| neighs.contains(&edge.1))
    }

    /// Checks if every edge has at least one endpoint in `cover`.
    pub fn is_cover(&self, cover: &FxHashSet<usize>) -> bool {
        self.adj_list.iter().all(|(node, neighbors)| {
            cover.contains(node) || neighbors.iter().all(|neigh| cover.contains(neigh))
        })
    }

    /// Returns a new graph without `node` and its incident edges.
    pub fn remove_vertex(&self, node: usize) -> Result<Graph, ProcessingError> {
        if !self.contains(node) {
            return Err(ProcessingError::InvalidParameter(format!("vertex {} is not in the graph", node)))
        }
        let mut graph = self.clone();
        graph.delete_node(node);
        Ok(graph)
    }

    /// Returns a new graph without the nodes in `node_set` and their incident edges.
    /// Fails if any node of `node_set` is not in the graph.
    pub fn remove_vertices(&self, node_set: &FxHashSet<usize>) -> Result<Graph, ProcessingError> {
        if let Some(missing) = node_set.iter().find(|node| !self.contains(**node)) {
            return Err(ProcessingError::InvalidParameter(format!("vertex {} is not in the graph", missing)))
        }
        let mut degree_sum = 0;
        let adj_list = self.adj_list
            .iter()
            .filter(|(node, _)| !node_set.contains(*node))
            .map(|(node, neighbors)| {
                let kept: FxHashSet<usize> = neighbors
                    .iter()
                    .copied()
                    .filter(|neigh| !node_set.contains(neigh))
                    .collect();
                degree_sum += kept.len();
                (*node, kept)
            })
            .collect();
        Ok(Graph {
            adj_list,
            num_edges: degree_sum / 2,
        })
    }
}

// Dynamic functions
impl Graph {

    /// Adds `node`. Returns `false` if it already existed.
    pub fn add_vertex(&mut self, node: usize) -> bool {
        if self.adj_list.contains_key(&node) {
            return false
        }
        self.adj_list.insert(node, FxHashSet::default());
        true
    }

    /// Adds the edge `(src, trg)`. Both nodes must already exist.
    /// Returns `Ok(false)` if the edge already existed.
    pub fn add_edge(&mut self, src: usize, trg: usize) -> Result<bool, ProcessingError> {
        if src == trg {
            return Err(ProcessingError::InvalidParameter(format!("self-loop on vertex {}", src)))
        }
        for node in [src, trg] {
            if !self.contains(node) {
                return Err(ProcessingError::InvalidParameter(format!("vertex {} is not in the graph", node)))
            }
        }
        Ok(self.insert_edge(src, trg))
    }

    fn insert_edge(&mut self, src: usize, trg: usize) -> bool {
        let new = self.adj_list.entry(src).or_default().insert(trg);
        self.adj_list.entry(trg).or_default().insert(src);
        if new {
            self.num_edges += 1;
        }
        new
    }

    /// Deletes `node` in place.
    /// Returns the old neighborhood of `node` or `None` if nothing was deleted.
    pub fn delete_node(&mut self, node: usize) -> Option<FxHashSet<usize>> {
        let opt_neighbors = self.adj_list.remove(&node);
        if let Some(neighborhood) = opt_neighbors.as_ref() {
            for neighbor in neighborhood {
                if let Some(nn) = self.adj_list.get_mut(neighbor) {
                    nn.remove(&node);
                }
            }
            self.num_edges -= neighborhood.len();
        }
        opt_neighbors
    }
}

/// Line-oriented reader that keeps track of the current line number for error reporting.
struct LineReader<R> {
    inner: R,
    line: usize,
    buf: String,
}

impl<R: BufRead> LineReader<R> {

    fn next_line(&mut self) -> Result<&str, ImportError> {
        self.buf.clear();
        self.line += 1;
        if self.inner.read_line(&mut self.buf)? == 0 {
            return Err(ImportError::InputMalformedError(self.line))
        }
        Ok(&self.buf)
    }

    fn expect_header(&mut self, header: &'static str) -> Result<(), ImportError> {
        if self.next_line()? != header {
            return Err(ImportError::HeaderMismatch {
                line: self.line,
                expected: header,
                found: self.buf.trim_end().to_owned(),
            })
        }
        Ok(())
    }

    fn next_int(&mut self) -> Result<usize, ImportError> {
        let parsed = self.next_line()?.trim_end().parse::<usize>();
        parsed.map_err(|source| ImportError::BadIntError { line: self.line, source })
    }

    fn next_pair(&mut self) -> Result<(usize, usize), ImportError> {
        let line = self.next_line()?.trim_end().to_owned();
        let mut s = line.split(' ');
        let mut next = || -> Result<usize, ImportError> {
            s.next()
                .ok_or(ImportError::InputMalformedError(self.line))?
                .parse::<usize>()
                .map_err(|source| ImportError::BadIntError { line: self.line, source })
        };
        let src = next()?;
        let trg = next()?;
        if s.next().is_some() { return Err(ImportError::InputMalformedError(self.line)); }
        Ok((src, trg))
    }
}

impl Graph {

    /// Reads a graph in the following format, with the header lines matching exactly:
    /// ```text
    /// Nombre de sommets
    /// <n>
    /// Sommets
    /// <one vertex per line, n lines>
    /// Nombre d aretes
    /// <m>
    /// Aretes
    /// <one "src trg" pair per line, m lines>
    /// ```
    /// A vertex listed twice is rejected, so the graph has exactly `n` nodes.
    pub fn read_graph<R: BufRead>(input: R) -> Result<Self, ImportError> {
        let mut reader = LineReader { inner: input, line: 0, buf: String::new() };
        let mut graph = Graph::default();
        reader.expect_header(HEADER_NUM_NODES)?;
        let n = reader.next_int()?;
        reader.expect_header(HEADER_NODES)?;
        for _ in 0..n {
            let node = reader.next_int()?;
            if !graph.add_vertex(node) {
                return Err(ImportError::InputMalformedError(reader.line))
            }
        }
        reader.expect_header(HEADER_NUM_EDGES)?;
        let m = reader.next_int()?;
        reader.expect_header(HEADER_EDGES)?;
        for _ in 0..m {
            let (src, trg) = reader.next_pair()?;
            for vertex in [src, trg] {
                if !graph.contains(vertex) {
                    return Err(ImportError::UndeclaredVertex { line: reader.line, vertex })
                }
            }
            if src == trg {
                return Err(ImportError::InputMalformedError(reader.line))
            }
            graph.insert_edge(src, trg);
        }
        Ok(graph)
    }

    /// Writes `self` in the format accepted by `Graph::read_graph()`.
    pub fn write_graph<W: Write>(&self, mut out: W) -> Result<(), io::Error> {
        out.write_all(HEADER_NUM_NODES.as_bytes())?;
        writeln!(out, "{}", self.num_nodes())?;
        out.write_all(HEADER_NODES.as_bytes())?;
        for node in self.nodes() {
            writeln!(out, "{}", node)?;
        }
        out.write_all(HEADER_NUM_EDGES.as_bytes())?;
        writeln!(out, "{}", self.num_edges())?;
        out.write_all(HEADER_EDGES.as_bytes())?;
        for (src, trg) in self.edges() {
            writeln!(out, "{} {}", src, trg)?;
        }
        Ok(())
    }

    /// Creates a graph with nodes `0..n` where each of the `n(n-1)/2` possible edges is drawn
    /// independently with probability `p`.
    pub fn random<R: Rng + ?Sized>(n: usize, p: f64, rng: &mut R) -> Result<Self, ProcessingError> {
        if !(0.0..=1.0).contains(&p) {
            return Err(ProcessingError::InvalidParameter(format!("edge probability {} is not in [0, 1]", p)))
        }
        let mut graph = Graph::with_vertices(n);
        for src in 0..n {
            for trg in (src + 1)..n {
                if rng.gen_bool(p) {
                    graph.insert_edge(src, trg);
                }
            }
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;

    const PATH: &str = "Nombre de sommets\n3\nSommets\n1\n2\n3\nNombre d aretes\n2\nAretes\n1 2\n2 3\n";

    #[test]
    fn read_graph_test() {
        let graph = Graph::read_graph(Cursor::new(PATH));
        assert!(graph.is_ok());
        let graph = graph.unwrap();
        assert_eq!(graph.num_nodes(), 3);
        assert_eq!(graph.num_edges(), 2);
        assert!(graph.edge_exists((2, 1)));
        assert!(!graph.edge_exists((1, 3)));
        assert_eq!(graph.degree(2), Some(2));
        assert_eq!(graph.degree(4), None);
    }

    #[test]
    fn read_graph_errors_test() {
        let bad_header = PATH.replace("Sommets\n1", "Noeuds\n1");
        assert!(matches!(
            Graph::read_graph(Cursor::new(bad_header)),
            Err(ImportError::HeaderMismatch { line: 3, .. })
        ));
        let bad_int = PATH.replace("\n2\nAretes", "\ndeux\nAretes");
        assert!(matches!(
            Graph::read_graph(Cursor::new(bad_int)),
            Err(ImportError::BadIntError { line: 8, .. })
        ));
        let undeclared = PATH.replace("2 3\n", "2 4\n");
        assert!(matches!(
            Graph::read_graph(Cursor::new(undeclared)),
            Err(ImportError::UndeclaredVertex { line: 11, vertex: 4 })
        ));
        let truncated = PATH.replace("2 3\n", "");
        assert!(matches!(
            Graph::read_graph(Cursor::new(truncated)),
            Err(ImportError::InputMalformedError(11))
        ));
        let duplicate = PATH.replace("\n3\nNombre d aretes", "\n2\nNombre d aretes");
        assert!(matches!(
            Graph::read_graph(Cursor::new(duplicate)),
            Err(ImportError::InputMalformedError(6))
        ));
        let no_newline = PATH.trim_start_matches("Nombre de sommets\n");
        assert!(Graph::read_graph(Cursor::new(no_newline)).is_err());
    }

    #[test]
    fn write_read_test() {
        let graph = Graph::from_edges(&[(0, 4), (4, 7), (7, 0), (2, 3)]);
        let mut written = Vec::new();
        assert!(graph.write_graph(&mut written).is_ok());
        let reread = Graph::read_graph(Cursor::new(written)).unwrap();
        assert_eq!(reread, graph);
    }

    #[test]
    fn add_edge_test() {
        let mut graph = Graph::with_vertices(3);
        assert_eq!(graph.add_edge(0, 1).unwrap(), true);
        assert_eq!(graph.add_edge(1, 0).unwrap(), false);
        assert_eq!(graph.num_edges(), 1);
        assert!(graph.add_edge(2, 2).is_err());
        assert!(graph.add_edge(0, 5).is_err());
        assert!(graph.add_vertex(5));
        assert!(!graph.add_vertex(5));
        assert!(graph.add_edge(0, 5).is_ok());
        assert_eq!(graph.num_edges(), 2);
    }

    #[test]
    fn remove_test() {
        let graph = Graph::from_edges(&[(1, 2), (2, 3), (3, 4), (4, 1), (1, 3)]);
        let without_one = graph.remove_vertex(1).unwrap();
        assert_eq!(without_one.num_nodes(), 3);
        assert_eq!(without_one.num_edges(), 2);
        assert_eq!(graph.num_edges(), 5);
        assert!(graph.remove_vertex(9).is_err());

        let set: FxHashSet<usize> = vec![1, 3].into_iter().collect();
        let without_set = graph.remove_vertices(&set).unwrap();
        assert_eq!(without_set.num_nodes(), 2);
        assert_eq!(without_set.num_edges(), 0);
        assert_eq!(without_set, without_one.remove_vertex(3).unwrap());

        let missing: FxHashSet<usize> = vec![1, 9].into_iter().collect();
        assert!(graph.remove_vertices(&missing).is_err());
        assert_eq!(graph.remove_vertices(&FxHashSet::default()).unwrap(), graph);
    }

    #[test]
    fn degree_test() {
        let graph = Graph::from_edges(&[(5, 1), (5, 2), (3, 1), (3, 2), (4, 1)]);
        assert_eq!(graph.max_degree(), Some(3));
        assert_eq!(graph.max_degree_node(), Some(1));
        let degrees = graph.degrees();
        assert_eq!(degrees[&1], 3);
        assert_eq!(degrees[&4], 1);
        let graph = graph.remove_vertex(1).unwrap();
        assert_eq!(graph.max_degree_node(), Some(2));
        assert_eq!(graph.degree(4), Some(0));
        assert_eq!(Graph::default().max_degree_node(), None);
        assert_eq!(Graph::default().max_degree(), None);
        // Ties are broken by the lowest id.
        let matching = Graph::from_edges(&[(8, 9), (3, 4), (6, 7)]);
        assert_eq!(matching.max_degree_node(), Some(3));
        assert_eq!(graph.first_edge(), Some((2, 3)));
        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges, vec![(2, 3), (2, 5)]);
    }

    #[test]
    fn random_test() {
        let mut rng = StdRng::seed_from_u64(7);
        let complete = Graph::random(6, 1.0, &mut rng).unwrap();
        assert_eq!(complete.num_edges(), 15);
        let empty = Graph::random(6, 0.0, &mut rng).unwrap();
        assert_eq!(empty.num_nodes(), 6);
        assert!(!empty.has_edges());
        assert!(!empty.is_empty());
        assert!(Graph::random(0, 0.5, &mut rng).unwrap().is_empty());
        assert!(Graph::random(6, 1.5, &mut rng).is_err());
        assert!(Graph::random(6, f64::NAN, &mut rng).is_err());
    }
}
