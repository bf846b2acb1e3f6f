//! Implementation of the bounded search tree algorithms.
//!
//! All variants share one loop over an explicit stack of partial covers. A partial cover `C`
//! stands for the residual graph `G - C`. Popping `C` either records a complete cover (no edge
//! is left), prunes it (its lower bound exceeds the best upper bound), or pushes children that
//! extend `C` so that every cover containing `C` is found below one of them.

use crate::config::{BoundMethods, Branching, LowerBoundMethod, SearchConfig, UpperBoundMethod, VertexSelection};
use crate::cust_error::ProcessingError;
use crate::graph::Graph;
use crate::vc_instance::VCInstance;
use fxhash::FxHashSet;
use log::{debug, info, trace, warn};

/// The outcome of a search: the smallest cover found and the size of the explored tree.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SearchResult {
    pub cover: FxHashSet<usize>,
    pub visited: usize,
    pub pruned: usize,
}

impl VCInstance {

    /// Finds an optimal vertex cover by branching on both endpoints of an edge, without any
    /// pruning.
    pub fn branch_exhaustive(&mut self) -> Result<SearchResult, ProcessingError> {
        self.search(&SearchConfig::exhaustive())
    }

    /// Finds an optimal vertex cover by branching on both endpoints of an edge and cutting every
    /// node whose lower bound, computed with `lower`, exceeds the upper bound, tightened with
    /// `upper`.
    pub fn branch_and_bound(&mut self, upper: UpperBoundMethod, lower: LowerBoundMethod) -> Result<SearchResult, ProcessingError> {
        self.search(&SearchConfig::bounded(upper, lower))
    }

    /// Finds an optimal vertex cover by branching on a node `u` and on the neighborhood of `u`,
    /// pruned with the matching upper bound and all lower bounds.
    ///
    /// With `eliminate_degree_one` the branch on `u` is skipped when `u` has degree 1: its
    /// neighbor covers the same edge and possibly more, so some optimal cover avoids `u`.
    pub fn branch_improved(&mut self, selection: VertexSelection, eliminate_degree_one: bool) -> Result<SearchResult, ProcessingError> {
        self.search(&SearchConfig::improved(selection, eliminate_degree_one))
    }

    /// Runs the search described by `config` from scratch. `self.graph` is only read.
    ///
    /// In every iteration the algorithm does the following:
    /// 1. Pops a partial cover and computes its residual graph.
    /// 2. If no edge is left, the partial cover is a complete cover and replaces the current best
    ///    if it is smaller.
    /// 3. If bounds are configured, tightens the upper bound with an approximation on the
    ///    residual graph, and drops the node if `|partial| + lower bound > upper bound`.
    /// 4. Pushes the children given by `config.branching`.
    ///
    /// A `ProcessingError::ResourceExhausted` is returned if a limit of `config` is exceeded or
    /// the stack cannot grow.
    pub fn search(&mut self, config: &SearchConfig) -> Result<SearchResult, ProcessingError> {
        self.reset();
        let mut stack: Vec<FxHashSet<usize>> = vec![FxHashSet::default()];
        while let Some(partial) = stack.pop() {
            self.visited += 1;
            if let Some(limit) = config.node_limit {
                if self.visited > limit {
                    return Err(self.exhausted(format!("node limit {} reached", limit)))
                }
            }
            let residual = self.graph.remove_vertices(&partial)?;
            trace!("node {}: partial cover {:?}, {} nodes and {} edges left",
                self.visited, partial, residual.num_nodes(), residual.num_edges());
            if !residual.has_edges() {
                if self.update_current_best(&partial) {
                    debug!("node {}: new best cover of size {}", self.visited, partial.len());
                }
                continue
            }
            if let Some(methods) = config.bounds {
                if !self.within_bounds(&partial, &residual, methods) {
                    self.pruned += 1;
                    continue
                }
            }
            let children = branch(&partial, &residual, config);
            if let Some(limit) = config.stack_limit {
                if stack.len() + children.len() > limit {
                    return Err(self.exhausted(format!("stack limit {} reached", limit)))
                }
            }
            if let Err(e) = stack.try_reserve(children.len()) {
                return Err(self.exhausted(e.to_string()))
            }
            stack.extend(children);
        }
        info!("search finished: cover of size {}, {} nodes visited, {} pruned",
            self.current_best.len(), self.visited, self.pruned);
        Ok(SearchResult {
            cover: self.current_best.clone(),
            visited: self.visited,
            pruned: self.pruned,
        })
    }

    /// Tightens the upper bound with the approximation selected in `methods` and checks if the
    /// node `partial` can still lead to a cover no larger than the upper bound.
    fn within_bounds(&mut self, partial: &FxHashSet<usize>, residual: &Graph, methods: BoundMethods) -> bool {
        let matching = match (methods.upper, methods.lower) {
            (UpperBoundMethod::Matching, _) | (_, LowerBoundMethod::All) => Some(residual.matching_cover()),
            _ => None,
        };
        let candidate = match methods.upper {
            UpperBoundMethod::Matching => matching.as_ref().map(|cover| cover.len()),
            UpperBoundMethod::Greedy => Some(residual.greedy_degree_cover_in_place().len()),
            UpperBoundMethod::Naive => None,
        };
        if let Some(size) = candidate {
            self.update_upper_bound(partial.len() + size);
        }
        let bounds = residual.lower_bounds(methods.lower, matching.as_ref());
        let lower_bound = partial.len() + bounds.best();
        trace!("node {}: lower bound {} from {:?}, upper bound {}",
            self.visited, lower_bound, bounds, self.upper_bound);
        lower_bound <= self.upper_bound
    }

    fn exhausted(&self, reason: String) -> ProcessingError {
        warn!("search aborted after {} nodes: {}", self.visited, reason);
        ProcessingError::ResourceExhausted {
            visited: self.visited,
            incumbent: self.current_best.clone(),
            reason,
        }
    }

}

/// Returns the children of `partial` in push order, so the last one is explored first.
fn branch(partial: &FxHashSet<usize>, residual: &Graph, config: &SearchConfig) -> Vec<FxHashSet<usize>> {
    match config.branching {
        Branching::Edge => {
            let (src, trg) = residual.first_edge().expect("`residual` has edges");
            vec![extended(partial, [trg]), extended(partial, [src])]
        },
        Branching::Neighborhood => {
            let node = match config.selection {
                VertexSelection::FirstEdgeEndpoint => residual.first_edge().map(|(src, _)| src),
                VertexSelection::MaxDegree => residual.max_degree_node(),
            }.expect("`residual` has edges");
            let neighbors = residual.neighbors(node).expect("`node` is in `residual`");
            let mut children = vec![extended(partial, neighbors.iter().copied())];
            if !(config.eliminate_degree_one && neighbors.len() == 1) {
                children.push(extended(partial, [node]));
            }
            children
        },
    }
}

fn extended(partial: &FxHashSet<usize>, nodes: impl IntoIterator<Item=usize>) -> FxHashSet<usize> {
    let mut child = partial.clone();
    child.extend(nodes);
    child
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::vc_instance::VCInstance;

    const SIXTEEN: &[(usize, usize)] = &[(1, 2), (1, 3), (1, 4), (1, 5), (1, 6), (2, 3), (2, 4),
        (2, 5), (2, 10), (3, 4), (3, 5), (3, 9), (4, 5), (4, 8), (5, 7), (6, 11), (6, 12), (7, 13),
        (8, 14), (9, 15), (10, 16), (11, 12), (11, 13), (11, 15), (11, 16), (12, 13), (12, 14),
        (12, 16), (13, 14), (13, 15), (14, 15), (14, 16), (15, 16)];

    const INTERTWINED_CLIQUES: &[(usize, usize)] = &[(1, 2), (1, 3), (1, 4), (1, 5), (1, 9), (2, 3),
        (2, 4), (2, 6), (2, 10), (3, 4), (3, 7), (3, 11), (4, 8), (4, 12), (5, 6), (5, 7), (5, 8),
        (5, 9), (6, 7), (6, 8), (6, 10), (7, 8), (7, 11), (8, 12), (9, 10), (9, 11), (9, 12),
        (10, 11), (10, 12), (11, 12)];

    fn pruned_configs() -> Vec<SearchConfig> {
        let mut configs = Vec::new();
        for upper in [UpperBoundMethod::Matching, UpperBoundMethod::Greedy, UpperBoundMethod::Naive] {
            for lower in [LowerBoundMethod::All, LowerBoundMethod::DegreeQuadratic, LowerBoundMethod::Naive] {
                configs.push(SearchConfig::bounded(upper, lower));
            }
        }
        for selection in [VertexSelection::FirstEdgeEndpoint, VertexSelection::MaxDegree] {
            for eliminate in [false, true] {
                configs.push(SearchConfig::improved(selection, eliminate));
            }
        }
        configs
    }

    fn all_configs() -> Vec<SearchConfig> {
        let mut configs = vec![SearchConfig::exhaustive()];
        configs.extend(pruned_configs());
        configs
    }

    #[test]
    fn path_test() {
        let mut ins = VCInstance::new(Graph::from_edges(&[(1, 2), (2, 3)]));
        let result = ins.branch_exhaustive().unwrap();
        assert_eq!(result.cover, vec![2].into_iter().collect());
        assert_eq!(result.visited, 5);
        assert_eq!(result.pruned, 0);
        for config in all_configs() {
            let result = ins.search(&config).unwrap();
            assert_eq!(result.cover.len(), 1);
            assert!(ins.validate_solution(&result.cover));
        }
        let result = ins.branch_improved(VertexSelection::FirstEdgeEndpoint, true).unwrap();
        assert_eq!(result.visited, 2);
    }

    #[test]
    fn triangle_test() {
        let mut ins = VCInstance::new(Graph::from_edges(&[(1, 2), (2, 3), (1, 3)]));
        let exhaustive = ins.branch_exhaustive().unwrap();
        assert_eq!(exhaustive.cover.len(), 2);
        assert_eq!(exhaustive.visited, 7);
        let improved = ins.branch_improved(VertexSelection::FirstEdgeEndpoint, false).unwrap();
        assert_eq!(improved.cover.len(), 2);
        assert_eq!(improved.visited, 5);
        assert!(exhaustive.visited > improved.visited);
        for config in all_configs() {
            let result = ins.search(&config).unwrap();
            assert_eq!(result.cover.len(), 2);
            assert!(ins.validate_solution(&result.cover));
        }
    }

    #[test]
    fn no_edges_test() {
        for graph in [Graph::with_vertices(4), Graph::default()] {
            let mut ins = VCInstance::new(graph);
            for config in all_configs() {
                let result = ins.search(&config).unwrap();
                assert!(result.cover.is_empty());
                assert_eq!(result.visited, 1);
            }
        }
    }

    #[test]
    fn intertwined_cliques_test() {
        let mut ins = VCInstance::new(Graph::from_edges(INTERTWINED_CLIQUES));
        let exhaustive = ins.branch_exhaustive().unwrap();
        assert_eq!(exhaustive.cover.len(), 9);
        for config in pruned_configs() {
            let result = ins.search(&config).unwrap();
            assert_eq!(result.cover.len(), 9);
            assert!(ins.validate_solution(&result.cover));
            if config.branching == Branching::Edge {
                // Same tree as the exhaustive search, minus the cut subtrees.
                assert!(result.visited <= exhaustive.visited);
            }
        }
    }

    #[test]
    fn branch_and_bound_test() {
        let mut ins = VCInstance::new(Graph::from_edges(SIXTEEN));
        let bounded = ins.branch_and_bound(UpperBoundMethod::Matching, LowerBoundMethod::All).unwrap();
        assert_eq!(bounded.cover.len(), 10);
        assert!(ins.validate_solution(&bounded.cover));
        let improved = ins.branch_improved(VertexSelection::MaxDegree, true).unwrap();
        assert_eq!(improved.cover.len(), 10);
        assert!(ins.validate_solution(&improved.cover));
    }

    #[test]
    fn pruning_test() {
        let mut ins = VCInstance::new(Graph::from_edges(SIXTEEN));
        let exhaustive = ins.branch_exhaustive().unwrap();
        assert_eq!((exhaustive.visited, exhaustive.pruned), (12945, 0));
        let expected = [
            (SearchConfig::bounded(UpperBoundMethod::Matching, LowerBoundMethod::All), 631, 210),
            (SearchConfig::bounded(UpperBoundMethod::Greedy, LowerBoundMethod::DegreeQuadratic), 873, 401),
            (SearchConfig::bounded(UpperBoundMethod::Naive, LowerBoundMethod::Naive), 4339, 1491),
            (SearchConfig::improved(VertexSelection::FirstEdgeEndpoint, false), 259, 54),
            (SearchConfig::improved(VertexSelection::FirstEdgeEndpoint, true), 53, 1),
            (SearchConfig::default(), 54, 11),
        ];
        for (config, visited, pruned) in expected {
            let result = ins.search(&config).unwrap();
            assert_eq!(result.cover.len(), 10);
            assert_eq!((result.visited, result.pruned), (visited, pruned), "{:?}", config);
            assert!(result.pruned > 0);
            assert!(result.visited < exhaustive.visited);
        }
        // Lower bounds cut whole subtrees before the incumbent alone could.
        let naive = ins.branch_and_bound(UpperBoundMethod::Naive, LowerBoundMethod::Naive).unwrap();
        let all = ins.branch_and_bound(UpperBoundMethod::Matching, LowerBoundMethod::All).unwrap();
        assert!(all.visited < naive.visited);
    }

    #[test]
    fn upper_bound_methods_test() {
        // A star whose center has the highest id, so edge branching takes the leaves first.
        let star: Vec<(usize, usize)> = (1..8).map(|leaf| (leaf, 8)).collect();
        let mut ins = VCInstance::new(Graph::from_edges(&star));
        let mut counts = Vec::new();
        for upper in [UpperBoundMethod::Greedy, UpperBoundMethod::Matching, UpperBoundMethod::Naive] {
            let result = ins.branch_and_bound(upper, LowerBoundMethod::Naive).unwrap();
            assert_eq!(result.cover, vec![8].into_iter().collect());
            counts.push((result.visited, result.pruned));
        }
        assert_eq!(counts, vec![(5, 1), (7, 1), (15, 0)]);

        let mut counts = Vec::new();
        for upper in [UpperBoundMethod::Greedy, UpperBoundMethod::Matching, UpperBoundMethod::Naive] {
            let result = ins.branch_and_bound(upper, LowerBoundMethod::All).unwrap();
            assert_eq!(result.cover.len(), 1);
            counts.push(result.visited);
        }
        assert_eq!(counts, vec![3, 5, 15]);
        let intertwined = Graph::from_edges(INTERTWINED_CLIQUES);
        let mut ins = VCInstance::new(intertwined);
        let greedy = ins.branch_and_bound(UpperBoundMethod::Greedy, LowerBoundMethod::Naive).unwrap();
        let naive = ins.branch_and_bound(UpperBoundMethod::Naive, LowerBoundMethod::Naive).unwrap();
        assert_eq!((greedy.visited, naive.visited), (1919, 2015));
    }

    #[test]
    fn repeated_search_test() {
        let mut ins = VCInstance::new(Graph::from_edges(INTERTWINED_CLIQUES));
        let config = SearchConfig::improved(VertexSelection::MaxDegree, false);
        let first = ins.search(&config).unwrap();
        let second = ins.search(&config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn limits_test() {
        let mut ins = VCInstance::new(Graph::from_edges(INTERTWINED_CLIQUES));
        let limited = ins.search(&SearchConfig::exhaustive().with_node_limit(Some(3)));
        assert!(matches!(limited, Err(ProcessingError::ResourceExhausted { visited: 4, .. })));
        let limited = ins.search(&SearchConfig::exhaustive().with_stack_limit(Some(1)));
        match limited {
            Err(ProcessingError::ResourceExhausted { visited, incumbent, .. }) => {
                assert_eq!(visited, 1);
                assert_eq!(incumbent, ins.graph.nodes().collect());
            },
            other => panic!("expected an exhausted search, got {:?}", other),
        }
        assert!(ins.search(&SearchConfig::exhaustive().with_stack_limit(Some(64))).is_ok());
    }

}
