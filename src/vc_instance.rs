use crate::graph::Graph;
use fxhash::FxHashSet;
use std::io::{Write};
use std::io;

/// A vertex cover instance: the input graph, which the search never mutates, together with
/// the best cover found so far and the search counters.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct VCInstance {
    pub graph: Graph,
    /// Size of the smallest cover known to exist. Can be below `current_best.len()` when an
    /// approximation found a smaller cover than the search itself.
    pub upper_bound: usize,
    pub current_best: FxHashSet<usize>,
    /// Number of search nodes popped from the stack.
    pub visited: usize,
    /// Number of search nodes whose children were cut by the bounds.
    pub pruned: usize,
}

impl VCInstance {

    /// Creates a new instance. The initial solution is the set of all nodes.
    pub fn new(graph: Graph) -> Self {
        let current_best: FxHashSet<usize> = graph.nodes().collect();
        VCInstance {
            upper_bound: current_best.len(),
            current_best,
            graph,
            visited: 0,
            pruned: 0,
        }
    }

    /// Resets the solution, the bounds and the counters to their initial state.
    pub fn reset(&mut self) {
        self.current_best = self.graph.nodes().collect();
        self.upper_bound = self.current_best.len();
        self.visited = 0;
        self.pruned = 0;
    }

    /// Lowers the upper bound to `ub` if that is smaller.
    pub fn update_upper_bound(&mut self, ub: usize) {
        if ub < self.upper_bound {
            self.upper_bound = ub;
        }
    }

    /// Updates the current best solution and the upper bound if `some_sol` is smaller.
    /// Returns `true` if `some_sol` became the current best.
    pub fn update_current_best(&mut self, some_sol: &FxHashSet<usize>) -> bool {
        if some_sol.len() < self.current_best.len() {
            self.current_best = some_sol.clone();
            self.update_upper_bound(some_sol.len());
            return true
        }
        false
    }

    /// Checks if a solution is valid.
    pub fn validate_solution(&self, sol: &FxHashSet<usize>) -> bool {
        sol.iter().all(|node| self.graph.contains(*node)) && self.graph.is_cover(sol)
    }

}

impl VCInstance {

    /// Writes a solution to a `Write` type, one node per line in ascending order.
    pub fn write_solution<W: Write>(solution: &FxHashSet<usize>, mut out: W) -> Result<(), io::Error> {
        let mut sorted: Vec<&usize> = solution.iter().collect();
        sorted.sort_unstable();
        for elem in sorted {
            writeln!(out, "{}", elem)?;
        }
        Ok(())
    }

}
