//! Implementation of the approximations for the Vertex Cover Problem. Both are used by the
//! bounded search as fast producers of upper bounds, and on their own to compare solution
//! quality against the exact solvers.

use fxhash::FxHashSet;
use crate::graph::Graph;

impl Graph {

    /// Approximates the solution by walking the edges in lexicographic order and adding both
    /// endpoints of every edge that is not yet covered. The added edges form a maximal
    /// matching, so the result is at most twice as large as the optimal solution.
    ///
    /// Returns the approximated solution.
    pub fn matching_cover(&self) -> FxHashSet<usize> {
        let mut cover = FxHashSet::default();
        for (src, trg) in self.edges() {
            if !cover.contains(&src) && !cover.contains(&trg) {
                cover.insert(src);
                cover.insert(trg);
            }
        }
        cover
    }

    /// Computes an upper bound by repeatedly adding the node with the highest degree to the
    /// solution and deriving a new graph without that node, until no edge remains.
    pub fn greedy_degree_cover(&self) -> FxHashSet<usize> {
        let mut cover = FxHashSet::default();
        let mut current = self.clone();
        while current.has_edges() {
            let max_node = current
                .max_degree_node()
                .expect("`current` has edges");
            cover.insert(max_node);
            current = current
                .remove_vertex(max_node)
                .expect("`max_node` was taken from `current`");
        }
        cover
    }

    /// Same result as `greedy_degree_cover()`, but deletes the nodes from a single working
    /// copy instead of deriving a new graph at every step.
    pub fn greedy_degree_cover_in_place(&self) -> FxHashSet<usize> {
        let mut cover = FxHashSet::default();
        let mut clone = self.clone();
        while clone.has_edges() {
            let max_node = clone
                .max_degree_node()
                .expect("`clone` has edges");
            clone.delete_node(max_node);
            cover.insert(max_node);
        }
        cover
    }

}
