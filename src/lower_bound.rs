//! Lower bounds on the size of a vertex cover of a (residual) graph.
//!
//! Three independent bounds are computed and the largest one is used:
//! * the degree bound `ceil(m / max_degree)`, since no node covers more than `max_degree` edges,
//! * the matching bound, half the size of `Graph::matching_cover()`, since every edge of a
//!   matching needs its own node,
//! * the quadratic bound, the smallest `k` with `k(2n-k-1)/2 >= m`, since `k` nodes cover at
//!   most that many edges of a simple graph.
//!
//! Each bound is `None` on a graph without edges.

use fxhash::FxHashSet;
use crate::config::LowerBoundMethod;
use crate::graph::Graph;

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct LowerBounds {
    pub degree: Option<usize>,
    pub matching: Option<usize>,
    pub quadratic: Option<usize>,
}

impl LowerBounds {

    /// Returns the largest available bound, or 0 if none is available.
    pub fn best(&self) -> usize {
        [self.degree, self.matching, self.quadratic]
            .into_iter()
            .flatten()
            .max()
            .unwrap_or(0)
    }
}

impl Graph {

    pub fn degree_bound(&self) -> Option<usize> {
        let m = self.num_edges();
        if m == 0 {
            return None
        }
        let max_degree = self.max_degree().expect("a graph with edges has nodes");
        Some((m + max_degree - 1) / max_degree)
    }

    /// Returns half the size of `matching`, which must be the result of `matching_cover()` on
    /// `self`.
    pub fn matching_bound(&self, matching: &FxHashSet<usize>) -> Option<usize> {
        if !self.has_edges() {
            return None
        }
        Some(matching.len() / 2)
    }

    /// Returns the smallest root of `k^2 - (2n-1)k + 2m = 0`, rounded up to the smallest integer
    /// `k` with `k(2n-k-1)/2 >= m`. The rounding is done in integers so that floating point
    /// error can never push the bound above the true value.
    pub fn quadratic_bound(&self) -> Option<usize> {
        let m = self.num_edges();
        if m == 0 {
            return None
        }
        let n = self.num_nodes();
        let a = 2.0 * n as f64 - 1.0;
        let discriminant = a * a - 8.0 * m as f64;
        if discriminant < 0.0 {
            return None
        }
        let root = (a - discriminant.sqrt()) / 2.0;
        // k(2n-k-1) is always even and non-decreasing for k in 0..=n.
        let coverable = |k: usize| k * (2 * n - k - 1) / 2;
        let mut k = (root.ceil().max(0.0) as usize).min(n);
        while k > 0 && coverable(k - 1) >= m {
            k -= 1;
        }
        while k < n && coverable(k) < m {
            k += 1;
        }
        Some(k)
    }

    /// Computes the bounds selected by `method`. `matching` may pass an already computed
    /// `matching_cover()` of `self` to avoid computing it twice.
    pub fn lower_bounds(&self, method: LowerBoundMethod, matching: Option<&FxHashSet<usize>>) -> LowerBounds {
        match method {
            LowerBoundMethod::Naive => LowerBounds::default(),
            LowerBoundMethod::DegreeQuadratic => LowerBounds {
                degree: self.degree_bound(),
                matching: None,
                quadratic: self.quadratic_bound(),
            },
            LowerBoundMethod::All => {
                let matching = match matching {
                    Some(matching) => self.matching_bound(matching),
                    None => self.matching_bound(&self.matching_cover()),
                };
                LowerBounds {
                    degree: self.degree_bound(),
                    matching,
                    quadratic: self.quadratic_bound(),
                }
            },
        }
    }

}
