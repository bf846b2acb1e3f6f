//! A single entry point over all solvers, used by the binaries and the benchmarks.

use std::fmt;
use std::str::FromStr;
use fxhash::FxHashSet;
use crate::config::{Branching, LowerBoundMethod, SearchConfig, UpperBoundMethod};
use crate::cust_error::ProcessingError;
use crate::graph::Graph;
use crate::vc_instance::VCInstance;

/// Parsed from and displayed as `matching`, `greedy`, `greedy-in-place`, `exhaustive`,
/// `bounded[:<upper>:<lower>]` or `improved[:<selection>[:eliminate]]`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Solver {
    Matching,
    Greedy,
    GreedyInPlace,
    Search(SearchConfig),
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Solution {
    pub cover: FxHashSet<usize>,
    /// Number of visited search nodes, `None` for approximations.
    pub visited: Option<usize>,
}

impl Solver {

    /// Returns `true` if the solver always returns a minimum cover.
    pub fn is_exact(&self) -> bool {
        matches!(self, Solver::Search(_))
    }

    pub fn solve(&self, graph: &Graph) -> Result<Solution, ProcessingError> {
        let (cover, visited) = match self {
            Solver::Matching => (graph.matching_cover(), None),
            Solver::Greedy => (graph.greedy_degree_cover(), None),
            Solver::GreedyInPlace => (graph.greedy_degree_cover_in_place(), None),
            Solver::Search(config) => {
                let mut instance = VCInstance::new(graph.clone());
                let result = instance.search(config)?;
                (result.cover, Some(result.visited))
            },
        };
        Ok(Solution { cover, visited })
    }
}

impl fmt::Display for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Matching => write!(f, "matching"),
            Self::Greedy => write!(f, "greedy"),
            Self::GreedyInPlace => write!(f, "greedy-in-place"),
            Self::Search(config) => match (config.branching, config.bounds) {
                (Branching::Edge, None) => write!(f, "exhaustive"),
                (Branching::Edge, Some(bounds)) => write!(f, "bounded:{}:{}", bounds.upper, bounds.lower),
                (Branching::Neighborhood, _) => write!(f, "improved:{}{}", config.selection,
                    if config.eliminate_degree_one { ":eliminate" } else { "" }),
            },
        }
    }
}

impl FromStr for Solver {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let name = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();
        let solver = match (name, args.as_slice()) {
            ("matching", []) => Solver::Matching,
            ("greedy", []) => Solver::Greedy,
            ("greedy-in-place", []) => Solver::GreedyInPlace,
            ("exhaustive", []) => Solver::Search(SearchConfig::exhaustive()),
            ("bounded", []) => Solver::Search(SearchConfig::bounded(UpperBoundMethod::Matching, LowerBoundMethod::All)),
            ("bounded", [upper, lower]) => Solver::Search(SearchConfig::bounded(upper.parse()?, lower.parse()?)),
            ("improved", []) => Solver::Search(SearchConfig::default()),
            ("improved", [selection]) => Solver::Search(SearchConfig::improved(selection.parse()?, false)),
            ("improved", [selection, "eliminate"]) => Solver::Search(SearchConfig::improved(selection.parse()?, true)),
            _ => return Err(ProcessingError::InvalidParameter(format!("unknown solver `{}`", s))),
        };
        Ok(solver)
    }
}
