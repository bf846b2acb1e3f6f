//! Parameters of the bounded search.

use std::fmt;
use std::str::FromStr;
use crate::cust_error::ProcessingError;

/// How a search node is split into children.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Branching {
    /// Takes the first edge `(u, v)` and branches on `u` and on `v`.
    Edge,
    /// Takes a node `u` and branches on `u` and on all neighbors of `u`.
    Neighborhood,
}

/// Which approximation tightens the running upper bound at every inner node.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum UpperBoundMethod {
    Matching,
    Greedy,
    /// Only complete covers found by the search tighten the upper bound.
    Naive,
}

/// Which lower bounds are computed at every inner node.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LowerBoundMethod {
    /// Degree, matching and quadratic bound.
    All,
    /// Degree and quadratic bound.
    DegreeQuadratic,
    /// The size of the partial cover alone.
    Naive,
}

/// Which node `Branching::Neighborhood` branches on.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum VertexSelection {
    FirstEdgeEndpoint,
    MaxDegree,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BoundMethods {
    pub upper: UpperBoundMethod,
    pub lower: LowerBoundMethod,
}

/// Configuration of one run of `VCInstance::search()`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SearchConfig {
    pub branching: Branching,
    /// `None` disables pruning.
    pub bounds: Option<BoundMethods>,
    pub selection: VertexSelection,
    /// Skips the branch that takes `u` alone when `u` has degree 1. Only used with
    /// `Branching::Neighborhood`.
    pub eliminate_degree_one: bool,
    /// Maximal number of visited nodes.
    pub node_limit: Option<usize>,
    /// Maximal number of pending partial covers.
    pub stack_limit: Option<usize>,
}

impl SearchConfig {

    /// Edge branching without any pruning.
    pub fn exhaustive() -> Self {
        SearchConfig {
            branching: Branching::Edge,
            bounds: None,
            selection: VertexSelection::FirstEdgeEndpoint,
            eliminate_degree_one: false,
            node_limit: None,
            stack_limit: None,
        }
    }

    /// Edge branching, pruned with the given bounds.
    pub fn bounded(upper: UpperBoundMethod, lower: LowerBoundMethod) -> Self {
        SearchConfig {
            bounds: Some(BoundMethods { upper, lower }),
            ..SearchConfig::exhaustive()
        }
    }

    /// Neighborhood branching, pruned with the matching upper bound and all lower bounds.
    pub fn improved(selection: VertexSelection, eliminate_degree_one: bool) -> Self {
        SearchConfig {
            branching: Branching::Neighborhood,
            bounds: Some(BoundMethods { upper: UpperBoundMethod::Matching, lower: LowerBoundMethod::All }),
            selection,
            eliminate_degree_one,
            node_limit: None,
            stack_limit: None,
        }
    }

    pub fn with_node_limit(mut self, limit: Option<usize>) -> Self {
        self.node_limit = limit;
        self
    }

    pub fn with_stack_limit(mut self, limit: Option<usize>) -> Self {
        self.stack_limit = limit;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig::improved(VertexSelection::MaxDegree, true)
    }
}

fn unknown(kind: &str, s: &str) -> ProcessingError {
    ProcessingError::InvalidParameter(format!("unknown {} `{}`", kind, s))
}

impl FromStr for UpperBoundMethod {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "matching" => Ok(UpperBoundMethod::Matching),
            "greedy" => Ok(UpperBoundMethod::Greedy),
            "naive" => Ok(UpperBoundMethod::Naive),
            _ => Err(unknown("upper bound method", s)),
        }
    }
}

impl fmt::Display for UpperBoundMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Matching => write!(f, "matching"),
            Self::Greedy => write!(f, "greedy"),
            Self::Naive => write!(f, "naive"),
        }
    }
}

impl FromStr for LowerBoundMethod {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(LowerBoundMethod::All),
            "degree-quadratic" => Ok(LowerBoundMethod::DegreeQuadratic),
            "naive" => Ok(LowerBoundMethod::Naive),
            _ => Err(unknown("lower bound method", s)),
        }
    }
}

impl fmt::Display for LowerBoundMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::DegreeQuadratic => write!(f, "degree-quadratic"),
            Self::Naive => write!(f, "naive"),
        }
    }
}

impl FromStr for VertexSelection {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first-edge" => Ok(VertexSelection::FirstEdgeEndpoint),
            "max-degree" => Ok(VertexSelection::MaxDegree),
            _ => Err(unknown("vertex selection", s)),
        }
    }
}

impl fmt::Display for VertexSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstEdgeEndpoint => write!(f, "first-edge"),
            Self::MaxDegree => write!(f, "max-degree"),
        }
    }
}
