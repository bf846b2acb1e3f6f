//! This module contains all custom errors used in this library.

use std::num::ParseIntError;
use fxhash::FxHashSet;
use thiserror::Error;

/// Errors raised while reading a graph file. All of them abort the construction of the graph.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Import: IoError: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Import: line {line}: expected header {expected:?}, found {found:?}.")]
    HeaderMismatch {
        line: usize,
        expected: &'static str,
        found: String,
    },
    #[error("Import: line {0}: input is malformed.")]
    InputMalformedError(usize),
    #[error("Import: line {line}: integer is malformed.")]
    BadIntError {
        line: usize,
        #[source]
        source: ParseIntError,
    },
    #[error("Import: line {line}: edge references undeclared vertex {vertex}.")]
    UndeclaredVertex { line: usize, vertex: usize },
}

#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("InvalidSolution: {0}")]
    InvalidSolution(String),
    /// The search outgrew a configured limit or could not allocate more stack space.
    /// `incumbent` is the best cover found before giving up. It is a valid cover of the input
    /// graph but not verified to be minimum.
    #[error("Resource exhausted after {} nodes ({}), best cover so far has size {}", .visited, .reason, .incumbent.len())]
    ResourceExhausted {
        visited: usize,
        incumbent: FxHashSet<usize>,
        reason: String,
    },
}
