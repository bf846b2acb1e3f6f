pub mod graph;
pub mod cust_error;
pub mod config;
pub mod vc_instance;
pub mod heuristics;
pub mod lower_bound;
pub mod bounded_search;
pub mod solver;
pub mod benchmark;
