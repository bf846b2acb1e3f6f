//! Binary that reads a graph from a file (or standard in), computes a vertex cover with the
//! selected solver and writes the solution to standard out, one node per line.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use log::{info, warn};

use cover_search::{graph::Graph, solver::Solver, vc_instance::VCInstance, cust_error::ProcessingError};

#[derive(Parser)]
#[command(name = "exact")]
#[command(about = "Computes a minimum (or approximate) vertex cover of a graph", long_about = None)]
struct Cli {
    /// Graph file, read from standard in if omitted
    input: Option<PathBuf>,
    /// matching, greedy, greedy-in-place, exhaustive, bounded[:<upper>:<lower>] or
    /// improved[:<selection>[:eliminate]]
    #[arg(long, default_value = "improved")]
    solver: Solver,
    /// Gives up after visiting this many search nodes
    #[arg(long)]
    node_limit: Option<usize>,
    /// Gives up when this many partial covers are pending
    #[arg(long)]
    stack_limit: Option<usize>,
}

pub fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let graph = match &cli.input {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
            Graph::read_graph(BufReader::new(file))
        },
        None => Graph::read_graph(io::stdin().lock()),
    }.context("cannot read the graph")?;
    info!("read graph with {} nodes and {} edges", graph.num_nodes(), graph.num_edges());

    let solver = match cli.solver {
        Solver::Search(config) => Solver::Search(config
            .with_node_limit(cli.node_limit)
            .with_stack_limit(cli.stack_limit)),
        other => other,
    };
    let solution = match solver.solve(&graph) {
        Ok(solution) => solution,
        Err(ProcessingError::ResourceExhausted { visited, incumbent, reason }) => {
            warn!("{}: writing the best cover found, which may not be minimum", solver);
            VCInstance::write_solution(&incumbent, io::stdout().lock())?;
            bail!(ProcessingError::ResourceExhausted { visited, incumbent, reason });
        },
        Err(e) => return Err(e.into()),
    };

    // Validate
    if !graph.is_cover(&solution.cover) {
        bail!(ProcessingError::InvalidSolution(format!("{} returned a set that is not a cover", solver)));
    }
    match solution.visited {
        Some(visited) => info!("{}: cover of size {} after {} nodes", solver, solution.cover.len(), visited),
        None => info!("{}: cover of size {}", solver, solution.cover.len()),
    }

    let stdout = io::stdout();
    VCInstance::write_solution(&solution.cover, stdout.lock())?;
    Ok(())
}
