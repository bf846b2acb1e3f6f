//! Command-style driver for the experiments on random graphs. Results are written to standard
//! out as tab separated rows, progress and logs go to standard error.

use anyhow::bail;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use cover_search::benchmark::{approximation_ratio, node_counts, time_by_size};
use cover_search::solver::Solver;

#[derive(Parser)]
#[command(name = "bench")]
#[command(about = "Compares vertex cover solvers on random graphs", long_about = None)]
struct Cli {
    /// Seed of the random graphs, drawn from entropy if omitted
    #[arg(long, global = true)]
    seed: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Mean running time for ten sizes up to `n-max`
    Time {
        #[arg(long)]
        n_max: usize,
        /// Constant edge probability
        #[arg(long, conflicts_with = "p_scale")]
        p: Option<f64>,
        /// Edge probability `p-scale / n`, capped at 1
        #[arg(long)]
        p_scale: Option<f64>,
        #[arg(long, default_value_t = 10)]
        trials: usize,
        #[arg(long, default_value = "improved")]
        solver: Solver,
    },
    /// Ratio between an approximate and a minimum cover for ten sizes up to `n-max`
    Ratio {
        #[arg(long)]
        n_max: usize,
        #[arg(long)]
        p: f64,
        #[arg(long, default_value_t = 10)]
        trials: usize,
        #[arg(long, default_value = "matching")]
        solver: Solver,
    },
    /// Visited search nodes of several solvers on the same graphs
    Nodes {
        #[arg(long, value_delimiter = ',')]
        sizes: Vec<usize>,
        #[arg(long)]
        p: f64,
        #[arg(long, value_delimiter = ',', default_values = ["exhaustive", "bounded", "improved"])]
        solvers: Vec<Solver>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match cli.command {
        Command::Time { n_max, p, p_scale, trials, solver } => {
            let rows = match (p, p_scale) {
                (Some(p), None) => time_by_size(n_max, |_| p, &solver, trials, &mut rng)?,
                (None, Some(scale)) => time_by_size(n_max, |n| (scale / n.max(1) as f64).min(1.0), &solver, trials, &mut rng)?,
                _ => bail!("exactly one of --p and --p-scale is required"),
            };
            println!("n\tseconds");
            for row in rows {
                println!("{}\t{:.6}", row.n, row.mean_seconds);
            }
        },
        Command::Ratio { n_max, p, trials, solver } => {
            let rows = approximation_ratio(n_max, p, &solver, trials, &mut rng)?;
            println!("n\tmean\tworst");
            for row in rows {
                println!("{}\t{:.4}\t{:.4}", row.n, row.mean(), row.worst());
            }
        },
        Command::Nodes { sizes, p, solvers } => {
            let points: Vec<(usize, f64)> = sizes.iter().map(|n| (*n, p)).collect();
            let counts = node_counts(&points, &solvers, &mut rng)?;
            let header: Vec<String> = sizes.iter().map(|n| n.to_string()).collect();
            println!("solver\t{}", header.join("\t"));
            for (solver, row) in solvers.iter().zip(counts) {
                let row: Vec<String> = row.iter().map(|visited| visited.to_string()).collect();
                println!("{}\t{}", solver, row.join("\t"));
            }
        },
    }
    Ok(())
}
