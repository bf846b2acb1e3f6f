//! Experiments on random graphs: running time, approximation ratio and search tree size as
//! functions of the number of nodes. Progress is shown on the console while sweeping.

use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::Rng;
use std::time::Instant;
use crate::config::{SearchConfig, VertexSelection};
use crate::cust_error::ProcessingError;
use crate::graph::Graph;
use crate::solver::Solver;

/// Number of sizes in a sweep.
pub const SAMPLES: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct TimingRow {
    pub n: usize,
    pub mean_seconds: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RatioRow {
    pub n: usize,
    /// `|approximate cover| / |minimum cover|` for every trial.
    pub ratios: Vec<f64>,
}

impl RatioRow {
    pub fn mean(&self) -> f64 {
        self.ratios.iter().sum::<f64>() / self.ratios.len().max(1) as f64
    }

    pub fn worst(&self) -> f64 {
        self.ratios.iter().copied().fold(0.0, f64::max)
    }
}

/// Returns `SAMPLES` evenly spaced sizes from `n_max / 10` to `n_max`, rounded down.
pub fn sample_sizes(n_max: usize) -> Vec<usize> {
    let start = n_max as f64 / 10.0;
    let end = n_max as f64;
    (0..SAMPLES)
        .map(|i| {
            if i == SAMPLES - 1 {
                n_max
            } else {
                (start + (end - start) * i as f64 / (SAMPLES - 1) as f64) as usize
            }
        })
        .collect()
}

fn progress_bar(len: usize) -> ProgressBar {
    let bar = ProgressBar::new(len as u64);
    bar.set_style(ProgressStyle::with_template("[{bar:20}] {percent:>3}%")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("# "));
    bar
}

fn check_trials(trials: usize) -> Result<(), ProcessingError> {
    if trials == 0 {
        return Err(ProcessingError::InvalidParameter("at least one trial is needed".to_owned()))
    }
    Ok(())
}

/// For every size `n` of `sample_sizes(n_max)`, runs `solver` on `trials` random graphs with
/// edge probability `density(n)` and returns the mean running time.
pub fn time_by_size<R, F>(n_max: usize, density: F, solver: &Solver, trials: usize, rng: &mut R)
    -> Result<Vec<TimingRow>, ProcessingError>
where
    R: Rng + ?Sized,
    F: Fn(usize) -> f64,
{
    check_trials(trials)?;
    let sizes = sample_sizes(n_max);
    let bar = progress_bar(sizes.len() * trials);
    let mut rows = Vec::with_capacity(sizes.len());
    for n in sizes {
        let mut total = 0.0;
        for _ in 0..trials {
            bar.inc(1);
            let graph = Graph::random(n, density(n), rng)?;
            let start = Instant::now();
            solver.solve(&graph)?;
            total += start.elapsed().as_secs_f64();
        }
        let row = TimingRow { n, mean_seconds: total / trials as f64 };
        info!("{}: n = {}, mean time {:.6}s", solver, row.n, row.mean_seconds);
        rows.push(row);
    }
    bar.finish();
    Ok(rows)
}

/// For every size of `sample_sizes(n_max)`, compares the cover of `solver` with a minimum cover
/// on `trials` random graphs with edge probability `p`. The ratio is 1 on graphs without edges.
pub fn approximation_ratio<R: Rng + ?Sized>(n_max: usize, p: f64, solver: &Solver, trials: usize, rng: &mut R)
    -> Result<Vec<RatioRow>, ProcessingError>
{
    check_trials(trials)?;
    let exact = Solver::Search(SearchConfig::improved(VertexSelection::MaxDegree, true));
    let sizes = sample_sizes(n_max);
    let bar = progress_bar(sizes.len() * trials);
    let mut rows = Vec::with_capacity(sizes.len());
    for n in sizes {
        let mut ratios = Vec::with_capacity(trials);
        for _ in 0..trials {
            bar.inc(1);
            let graph = Graph::random(n, p, rng)?;
            let approx = solver.solve(&graph)?.cover.len();
            let optimum = exact.solve(&graph)?.cover.len();
            ratios.push(if optimum == 0 { 1.0 } else { approx as f64 / optimum as f64 });
        }
        let row = RatioRow { n, ratios };
        info!("{}: n = {}, mean ratio {:.4}, worst {:.4}", solver, row.n, row.mean(), row.worst());
        rows.push(row);
    }
    bar.finish();
    Ok(rows)
}

/// For every `(n, p)` of `points`, draws one random graph and runs every solver on it.
/// Returns the visited node counts indexed by solver, then by point. Approximations count 0.
pub fn node_counts<R: Rng + ?Sized>(points: &[(usize, f64)], solvers: &[Solver], rng: &mut R)
    -> Result<Vec<Vec<usize>>, ProcessingError>
{
    let bar = progress_bar(points.len() * solvers.len());
    let mut counts = vec![Vec::with_capacity(points.len()); solvers.len()];
    for &(n, p) in points {
        let graph = Graph::random(n, p, rng)?;
        for (solver, row) in solvers.iter().zip(counts.iter_mut()) {
            bar.inc(1);
            let visited = solver.solve(&graph)?.visited.unwrap_or(0);
            info!("{}: n = {}, p = {}, {} nodes visited", solver, n, p, visited);
            row.push(visited);
        }
    }
    bar.finish();
    Ok(counts)
}
