//! Scaling sweep: repeat a run for several worker counts and summarize the timings.

use std::fmt;
use std::time::Duration;

use crate::error::Result;
use crate::monte_carlo::Estimate;

/// Timing summary for one worker count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepRow {
    pub workers: usize,
    /// Mean elapsed time in seconds.
    pub mean: f64,
    /// Sample variance of the elapsed times.
    pub dispersion: f64,
}

/// Result of a full sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepReport {
    pub rows: Vec<SweepRow>,
    /// Mean estimated area over every run of every worker count.
    pub average_area: f64,
}

/// Returns the mean and sample variance of `samples`.
///
/// The variance divides by `n - 1`, or by `n` for a single sample.
pub fn mean_and_dispersion(samples: &[f64]) -> (f64, f64) {
    if samples.is_empty() {
        return (0.0, 0.0);
    }
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let squares: f64 = samples.iter().map(|s| (s - mean).powi(2)).sum();
    let denominator = if samples.len() == 1 { n } else { n - 1.0 };
    (mean, squares / denominator)
}

/// Calls `run` `repeats` times for each entry of `worker_counts`.
///
/// `run` receives the worker count and returns the estimate with its elapsed
/// time. A `repeats` of zero is treated as one. The first failing run aborts
/// the sweep.
pub fn sweep<F>(worker_counts: &[usize], repeats: usize, mut run: F) -> Result<SweepReport>
where
    F: FnMut(usize) -> Result<(Estimate, Duration)>,
{
    let repeats = repeats.max(1);
    let mut rows = Vec::with_capacity(worker_counts.len());
    let mut areas = Vec::with_capacity(worker_counts.len() * repeats);

    for &workers in worker_counts {
        let mut times = Vec::with_capacity(repeats);
        for _ in 0..repeats {
            let (estimate, elapsed) = run(workers)?;
            times.push(elapsed.as_secs_f64());
            areas.push(estimate.area);
        }
        let (mean, dispersion) = mean_and_dispersion(&times);
        log::info!("{} workers: mean {:.6}s over {} runs", workers, mean, repeats);
        rows.push(SweepRow {
            workers,
            mean,
            dispersion,
        });
    }

    let (average_area, _) = mean_and_dispersion(&areas);
    Ok(SweepReport { rows, average_area })
}

impl fmt::Display for SweepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(
                f,
                "{} workers: average = {}, dispersion = {}",
                row.workers, row.mean, row.dispersion
            )?;
        }
        writeln!(f, "Average area = {}", self.average_area)
    }
}
