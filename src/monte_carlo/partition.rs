use std::iter::Sum;
use std::ops::Add;

use crate::error::{Error, Result};

/// A request for one worker to draw `sample_count` points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleJob {
    /// Index of the worker the job is dispatched to. Also selects the
    /// worker's RNG stream when a fixed seed is used.
    pub worker: usize,
    pub sample_count: u64,
}

/// Samples drawn and samples that landed inside the union.
///
/// Partial results combine by plain addition, which is associative and
/// commutative, so any reduction order or tree shape gives the same total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartialResult {
    pub samples_drawn: u64,
    pub samples_inside: u64,
}

/// The combined result of every worker.
pub type AggregateResult = PartialResult;

impl PartialResult {
    pub fn new(samples_drawn: u64, samples_inside: u64) -> Self {
        Self {
            samples_drawn,
            samples_inside,
        }
    }

    /// Fraction of drawn samples that hit the union; 0 when nothing was drawn.
    pub fn hit_ratio(&self) -> f64 {
        if self.samples_drawn == 0 {
            0.0
        } else {
            self.samples_inside as f64 / self.samples_drawn as f64
        }
    }
}

impl Add for PartialResult {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            samples_drawn: self.samples_drawn + rhs.samples_drawn,
            samples_inside: self.samples_inside + rhs.samples_inside,
        }
    }
}

impl Sum for PartialResult {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Splits `total_samples` into `workers` equal jobs.
///
/// Each job gets `total_samples / workers` samples and the remainder is
/// dropped, so the effective total is `(total_samples / workers) * workers`.
/// For 17 samples over 5 workers that is five jobs of 3, 15 samples in all.
///
/// # Errors
///
/// - [`Error::InvalidSampleCount`] if `total_samples` is zero
/// - [`Error::InvalidWorkerCount`] if `workers` is zero or exceeds `total_samples`
pub fn distribute(total_samples: u64, workers: usize) -> Result<Vec<SampleJob>> {
    if total_samples < 1 {
        return Err(Error::InvalidSampleCount {
            requested: total_samples,
        });
    }
    if workers < 1 || workers as u64 > total_samples {
        return Err(Error::InvalidWorkerCount {
            workers,
            samples: total_samples,
        });
    }

    let per_worker = total_samples / workers as u64;
    let dropped = total_samples - per_worker * workers as u64;
    if dropped > 0 {
        log::debug!(
            "{} samples do not divide evenly over {} workers; dropping {}",
            total_samples,
            workers,
            dropped
        );
    }

    Ok((0..workers)
        .map(|worker| SampleJob {
            worker,
            sample_count: per_worker,
        })
        .collect())
}

/// Sums any number of partial results, including none.
pub fn reduce<I>(partials: I) -> AggregateResult
where
    I: IntoIterator<Item = PartialResult>,
{
    partials.into_iter().sum()
}
