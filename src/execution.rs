//! Execution models for a sampling run.
//!
//! Every model runs the same algorithm, [`estimate_area`]: split the
//! requested samples into equal jobs, run each job on a worker, reduce the
//! partial counts, and scale the hit ratio by the rectangle's area. A
//! [`Strategy`] only decides where the jobs run and how their results meet:
//!
//! - [`Sequential`]: one job on the calling thread
//! - [`Threaded`]: one OS thread per job, joined before reduction
//! - [`Pooled`]: jobs scheduled on a dedicated rayon pool
//! - [`Distributed`]: one job per rank of a [`Communicator`], summed by a
//!   collective reduction at rank 0
//!
//! The domain is never written after construction, so workers share it by
//! reference and no model takes a lock.

use crate::error::Result;
use crate::geometry::Domain;
use crate::monte_carlo::{distribute, AggregateResult, Estimate, SampleJob};

pub mod distributed;
pub mod pooled;
pub mod process;
pub mod sequential;
pub mod threaded;

pub use distributed::{Communicator, Distributed, LocalEndpoint, LocalGroup};
pub use pooled::Pooled;
pub use process::ProcessGroup;
pub use sequential::Sequential;
pub use threaded::Threaded;

/// Schedules sample jobs onto workers and reduces their results.
pub trait Strategy {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Number of workers the total sample count is split across.
    fn workers(&self) -> usize;

    /// Runs `jobs` and returns the reduced total.
    ///
    /// Returns `Ok(None)` on processes that take part in the run but are not
    /// its coordinator.
    fn execute(&mut self, domain: &Domain, jobs: Vec<SampleJob>) -> Result<Option<AggregateResult>>;
}

/// Estimates the union area of `domain` from `total_samples` random points.
///
/// The samples are divided evenly over the strategy's workers and any
/// remainder is dropped, so `samples_drawn` in the result may be smaller than
/// `total_samples`.
///
/// # Errors
///
/// Fails with [`Error::InvalidSampleCount`](crate::Error::InvalidSampleCount)
/// or [`Error::InvalidWorkerCount`](crate::Error::InvalidWorkerCount) before
/// any sampling starts. Fails with
/// [`Error::WorkerFailure`](crate::Error::WorkerFailure) if a worker cannot
/// be started or does not report back.
pub fn estimate_area(
    domain: &Domain,
    total_samples: u64,
    strategy: &mut dyn Strategy,
) -> Result<Option<Estimate>> {
    let jobs = distribute(total_samples, strategy.workers())?;
    log::info!(
        "{}: {} samples over {} workers",
        strategy.name(),
        total_samples,
        jobs.len()
    );

    let aggregate = strategy.execute(domain, jobs)?;
    if let Some(total) = aggregate {
        log::debug!(
            "{}: {} of {} samples inside",
            strategy.name(),
            total.samples_inside,
            total.samples_drawn
        );
    }
    Ok(aggregate.map(|total| Estimate::new(total, domain.bounds())))
}
