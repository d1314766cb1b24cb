use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::error::{Error, Result};
use crate::execution::Strategy;
use crate::geometry::Domain;
use crate::monte_carlo::{reduce, AggregateResult, PartialResult, SampleJob, SeedSource};

/// Runs the jobs on a dedicated rayon pool of `workers` threads.
///
/// The pool is built before any sampling starts and torn down after the
/// reduction. Each job keeps its own RNG stream, so results for a fixed seed
/// match [`Threaded`](crate::execution::Threaded) exactly.
#[derive(Debug, Clone)]
pub struct Pooled {
    workers: usize,
    seed: SeedSource,
}

impl Pooled {
    pub fn new(workers: usize, seed: SeedSource) -> Self {
        Self { workers, seed }
    }
}

impl Strategy for Pooled {
    fn name(&self) -> &'static str {
        "pool"
    }

    fn workers(&self) -> usize {
        self.workers
    }

    fn execute(
        &mut self,
        domain: &Domain,
        jobs: Vec<SampleJob>,
    ) -> Result<Option<AggregateResult>> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("sampler-pool-{i}"))
            .build()
            .map_err(|e| Error::worker(0, format!("cannot build thread pool: {e}")))?;

        let seed = self.seed;
        let partials: Vec<PartialResult> = pool.install(|| {
            jobs.par_iter()
                .map(|job| seed.sampler(job.worker).run(job, domain))
                .collect()
        });
        Ok(Some(reduce(partials)))
    }
}
