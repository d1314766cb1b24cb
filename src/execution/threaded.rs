use std::thread;

use crate::error::{Error, Result};
use crate::execution::Strategy;
use crate::geometry::Domain;
use crate::monte_carlo::{reduce, AggregateResult, PartialResult, SampleJob, SeedSource};

/// Runs every job on its own OS thread and joins them all before reducing.
///
/// Threads are scoped to the call, so they borrow the domain directly.
#[derive(Debug, Clone)]
pub struct Threaded {
    workers: usize,
    seed: SeedSource,
}

impl Threaded {
    pub fn new(workers: usize, seed: SeedSource) -> Self {
        Self { workers, seed }
    }
}

impl Strategy for Threaded {
    fn name(&self) -> &'static str {
        "threads"
    }

    fn workers(&self) -> usize {
        self.workers
    }

    fn execute(
        &mut self,
        domain: &Domain,
        jobs: Vec<SampleJob>,
    ) -> Result<Option<AggregateResult>> {
        let seed = self.seed;
        let partials = run_scoped(jobs, |job| seed.sampler(job.worker).run(&job, domain))?;
        Ok(Some(reduce(partials)))
    }
}

/// Runs `work` for each job on its own scoped thread and joins them all.
fn run_scoped<F>(jobs: Vec<SampleJob>, work: F) -> Result<Vec<PartialResult>>
where
    F: Fn(SampleJob) -> PartialResult + Sync,
{
    let work = &work;
    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(jobs.len());
        for job in jobs {
            let handle = thread::Builder::new()
                .name(format!("sampler-{}", job.worker))
                .spawn_scoped(scope, move || work(job))
                .map_err(|e| Error::worker(job.worker, format!("cannot create thread: {e}")))?;
            handles.push((job.worker, handle));
        }

        // Every handle is joined; the first failure is reported.
        let mut partials = Vec::with_capacity(handles.len());
        let mut failure = None;
        for (worker, handle) in handles {
            match handle.join() {
                Ok(partial) => partials.push(partial),
                Err(_) => {
                    failure.get_or_insert_with(|| {
                        Error::worker(worker, "thread panicked before joining")
                    });
                }
            }
        }

        match failure {
            Some(err) => Err(err),
            None => Ok(partials),
        }
    })
}
