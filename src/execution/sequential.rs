use crate::error::Result;
use crate::execution::Strategy;
use crate::geometry::Domain;
use crate::monte_carlo::{reduce, AggregateResult, SampleJob, SeedSource};

/// Runs the whole sample count as a single job on the calling thread.
#[derive(Debug, Clone, Default)]
pub struct Sequential {
    seed: SeedSource,
}

impl Sequential {
    pub fn new(seed: SeedSource) -> Self {
        Self { seed }
    }
}

impl Strategy for Sequential {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn workers(&self) -> usize {
        1
    }

    fn execute(
        &mut self,
        domain: &Domain,
        jobs: Vec<SampleJob>,
    ) -> Result<Option<AggregateResult>> {
        let partials = jobs
            .iter()
            .map(|job| self.seed.sampler(job.worker).run(job, domain));
        Ok(Some(reduce(partials)))
    }
}
