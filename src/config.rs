//! Run configuration shared by the CLI and library callers.

use std::fmt;
use std::str::FromStr;

use crate::execution::{Pooled, Sequential, Strategy, Threaded};
use crate::monte_carlo::SeedSource;

/// How sample jobs are scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecutionModel {
    /// One job on the calling thread.
    #[default]
    Sequential,
    /// One OS thread per worker.
    Threads,
    /// A dedicated rayon pool with one thread per worker.
    Pool,
    /// One OS process per worker, summed at the coordinator.
    Processes,
}

impl ExecutionModel {
    pub const ALL: [ExecutionModel; 4] = [
        ExecutionModel::Sequential,
        ExecutionModel::Threads,
        ExecutionModel::Pool,
        ExecutionModel::Processes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionModel::Sequential => "sequential",
            ExecutionModel::Threads => "threads",
            ExecutionModel::Pool => "pool",
            ExecutionModel::Processes => "processes",
        }
    }
}

impl fmt::Display for ExecutionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutionModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExecutionModel::ALL
            .into_iter()
            .find(|model| model.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown execution model {s:?}; expected sequential, threads, pool or processes"
                )
            })
    }
}

/// Configuration for a single estimation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Scheduling model
    pub model: ExecutionModel,
    /// Requested number of workers; ignored by the sequential model
    pub workers: usize,
    /// Fixed seed for reproducible runs; OS entropy when unset
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            model: ExecutionModel::default(),
            workers: 4,
            seed: None,
        }
    }
}

impl RunConfig {
    /// Number of workers the model will actually use.
    pub fn effective_workers(&self) -> usize {
        match self.model {
            ExecutionModel::Sequential => 1,
            _ => self.workers,
        }
    }

    pub fn seed_source(&self) -> SeedSource {
        self.seed.map_or(SeedSource::Entropy, SeedSource::Fixed)
    }

    /// Builds the strategy for an in-process model.
    ///
    /// Returns `None` for [`ExecutionModel::Processes`], whose group has to
    /// be launched by the caller.
    pub fn in_process_strategy(&self) -> Option<Box<dyn Strategy>> {
        let seed = self.seed_source();
        match self.model {
            ExecutionModel::Sequential => Some(Box::new(Sequential::new(seed))),
            ExecutionModel::Threads => Some(Box::new(Threaded::new(self.workers, seed))),
            ExecutionModel::Pool => Some(Box::new(Pooled::new(self.workers, seed))),
            ExecutionModel::Processes => None,
        }
    }
}
