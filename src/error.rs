//! Error types shared by every stage of an estimation run.

use thiserror::Error;

/// Errors raised while loading, validating, or sampling a circle domain.
///
/// Every variant is fatal to the run that produced it.
#[derive(Debug, Error)]
pub enum Error {
    /// No circles were loaded, so there is no sampling rectangle.
    #[error("no circles were loaded; cannot build a sampling domain")]
    EmptyDomain,

    /// A circle has a NaN or infinite coordinate or radius.
    #[error("circle #{index} has a non-finite coordinate or radius")]
    InvalidCircle { index: usize },

    /// The bounding rectangle's width or height overflows an `f64`.
    #[error("bounding rectangle of the circles is too large to sample")]
    UnboundedDomain,

    /// Fewer than one sample was requested.
    #[error("sample count must be at least 1, got {requested}")]
    InvalidSampleCount { requested: u64 },

    /// Zero workers, or more workers than samples.
    #[error("worker count must be between 1 and the sample count ({samples}), got {workers}")]
    InvalidWorkerCount { workers: usize, samples: u64 },

    /// A worker thread or process could not be started or did not report back.
    #[error("worker {worker} failed: {reason}")]
    WorkerFailure { worker: usize, reason: String },

    /// The circle input contains something that is not a float triple.
    #[error("invalid circle input at token {position}: {token:?}")]
    Parse { position: usize, token: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn worker(worker: usize, reason: impl Into<String>) -> Self {
        Error::WorkerFailure {
            worker,
            reason: reason.into(),
        }
    }
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
