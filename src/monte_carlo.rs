//! Monte Carlo estimation of the area covered by a union of circles.
//!
//! Points are drawn uniformly from the domain's bounding rectangle. The
//! fraction that lands inside at least one circle, scaled by the rectangle's
//! area, estimates the union's area:
//!
//! ```text
//!     area ≈ (samples inside / samples drawn) * (max_x - min_x) * (max_y - min_y)
//! ```
//!
//! The work is split into equal [`SampleJob`]s with [`distribute`]. Each job is
//! run by a [`Sampler`], and the [`PartialResult`]s are combined with [`reduce`].
//! How the jobs are scheduled is decided by an
//! [`execution::Strategy`](crate::execution::Strategy).
//!
//! # Examples
//!
//! ```
//! use circle_area::geometry::{Circle, Domain};
//! use circle_area::monte_carlo::{distribute, reduce, Estimate, Sampler};
//!
//! let domain = Domain::new(vec![Circle::new(0.0, 0.0, 1.0)]).unwrap();
//! let jobs = distribute(100_000, 4).unwrap();
//! let mut sampler = Sampler::with_seed(42, 0);
//! let total = reduce(jobs.iter().map(|job| sampler.run(job, &domain)));
//! let estimate = Estimate::new(total, domain.bounds());
//! assert!((estimate.area - std::f64::consts::PI).abs() < 0.1);
//! ```

pub mod estimate;
pub mod partition;
pub mod sampler;

pub use estimate::Estimate;
pub use partition::{distribute, reduce, AggregateResult, PartialResult, SampleJob};
pub use sampler::{Sampler, SeedSource};
