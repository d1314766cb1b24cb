//! Monte Carlo estimation of the area covered by a union of circles.
//!
//! One algorithm runs under several execution models (sequential, OS threads,
//! a rayon pool, and OS processes) so their throughput and scaling can be
//! compared.
//!
//! ```
//! use circle_area::execution::{estimate_area, Threaded};
//! use circle_area::geometry::{Circle, Domain};
//! use circle_area::monte_carlo::SeedSource;
//!
//! let circles = vec![Circle::new(0.0, 0.0, 1.0), Circle::new(10.0, 0.0, 1.0)];
//! let domain = Domain::new(circles).unwrap();
//! let mut strategy = Threaded::new(4, SeedSource::Fixed(7));
//! let estimate = estimate_area(&domain, 400_000, &mut strategy).unwrap().unwrap();
//! assert_eq!(estimate.bounding_area, 24.0);
//! assert!((estimate.area - 2.0 * std::f64::consts::PI).abs() < 0.2);
//! ```

pub mod config;
pub mod error;
pub mod execution;
pub mod geometry;
pub mod input;
pub mod monte_carlo;
pub mod report;
pub mod sweep;

pub use config::{ExecutionModel, RunConfig};
pub use error::{Error, Result};
pub use execution::{estimate_area, Strategy};
pub use geometry::{BoundingRectangle, Circle, Domain};
pub use monte_carlo::{Estimate, PartialResult, SampleJob};
