//! Geometric domain for union-area estimation.
//!
//! A [`Domain`] owns the circle set together with its bounding rectangle.
//! Both are fixed at construction and only read afterwards, so one domain can
//! be shared by reference across any number of sampling threads.

use crate::error::Result;

pub mod bounds;
pub mod circle;

pub use bounds::BoundingRectangle;
pub use circle::{is_inside_union, Circle};

/// Immutable circle set plus the rectangle samples are drawn from.
#[derive(Debug, Clone)]
pub struct Domain {
    circles: Vec<Circle>,
    bounds: BoundingRectangle,
}

impl Domain {
    /// Validates `circles` and derives the bounding rectangle.
    ///
    /// # Errors
    ///
    /// Fails as [`BoundingRectangle::from_circles`] does: on an empty set, a
    /// non-finite field, or a rectangle too wide to sample.
    pub fn new(circles: Vec<Circle>) -> Result<Self> {
        let bounds = BoundingRectangle::from_circles(&circles)?;
        if bounds.is_degenerate() {
            log::warn!("bounding rectangle has zero area; every estimate will be 0");
        }
        log::debug!(
            "domain of {} circles, bounds [{}, {}] x [{}, {}]",
            circles.len(),
            bounds.min_x,
            bounds.max_x,
            bounds.min_y,
            bounds.max_y
        );
        Ok(Self { circles, bounds })
    }

    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    pub fn bounds(&self) -> &BoundingRectangle {
        &self.bounds
    }

    /// Union-membership test against every circle in the domain.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        is_inside_union(x, y, &self.circles)
    }
}
