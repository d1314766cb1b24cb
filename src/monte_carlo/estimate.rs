use crate::geometry::BoundingRectangle;
use crate::monte_carlo::AggregateResult;

/// Final union-area estimate derived from an aggregate sample count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub aggregate: AggregateResult,
    /// Area of the rectangle the samples were drawn from.
    pub bounding_area: f64,
    /// Estimated area covered by the union of circles.
    pub area: f64,
}

impl Estimate {
    /// Scales the hit ratio by the rectangle's area.
    ///
    /// A degenerate rectangle gives an area of 0, and so does an aggregate
    /// with no samples drawn.
    pub fn new(aggregate: AggregateResult, bounds: &BoundingRectangle) -> Self {
        let bounding_area = bounds.area();
        Self {
            aggregate,
            bounding_area,
            area: aggregate.hit_ratio() * bounding_area,
        }
    }
}
