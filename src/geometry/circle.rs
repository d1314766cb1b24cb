/// A circle in the plane, given by its center and radius.
///
/// The radius is not validated. Membership compares against `r²`, so a
/// negative radius behaves like its absolute value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

impl Circle {
    pub fn new(x: f64, y: f64, r: f64) -> Self {
        Self { x, y, r }
    }

    /// Returns true if `(x, y)` lies inside the circle or on its boundary.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let dx = x - self.x;
        let dy = y - self.y;
        dx * dx + dy * dy <= self.r * self.r
    }

    /// Axis-aligned extent as `(min_x, min_y, max_x, max_y)`.
    pub fn extent(&self) -> (f64, f64, f64, f64) {
        let r = self.r.abs();
        (self.x - r, self.y - r, self.x + r, self.y + r)
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.r.is_finite()
    }
}

/// Returns true if the point lies within at least one of `circles`.
///
/// Scans every circle in order; there is no spatial index.
#[inline]
pub fn is_inside_union(x: f64, y: f64, circles: &[Circle]) -> bool {
    circles.iter().any(|c| c.contains(x, y))
}
