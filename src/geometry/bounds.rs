use crate::error::{Error, Result};
use crate::geometry::Circle;

/// Minimal axis-aligned rectangle enclosing a set of circles.
///
/// This is the Monte Carlo sampling domain. A rectangle built by
/// [`BoundingRectangle::from_circles`] always has `min_x <= max_x` and
/// `min_y <= max_y`. It may have zero width or height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingRectangle {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingRectangle {
    /// Folds every circle's extent into one rectangle.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyDomain`] if `circles` is empty
    /// - [`Error::InvalidCircle`] if any field is NaN or infinite
    /// - [`Error::UnboundedDomain`] if the width or height is too large to
    ///   sample uniformly
    pub fn from_circles(circles: &[Circle]) -> Result<Self> {
        if circles.is_empty() {
            return Err(Error::EmptyDomain);
        }
        if let Some(index) = circles.iter().position(|c| !c.is_finite()) {
            return Err(Error::InvalidCircle { index });
        }

        let init = Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        };
        let rect = circles.iter().fold(init, |acc, c| {
            let (min_x, min_y, max_x, max_y) = c.extent();
            Self {
                min_x: acc.min_x.min(min_x),
                min_y: acc.min_y.min(min_y),
                max_x: acc.max_x.max(max_x),
                max_y: acc.max_y.max(max_y),
            }
        });

        if !is_samplable(rect.width()) || !is_samplable(rect.height()) {
            return Err(Error::UnboundedDomain);
        }
        Ok(rect)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// True when the rectangle has zero width or zero height.
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0.0 || self.height() == 0.0
    }
}

/// An inclusive uniform range over `span` scales it by `1 / (1 - EPSILON)`,
/// which must stay finite.
fn is_samplable(span: f64) -> bool {
    (span / (1.0 - f64::EPSILON)).is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_is_error() {
        assert!(matches!(
            BoundingRectangle::from_circles(&[]),
            Err(Error::EmptyDomain)
        ));
    }

    #[test]
    fn test_unit_circle() {
        let rect = BoundingRectangle::from_circles(&[Circle::new(0.0, 0.0, 1.0)]).unwrap();
        assert_eq!(
            rect,
            BoundingRectangle {
                min_x: -1.0,
                min_y: -1.0,
                max_x: 1.0,
                max_y: 1.0
            }
        );
        assert_relative_eq!(rect.area(), 4.0);
    }

    #[test]
    fn test_two_disjoint_circles() {
        let rect = BoundingRectangle::from_circles(&[
            Circle::new(0.0, 0.0, 1.0),
            Circle::new(10.0, 0.0, 1.0),
        ])
        .unwrap();
        assert_relative_eq!(rect.min_x, -1.0);
        assert_relative_eq!(rect.max_x, 11.0);
        assert_relative_eq!(rect.min_y, -1.0);
        assert_relative_eq!(rect.max_y, 1.0);
        assert_relative_eq!(rect.area(), 24.0);
    }

    #[test]
    fn test_all_coordinates_negative() {
        // A fold seeded with the smallest positive double would leave max at ~0 here.
        let rect = BoundingRectangle::from_circles(&[Circle::new(-10.0, -10.0, 1.0)]).unwrap();
        assert_relative_eq!(rect.max_x, -9.0);
        assert_relative_eq!(rect.max_y, -9.0);
        assert_relative_eq!(rect.area(), 4.0);
    }

    #[test]
    fn test_covers_every_circle() {
        let circles = [
            Circle::new(3.0, -1.0, 0.5),
            Circle::new(-4.0, 2.0, 2.5),
            Circle::new(0.0, 7.0, 0.1),
            Circle::new(1.0, 1.0, 0.0),
        ];
        let rect = BoundingRectangle::from_circles(&circles).unwrap();
        for c in &circles {
            assert!(rect.min_x <= c.x - c.r);
            assert!(rect.max_x >= c.x + c.r);
            assert!(rect.min_y <= c.y - c.r);
            assert!(rect.max_y >= c.y + c.r);
        }
    }

    #[test]
    fn test_zero_radius_is_degenerate() {
        let rect = BoundingRectangle::from_circles(&[Circle::new(2.0, 3.0, 0.0)]).unwrap();
        assert!(rect.is_degenerate());
        assert_eq!(rect.area(), 0.0);
        assert_eq!((rect.min_x, rect.min_y), (2.0, 3.0));
    }

    #[test]
    fn test_non_finite_circle_is_invalid() {
        let circles = [Circle::new(f64::NAN, 0.0, 1.0), Circle::new(0.0, 0.0, 1.0)];
        assert!(matches!(
            BoundingRectangle::from_circles(&circles),
            Err(Error::InvalidCircle { index: 0 })
        ));
        let circles = [Circle::new(0.0, 0.0, 1.0), Circle::new(0.0, f64::NEG_INFINITY, 1.0)];
        assert!(matches!(
            BoundingRectangle::from_circles(&circles),
            Err(Error::InvalidCircle { index: 1 })
        ));
    }

    #[test]
    fn test_overflowing_extent_is_unbounded() {
        let circles = [
            Circle::new(-f64::MAX, 0.0, 1.0),
            Circle::new(f64::MAX, 0.0, 1.0),
        ];
        assert!(matches!(
            BoundingRectangle::from_circles(&circles),
            Err(Error::UnboundedDomain)
        ));
    }

    #[test]
    fn test_extent_too_wide_to_sample_is_unbounded() {
        // Width rounds to f64::MAX: finite, but not a valid uniform range.
        let circles = [
            Circle::new(-f64::MAX / 2.0, 0.0, 0.0),
            Circle::new(f64::MAX / 2.0, 0.0, 1.0),
        ];
        assert!(matches!(
            BoundingRectangle::from_circles(&circles),
            Err(Error::UnboundedDomain)
        ));
        let circles = [
            Circle::new(0.0, -f64::MAX / 2.0, 0.0),
            Circle::new(0.0, f64::MAX / 2.0, 1.0),
        ];
        assert!(matches!(
            BoundingRectangle::from_circles(&circles),
            Err(Error::UnboundedDomain)
        ));
    }

    #[test]
    fn test_large_but_samplable_extent() {
        let circles = [
            Circle::new(-f64::MAX / 4.0, 0.0, 0.0),
            Circle::new(f64::MAX / 4.0, 0.0, 1.0),
        ];
        let rect = BoundingRectangle::from_circles(&circles).unwrap();
        assert!(rect.width().is_finite());
    }
}
