//! Wall-clock timing and the end-of-run report.

use std::fmt;
use std::time::{Duration, Instant};

use crate::monte_carlo::Estimate;

/// Scoped wall-clock timer.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started_at: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}

/// Statistics printed by the coordinator once a run completes.
///
/// Displays one statistic per line:
///
/// ```text
/// Total generated dots: 1000000
/// Total dots in: 785398
/// Square area: 4
/// Circles area: 3.141592
/// Elapsed time: 0.0123
/// ```
///
/// Elapsed time is in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Report {
    pub estimate: Estimate,
    pub elapsed: Duration,
}

impl Report {
    pub fn new(estimate: Estimate, elapsed: Duration) -> Self {
        Self { estimate, elapsed }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.estimate.aggregate;
        writeln!(f, "Total generated dots: {}", total.samples_drawn)?;
        writeln!(f, "Total dots in: {}", total.samples_inside)?;
        writeln!(f, "Square area: {}", self.estimate.bounding_area)?;
        writeln!(f, "Circles area: {}", self.estimate.area)?;
        writeln!(f, "Elapsed time: {}", self.elapsed.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoundingRectangle;
    use crate::monte_carlo::AggregateResult;

    #[test]
    fn test_report_lines_in_order() {
        let bounds = BoundingRectangle {
            min_x: -1.0,
            min_y: -1.0,
            max_x: 1.0,
            max_y: 1.0,
        };
        let estimate = Estimate::new(AggregateResult::new(8, 6), &bounds);
        let report = Report::new(estimate, Duration::from_millis(1500));
        assert_eq!(
            report.to_string(),
            "Total generated dots: 8\n\
             Total dots in: 6\n\
             Square area: 4\n\
             Circles area: 3\n\
             Elapsed time: 1.5\n"
        );
    }

    #[test]
    fn test_stopwatch_moves_forward() {
        let watch = Stopwatch::start();
        std::thread::sleep(Duration::from_millis(5));
        assert!(watch.elapsed() >= Duration::from_millis(5));
        assert!(watch.started_at() <= Instant::now());
    }
}
