pub mod unit;

use crate::util::unit::Point2;

/// A macro to unwrap an option to its `Some` value, and panic if `None`. This
/// is the same as [Option::unwrap], except that it accepts a format string
/// and format arguments, allowing for more flexibility in error messages.
#[macro_export]
macro_rules! unwrap {
    ($opt:expr, $fmt:expr, $($arg:tt)*) => {
        match $opt {
            Some(v) => v,
            None => panic!($fmt, $($arg)*),
        }
    };
}

/// A macro to measure the evaluation time of an expression. Wraps an
/// expression, logs the elapsed time at the given level (default `Debug`),
/// and evaluates to the value of the expression.
#[macro_export]
macro_rules! timed {
    ($label:expr, $ex:expr) => {
        $crate::timed!($label, log::Level::Debug, $ex)
    };
    ($label:expr, $log_level:expr, $ex:expr) => {{
        let now = std::time::Instant::now();
        let value = $ex;
        let elapsed = now.elapsed();
        log::log!($log_level, "{} took {} ms", $label, elapsed.as_millis());
        value
    }};
}

/// Interpolate between two values by the given fraction.
pub fn lerp(a: f64, b: f64, fraction: f64) -> f64 {
    a + fraction * (b - a)
}

/// Check if a point falls within a polygon, using the even-odd rule. Points
/// exactly on an edge may land on either side. Polygons with fewer than three
/// points never contain anything.
pub fn polygon_contains(polygon: &[Point2], point: Point2) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (a, b) = (polygon[i], polygon[j]);
        // Cast a ray to the right of the point and count edge crossings. The
        // strict/non-strict pair on y means shared vertices count once
        if (a.y > point.y) != (b.y > point.y) {
            let crossing_x = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if point.x < crossing_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_lerp() {
        assert_approx_eq!(lerp(2.0, 4.0, 0.0), 2.0);
        assert_approx_eq!(lerp(2.0, 4.0, 0.5), 3.0);
        assert_approx_eq!(lerp(2.0, 4.0, 1.0), 4.0);
        assert_approx_eq!(lerp(2.0, 4.0, 2.0), 6.0);
    }

    #[test]
    fn test_polygon_contains() {
        // A diamond, like a flat tile seen from 45 degrees
        let diamond = [
            Point2::new(50.0, 0.0),
            Point2::new(100.0, 25.0),
            Point2::new(50.0, 50.0),
            Point2::new(0.0, 25.0),
        ];
        assert!(polygon_contains(&diamond, Point2::new(50.0, 25.0)));
        assert!(polygon_contains(&diamond, Point2::new(80.0, 25.0)));
        assert!(!polygon_contains(&diamond, Point2::new(5.0, 5.0)));
        assert!(!polygon_contains(&diamond, Point2::new(101.0, 25.0)));

        // Degenerate polygons are empty
        assert!(!polygon_contains(&diamond[..2], Point2::new(50.0, 10.0)));
    }
}
