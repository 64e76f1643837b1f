// SPDX-License-Identifier: MIT

//!
//! Helper functions
//!

use crate::Point;

/// Round down to a multiple of `multiple` (towards negative infinity, so
/// `-151` floors to `-160` for a multiple of 10)
pub(crate) fn floor_to_multiple(value: i32, multiple: i32) -> i32 {
    if multiple <= 1 {
        return value;
    }
    value - value.rem_euclid(multiple)
}

/// Calculate whether the thing is visible on the canvas
pub(crate) fn is_visible(thing_min: Point, thing_max: Point, canvas_size: Point) -> bool {
    if thing_min.x > canvas_size.x {
        return false;
    }
    if thing_max.x < 0.0 {
        return false;
    }
    if thing_min.y > canvas_size.y {
        return false;
    }
    if thing_max.y < 0.0 {
        return false;
    }
    true
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_floor_to_multiple() {
        assert_eq!(floor_to_multiple(-150, 10), -150);
        assert_eq!(floor_to_multiple(-151, 10), -160);
        assert_eq!(floor_to_multiple(-159, 10), -160);
        assert_eq!(floor_to_multiple(150, 10), 150);
        assert_eq!(floor_to_multiple(151, 10), 150);
        assert_eq!(floor_to_multiple(159, 10), 150);
        assert_eq!(floor_to_multiple(1999, 1000), 1000);
        assert_eq!(floor_to_multiple(-1, 1000), -1000);
        assert_eq!(floor_to_multiple(2023, 1), 2023);
    }

    #[test]
    fn test_is_visible() {
        let canvas = Point { x: 100.0, y: 50.0 };
        let visible = |min: (f64, f64), max: (f64, f64)| {
            is_visible(
                Point { x: min.0, y: min.1 },
                Point { x: max.0, y: max.1 },
                canvas,
            )
        };
        assert!(visible((10.0, 10.0), (20.0, 20.0)));
        assert!(visible((-10.0, 10.0), (5.0, 20.0)));
        assert!(!visible((101.0, 10.0), (120.0, 20.0)));
        assert!(!visible((-30.0, 10.0), (-1.0, 20.0)));
        assert!(!visible((10.0, -30.0), (20.0, -1.0)));
        assert!(!visible((10.0, 51.0), (20.0, 60.0)));
    }
}
