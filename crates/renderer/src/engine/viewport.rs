// SPDX-License-Identifier: MIT

//!
//! The viewport: how dates are currently projected onto the screen
//!

use crate::{DEFAULT_SCALE, EPOCH, MAX_SCALE, MIN_SCALE, date_to_x, days_between, event_date_to_x, x_to_date};
use chrono::NaiveDate;
use serde::Serialize;
use timeline_pro_core::EventDate;

/// The `(scale, offset)` pair.  `scale` is in pixels per day and is always
/// positive, `offset` is the screen x of the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    scale: f64,
    offset: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            offset: 0.0,
        }
    }
}

impl Viewport {
    /// Create a viewport.  A scale that isn't a positive finite number is
    /// replaced by the default scale.
    pub fn new(scale: f64, offset: f64) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            DEFAULT_SCALE
        };
        let offset = if offset.is_finite() { offset } else { 0.0 };
        Self { scale, offset }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn date_to_x(&self, date: NaiveDate) -> f64 {
        date_to_x(date, self.scale, self.offset)
    }

    pub fn event_date_to_x(&self, date: &EventDate) -> f64 {
        event_date_to_x(date, self.scale, self.offset)
    }

    pub fn x_to_date(&self, x: f64) -> NaiveDate {
        x_to_date(x, self.scale, self.offset)
    }

    pub(crate) fn set_offset(&mut self, offset: f64) {
        self.offset = offset;
    }

    /// Multiply the scale by `factor` keeping the date under `pointer_x` where
    /// it is
    pub(crate) fn zoom_around(&mut self, pointer_x: f64, factor: f64) {
        let anchor = (pointer_x - self.offset) / self.scale;
        self.scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        self.offset = pointer_x - anchor * self.scale;
    }

    /// Multiply the scale by `factor` leaving the offset alone
    pub(crate) fn rescale(&mut self, factor: f64) {
        self.scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
    }

    /// Put `date` in the middle of a viewport `width` pixels wide
    pub(crate) fn center_on(&mut self, date: NaiveDate, width: f64) {
        self.offset = width / 2.0 - (days_between(EPOCH, date) as f64) * self.scale;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use timeline_pro_core::date;

    #[test]
    fn new_keeps_scale_positive() {
        assert_eq!(Viewport::new(0.0, 10.0).scale(), DEFAULT_SCALE);
        assert_eq!(Viewport::new(-1.0, 10.0).scale(), DEFAULT_SCALE);
        assert_eq!(Viewport::new(f64::NAN, 10.0).scale(), DEFAULT_SCALE);
        assert_eq!(Viewport::new(5.0, 10.0), Viewport::new(5.0, 10.0));
        assert_eq!(Viewport::new(5.0, f64::INFINITY).offset(), 0.0);
    }

    #[test]
    fn zoom_keeps_pointer_date() {
        let mut viewport = Viewport::new(0.37, -1234.5);
        for pointer_x in [0.0, 333.0, 1024.0] {
            for factor in [0.8, 1.2, 0.8, 0.8, 1.2] {
                let before = viewport.x_to_date(pointer_x);
                viewport.zoom_around(pointer_x, factor);
                assert_eq!(viewport.x_to_date(pointer_x), before);
            }
        }
    }

    #[test]
    fn zoom_is_clamped() {
        let mut viewport = Viewport::default();
        for _ in 0..200 {
            viewport.zoom_around(500.0, 1.2);
        }
        assert_eq!(viewport.scale(), MAX_SCALE);
        for _ in 0..400 {
            viewport.zoom_around(500.0, 0.8);
        }
        assert_eq!(viewport.scale(), MIN_SCALE);
    }

    #[test]
    fn center_on() {
        let mut viewport = Viewport::new(2.0, 0.0);
        viewport.center_on(date!("1970-01-11"), 1000.0);
        assert_eq!(viewport.offset(), 480.0);
        assert_eq!(viewport.date_to_x(date!("1970-01-11")), 500.0);
        assert_eq!(viewport.scale(), 2.0);
    }
}
