// SPDX-License-Identifier: MIT

//!
//! Layout params
//!

use crate::Position;
use serde::Serialize;
use std::fmt::Debug;

/// Layout parameters.  Those describing an event's card, offset and bars are
/// multiplied by the event's own scale where noted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Events are spread over this many lanes (round robin)
    pub lane_count: usize,

    /// Distance of the first lane above the axis (scaled)
    pub above_base: f64,

    /// Distance of the first lane below the axis (scaled)
    pub below_base: f64,

    /// Distance between lanes (scaled)
    pub lane_spacing: f64,

    /// Card width (scaled)
    pub card_width: f64,

    /// Card height (scaled)
    pub card_height: f64,

    /// Inner padding of a card (scaled)
    pub card_padding: f64,

    /// How far right of an event's x its connector is drawn
    pub connector_inset: f64,

    /// The fixed width of a point event's duration stub
    pub point_stub_width: f64,

    /// Period bars are never narrower than this
    pub min_period_bar_width: f64,

    /// Period background blocks are never narrower than this
    pub min_background_width: f64,

    pub period_bar_height: f64,
    pub stub_bar_height: f64,
    pub progress_bar_height: f64,
    pub axis_thickness: f64,
    pub marker_dot_diameter: f64,
    pub event_dot_diameter: f64,

    /// Gap between the axis and a marker's label
    pub marker_label_gap: f64,

    pub font_size_px: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        LayoutParams {
            lane_count: 3,
            above_base: 120.0,
            below_base: 60.0,
            lane_spacing: 70.0,
            card_width: 200.0,
            card_height: 40.0,
            card_padding: 8.0,
            connector_inset: 4.0,
            point_stub_width: 4.0,
            min_period_bar_width: 4.0,
            min_background_width: 2.0,
            period_bar_height: 8.0,
            stub_bar_height: 4.0,
            progress_bar_height: 4.0,
            axis_thickness: 4.0,
            marker_dot_diameter: 8.0,
            event_dot_diameter: 8.0,
            marker_label_gap: 14.0,
            font_size_px: 12.0,
        }
    }
}

/// A box that specifies the location and size of something (e.g. the location
/// and size of an event's card)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PositionAndSize {
    /// The smallest x/y values (boxes grow down and to the right from here)
    pub position: Position,

    /// The width of the box (from which the largest x value can be derived)
    pub width: f64,

    /// The height of the box (from which the largest y value can be derived)
    pub height: f64,
}

impl PositionAndSize {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            position: Position { x, y },
            width,
            height,
        }
    }

    /// Calculate the largest x value of the box
    pub fn max_x(&self) -> f64 {
        self.position.x + self.width
    }

    /// Calculate the largest y value of the box (i.e. how far the box grows
    /// downwards)
    pub fn max_y(&self) -> f64 {
        self.position.y + self.height
    }

    /// Whether the point lies within the box (edges included)
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.position.x && x <= self.max_x() && y >= self.position.y && y <= self.max_y()
    }
}
