// SPDX-License-Identifier: MIT

//!
//! Engine constants
//!

/// The scale (pixels per day) the timeline starts at
pub const DEFAULT_SCALE: f64 = 0.2;

/// The smallest scale zooming can reach
pub const MIN_SCALE: f64 = 1e-4;

/// The largest scale zooming can reach
pub const MAX_SCALE: f64 = 1e3;

/// Scale factor for a wheel scroll down
pub const WHEEL_ZOOM_OUT_FACTOR: f64 = 0.8;

/// Scale factor for a wheel scroll up
pub const WHEEL_ZOOM_IN_FACTOR: f64 = 1.2;

/// Scale factor for the zoom in button
pub const BUTTON_ZOOM_IN_FACTOR: f64 = 1.5;

/// Scale factor for the zoom out button
pub const BUTTON_ZOOM_OUT_FACTOR: f64 = 0.7;

/// Marker generation stops after this many steps
pub const MAX_MARKERS: usize = 400;

/// The z-order of the selected event
pub const SELECTED_Z_ORDER: u32 = 100;

/// The z-order of every other event
pub const EVENT_Z_ORDER: u32 = 20;
