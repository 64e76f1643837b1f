// SPDX-License-Identifier: MIT

//!
//! Primitives
//!

use crate::{LineStyle, Point, PositionAndSize};
use serde::Serialize;
use std::fmt::Debug;
use timeline_pro_core::Colour;

/// Information needed to draw text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextOut {
    pub top_left: Point,
    pub text: String,
    pub colour: Colour,
    pub font_size: f64,
}

/// Information needed to draw a filled box
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FilledBox {
    pub position_and_size: PositionAndSize,
    pub fill_colour: Colour,

    /// 0.0 (invisible) to 1.0 (opaque)
    pub opacity: f64,

    pub border_style: Option<LineStyle>,
}

/// Information needed to draw a vertical line (e.g. an event's connector)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VerticalLine {
    pub x: f64,
    pub y_top: f64,
    pub y_bottom: f64,
    pub style: LineStyle,
    pub opacity: f64,
}

/// Information needed to draw a filled circle (marker and event dots)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dot {
    pub centre: Point,
    pub radius: f64,
    pub colour: Colour,
    pub opacity: f64,
}

/// Something to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Primitive {
    Box(FilledBox),
    Line(VerticalLine),
    Dot(Dot),
    Text(TextOut),
}

/// Everything a frontend needs to paint one frame, in paint order (later
/// primitives are drawn over earlier ones)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub size: Point,
    pub background: Colour,
    pub primitives: Vec<Primitive>,
}
