// SPDX-License-Identifier: MIT

//!
//! Colours
//!

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use timeline_pro_core::{Colour, colour};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub colour: Colour,
    pub thickness: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxStyle {
    pub fill_colour: Colour,
    pub opacity: f64,
    pub border: Option<LineStyle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub dot_colour: Colour,
    pub label_colour: Colour,
    pub major_label_colour: Colour,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardStyle {
    pub rect: BoxStyle,
    pub title_colour: Colour,
    pub date_colour: Colour,
    pub progress_track: BoxStyle,
}

/// The colours the engine paints with.  Event colours come from the events
/// themselves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineColours {
    pub background: Colour,
    pub axis: BoxStyle,
    pub marker: MarkerStyle,
    pub card: CardStyle,
}

impl Default for TimelineColours {
    fn default() -> Self {
        Self {
            background: colour!("#020617"),
            axis: BoxStyle {
                fill_colour: colour!("#f8fafc"),
                opacity: 0.15,
                border: None,
            },
            marker: MarkerStyle {
                dot_colour: colour!("#3b82f6"),
                label_colour: colour!("#94a3b8"),
                major_label_colour: colour!("#f8fafc"),
            },
            card: CardStyle {
                rect: BoxStyle {
                    fill_colour: colour!("#1e293b"),
                    opacity: 0.7,
                    border: None,
                },
                title_colour: colour!("#f8fafc"),
                date_colour: colour!("#94a3b8"),
                progress_track: BoxStyle {
                    fill_colour: colour!("#000000"),
                    opacity: 0.2,
                    border: None,
                },
            },
        }
    }
}
