// SPDX-License-Identifier: MIT

//!
//! *Part of the wider Timeline Pro project*
//!
//! This crate draws timelines.  At its core is a platform independent engine
//! responsible for:
//!
//! - Mapping dates to screen coordinates and back
//! - Handling input (dragging, wheel zooming, zoom buttons, centering)
//! - Generating the axis markers for the current zoom level
//! - Laying out events (lanes, variants and stacking order)
//! - Producing the drawing primitives for a frame
//!
//! Around it sit the image export coordinator, which reframes the timeline
//! around every event and captures it, and the frontends that paint the
//! engine's scenes.  There is currently one frontend, which rasterises scenes
//! to PNG images.
//!
//! The engine is shared as `Rc<RefCell<Engine>>` between input handlers and
//! the export coordinator.  No borrow is held across an `.await`, so input
//! arriving during an export is handled (and ignored) rather than panicking.
//!

pub mod engine;
pub mod export;
pub mod frontends;

pub use engine::*;
pub use export::*;
pub use frontends::raster::ImageRasterizer;
