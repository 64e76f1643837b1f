// SPDX-License-Identifier: MIT

//!
//! The `timeline-pro-renderer` engine
//!

mod colours;
mod consts;
mod events;
mod helpers;
mod layout;
mod layout_params;
mod mapper;
mod markers;
mod point;
mod primitives;
mod scene;
mod viewport;

pub(crate) use helpers::*;
pub(crate) use scene::*;

pub use colours::*;
pub use consts::*;
pub use events::*;
pub use layout::*;
pub use layout_params::*;
pub use mapper::*;
pub use markers::*;
pub use point::*;
pub use primitives::*;
pub use viewport::*;

use crate::ExportError;
use chrono::{Local, NaiveDate};
use log::{debug, trace, warn};
use timeline_pro_core::{EventDate, EventId, TimelineEvent, TimelineSettings, parse_calendar_date};

/// Whether the timeline is being dragged
#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,

    /// `anchor` is the pointer's x relative to the offset when the drag began
    Dragging { anchor: f64 },
}

/// What an export replaced, so that it can be put back
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SavedView {
    pub viewport: Viewport,
    pub canvas_size: Point,
}

/// The core `timeline-pro-renderer` engine.  This owns the viewport and
/// handles input, and on each render pass turns the application's events into
/// markers, layouts and drawing primitives.
///
/// The engine never owns or mutates events: they're passed in by reference on
/// every pass.
pub struct Engine {
    /// The current projection of dates onto the screen
    viewport: Viewport,

    drag: DragState,

    /// Set while an image export is re-rendering the timeline.  All input is
    /// ignored while it is.
    is_exporting: bool,

    /// The size of the canvas (the live view, or the export image during an
    /// export)
    canvas_size: Point,

    layout_params: LayoutParams,

    /// The timeline's colours
    colours: TimelineColours,

    /// The ID of the event currently selected (if any)
    selected_event: Option<EventId>,

    /// All interaction events that an external programme might be interested in
    interaction_events: Vec<TimelineInteractionEvent>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create a new engine at the default scale, with the epoch at the left
    /// edge of a 0 x 0 canvas.  Call [`Engine::set_canvas_size`] before
    /// drawing.
    pub fn new() -> Self {
        Self {
            viewport: Viewport::default(),
            drag: DragState::Idle,
            is_exporting: false,
            canvas_size: Point { x: 0.0, y: 0.0 },
            layout_params: LayoutParams::default(),
            colours: TimelineColours::default(),
            selected_event: None,
            interaction_events: Vec::new(),
        }
    }

    /// Get the current viewport
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Get the size of the canvas
    pub fn canvas_size(&self) -> Point {
        self.canvas_size
    }

    /// Set the size of the live view.  Ignored during an export (the export
    /// size is in force until it finishes).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        if self.is_exporting {
            debug!("ignoring canvas resize during export");
            return;
        }
        self.canvas_size = Point {
            x: width.max(0.0),
            y: height.max(0.0),
        };
    }

    /// Set the width of the live view, keeping its height
    pub fn set_viewport_width(&mut self, width: f64) {
        self.set_canvas_size(width, self.canvas_size.y);
    }

    /// Get the timeline colours
    pub fn colours(&self) -> TimelineColours {
        self.colours
    }

    pub fn set_colours(&mut self, colours: TimelineColours) {
        debug!("engine set colours");
        self.colours = colours;
    }

    pub fn layout_params(&self) -> LayoutParams {
        self.layout_params
    }

    pub fn set_layout_params(&mut self, layout_params: LayoutParams) {
        self.layout_params = layout_params;
    }

    /// Whether an image export is in progress
    pub fn is_exporting(&self) -> bool {
        self.is_exporting
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    // Mapping

    /// The screen x of a date in the current viewport
    pub fn date_to_x(&self, date: &EventDate) -> f64 {
        self.viewport.event_date_to_x(date)
    }

    /// The date at a screen x in the current viewport
    pub fn x_to_date(&self, x: f64) -> NaiveDate {
        self.viewport.x_to_date(x)
    }

    // Input

    /// Start dragging the timeline
    pub fn pan_start(&mut self, pointer_x: f64) {
        if self.is_exporting {
            return;
        }
        trace!("pan_start {pointer_x}");
        self.drag = DragState::Dragging {
            anchor: pointer_x - self.viewport.offset(),
        };
    }

    /// Move the timeline with the pointer (only while dragging)
    pub fn pan_move(&mut self, pointer_x: f64) {
        if self.is_exporting {
            return;
        }
        if let DragState::Dragging { anchor } = self.drag {
            trace!("pan_move {pointer_x}");
            self.viewport.set_offset(pointer_x - anchor);
        }
    }

    /// Stop dragging the timeline
    pub fn pan_end(&mut self) {
        if self.is_exporting {
            return;
        }
        trace!("pan_end");
        self.drag = DragState::Idle;
    }

    /// Zoom around the pointer in response to a wheel event.  A positive
    /// delta (scrolling down) zooms out.
    pub fn zoom(&mut self, pointer_x: f64, wheel_delta: f64) {
        if self.is_exporting {
            return;
        }
        let factor = if wheel_delta > 0.0 {
            WHEEL_ZOOM_OUT_FACTOR
        } else {
            WHEEL_ZOOM_IN_FACTOR
        };
        self.viewport.zoom_around(pointer_x, factor);
        trace!("zoom {pointer_x} {wheel_delta} -> {:?}", self.viewport);
    }

    /// The zoom in button
    pub fn zoom_in_button(&mut self) {
        if self.is_exporting {
            return;
        }
        self.viewport.rescale(BUTTON_ZOOM_IN_FACTOR);
    }

    /// The zoom out button
    pub fn zoom_out_button(&mut self) {
        if self.is_exporting {
            return;
        }
        self.viewport.rescale(BUTTON_ZOOM_OUT_FACTOR);
    }

    /// Put a date in the middle of the live view (the scale is unchanged)
    pub fn center_on(&mut self, date: NaiveDate) {
        if self.is_exporting {
            return;
        }
        debug!("center on {date}");
        self.viewport.center_on(date, self.canvas_size.x);
    }

    /// Put a date in the middle of the live view.  Dates that don't parse
    /// are ignored.
    pub fn center_on_date(&mut self, date: &str) {
        match parse_calendar_date(date) {
            Ok(date) => self.center_on(date),
            Err(error) => warn!("not centering: {error}"),
        }
    }

    /// Put today in the middle of the live view
    pub fn center_on_today(&mut self) {
        self.center_on(Local::now().date_naive());
    }

    // Selection & interaction

    pub fn selected_event(&self) -> Option<&EventId> {
        self.selected_event.as_ref()
    }

    pub fn select_event(&mut self, id: EventId) {
        self.selected_event = Some(id);
    }

    pub fn clear_selection(&mut self) {
        self.selected_event = None;
    }

    /// An event's card was clicked: select it and tell the application
    pub fn click_on_event(&mut self, id: EventId) {
        if self.is_exporting {
            return;
        }
        self.selected_event = Some(id.clone());
        self.interaction_events
            .push(TimelineInteractionEvent::Click(id));
    }

    /// Get all events for dispatching & handling
    pub fn drain_interaction_events(&mut self) -> std::vec::Drain<'_, TimelineInteractionEvent> {
        self.interaction_events.drain(..)
    }

    /// The topmost event whose card contains the point (if any)
    pub fn event_at(&self, events: &[TimelineEvent], x: f64, y: f64) -> Option<EventId> {
        let axis_y = self.canvas_size.y / 2.0;
        self.layout(events)
            .into_iter()
            .rev()
            .find(|layout| layout.card_box(axis_y).contains(x, y))
            .map(|layout| layout.id)
    }

    // Render pass

    /// Get the markers for the current viewport and canvas width
    pub fn markers(&self) -> Vec<Marker> {
        compute_markers(
            self.viewport.scale(),
            self.viewport.offset(),
            self.canvas_size.x,
        )
    }

    /// Lay out the events for the current viewport (in paint order)
    pub fn layout(&self, events: &[TimelineEvent]) -> Vec<EventLayout> {
        layout_events(
            events,
            &self.viewport,
            self.selected_event.as_ref(),
            &self.layout_params,
        )
    }

    /// Get everything needed to draw the timeline
    pub fn scene(&self, events: &[TimelineEvent], settings: &TimelineSettings) -> Scene {
        let inputs = SceneInputs {
            size: self.canvas_size,
            colours: &self.colours,
            params: &self.layout_params,
            settings,
            events,
        };
        build_scene(&inputs, &self.markers(), &self.layout(events))
    }

    // Export

    /// Disable input and switch to an export's viewport and canvas size,
    /// returning what was replaced
    pub(crate) fn begin_export(
        &mut self,
        viewport: Viewport,
        canvas_size: Point,
    ) -> Result<SavedView, ExportError> {
        if self.is_exporting {
            return Err(ExportError::AlreadyExporting);
        }
        let saved = SavedView {
            viewport: self.viewport,
            canvas_size: self.canvas_size,
        };
        debug!("begin export: {saved:?} -> {viewport:?} {canvas_size:?}");
        self.is_exporting = true;
        self.drag = DragState::Idle;
        self.viewport = viewport;
        self.canvas_size = canvas_size;
        Ok(saved)
    }

    /// Put back what an export replaced and re-enable input
    pub(crate) fn end_export(&mut self, saved: SavedView) {
        debug!("end export: restoring {saved:?}");
        self.viewport = saved.viewport;
        self.canvas_size = saved.canvas_size;
        self.is_exporting = false;
    }
}
