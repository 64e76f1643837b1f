// SPDX-License-Identifier: MIT

//!
//! The Timeline Pro event type
//!

use crate::{Colour, EventDate, EventId};
use log::warn;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use timeline_pro_macros::colour;

/// The colour given to events that don't specify one (or specify an invalid
/// one)
pub const DEFAULT_EVENT_COLOUR: Colour = colour!("#3b82f6");

/// The category given to events that don't specify one
pub const DEFAULT_EVENT_CATEGORY: &str = "General";

/// The title given to events that don't specify one
pub const DEFAULT_EVENT_TITLE: &str = "Untitled Event";

/// Which side of the axis an event's card is drawn on
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    #[default]
    #[display("above")]
    Above,
    #[display("below")]
    Below,
}

/// How an event is drawn
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum EventKind {
    /// A single moment: a marker glyph joined to the axis
    #[default]
    PointEvent,

    /// A span of time drawn as a duration bar
    Period,

    /// A progress indicator.  `value` is a percentage (0 to 100 inclusive)
    Percentage { value: f64 },
}

impl EventKind {
    /// Create a percentage kind, clamping the value to 0..=100 (`NaN` is
    /// treated as 0)
    pub fn percentage(value: f64) -> Self {
        let value = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 100.0)
        };
        EventKind::Percentage { value }
    }

    /// The name used for this kind in documents
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::PointEvent => "point-event",
            EventKind::Period => "period",
            EventKind::Percentage { .. } => "percentage",
        }
    }
}

/// The Timeline Pro [`TimelineEvent`] type
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineEvent {
    id: EventId,
    title: String,
    description: String,

    /// When the event begins
    start: EventDate,

    /// When the event ends (if it has a duration)
    end: Option<EventDate>,

    category: String,
    colour: Colour,
    image_url: Option<String>,
    position: Placement,

    /// Visual magnification (always positive, 1.0 is normal size)
    scale: f64,

    kind: EventKind,
}

impl TimelineEvent {
    /// Create a point event with a fresh ID and default styling
    pub fn new<S: Into<String>>(title: S, start: EventDate) -> Self {
        Self {
            id: EventId::new(),
            title: title.into(),
            description: String::new(),
            start,
            end: None,
            category: DEFAULT_EVENT_CATEGORY.to_string(),
            colour: DEFAULT_EVENT_COLOUR,
            image_url: None,
            position: Placement::Above,
            scale: 1.0,
            kind: EventKind::PointEvent,
        }
    }

    /// The event shown when there's nothing saved yet
    pub fn welcome() -> Self {
        TimelineEvent::new("Welcome to Timeline Pro", EventDate::today())
            .with_id(EventId::from("1"))
            .with_description("Click me to edit or zoom in/out with your mouse wheel.")
            .with_category("Getting Started")
    }

    pub fn with_id(mut self, id: EventId) -> Self {
        self.id = id;
        self
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_end(mut self, end: Option<EventDate>) -> Self {
        self.end = end;
        self
    }

    pub fn with_category<S: Into<String>>(mut self, category: S) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_colour(mut self, colour: Colour) -> Self {
        self.colour = colour;
        self
    }

    pub fn with_image_url(mut self, image_url: Option<String>) -> Self {
        self.image_url = image_url.filter(|url| !url.trim().is_empty());
        self
    }

    pub fn with_position(mut self, position: Placement) -> Self {
        self.position = position;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.set_scale(scale);
        self
    }

    pub fn with_kind(mut self, kind: EventKind) -> Self {
        self.set_kind(kind);
        self
    }

    pub fn id(&self) -> &EventId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title<S: Into<String>>(&mut self, title: S) {
        self.title = title.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get the event's start [`EventDate`]
    pub fn start(&self) -> &EventDate {
        &self.start
    }

    pub fn set_start(&mut self, start: EventDate) {
        self.start = start;
    }

    /// Get the event's end [`EventDate`] (if it has one)
    pub fn end(&self) -> Option<&EventDate> {
        self.end.as_ref()
    }

    pub fn set_end(&mut self, end: Option<EventDate>) {
        self.end = end;
    }

    /// The end date if there is one, otherwise the start date
    pub fn end_or_start(&self) -> &EventDate {
        self.end.as_ref().unwrap_or(&self.start)
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn colour(&self) -> Colour {
        self.colour
    }

    pub fn set_colour(&mut self, colour: Colour) {
        self.colour = colour;
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn position(&self) -> Placement {
        self.position
    }

    pub fn set_position(&mut self, position: Placement) {
        self.position = position;
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Set the visual magnification.  Anything that isn't a positive finite
    /// number resets it to 1.0
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: EventKind) {
        self.kind = match kind {
            EventKind::Percentage { value } => EventKind::percentage(value),
            kind => kind,
        };
    }
}

/// The flat shape events have in documents and storage.  Used only by the
/// custom (de)serialiser.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RawEvent {
    id: EventId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    start_date: EventDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_date: Option<EventDate>,
    #[serde(default)]
    category: String,
    #[serde(default)]
    color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    #[serde(default)]
    position: Option<Placement>,
    #[serde(default)]
    scale: Option<f64>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<f64>,
}

impl From<RawEvent> for TimelineEvent {
    fn from(raw: RawEvent) -> Self {
        // Deal with documents holding `"endDate": ""` (i.e. cleared in a form)
        let end = raw.end_date.filter(|end| !end.as_str().trim().is_empty());

        let colour = match raw.color.as_deref() {
            None | Some("") => DEFAULT_EVENT_COLOUR,
            Some(hex) => Colour::from_hex(hex).unwrap_or_else(|error| {
                warn!("event {}: {error}, using the default colour", raw.id);
                DEFAULT_EVENT_COLOUR
            }),
        };

        let kind = match raw.kind.as_deref() {
            Some("period") => EventKind::Period,
            Some("percentage") => EventKind::percentage(raw.value.unwrap_or(0.0)),
            _ => EventKind::PointEvent,
        };

        let mut event = TimelineEvent {
            id: raw.id,
            title: raw.title,
            description: raw.description,
            start: raw.start_date,
            end,
            category: raw.category,
            colour,
            image_url: None,
            position: raw.position.unwrap_or_default(),
            scale: 1.0,
            kind,
        }
        .with_image_url(raw.image_url);
        event.set_scale(raw.scale.unwrap_or(1.0));
        event
    }
}

impl From<&TimelineEvent> for RawEvent {
    fn from(event: &TimelineEvent) -> Self {
        let value = match event.kind {
            EventKind::Percentage { value } => Some(value),
            _ => None,
        };
        RawEvent {
            id: event.id.clone(),
            title: event.title.clone(),
            description: event.description.clone(),
            start_date: event.start.clone(),
            end_date: event.end.clone(),
            category: event.category.clone(),
            color: Some(event.colour.as_hex()),
            image_url: event.image_url.clone(),
            position: Some(event.position),
            scale: Some(event.scale),
            kind: Some(event.kind.as_str().to_string()),
            value,
        }
    }
}

impl Serialize for TimelineEvent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        RawEvent::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TimelineEvent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw_event = RawEvent::deserialize(deserializer)?;
        Ok(TimelineEvent::from(raw_event))
    }
}
