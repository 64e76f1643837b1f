// SPDX-License-Identifier: MIT

//!
//! The Timeline Pro document type (the JSON import/export format)
//!

use crate::{EventCollection, TimelineEvent};
use serde::{Deserialize, Serialize};

/// The title given to documents that don't have one
pub const DEFAULT_DOCUMENT_TITLE: &str = "My Timeline";

fn default_title() -> String {
    DEFAULT_DOCUMENT_TITLE.to_string()
}

/// A titled collection of events, as written to and read from JSON files
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TimelineDocument {
    #[serde(default = "default_title")]
    title: String,

    events: EventCollection,
}

impl TimelineDocument {
    /// Create a document with the default title
    pub fn new(events: EventCollection) -> Self {
        Self {
            title: default_title(),
            events,
        }
    }

    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = title.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Borrow the document's events
    pub fn events(&self) -> &EventCollection {
        &self.events
    }

    /// Take the document's events
    pub fn into_events(self) -> EventCollection {
        self.events
    }
}

impl From<Vec<TimelineEvent>> for TimelineDocument {
    fn from(events: Vec<TimelineEvent>) -> Self {
        TimelineDocument::new(EventCollection::from(events))
    }
}
