// SPDX-License-Identifier: MIT

//!
//! The application's collection of events
//!

use crate::{EventId, TimelineEvent};
use serde::{Deserialize, Serialize};

/// An ordered collection of [`TimelineEvent`]s.
///
/// Order matters: it is the order events were added in, and the renderer
/// assigns lanes by position in the collection.
#[derive(
    derive_more::IntoIterator,
    derive_more::Index,
    Clone,
    Debug,
    Deserialize,
    Serialize,
    PartialEq,
)]
#[into_iterator(owned, ref)]
#[serde(transparent)]
pub struct EventCollection(Vec<TimelineEvent>);

impl FromIterator<TimelineEvent> for EventCollection {
    fn from_iter<I: IntoIterator<Item = TimelineEvent>>(iter: I) -> Self {
        EventCollection(iter.into_iter().collect())
    }
}

impl From<Vec<TimelineEvent>> for EventCollection {
    fn from(events: Vec<TimelineEvent>) -> Self {
        EventCollection(events)
    }
}

/// A collection holding only the welcome event
impl Default for EventCollection {
    fn default() -> Self {
        EventCollection(vec![TimelineEvent::welcome()])
    }
}

impl EventCollection {
    /// A collection with no events at all
    pub fn empty() -> Self {
        EventCollection(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimelineEvent> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[TimelineEvent] {
        &self.0
    }

    pub fn get(&self, id: &EventId) -> Option<&TimelineEvent> {
        self.0.iter().find(|event| event.id() == id)
    }

    /// Replace the event with the same ID, or append it if there isn't one
    pub fn upsert(&mut self, event: TimelineEvent) {
        match self.0.iter_mut().find(|existing| existing.id() == event.id()) {
            Some(existing) => *existing = event,
            None => self.0.push(event),
        }
    }

    /// Remove the event with the given ID (returning it, if it was there)
    pub fn remove(&mut self, id: &EventId) -> Option<TimelineEvent> {
        let index = self.0.iter().position(|event| event.id() == id)?;
        Some(self.0.remove(index))
    }

    /// The distinct categories, in the order they first appear
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for event in &self.0 {
            if !categories.contains(&event.category()) {
                categories.push(event.category());
            }
        }
        categories
    }

    /// The events ordered by start date (stable, unparseable dates last)
    pub fn sorted_by_start(&self) -> Vec<&TimelineEvent> {
        let mut events: Vec<&TimelineEvent> = self.0.iter().collect();
        events.sort_by(|a, b| a.start().cmp(b.start()));
        events
    }
}
