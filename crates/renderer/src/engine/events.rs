// SPDX-License-Identifier: MIT

//!
//! Events
//!

use serde::Serialize;
use std::fmt::Debug;
use timeline_pro_core::EventId;

/// Interaction events
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TimelineInteractionEvent {
    /// An event's card was clicked (the application opens its edit form)
    Click(EventId),
}
