// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Loading and saving the session's events and settings
//!
//! Nothing is written automatically: the application saves after each change
//! it commits.
//!

use crate::{KeyValueStore, StoreError};
use log::{debug, info};
use timeline_pro_core::{EventCollection, TimelineSettings};

/// The key the event collection is stored under
pub const EVENTS_KEY: &str = "timeline-data";

/// The key the settings are stored under
pub const SETTINGS_KEY: &str = "timeline-settings";

/// Load the stored events.  If none have been stored yet, the collection
/// holding only the welcome event is returned.
pub async fn load_events(store: &dyn KeyValueStore) -> Result<EventCollection, StoreError> {
    let Some(json) = store.get(EVENTS_KEY).await? else {
        info!("No stored events, starting with the welcome event");
        return Ok(EventCollection::default());
    };
    let events: EventCollection = serde_json::from_str(&json)?;
    info!("Loaded {} stored events", events.len());
    Ok(events)
}

pub async fn save_events(
    store: &dyn KeyValueStore,
    events: &EventCollection,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(events)?;
    store.set(EVENTS_KEY, &json).await?;
    debug!("Saved {} events", events.len());
    Ok(())
}

/// Load the stored settings.  Missing settings (or missing fields, such as
/// the theme in settings stored by older versions) take their defaults.
pub async fn load_settings(store: &dyn KeyValueStore) -> Result<TimelineSettings, StoreError> {
    let Some(json) = store.get(SETTINGS_KEY).await? else {
        info!("No stored settings, using the defaults");
        return Ok(TimelineSettings::default());
    };
    Ok(serde_json::from_str(&json)?)
}

pub async fn save_settings(
    store: &dyn KeyValueStore,
    settings: &TimelineSettings,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(settings)?;
    store.set(SETTINGS_KEY, &json).await?;
    debug!("Saved settings (theme = {})", settings.theme);
    Ok(())
}
