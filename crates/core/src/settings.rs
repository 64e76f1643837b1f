// SPDX-License-Identifier: MIT

//!
//! Display settings
//!

use serde::{Deserialize, Serialize};

/// The theme used when none has been chosen
pub const DEFAULT_THEME: &str = "default-dark";

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}

fn default_true() -> bool {
    true
}

/// The user's display settings.  The theme is only an identifier; what it
/// looks like is up to the frontend.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineSettings {
    /// Whether to draw event titles on cards
    #[serde(default = "default_true")]
    pub show_event_name: bool,

    /// Whether to draw event dates on cards
    #[serde(default = "default_true")]
    pub show_event_date: bool,

    #[serde(default = "default_theme")]
    pub theme: String,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            show_event_name: true,
            show_event_date: true,
            theme: default_theme(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_theme_gets_default() {
        let settings: TimelineSettings =
            serde_json::from_str(r#"{"showEventName": false, "showEventDate": true}"#).unwrap();
        assert!(!settings.show_event_name);
        assert!(settings.show_event_date);
        assert_eq!(settings.theme, DEFAULT_THEME);
    }

    #[test]
    fn serialise_camel_case() {
        let json = serde_json::to_value(TimelineSettings::default()).unwrap();
        assert_eq!(json["showEventName"], true);
        assert_eq!(json["showEventDate"], true);
        assert_eq!(json["theme"], "default-dark");
    }
}
