// SPDX-License-Identifier: MIT

//!
//! Event IDs
//!

use uuid::Uuid;

/// The Timeline Pro event ID type.
///
/// IDs are opaque: imported documents may carry any string (e.g. `"1"`), so
/// only newly created events get a UUIDv4 based value.
#[rustfmt::skip]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(derive_more::Display, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Create a new, globally unique, `EventId`
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Create an ID from an existing value
    pub fn from<S: ToString>(string: S) -> Self {
        Self(string.to_string())
    }

    /// Get the underlying `&str`
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn new_ids_are_unique() {
        assert_ne!(EventId::new(), EventId::new());
        assert_eq!(EventId::new().as_str().len(), 32);
    }

    #[test]
    fn test_id_serde() {
        let id: EventId = serde_json::from_str(r#""k3j2h1""#).expect("Failed to deserialize");
        assert_eq!(id, EventId::from("k3j2h1"));
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""k3j2h1""#);
        assert_eq!(id.to_string(), "k3j2h1");

        // IDs are strings
        assert!(serde_json::from_str::<EventId>("1").is_err());
    }
}
