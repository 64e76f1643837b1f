// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Exporting the event collection as a JSON document
//!

use crate::StoreError;
use chrono::{Local, NaiveDate};
use log::info;
use std::path::{Path, PathBuf};
use timeline_pro_core::TimelineDocument;

/// The file name a JSON export made on the given day is saved as
pub fn json_export_file_name(day: NaiveDate) -> String {
    format!("timeline-{}.json", day.format("%Y-%m-%d"))
}

/// The document as pretty-printed JSON
pub fn document_to_json(document: &TimelineDocument) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Write the document to `timeline-YYYY-MM-DD.json` (today's date) in the
/// directory, returning the path written to.  An export made earlier the
/// same day is replaced.
pub async fn export_json<P: AsRef<Path>>(
    document: &TimelineDocument,
    dir: P,
) -> Result<PathBuf, StoreError> {
    let dir = dir.as_ref();
    let json = document_to_json(document)?;
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(json_export_file_name(Local::now().date_naive()));
    tokio::fs::write(&path, json).await?;
    info!(
        "Exported {} events to {}",
        document.events().len(),
        path.display()
    );
    Ok(path)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::import_json_file;
    use tempdir::TempDir;
    use timeline_pro_core::{EventCollection, TimelineEvent, date};

    #[test]
    fn file_name() {
        assert_eq!(
            json_export_file_name(date!("2024-03-09")),
            "timeline-2024-03-09.json"
        );
    }

    #[test]
    fn pretty_printed_flat_events() {
        let event = TimelineEvent::new("Launch", date!("2020-01-01").into());
        let document = TimelineDocument::new(vec![event].into());
        let json = document_to_json(&document).unwrap();

        assert!(json.starts_with("{\n  \"title\": \"My Timeline\",\n  \"events\": ["));
        assert!(json.contains("\"startDate\": \"2020-01-01\""));
        assert!(json.contains("\"color\": \"#3b82f6\""));
    }

    #[tokio::test]
    async fn export_then_import() {
        let dir = TempDir::new("timeline-pro-export").unwrap();
        let events: EventCollection = vec![
            TimelineEvent::new("Launch", date!("2020-01-01").into()),
            TimelineEvent::new("Landing", date!("2020-06-15").into()),
        ]
        .into();
        let document = TimelineDocument::new(events).with_title("Mission");

        let path = export_json(&document, dir.path().join("out")).await.unwrap();
        assert_eq!(
            path.file_name().and_then(|name| name.to_str()),
            Some(json_export_file_name(Local::now().date_naive()).as_str())
        );
        assert_eq!(import_json_file(&path).await.unwrap(), document);
    }
}
