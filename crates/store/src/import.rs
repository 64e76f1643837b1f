// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Importing events from JSON documents, CSV text and published Google sheets
//!
//! Every import builds a complete new collection (or fails), so a failed
//! import never leaves the caller with part of a document.
//!

use crate::ImportError;
use log::{debug, info, warn};
use std::path::Path;
use timeline_pro_core::{
    Colour, DEFAULT_EVENT_COLOUR, DEFAULT_EVENT_TITLE, EventCollection, EventDate,
    TimelineDocument, TimelineEvent,
};

/// Where published Google sheets are fetched from
pub const GOOGLE_SHEETS_BASE_URL: &str = "https://docs.google.com/spreadsheets/d";

/// Parse a JSON timeline document (`{ "title": .., "events": [..] }`)
pub fn import_json_str(json: &str) -> Result<TimelineDocument, ImportError> {
    let document: TimelineDocument = serde_json::from_str(json)?;
    info!(
        "Imported {} events from JSON document `{}`",
        document.events().len(),
        document.title()
    );
    Ok(document)
}

/// Read and parse a JSON timeline document file
pub async fn import_json_file<P: AsRef<Path>>(path: P) -> Result<TimelineDocument, ImportError> {
    let path = path.as_ref();
    debug!("Reading JSON document {}", path.display());
    let json = tokio::fs::read_to_string(path).await?;
    import_json_str(&json)
}

/// A CSV column this importer knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Title,
    Description,
    StartDate,
    EndDate,
    Category,
    Image,
    Colour,
}

impl Column {
    fn from_header(header: &str) -> Option<Self> {
        match header.trim().to_lowercase().as_str() {
            "title" => Some(Column::Title),
            "description" => Some(Column::Description),
            "start date" => Some(Column::StartDate),
            "end date" => Some(Column::EndDate),
            "category" => Some(Column::Category),
            "image" => Some(Column::Image),
            "color" => Some(Column::Colour),
            _ => None,
        }
    }
}

/// One row's values, by column (empty values are treated as absent)
#[derive(Debug, Default)]
struct CsvRow<'a> {
    title: Option<&'a str>,
    description: Option<&'a str>,
    start_date: Option<&'a str>,
    end_date: Option<&'a str>,
    category: Option<&'a str>,
    image: Option<&'a str>,
    colour: Option<&'a str>,
}

impl<'a> CsvRow<'a> {
    fn parse(columns: &[Option<Column>], line: &'a str) -> Self {
        let mut row = CsvRow::default();
        for (column, value) in columns.iter().zip(line.split(',')) {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            let slot = match column {
                Some(Column::Title) => &mut row.title,
                Some(Column::Description) => &mut row.description,
                Some(Column::StartDate) => &mut row.start_date,
                Some(Column::EndDate) => &mut row.end_date,
                Some(Column::Category) => &mut row.category,
                Some(Column::Image) => &mut row.image,
                Some(Column::Colour) => &mut row.colour,
                None => continue,
            };
            *slot = Some(value);
        }
        row
    }

    fn into_event(self) -> TimelineEvent {
        let start = self
            .start_date
            .map(EventDate::parse)
            .unwrap_or_else(EventDate::today);

        let colour = match self.colour {
            None => DEFAULT_EVENT_COLOUR,
            Some(hex) => Colour::from_hex(hex).unwrap_or_else(|error| {
                warn!("CSV row: {error}, using the default colour");
                DEFAULT_EVENT_COLOUR
            }),
        };

        let mut event = TimelineEvent::new(self.title.unwrap_or(DEFAULT_EVENT_TITLE), start)
            .with_description(self.description.unwrap_or_default())
            .with_end(self.end_date.map(EventDate::parse))
            .with_image_url(self.image.map(str::to_string))
            .with_colour(colour);
        if let Some(category) = self.category {
            event = event.with_category(category);
        }
        event
    }
}

/// Build events from CSV text.
///
/// The first line names the columns (`title`, `description`, `start date`,
/// `end date`, `category`, `image`, `color`; any case, any order, unknown
/// columns ignored).  Values are split on commas, so quoted values holding
/// commas are not supported.  Each row becomes a new point event.
pub fn import_csv(csv: &str) -> Result<EventCollection, ImportError> {
    let mut lines = csv.lines();
    let header = lines
        .next()
        .map(|line| line.trim_start_matches('\u{feff}'))
        .filter(|line| !line.trim().is_empty())
        .ok_or(ImportError::EmptyCsv)?;
    let columns: Vec<Option<Column>> = header.split(',').map(Column::from_header).collect();

    let events: EventCollection = lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| CsvRow::parse(&columns, line).into_event())
        .collect();
    info!("Imported {} events from CSV", events.len());
    Ok(events)
}

/// Check a sheet ID is safe to put in a URL path
fn validate_sheet_id(sheet_id: &str) -> Result<(), ImportError> {
    let is_valid = !sheet_id.is_empty()
        && sheet_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if is_valid {
        Ok(())
    } else {
        Err(ImportError::InvalidSheetId(sheet_id.to_string()))
    }
}

/// Fetches sheets that have been "published to the web" as CSV
#[derive(Debug, Clone)]
pub struct SheetClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for SheetClient {
    fn default() -> Self {
        Self::new(GOOGLE_SHEETS_BASE_URL)
    }
}

impl SheetClient {
    /// Fetch sheets from somewhere other than Google (e.g. a test server)
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// The URL the sheet's CSV export is fetched from
    pub fn sheet_url(&self, sheet_id: &str) -> Result<String, ImportError> {
        validate_sheet_id(sheet_id)?;
        Ok(format!("{}/{sheet_id}/export?format=csv", self.base_url))
    }

    /// Fetch the sheet and import it as CSV.  There are no retries.
    pub async fn fetch_sheet(&self, sheet_id: &str) -> Result<EventCollection, ImportError> {
        let url = self.sheet_url(sheet_id)?;
        debug!("GET {url}");
        let csv = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        import_csv(&csv)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::path_to_test_data;
    use tempdir::TempDir;
    use timeline_pro_core::{EventKind, Placement, colour, date};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[test]
    fn csv_with_title_and_start_only() {
        let events = import_csv("title,start date\nLaunch,2020-01-01\n").unwrap();
        assert_eq!(events.len(), 1);

        let event = &events[0];
        assert_eq!(event.title(), "Launch");
        assert_eq!(event.start().date(), Some(date!("2020-01-01")));
        assert_eq!(event.category(), "General");
        assert_eq!(event.colour(), colour!("#3b82f6"));
        assert_eq!(event.end(), None);
        assert_eq!(event.position(), Placement::Above);
        assert_eq!(event.scale(), 1.0);
        assert_eq!(event.kind(), EventKind::PointEvent);
    }

    #[test]
    fn csv_all_columns() {
        let csv = "\
            Title , Description,START DATE,End Date,Category,Image,Color\r\n\
            Apollo 11,First landing,1969-07-16,1969-07-24,Space,https://x.test/a.png,#ff0000\r\n\
            \r\n\
            Gemini,,1965-03-23,,,,\r\n";
        let events = import_csv(csv).unwrap();
        assert_eq!(events.len(), 2);

        let apollo = &events[0];
        assert_eq!(apollo.title(), "Apollo 11");
        assert_eq!(apollo.description(), "First landing");
        assert_eq!(apollo.end().and_then(EventDate::date), Some(date!("1969-07-24")));
        assert_eq!(apollo.category(), "Space");
        assert_eq!(apollo.image_url(), Some("https://x.test/a.png"));
        assert_eq!(apollo.colour(), colour!("#ff0000"));

        let gemini = &events[1];
        assert_eq!(gemini.end(), None);
        assert_eq!(gemini.category(), "General");
        assert_eq!(gemini.image_url(), None);

        // Every row gets its own ID
        assert_ne!(apollo.id(), gemini.id());
    }

    #[test]
    fn csv_fallbacks() {
        let events = import_csv("title,start date,color,notes\n,,blue,ignored\n").unwrap();
        let event = &events[0];
        assert_eq!(event.title(), "Untitled Event");
        assert_eq!(event.start(), &EventDate::today());
        assert_eq!(event.colour(), colour!("#3b82f6"));
    }

    #[test]
    fn csv_without_header() {
        assert!(matches!(import_csv(""), Err(ImportError::EmptyCsv)));
        assert!(matches!(import_csv("  \nLaunch"), Err(ImportError::EmptyCsv)));

        // A header with no rows is simply empty
        assert!(import_csv("title,start date").unwrap().is_empty());
    }

    #[test]
    fn json_document() {
        let document = import_json_str(
            r##"{
                "title": "Space",
                "events": [
                    {"id": "a", "title": "Launch", "startDate": "2020-01-01",
                     "category": "General", "color": "#3b82f6"}
                ]
            }"##,
        )
        .unwrap();
        assert_eq!(document.title(), "Space");
        assert_eq!(document.events().len(), 1);

        // Title is optional, events are not
        assert_eq!(import_json_str(r#"{"events": []}"#).unwrap().title(), "My Timeline");
        assert!(matches!(
            import_json_str(r#"{"title": "x"}"#),
            Err(ImportError::SerdeJson(_))
        ));
        assert!(import_json_str("[").is_err());
    }

    #[tokio::test]
    async fn json_file() {
        let path = path_to_test_data().join("documents/space.json");
        let document = import_json_file(&path).await.unwrap();
        assert_eq!(document.title(), "Space Race");
        assert_eq!(document.events().len(), 3);

        let dir = TempDir::new("timeline-pro-import").unwrap();
        assert!(matches!(
            import_json_file(dir.path().join("missing.json")).await,
            Err(ImportError::StdIo(_))
        ));
    }

    #[test]
    fn sheet_ids() {
        let client = SheetClient::default();
        assert_eq!(
            client.sheet_url("1AbC-d_9").unwrap(),
            "https://docs.google.com/spreadsheets/d/1AbC-d_9/export?format=csv"
        );
        for bad in ["", "a/b", "../x", "a?b", "a b"] {
            assert!(matches!(
                client.sheet_url(bad),
                Err(ImportError::InvalidSheetId(_))
            ));
        }
    }

    /// Serve one HTTP response, returning the request line that was received
    async fn serve_once(status: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buffer = [0u8; 1024];
            while !request.windows(4).any(|window| window == b"\r\n\r\n") {
                let read = socket.read(&mut buffer).await.unwrap();
                if read == 0 {
                    break;
                }
                request.extend_from_slice(&buffer[..read]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            let request = String::from_utf8_lossy(&request).to_string();
            request.lines().next().unwrap_or_default().to_string()
        });
        (base_url, handle)
    }

    #[tokio::test]
    async fn fetch_sheet() {
        let (base_url, server) =
            serve_once("200 OK", "title,start date\nLaunch,2020-01-01\n").await;
        let events = SheetClient::new(base_url).fetch_sheet("abc123").await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title(), "Launch");
        assert_eq!(
            server.await.unwrap(),
            "GET /abc123/export?format=csv HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn fetch_unpublished_sheet() {
        let (base_url, server) = serve_once("404 Not Found", "").await;
        let result = SheetClient::new(base_url).fetch_sheet("abc123").await;
        assert!(matches!(result, Err(ImportError::Reqwest(_))));
        server.await.unwrap();
    }
}
