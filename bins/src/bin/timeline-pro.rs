// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! The Timeline Pro command line tool
//!

use clap::{Parser, Subcommand, ValueEnum, builder::PossibleValue};
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, TermLogger, TerminalMode,
};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;
use timeline_pro_core::{
    Colour, DEFAULT_THEME, EventCollection, EventDate, EventId, EventKind, Placement,
    TimelineDocument, TimelineEvent,
};
use timeline_pro_renderer::{
    DEFAULT_SCALE, DirectorySink, Engine, ExportConfig, ExportCoordinator, ImageRasterizer,
    TimelineColours, compute_markers,
};
use timeline_pro_store::{
    AppConfig, FileStore, SheetClient, export_json, import_csv, import_json_file, load_events,
    load_settings, save_events, save_settings,
};

#[macro_use]
extern crate log;
extern crate simplelog;

/// The size of the (imaginary) live view used when laying out and exporting
const VIEW_WIDTH: f64 = 1200.0;
const VIEW_HEIGHT: f64 = 600.0;

/// Timeline Pro entry point
///
/// Everything runs on one thread: the renderer's engine is shared between
/// the export coordinator and input as `Rc<RefCell<..>>`.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    // Setup logging
    let config_log = ConfigBuilder::new()
        .add_filter_allow_str("timeline_pro")
        .build();
    CombinedLogger::init(vec![TermLogger::new(
        level_filter(args.verbose),
        config_log,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )])?;

    let config = AppConfig::resolve(args.data_dir)?;
    let store = config.open_store();
    debug!("Using store at {}", store.root().display());

    match args.command {
        Command::Markers {
            scale,
            offset,
            width,
        } => {
            for marker in compute_markers(scale, offset, width) {
                let major = if marker.is_major { "major" } else { "" };
                println!("{:>10.1}  {:<12}  {major}", marker.x, marker.label);
            }
        }
        Command::Layout { width, height } => {
            let events = load_events(&store).await?;
            let mut engine = Engine::new();
            engine.set_canvas_size(width, height);
            engine.center_on_today();
            let layouts = engine.layout(events.as_slice());
            println!("{}", serde_json::to_string_pretty(&layouts)?);
        }
        Command::ExportImage { out, settle_ms } => export_image(&store, out, settle_ms).await?,
        Command::ExportJson { out, title } => {
            let events = load_events(&store).await?;
            let mut document = TimelineDocument::new(events);
            if let Some(title) = title {
                document = document.with_title(title);
            }
            let path = export_json(&document, out).await?;
            println!("{}", path.display());
        }
        Command::ImportJson { file } => {
            let document = import_json_file(file).await?;
            replace_events(&store, document.into_events()).await?;
        }
        Command::ImportCsv { file } => {
            let csv = tokio::fs::read_to_string(file).await?;
            replace_events(&store, import_csv(&csv)?).await?;
        }
        Command::ImportSheet { sheet_id } => {
            let events = SheetClient::default().fetch_sheet(&sheet_id).await.map_err(|error| {
                error!("Failed to fetch sheet: {error}");
                eprintln!(
                    "Failed to fetch Google Sheet. Make sure it is public (Published to Web as CSV)."
                );
                error
            })?;
            replace_events(&store, events).await?;
        }
        Command::Add(event_args) => {
            let mut events = load_events(&store).await?;
            let event = event_args.into_event()?;
            println!("{}", event.id());
            events.upsert(event);
            save_events(&store, &events).await?;
        }
        Command::Remove { id } => {
            let mut events = load_events(&store).await?;
            match events.remove(&EventId::from(&id)) {
                Some(event) => {
                    save_events(&store, &events).await?;
                    println!("Removed `{}`", event.title());
                }
                None => {
                    eprintln!("No event with ID `{id}`");
                    std::process::exit(1);
                }
            }
        }
        Command::List { categories } => {
            let events = load_events(&store).await?;
            if categories {
                for category in events.categories() {
                    println!("{category}");
                }
            } else {
                for event in events.sorted_by_start() {
                    let dates = match event.end() {
                        Some(end) => format!("{}..{end}", event.start()),
                        None => event.start().to_string(),
                    };
                    println!(
                        "{}  {dates:<22}  {:<11}  {:<16}  {}",
                        event.id(),
                        event.kind().as_str(),
                        event.category(),
                        event.title()
                    );
                }
            }
        }
        Command::Settings {
            theme,
            show_event_name,
            show_event_date,
        } => {
            let mut settings = load_settings(&store).await?;
            let is_changed =
                theme.is_some() || show_event_name.is_some() || show_event_date.is_some();
            if let Some(theme) = theme {
                settings.theme = theme;
            }
            if let Some(show_event_name) = show_event_name {
                settings.show_event_name = show_event_name;
            }
            if let Some(show_event_date) = show_event_date {
                settings.show_event_date = show_event_date;
            }
            if is_changed {
                save_settings(&store, &settings).await?;
            }
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }

    Ok(())
}

fn level_filter(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Replace the stored events with successfully imported ones
async fn replace_events(
    store: &FileStore,
    events: EventCollection,
) -> Result<(), Box<dyn std::error::Error>> {
    save_events(store, &events).await?;
    println!("Imported {} events", events.len());
    Ok(())
}

/// Render the stored events to a PNG in `out`
async fn export_image(
    store: &FileStore,
    out: PathBuf,
    settle_ms: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let events = load_events(store).await?;
    let settings = load_settings(store).await?;

    let engine = Rc::new(RefCell::new(Engine::new()));
    {
        let mut engine = engine.borrow_mut();
        engine.set_canvas_size(VIEW_WIDTH, VIEW_HEIGHT);
        engine.center_on_today();
    }

    let mut export_config = ExportConfig::default();
    if let Some(settle_ms) = settle_ms {
        export_config.settle_delay = Duration::from_millis(settle_ms);
    }

    // Only the default theme's palette is known here
    let theme_background =
        (settings.theme == DEFAULT_THEME).then(|| TimelineColours::default().background);

    let coordinator = ExportCoordinator::new(export_config, |message| eprintln!("{message}"))
        .with_theme_background(theme_background);
    let path = coordinator
        .export_to_image(
            &engine,
            events.as_slice(),
            &settings,
            &ImageRasterizer,
            &DirectorySink::new(out),
        )
        .await?;
    println!("{}", path.display());
    Ok(())
}

/// Timeline Pro CLI args using [clap]
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Timeline Pro: build, view and export timelines of events"
)]
pub struct Cli {
    /// Log more (repeat for even more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Keep data here instead of the platform's data directory
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the axis markers for a viewport
    Markers {
        /// Pixels per day
        #[arg(long, default_value_t = DEFAULT_SCALE)]
        scale: f64,

        /// Pixel position of 1970-01-01
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        offset: f64,

        /// Viewport width in pixels
        #[arg(long, default_value_t = VIEW_WIDTH)]
        width: f64,
    },

    /// Print the layout of the stored events, centred on today
    Layout {
        #[arg(long, default_value_t = VIEW_WIDTH)]
        width: f64,

        #[arg(long, default_value_t = VIEW_HEIGHT)]
        height: f64,
    },

    /// Export the stored events as a PNG image
    ///
    /// The image shows the axis, markers, bars and cards. Text (titles, dates
    /// and marker labels) is not drawn.
    ExportImage {
        /// Directory to write the image to
        #[arg(long)]
        out: PathBuf,

        /// Override how long the timeline is left to settle before capture
        #[arg(long)]
        settle_ms: Option<u64>,
    },

    /// Export the stored events as a JSON document
    ExportJson {
        /// Directory to write the document to
        #[arg(long)]
        out: PathBuf,

        #[arg(long)]
        title: Option<String>,
    },

    /// Replace the stored events with those in a JSON document
    ImportJson { file: PathBuf },

    /// Replace the stored events with those in a CSV file
    ImportCsv { file: PathBuf },

    /// Replace the stored events with those in a published Google sheet
    ImportSheet { sheet_id: String },

    /// Add an event (or replace the one with the same ID)
    Add(EventArgs),

    /// Remove an event
    Remove { id: String },

    /// List the stored events by start date
    List {
        /// List the categories in use instead
        #[arg(long)]
        categories: bool,
    },

    /// Show the settings, changing any given
    Settings {
        #[arg(long)]
        theme: Option<String>,

        #[arg(long)]
        show_event_name: Option<bool>,

        #[arg(long)]
        show_event_date: Option<bool>,
    },
}

#[derive(clap::Args, Debug)]
pub struct EventArgs {
    /// Replace the event with this ID (a new ID is generated otherwise)
    #[arg(long)]
    pub id: Option<String>,

    #[arg(long)]
    pub title: String,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: String,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,

    #[arg(long, value_enum, default_value_t = KindArg::PointEvent)]
    pub kind: KindArg,

    /// Progress of a percentage event (0 to 100)
    #[arg(long)]
    pub value: Option<f64>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    /// Hex colour, e.g. `#3b82f6`
    #[arg(long)]
    pub colour: Option<String>,

    #[arg(long)]
    pub image_url: Option<String>,

    #[arg(long)]
    pub below: bool,

    /// Size multiplier for the event's card
    #[arg(long, default_value_t = 1.0)]
    pub scale: f64,
}

impl EventArgs {
    fn into_event(self) -> Result<TimelineEvent, Box<dyn std::error::Error>> {
        let start = EventDate::parse(self.start);
        if !start.is_valid() {
            warn!("`{start}` is not a valid date, the event will be drawn at the epoch");
        }

        let kind = match self.kind {
            KindArg::PointEvent => EventKind::PointEvent,
            KindArg::Period => EventKind::Period,
            KindArg::Percentage => EventKind::percentage(self.value.unwrap_or(0.0)),
        };
        let position = if self.below {
            Placement::Below
        } else {
            Placement::Above
        };

        let mut event = TimelineEvent::new(self.title, start)
            .with_end(self.end.map(EventDate::parse))
            .with_description(self.description.unwrap_or_default())
            .with_image_url(self.image_url)
            .with_position(position)
            .with_scale(self.scale)
            .with_kind(kind);
        if let Some(id) = self.id {
            event = event.with_id(EventId::from(id));
        }
        if let Some(category) = self.category {
            event = event.with_category(category);
        }
        if let Some(colour) = self.colour {
            event = event.with_colour(Colour::from_hex(colour)?);
        }
        Ok(event)
    }
}

#[derive(Debug, Clone)]
pub enum KindArg {
    PointEvent,
    Period,
    Percentage,
}

impl ValueEnum for KindArg {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::PointEvent, Self::Period, Self::Percentage]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            KindArg::PointEvent => {
                Some(PossibleValue::new("point-event").help("A single moment"))
            }
            KindArg::Period => Some(PossibleValue::new("period").help("A span of dates")),
            KindArg::Percentage => Some(
                PossibleValue::new("percentage").help("A moment with a progress value (--value)"),
            ),
        }
    }
}
