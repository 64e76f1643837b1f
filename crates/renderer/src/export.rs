// SPDX-License-Identifier: MIT

//!
//! Exporting the timeline as an image.
//!
//! An export temporarily reframes the viewport around every event, waits for
//! the re-rendered timeline to settle, rasterises it, and offers the PNG to an
//! [`ImageSink`].  Whatever happens the original viewport is put back and input
//! re-enabled afterwards.
//!

use crate::{Engine, EPOCH, Point, SavedView, Scene, Viewport, days_between};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use log::{debug, error, info, warn};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;
use thiserror::Error;
use timeline_pro_core::{Colour, TimelineEvent, TimelineSettings, colour};

/// Exports never span fewer days than this
pub const MIN_EXPORT_SPAN_DAYS: i64 = 7;

/// Errors that can arise when rasterising a scene
#[derive(Error, Debug)]
pub enum RasterError {
    #[error("cannot rasterise a {width} x {height} image")]
    InvalidSize { width: f64, height: f64 },

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error("rasteriser task failed: {0}")]
    Task(String),
}

/// Errors that can arise when exporting an image
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("there are no events to export")]
    NoEvents,

    #[error("none of the events has a valid start date")]
    NoDatedEvents,

    #[error("an export is already in progress")]
    AlreadyExporting,

    #[error(transparent)]
    Raster(#[from] RasterError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// How exported images are framed and rendered.
///
/// What ends up in the image is up to the [`Rasterizer`]: the
/// [`ImageRasterizer`](crate::ImageRasterizer) paints shapes only, so its
/// images carry no titles, dates or axis labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportConfig {
    /// Width of the exported timeline (before the pixel ratio is applied)
    pub width: f64,

    /// Height of the exported timeline (before the pixel ratio is applied)
    pub height: f64,

    /// The share of the width the events' span is stretched across
    pub margin_factor: f64,

    /// The share of the width left of the first event
    pub side_margin: f64,

    /// How long to let the re-rendered timeline settle before capturing it
    pub settle_delay: Duration,

    /// Pixel density multiplier for the raster
    pub pixel_ratio: f64,

    /// The background used when the theme's isn't known
    pub fallback_background: Colour,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            width: 2400.0,
            height: 1200.0,
            margin_factor: 0.8,
            side_margin: 0.1,
            settle_delay: Duration::from_millis(1200),
            pixel_ratio: 2.5,
            fallback_background: colour!("#020617"),
        }
    }
}

/// The viewport and canvas an export renders with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportFrame {
    pub viewport: Viewport,
    pub size: Point,

    /// The earliest start date
    pub first: NaiveDate,

    /// The end (or start) of the event starting last
    pub last: NaiveDate,

    /// The number of days stretched across the margins
    pub days_span: i64,
}

impl ExportFrame {
    /// Frame the events.  Events whose start dates don't parse are left out
    /// of the framing (they're still drawn, at x = 0).
    pub fn for_events(
        events: &[TimelineEvent],
        config: &ExportConfig,
    ) -> Result<ExportFrame, ExportError> {
        if events.is_empty() {
            return Err(ExportError::NoEvents);
        }

        let mut dated: Vec<(NaiveDate, &TimelineEvent)> = events
            .iter()
            .filter_map(|event| event.start().date().map(|start| (start, event)))
            .collect();
        dated.sort_by_key(|(start, _)| *start);
        let (Some((first, _)), Some((last_start, last_event))) = (dated.first(), dated.last())
        else {
            return Err(ExportError::NoDatedEvents);
        };
        let first = *first;
        let last = last_event
            .end()
            .and_then(|end| end.date())
            .unwrap_or(*last_start);

        let days_span = days_between(first, last).max(MIN_EXPORT_SPAN_DAYS);
        let scale = config.width * config.margin_factor / days_span as f64;
        let offset =
            config.width * config.side_margin - (days_between(EPOCH, first) as f64) * scale;

        Ok(ExportFrame {
            viewport: Viewport::new(scale, offset),
            size: Point {
                x: config.width,
                y: config.height,
            },
            first,
            last,
            days_span,
        })
    }
}

/// Turns a [`Scene`] into PNG bytes
#[async_trait(?Send)]
pub trait Rasterizer {
    async fn rasterize(&self, scene: Scene, pixel_ratio: f64) -> Result<Vec<u8>, RasterError>;
}

/// Somewhere to offer an exported image (e.g. a download)
pub trait ImageSink {
    /// Offer the image, returning where it ended up
    fn offer(&self, file_name: &str, png: &[u8]) -> Result<PathBuf, ExportError>;
}

/// An [`ImageSink`] writing into a directory
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl ImageSink for DirectorySink {
    fn offer(&self, file_name: &str, png: &[u8]) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        std::fs::write(&path, png)?;
        Ok(path)
    }
}

/// The name an exported image is offered under
pub fn export_file_name() -> String {
    format!("timeline-pro-{}.png", Utc::now().timestamp_millis())
}

/// Puts the engine back the way it was when dropped
struct ExportGuard<'a> {
    engine: &'a Rc<RefCell<Engine>>,
    saved: SavedView,
}

impl<'a> ExportGuard<'a> {
    fn begin(engine: &'a Rc<RefCell<Engine>>, frame: &ExportFrame) -> Result<Self, ExportError> {
        let saved = engine.borrow_mut().begin_export(frame.viewport, frame.size)?;
        Ok(Self { engine, saved })
    }
}

impl Drop for ExportGuard<'_> {
    fn drop(&mut self) {
        match self.engine.try_borrow_mut() {
            Ok(mut engine) => engine.end_export(self.saved),
            Err(error) => error!("could not restore the viewport after an export: {error}"),
        }
    }
}

/// Runs image exports.  Exports are sequential: a second one started while
/// one is running is rejected.
pub struct ExportCoordinator {
    config: ExportConfig,

    /// The current theme's background colour (if known)
    theme_background: Option<Colour>,

    /// Called with a message when an export fails
    alert_fn: Box<dyn Fn(&str)>,
}

impl ExportCoordinator {
    /// Create a coordinator.  Pass in a function the coordinator can call to
    /// tell the user an export failed.
    pub fn new<T>(config: ExportConfig, alert_fn: T) -> Self
    where
        T: 'static + Fn(&str),
    {
        Self {
            config,
            theme_background: None,
            alert_fn: Box::new(alert_fn),
        }
    }

    pub fn with_theme_background(mut self, background: Option<Colour>) -> Self {
        self.theme_background = background;
        self
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    fn background(&self) -> Colour {
        self.theme_background.unwrap_or_else(|| {
            warn!(
                "no theme background, using {}",
                self.config.fallback_background.as_hex()
            );
            self.config.fallback_background
        })
    }

    /// Export the timeline as a PNG and offer it to the sink
    pub async fn export_to_image<R, S>(
        &self,
        engine: &Rc<RefCell<Engine>>,
        events: &[TimelineEvent],
        settings: &TimelineSettings,
        rasterizer: &R,
        sink: &S,
    ) -> Result<PathBuf, ExportError>
    where
        R: Rasterizer + ?Sized,
        S: ImageSink + ?Sized,
    {
        if events.is_empty() {
            return Err(ExportError::NoEvents);
        }
        if engine.borrow().is_exporting() {
            return Err(ExportError::AlreadyExporting);
        }
        let frame = ExportFrame::for_events(events, &self.config)?;
        info!(
            "exporting {} events ({} to {}, {} days)",
            events.len(),
            frame.first,
            frame.last,
            frame.days_span
        );

        let guard = ExportGuard::begin(engine, &frame)?;
        let result = self.capture(engine, events, settings, rasterizer, sink).await;
        drop(guard);

        match &result {
            Ok(path) => info!("exported image to {}", path.display()),
            Err(export_error) => {
                error!("image export failed: {export_error}");
                (self.alert_fn)(&format!("High-res export failed: {export_error}"));
            }
        }
        result
    }

    async fn capture<R, S>(
        &self,
        engine: &Rc<RefCell<Engine>>,
        events: &[TimelineEvent],
        settings: &TimelineSettings,
        rasterizer: &R,
        sink: &S,
    ) -> Result<PathBuf, ExportError>
    where
        R: Rasterizer + ?Sized,
        S: ImageSink + ?Sized,
    {
        debug!("export settling for {:?}", self.config.settle_delay);
        tokio::time::sleep(self.config.settle_delay).await;

        let mut scene = engine.borrow().scene(events, settings);
        scene.background = self.background();
        debug!("export rasterising {} primitives", scene.primitives.len());
        let png = rasterizer.rasterize(scene, self.config.pixel_ratio).await?;
        sink.offer(&export_file_name(), &png)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::cell::Cell;
    use tempdir::TempDir;
    use timeline_pro_core::{EventDate, EventId, EventKind, date};

    fn event(id: &str, start: &str, end: Option<&str>) -> TimelineEvent {
        TimelineEvent::new(id, EventDate::parse(start))
            .with_id(EventId::from(id))
            .with_end(end.map(EventDate::parse))
    }

    fn config() -> ExportConfig {
        ExportConfig {
            settle_delay: Duration::ZERO,
            ..ExportConfig::default()
        }
    }

    fn engine() -> Rc<RefCell<Engine>> {
        let mut engine = Engine::new();
        engine.set_canvas_size(1000.0, 600.0);
        engine.center_on(date!("2000-01-01"));
        Rc::new(RefCell::new(engine))
    }

    /// Records what it was asked to rasterise, and can be told to fail
    struct FakeRasterizer {
        engine: Rc<RefCell<Engine>>,
        fail: bool,
        seen: RefCell<Option<(Scene, f64, Viewport, bool)>>,
    }

    impl FakeRasterizer {
        fn new(engine: &Rc<RefCell<Engine>>, fail: bool) -> Self {
            Self {
                engine: Rc::clone(engine),
                fail,
                seen: RefCell::new(None),
            }
        }
    }

    #[async_trait(?Send)]
    impl Rasterizer for FakeRasterizer {
        async fn rasterize(&self, scene: Scene, pixel_ratio: f64) -> Result<Vec<u8>, RasterError> {
            // Input arriving mid-export is ignored
            {
                let mut engine = self.engine.borrow_mut();
                engine.pan_start(0.0);
                engine.pan_move(5000.0);
                engine.zoom(10.0, -1.0);
            }
            let engine = self.engine.borrow();
            *self.seen.borrow_mut() = Some((
                scene,
                pixel_ratio,
                engine.viewport(),
                engine.is_exporting(),
            ));
            if self.fail {
                return Err(RasterError::Task(String::from("boom")));
            }
            Ok(vec![1, 2, 3])
        }
    }

    #[test]
    fn frame_scenario() {
        let events = vec![
            event("a", "2020-01-01", None),
            event("b", "2020-06-15", Some("2020-12-31")),
        ];
        let frame = ExportFrame::for_events(&events, &ExportConfig::default()).unwrap();
        assert_eq!(frame.days_span, 365);
        assert!((frame.viewport.scale() - 5.26).abs() < 0.01);
        assert!((frame.viewport.date_to_x(date!("2020-01-01")) - 240.0).abs() < 1e-6);
        assert_eq!(frame.size, Point { x: 2400.0, y: 1200.0 });
    }

    #[test]
    fn frame_minimum_span() {
        let events = vec![event("a", "2020-01-01", Some("2020-01-02"))];
        let frame = ExportFrame::for_events(&events, &ExportConfig::default()).unwrap();
        assert_eq!(frame.days_span, MIN_EXPORT_SPAN_DAYS);
        assert_eq!(frame.viewport.scale(), 2400.0 * 0.8 / 7.0);
    }

    #[test]
    fn frame_uses_last_starting_event() {
        // The long event starts first, so its end doesn't count
        let events = vec![
            event("long", "2000-01-01", Some("2050-01-01")),
            event("late", "2010-01-01", None),
            event("bad", "someday", None),
        ];
        let frame = ExportFrame::for_events(&events, &ExportConfig::default()).unwrap();
        assert_eq!(frame.first, date!("2000-01-01"));
        assert_eq!(frame.last, date!("2010-01-01"));
    }

    #[test]
    fn frame_errors() {
        assert!(matches!(
            ExportFrame::for_events(&[], &ExportConfig::default()),
            Err(ExportError::NoEvents)
        ));
        assert!(matches!(
            ExportFrame::for_events(&[event("a", "?", None)], &ExportConfig::default()),
            Err(ExportError::NoDatedEvents)
        ));
    }

    #[tokio::test]
    async fn export_restores_viewport() {
        let engine = engine();
        let before = engine.borrow().viewport();
        let dir = TempDir::new("timeline-pro-export").unwrap();
        let alerts = Rc::new(Cell::new(0));
        let alerts_clone = Rc::clone(&alerts);
        let coordinator = ExportCoordinator::new(config(), move |_| {
            alerts_clone.set(alerts_clone.get() + 1)
        })
        .with_theme_background(Some(colour!("#282a36")));
        let rasterizer = FakeRasterizer::new(&engine, false);
        let events = vec![
            event("a", "2020-01-01", None),
            event("b", "2020-06-15", Some("2020-12-31")).with_kind(EventKind::Period),
        ];

        let path = coordinator
            .export_to_image(
                &engine,
                &events,
                &TimelineSettings::default(),
                &rasterizer,
                &DirectorySink::new(dir.path()),
            )
            .await
            .unwrap();

        // Written where the sink said
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("timeline-pro-") && name.ends_with(".png"), "{name}");

        // Rendered with the export frame, input disabled
        let (scene, pixel_ratio, viewport, was_exporting) =
            rasterizer.seen.borrow_mut().take().unwrap();
        assert!(was_exporting);
        assert_eq!(pixel_ratio, 2.5);
        assert_eq!(scene.size, Point { x: 2400.0, y: 1200.0 });
        assert_eq!(scene.background, colour!("#282a36"));
        assert_eq!(viewport, ExportFrame::for_events(&events, &config()).unwrap().viewport);

        // And then put back
        let engine = engine.borrow();
        assert_eq!(engine.viewport(), before);
        assert_eq!(engine.canvas_size(), Point { x: 1000.0, y: 600.0 });
        assert!(!engine.is_exporting());
        assert_eq!(alerts.get(), 0);
    }

    #[tokio::test]
    async fn export_restores_viewport_on_failure() {
        let engine = engine();
        let before = engine.borrow().viewport();
        let dir = TempDir::new("timeline-pro-export").unwrap();
        let alerts = Rc::new(RefCell::new(Vec::new()));
        let alerts_clone = Rc::clone(&alerts);
        let coordinator = ExportCoordinator::new(config(), move |message| {
            alerts_clone.borrow_mut().push(message.to_string())
        });
        let rasterizer = FakeRasterizer::new(&engine, true);
        let events = vec![event("a", "2020-01-01", None)];

        let result = coordinator
            .export_to_image(
                &engine,
                &events,
                &TimelineSettings::default(),
                &rasterizer,
                &DirectorySink::new(dir.path()),
            )
            .await;
        assert!(matches!(result, Err(ExportError::Raster(RasterError::Task(_)))));
        assert_eq!(alerts.borrow().len(), 1);

        // Fallback background
        let (scene, ..) = rasterizer.seen.borrow_mut().take().unwrap();
        assert_eq!(scene.background, colour!("#020617"));

        let engine = engine.borrow();
        assert_eq!(engine.viewport(), before);
        assert!(!engine.is_exporting());

        // Nothing was written
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn export_rejections() {
        let engine = engine();
        let dir = TempDir::new("timeline-pro-export").unwrap();
        let coordinator = ExportCoordinator::new(config(), |_| {});
        let rasterizer = FakeRasterizer::new(&engine, false);
        let sink = DirectorySink::new(dir.path());
        let settings = TimelineSettings::default();

        let result = coordinator
            .export_to_image(&engine, &[], &settings, &rasterizer, &sink)
            .await;
        assert!(matches!(result, Err(ExportError::NoEvents)));

        let events = vec![event("a", "2020-01-01", None)];
        let saved = engine
            .borrow_mut()
            .begin_export(Viewport::default(), Point::default())
            .unwrap();
        let result = coordinator
            .export_to_image(&engine, &events, &settings, &rasterizer, &sink)
            .await;
        assert!(matches!(result, Err(ExportError::AlreadyExporting)));

        // The export in flight is left alone
        assert!(engine.borrow().is_exporting());
        engine.borrow_mut().end_export(saved);
        assert!(rasterizer.seen.borrow().is_none());
    }
}
