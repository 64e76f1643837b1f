// SPDX-License-Identifier: MIT

//!
//! Event layout.
//!
//! Each event gets an x (its start date), a lane (its index in the collection
//! modulo the lane count), a distance from the axis and a variant saying how
//! it's drawn.  Lanes are a static round robin: two events close in time can
//! still overlap if they share a lane.
//!

use crate::{
    EVENT_Z_ORDER, LayoutParams, PositionAndSize, SELECTED_Z_ORDER, Viewport,
};
use log::warn;
use serde::Serialize;
use timeline_pro_core::{Colour, EventId, EventKind, Placement, TimelineEvent};

/// A horizontal span on the axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bar {
    pub x: f64,
    pub width: f64,
}

/// How an event is drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum LayoutVariant {
    /// A marker glyph joined to the axis.  If the event has an end date a
    /// fixed width stub hints at its duration.
    Point { duration_stub: Option<Bar> },

    /// A bar covering the event's dates, plus a faint block between axis and
    /// card when the event has an end date
    Period { bar: Bar, background: Option<Bar> },

    /// A progress indicator inside the card.  `fill_width` is `value` percent
    /// of `track.width`.
    Percentage { track: Bar, fill_width: f64, value: f64 },
}

/// Where and how to draw one event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventLayout {
    pub id: EventId,

    /// Index of the event in the collection
    pub index: usize,

    pub x: f64,
    pub lane: usize,
    pub position: Placement,

    /// Distance from the axis to the card's top edge
    pub vertical_offset: f64,

    pub card_width: f64,
    pub card_height: f64,
    pub connector_x: f64,
    pub variant: LayoutVariant,
    pub z_order: u32,
    pub is_selected: bool,
    pub colour: Colour,
    pub scale: f64,
}

impl EventLayout {
    /// The card's box for an axis drawn at `axis_y`.  The top edge of a card
    /// is `vertical_offset` above the axis (for cards above it) or below it.
    pub fn card_box(&self, axis_y: f64) -> PositionAndSize {
        let y = match self.position {
            Placement::Above => axis_y - self.vertical_offset,
            Placement::Below => axis_y + self.vertical_offset,
        };
        PositionAndSize::new(self.x, y, self.card_width, self.card_height)
    }

    /// The y range of the connector joining the card to the axis
    pub fn connector_span(&self, axis_y: f64) -> (f64, f64) {
        match self.position {
            Placement::Above => (axis_y - self.vertical_offset + self.card_height, axis_y),
            Placement::Below => (axis_y, axis_y + self.vertical_offset),
        }
    }
}

/// Lay out the events for a viewport.  The result is in paint order: the
/// collection order, with the selected event (if any) moved to the end so
/// that it's drawn on top.
pub fn layout_events(
    events: &[TimelineEvent],
    viewport: &Viewport,
    selected: Option<&EventId>,
    params: &LayoutParams,
) -> Vec<EventLayout> {
    let lane_count = params.lane_count.max(1);
    let mut layouts: Vec<EventLayout> = events
        .iter()
        .enumerate()
        .map(|(index, event)| {
            if !event.start().is_valid() {
                warn!(
                    "event {} has an unparseable start date `{}`",
                    event.id(),
                    event.start()
                );
            }

            let scale = event.scale();
            let lane = index % lane_count;
            let base = match event.position() {
                Placement::Above => params.above_base,
                Placement::Below => params.below_base,
            };
            let vertical_offset = (base + (lane as f64) * params.lane_spacing) * scale;

            let x = viewport.event_date_to_x(event.start());
            let end_x = event.end().map(|end| viewport.event_date_to_x(end));
            let card_width = params.card_width * scale;

            let variant = match event.kind() {
                EventKind::PointEvent => LayoutVariant::Point {
                    duration_stub: end_x.map(|_| Bar {
                        x,
                        width: params.point_stub_width,
                    }),
                },
                EventKind::Period => {
                    let width = end_x.map_or(0.0, |end_x| end_x - x);
                    LayoutVariant::Period {
                        bar: Bar {
                            x,
                            width: width.max(params.min_period_bar_width),
                        },
                        background: end_x.map(|_| Bar {
                            x,
                            width: width.max(params.min_background_width),
                        }),
                    }
                }
                EventKind::Percentage { value } => {
                    let value = value.max(0.0).min(100.0);
                    let padding = params.card_padding * scale;
                    let track = Bar {
                        x: x + padding,
                        width: (card_width - 2.0 * padding).max(0.0),
                    };
                    LayoutVariant::Percentage {
                        track,
                        fill_width: track.width * value / 100.0,
                        value,
                    }
                }
            };

            let is_selected = selected.is_some_and(|id| id == event.id());
            EventLayout {
                id: event.id().clone(),
                index,
                x,
                lane,
                position: event.position(),
                vertical_offset,
                card_width,
                card_height: params.card_height * scale,
                connector_x: x + params.connector_inset,
                variant,
                z_order: if is_selected {
                    SELECTED_Z_ORDER
                } else {
                    EVENT_Z_ORDER
                },
                is_selected,
                colour: event.colour(),
                scale,
            }
        })
        .collect();

    // Stable, so everything else keeps collection order
    layouts.sort_by_key(|layout| layout.z_order);
    layouts
}

#[cfg(test)]
mod test {
    use super::*;
    use timeline_pro_core::EventDate;

    fn event(id: &str, start: &str) -> TimelineEvent {
        TimelineEvent::new(id, EventDate::parse(start)).with_id(EventId::from(id))
    }

    fn layout(events: &[TimelineEvent], selected: Option<&EventId>) -> Vec<EventLayout> {
        layout_events(
            events,
            &Viewport::new(1.0, 0.0),
            selected,
            &LayoutParams::default(),
        )
    }

    #[test]
    fn lanes_round_robin() {
        let events: Vec<TimelineEvent> = (0..5)
            .map(|i| event(&i.to_string(), "1970-01-01"))
            .collect();
        let lanes: Vec<usize> = layout(&events, None).iter().map(|l| l.lane).collect();
        assert_eq!(lanes, vec![0, 1, 2, 0, 1]);
    }

    #[test]
    fn vertical_offsets() {
        let events = vec![
            event("a", "1970-01-01"),
            event("b", "1970-01-01").with_position(Placement::Below),
            event("c", "1970-01-01").with_scale(2.0),
            event("d", "1970-01-01")
                .with_position(Placement::Below)
                .with_scale(0.5),
        ];
        let offsets: Vec<f64> = layout(&events, None)
            .iter()
            .map(|l| l.vertical_offset)
            .collect();
        assert_eq!(offsets, vec![120.0, 130.0, 2.0 * (120.0 + 140.0), 0.5 * 60.0]);
    }

    #[test]
    fn x_is_start_date() {
        let events = vec![event("a", "1970-01-11"), event("b", "not a date")];
        let layouts = layout(&events, None);
        assert_eq!(layouts[0].x, 10.0);
        assert_eq!(layouts[0].connector_x, 14.0);
        assert_eq!(layouts[0].card_width, 200.0);
        assert_eq!(layouts[1].x, 0.0);
    }

    #[test]
    fn variants() {
        let events = vec![
            event("point", "1970-01-11"),
            event("stub", "1970-01-11").with_end(Some(EventDate::parse("1971-01-01"))),
            event("period", "1970-01-11")
                .with_end(Some(EventDate::parse("1970-01-31")))
                .with_kind(EventKind::Period),
            event("short", "1970-01-11")
                .with_end(Some(EventDate::parse("1970-01-11")))
                .with_kind(EventKind::Period),
            event("open", "1970-01-11").with_kind(EventKind::Period),
            event("percent", "1970-01-11").with_kind(EventKind::percentage(25.0)),
        ];
        let layouts = layout(&events, None);

        assert_eq!(layouts[0].variant, LayoutVariant::Point { duration_stub: None });
        assert_eq!(
            layouts[1].variant,
            LayoutVariant::Point {
                duration_stub: Some(Bar { x: 10.0, width: 4.0 })
            }
        );
        assert_eq!(
            layouts[2].variant,
            LayoutVariant::Period {
                bar: Bar { x: 10.0, width: 20.0 },
                background: Some(Bar { x: 10.0, width: 20.0 }),
            }
        );
        assert_eq!(
            layouts[3].variant,
            LayoutVariant::Period {
                bar: Bar { x: 10.0, width: 4.0 },
                background: Some(Bar { x: 10.0, width: 2.0 }),
            }
        );
        assert_eq!(
            layouts[4].variant,
            LayoutVariant::Period {
                bar: Bar { x: 10.0, width: 4.0 },
                background: None,
            }
        );
        assert_eq!(
            layouts[5].variant,
            LayoutVariant::Percentage {
                track: Bar { x: 18.0, width: 184.0 },
                fill_width: 46.0,
                value: 25.0,
            }
        );
    }

    #[test]
    fn progress_fill_stays_in_its_track() {
        let events = vec![
            event("over", "1970-01-11").with_kind(EventKind::Percentage { value: 250.0 }),
            event("under", "1970-01-11").with_kind(EventKind::Percentage { value: -5.0 }),
        ];
        let layouts = layout(&events, None);

        let LayoutVariant::Percentage { track, fill_width, value } = layouts[0].variant else {
            panic!("expected a percentage layout");
        };
        assert_eq!(value, 100.0);
        assert_eq!(fill_width, track.width);

        let LayoutVariant::Percentage { fill_width, value, .. } = layouts[1].variant else {
            panic!("expected a percentage layout");
        };
        assert_eq!(value, 0.0);
        assert_eq!(fill_width, 0.0);
    }

    #[test]
    fn selected_is_topmost() {
        let events = vec![event("a", "1970-01-01"), event("b", "1970-01-02"), event("c", "1970-01-03")];
        let selected = EventId::from("a");
        let layouts = layout(&events, Some(&selected));
        let ids: Vec<&str> = layouts.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
        assert_eq!(layouts[2].z_order, SELECTED_Z_ORDER);
        assert!(layouts[2].is_selected);
        assert_eq!(layouts[2].index, 0);
        assert_eq!(layouts[2].lane, 0);
        assert!(layouts[..2].iter().all(|l| l.z_order == EVENT_Z_ORDER && !l.is_selected));
    }

    #[test]
    fn card_boxes() {
        let events = vec![event("a", "1970-01-11"), event("b", "1970-01-11").with_position(Placement::Below)];
        let layouts = layout(&events, None);

        let above = layouts[0].card_box(500.0);
        assert_eq!(above.position.y, 380.0);
        assert_eq!(layouts[0].connector_span(500.0), (420.0, 500.0));

        let below = layouts[1].card_box(500.0);
        assert_eq!(below.position.y, 630.0);
        assert_eq!(layouts[1].connector_span(500.0), (500.0, 630.0));
    }
}
