// SPDX-License-Identifier: MIT

//!
//! Turning markers and event layouts into primitives
//!

use crate::{
    Bar, Dot, EventLayout, FilledBox, LayoutParams, LayoutVariant, LineStyle, Marker, Point,
    PositionAndSize, Primitive, Scene, TextOut, TimelineColours, VerticalLine, is_visible,
};
use timeline_pro_core::{Colour, TimelineEvent, TimelineSettings};

/// Opacity of a point event's duration stub
const STUB_OPACITY: f64 = 0.4;

/// Opacity of a period's bar
const PERIOD_BAR_OPACITY: f64 = 0.8;

/// Opacity of the block behind a period
const PERIOD_BACKGROUND_OPACITY: f64 = 0.05;

const CONNECTOR_OPACITY: f64 = 0.4;
const MARKER_DOT_OPACITY: f64 = 0.8;

/// Everything the scene builder needs besides the markers and layouts
pub(crate) struct SceneInputs<'a> {
    pub size: Point,
    pub colours: &'a TimelineColours,
    pub params: &'a LayoutParams,
    pub settings: &'a TimelineSettings,
    pub events: &'a [TimelineEvent],
}

pub(crate) fn build_scene(
    inputs: &SceneInputs,
    markers: &[Marker],
    layouts: &[EventLayout],
) -> Scene {
    let SceneInputs {
        size,
        colours,
        params,
        settings,
        events,
    } = *inputs;
    let axis_y = size.y / 2.0;
    let mut primitives = Vec::new();

    // Axis
    primitives.push(Primitive::Box(FilledBox {
        position_and_size: PositionAndSize::new(
            0.0,
            axis_y - params.axis_thickness / 2.0,
            size.x,
            params.axis_thickness,
        ),
        fill_colour: colours.axis.fill_colour,
        opacity: colours.axis.opacity,
        border_style: colours.axis.border,
    }));

    // Period backgrounds sit beneath everything else
    for layout in layouts.iter().filter(|layout| is_on_screen(layout, axis_y, size)) {
        if let LayoutVariant::Period {
            background: Some(background),
            ..
        } = layout.variant
        {
            let card = layout.card_box(axis_y);
            let (top, bottom) = if card.position.y < axis_y {
                (card.position.y, axis_y)
            } else {
                (axis_y, card.max_y())
            };
            primitives.push(Primitive::Box(FilledBox {
                position_and_size: PositionAndSize::new(
                    background.x,
                    top,
                    background.width,
                    bottom - top,
                ),
                fill_colour: layout.colour,
                opacity: PERIOD_BACKGROUND_OPACITY,
                border_style: None,
            }));
        }
    }

    // Markers
    for marker in markers {
        primitives.push(Primitive::Dot(Dot {
            centre: Point {
                x: marker.x,
                y: axis_y,
            },
            radius: params.marker_dot_diameter / 2.0,
            colour: colours.marker.dot_colour,
            opacity: MARKER_DOT_OPACITY,
        }));
        primitives.push(Primitive::Text(TextOut {
            top_left: Point {
                x: marker.x,
                y: axis_y + params.marker_label_gap,
            },
            text: marker.label.clone(),
            colour: if marker.is_major {
                colours.marker.major_label_colour
            } else {
                colours.marker.label_colour
            },
            font_size: params.font_size_px,
        }));
    }

    // Events
    for layout in layouts.iter().filter(|layout| is_on_screen(layout, axis_y, size)) {
        let Some(event) = events.get(layout.index) else {
            continue;
        };
        push_event(&mut primitives, inputs, axis_y, layout, event, settings);
    }

    Scene {
        size,
        background: colours.background,
        primitives,
    }
}

fn push_event(
    primitives: &mut Vec<Primitive>,
    inputs: &SceneInputs,
    axis_y: f64,
    layout: &EventLayout,
    event: &TimelineEvent,
    settings: &TimelineSettings,
) {
    let params = inputs.params;
    let colours = inputs.colours;
    let scale = layout.scale;
    let padding = params.card_padding * scale;
    let font_size = params.font_size_px * scale;
    let highlight = layout.is_selected.then_some(LineStyle {
        colour: Colour::lightened_colour(layout.colour),
        thickness: 2.0,
    });

    // Connector
    let (y_top, y_bottom) = layout.connector_span(axis_y);
    primitives.push(Primitive::Line(VerticalLine {
        x: layout.connector_x,
        y_top,
        y_bottom,
        style: LineStyle {
            colour: layout.colour,
            thickness: 1.0,
        },
        opacity: CONNECTOR_OPACITY,
    }));

    // Bar on the axis
    let axis_bar = |bar: Bar, height: f64, opacity: f64| {
        Primitive::Box(FilledBox {
            position_and_size: PositionAndSize::new(bar.x, axis_y - height / 2.0, bar.width, height),
            fill_colour: layout.colour,
            opacity,
            border_style: highlight,
        })
    };
    match layout.variant {
        LayoutVariant::Point {
            duration_stub: Some(stub),
        } => primitives.push(axis_bar(stub, params.stub_bar_height, STUB_OPACITY)),
        LayoutVariant::Point {
            duration_stub: None,
        } => {}
        LayoutVariant::Period { bar, .. } => {
            primitives.push(axis_bar(bar, params.period_bar_height, PERIOD_BAR_OPACITY))
        }
        LayoutVariant::Percentage { .. } => {}
    }

    // Card
    let card = layout.card_box(axis_y);
    primitives.push(Primitive::Box(FilledBox {
        position_and_size: card,
        fill_colour: colours.card.rect.fill_colour,
        opacity: colours.card.rect.opacity,
        border_style: highlight.or(colours.card.rect.border),
    }));

    // Coloured left edge
    primitives.push(Primitive::Box(FilledBox {
        position_and_size: PositionAndSize::new(card.position.x, card.position.y, 3.0 * scale, card.height),
        fill_colour: layout.colour,
        opacity: 1.0,
        border_style: None,
    }));

    // Dot
    let dot_radius = params.event_dot_diameter * scale / 2.0;
    primitives.push(Primitive::Dot(Dot {
        centre: Point {
            x: card.position.x + padding + dot_radius,
            y: card.position.y + padding + dot_radius,
        },
        radius: dot_radius,
        colour: layout.colour,
        opacity: 1.0,
    }));

    // Text
    let text_x = card.position.x + padding + 2.0 * dot_radius + padding / 2.0;
    let mut text_y = card.position.y + padding;
    if settings.show_event_name {
        primitives.push(Primitive::Text(TextOut {
            top_left: Point {
                x: text_x,
                y: text_y,
            },
            text: event.title().to_string(),
            colour: colours.card.title_colour,
            font_size,
        }));
        text_y += font_size * 1.2;
    }
    if settings.show_event_date {
        primitives.push(Primitive::Text(TextOut {
            top_left: Point {
                x: text_x,
                y: text_y,
            },
            text: event.start().as_long_date_format(),
            colour: colours.card.date_colour,
            font_size: font_size * 0.85,
        }));
    }

    // Progress
    if let LayoutVariant::Percentage {
        track, fill_width, ..
    } = layout.variant
    {
        let height = params.progress_bar_height * scale;
        let y = card.max_y() - padding - height;
        let track_style = colours.card.progress_track;
        primitives.push(Primitive::Box(FilledBox {
            position_and_size: PositionAndSize::new(track.x, y, track.width, height),
            fill_colour: track_style.fill_colour,
            opacity: track_style.opacity,
            border_style: track_style.border,
        }));
        primitives.push(Primitive::Box(FilledBox {
            position_and_size: PositionAndSize::new(track.x, y, fill_width, height),
            fill_colour: layout.colour,
            opacity: 1.0,
            border_style: None,
        }));
    }
}

/// Whether any part of the event (its card or anything on the axis) is on
/// the canvas
fn is_on_screen(layout: &EventLayout, axis_y: f64, size: Point) -> bool {
    let card = layout.card_box(axis_y);
    let mut min = card.position;
    let mut max = Point {
        x: card.max_x(),
        y: card.max_y(),
    };
    let (y_top, y_bottom) = layout.connector_span(axis_y);
    min = min.min(Point {
        x: layout.x,
        y: y_top,
    });
    max = max.max(Point {
        x: layout.connector_x,
        y: y_bottom,
    });
    if let LayoutVariant::Period { bar, .. } = layout.variant {
        max = max.max(Point {
            x: bar.x + bar.width,
            y: axis_y,
        });
    }
    is_visible(min, max, size)
}
