// SPDX-License-Identifier: MIT

//!
//! A frontend painting scenes into PNG images.
//!
//! Only shapes are painted: text primitives are skipped, as there is no font
//! rasteriser in the stack.
//!

use crate::{Dot, FilledBox, LineStyle, Primitive, RasterError, Rasterizer, Scene, VerticalLine};
use async_trait::async_trait;
use image::{ImageFormat, Rgba, RgbaImage};
use log::{debug, trace};
use std::io::Cursor;
use timeline_pro_core::Colour;

/// Images larger than this (in either direction, after the pixel ratio) are
/// refused
pub const MAX_RASTER_SIDE: u32 = 16_384;

/// Paints scenes with the `image` crate (on tokio's blocking pool)
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageRasterizer;

#[async_trait(?Send)]
impl Rasterizer for ImageRasterizer {
    async fn rasterize(&self, scene: Scene, pixel_ratio: f64) -> Result<Vec<u8>, RasterError> {
        tokio::task::spawn_blocking(move || {
            let image = paint(&scene, pixel_ratio)?;
            encode_png(&image)
        })
        .await
        .map_err(|error| RasterError::Task(error.to_string()))?
    }
}

/// Paint a scene at `pixel_ratio` device pixels per scene unit
pub fn paint(scene: &Scene, pixel_ratio: f64) -> Result<RgbaImage, RasterError> {
    let invalid = || RasterError::InvalidSize {
        width: scene.size.x * pixel_ratio,
        height: scene.size.y * pixel_ratio,
    };
    let side = |length: f64| {
        let pixels = (length * pixel_ratio).round();
        if pixels.is_finite() && pixels >= 1.0 && pixels <= f64::from(MAX_RASTER_SIDE) {
            Ok(pixels as u32)
        } else {
            Err(invalid())
        }
    };
    let width = side(scene.size.x)?;
    let height = side(scene.size.y)?;
    debug!("painting {width} x {height}");

    let (r, g, b) = scene.background.as_rgb();
    let mut canvas = Canvas {
        image: RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255])),
        ratio: pixel_ratio,
    };
    for primitive in &scene.primitives {
        match primitive {
            Primitive::Box(filled_box) => canvas.filled_box(filled_box),
            Primitive::Line(line) => canvas.vertical_line(line),
            Primitive::Dot(dot) => canvas.dot(dot),
            Primitive::Text(text) => trace!("skipping text `{}`", text.text),
        }
    }
    Ok(canvas.image)
}

/// Encode an image as PNG
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, RasterError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// An image plus the scale from scene units to pixels
struct Canvas {
    image: RgbaImage,
    ratio: f64,
}

impl Canvas {
    /// Fill a rectangle given in scene units (blending by `opacity`)
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, colour: Colour, opacity: f64) {
        let opacity = opacity.clamp(0.0, 1.0);
        if opacity == 0.0 || width <= 0.0 || height <= 0.0 {
            return;
        }
        let (x0, x1) = self.span(x, width, self.image.width());
        let (y0, y1) = self.span(y, height, self.image.height());
        for py in y0..y1 {
            for px in x0..x1 {
                blend(self.image.get_pixel_mut(px, py), colour, opacity);
            }
        }
    }

    /// The pixel range covered by `start..start + length` (scene units),
    /// clipped to `0..limit`.  Anything non-empty covers at least a pixel.
    fn span(&self, start: f64, length: f64, limit: u32) -> (u32, u32) {
        let limit = f64::from(limit);
        let from = (start * self.ratio).round();
        let to = ((start + length) * self.ratio).round().max(from + 1.0);
        (from.clamp(0.0, limit) as u32, to.clamp(0.0, limit) as u32)
    }

    fn filled_box(&mut self, filled_box: &FilledBox) {
        let area = filled_box.position_and_size;
        self.fill_rect(
            area.position.x,
            area.position.y,
            area.width,
            area.height,
            filled_box.fill_colour,
            filled_box.opacity,
        );
        if let Some(LineStyle { colour, thickness }) = filled_box.border_style {
            let (x, y) = (area.position.x, area.position.y);
            self.fill_rect(x, y, area.width, thickness, colour, 1.0);
            self.fill_rect(x, area.max_y() - thickness, area.width, thickness, colour, 1.0);
            self.fill_rect(x, y, thickness, area.height, colour, 1.0);
            self.fill_rect(area.max_x() - thickness, y, thickness, area.height, colour, 1.0);
        }
    }

    fn vertical_line(&mut self, line: &VerticalLine) {
        let thickness = line.style.thickness;
        self.fill_rect(
            line.x - thickness / 2.0,
            line.y_top,
            thickness,
            line.y_bottom - line.y_top,
            line.style.colour,
            line.opacity,
        );
    }

    fn dot(&mut self, dot: &Dot) {
        let opacity = dot.opacity.clamp(0.0, 1.0);
        if opacity == 0.0 || dot.radius <= 0.0 {
            return;
        }
        let cx = dot.centre.x * self.ratio;
        let cy = dot.centre.y * self.ratio;
        let radius = dot.radius * self.ratio;
        let (x0, x1) = self.span(dot.centre.x - dot.radius, 2.0 * dot.radius, self.image.width());
        let (y0, y1) = self.span(dot.centre.y - dot.radius, 2.0 * dot.radius, self.image.height());
        for py in y0..y1 {
            for px in x0..x1 {
                let dx = f64::from(px) + 0.5 - cx;
                let dy = f64::from(py) + 0.5 - cy;
                if dx * dx + dy * dy <= radius * radius {
                    blend(self.image.get_pixel_mut(px, py), dot.colour, opacity);
                }
            }
        }
    }
}

/// Paint `colour` over a pixel at the given opacity
fn blend(pixel: &mut Rgba<u8>, colour: Colour, opacity: f64) {
    let (r, g, b) = colour.as_rgb();
    let mix = |over: u8, under: u8| {
        (f64::from(over) * opacity + f64::from(under) * (1.0 - opacity)).round() as u8
    };
    let [under_r, under_g, under_b, _] = pixel.0;
    pixel.0 = [mix(r, under_r), mix(g, under_g), mix(b, under_b), 255];
}
