//! Text rendering with a scalable font when one is installed, and the
//! embedded-graphics mono fonts otherwise

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use std::convert::Infallible;

use crate::assets::{self, AssetError};
use crate::canvas::Canvas;
use crate::config::FontConfig;
use crate::theme::Color;

/// Size of a rendered string's layout box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBox {
    pub width: u32,
    pub height: u32,
}

pub enum Typeface {
    Scalable(fontdue::Font),
    Builtin,
}

impl Typeface {
    /// Find the configured font; fall back to the built-in one on any failure
    pub fn load(config: &FontConfig) -> Self {
        match assets::load_font(&config.file_name, &config.search_dirs) {
            Ok(font) => {
                tracing::debug!("Using font {}", config.file_name);
                Typeface::Scalable(font)
            }
            Err(e @ AssetError::Unavailable { .. }) => {
                tracing::debug!("{}, using built-in font", e);
                Typeface::Builtin
            }
            Err(e @ AssetError::Malformed { .. }) => {
                tracing::debug!("Font {}, using built-in font", e);
                Typeface::Builtin
            }
        }
    }

    #[cfg(test)]
    pub fn is_builtin(&self) -> bool {
        matches!(self, Typeface::Builtin)
    }

    /// Face at `px` pixels
    pub fn face(&self, px: f32) -> Face<'_> {
        match self {
            Typeface::Scalable(font) => Face::Scalable { font, px },
            Typeface::Builtin => Face::Mono(mono_for(px)),
        }
    }
}

fn mono_for(px: f32) -> &'static MonoFont<'static> {
    if px >= 16.0 {
        &FONT_10X20
    } else {
        &FONT_6X10
    }
}

pub enum Face<'a> {
    Scalable { font: &'a fontdue::Font, px: f32 },
    Mono(&'static MonoFont<'static>),
}

impl Face<'_> {
    pub fn measure(&self, text: &str) -> TextBox {
        match self {
            Face::Scalable { font, px } => {
                let (ascent, descent) = line_metrics(font, *px);
                let mut width = 0.0f32;
                let mut prev = None;
                for c in text.chars() {
                    if let Some(p) = prev {
                        width += font.horizontal_kern(p, c, *px).unwrap_or(0.0);
                    }
                    width += font.metrics(c, *px).advance_width;
                    prev = Some(c);
                }
                TextBox {
                    width: width.ceil().max(0.0) as u32,
                    height: (ascent - descent).ceil().max(0.0) as u32,
                }
            }
            Face::Mono(font) => {
                let style = MonoTextStyle::new(*font, BinaryColor::On);
                let size = Text::with_baseline(text, Point::zero(), style, Baseline::Top)
                    .bounding_box()
                    .size;
                TextBox {
                    width: size.width,
                    height: size.height,
                }
            }
        }
    }

    /// Draw `text` with its layout box's top-left corner at `(x, y)`
    pub fn draw(&self, canvas: &mut Canvas, x: i32, y: i32, text: &str, color: Color, opacity: f32) {
        match self {
            Face::Scalable { font, px } => {
                let (ascent, _) = line_metrics(font, *px);
                let baseline = y + ascent.round() as i32;
                let mut pen = x as f32;
                let mut prev = None;
                for c in text.chars() {
                    if let Some(p) = prev {
                        pen += font.horizontal_kern(p, c, *px).unwrap_or(0.0);
                    }
                    let (metrics, coverage) = font.rasterize(c, *px);
                    let left = pen.round() as i32 + metrics.xmin;
                    let top = baseline - metrics.height as i32 - metrics.ymin;
                    if metrics.width > 0 {
                        for (row, line) in coverage.chunks(metrics.width).enumerate() {
                            for (col, &ink) in line.iter().enumerate() {
                                if ink > 0 {
                                    let a = ink as f32 / 255.0 * opacity;
                                    canvas.blend(left + col as i32, top + row as i32, color, a);
                                }
                            }
                        }
                    }
                    pen += metrics.advance_width;
                    prev = Some(c);
                }
            }
            Face::Mono(font) => {
                let style = MonoTextStyle::new(*font, BinaryColor::On);
                let mut ink = Ink {
                    canvas,
                    color,
                    opacity,
                };
                let _ = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
                    .draw(&mut ink);
            }
        }
    }
}

/// (ascent, descent) in pixels; descent is zero or negative
fn line_metrics(font: &fontdue::Font, px: f32) -> (f32, f32) {
    match font.horizontal_line_metrics(px) {
        Some(m) => (m.ascent, m.descent),
        None => (px, 0.0),
    }
}

/// Adapter that lets embedded-graphics paint lit pixels onto a canvas
struct Ink<'a> {
    canvas: &'a mut Canvas,
    color: Color,
    opacity: f32,
}

impl OriginDimensions for Ink<'_> {
    fn size(&self) -> Size {
        Size::new(self.canvas.width(), self.canvas.height())
    }
}

impl DrawTarget for Ink<'_> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if color.is_on() {
                self.canvas.blend(point.x, point.y, self.color, self.opacity);
            }
        }
        Ok(())
    }
}
