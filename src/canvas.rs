//! Pixel buffer the generators draw into
//!
//! Output canvases are opaque; text layers start fully transparent and are
//! composited back onto an output canvas with [`Canvas::overlay`].

use anyhow::{Context, Result};
use image::{imageops, DynamicImage, ImageFormat, Rgb, Rgba, RgbaImage};
use std::path::Path;

use crate::theme::Color;

/// Linear interpolation of one channel, truncating like an integer cast
pub fn lerp_channel(start: u8, end: u8, factor: f32) -> u8 {
    let v = start as f32 * (1.0 - factor) + end as f32 * factor;
    v.clamp(0.0, 255.0) as u8
}

pub fn lerp(start: Color, end: Color, factor: f32) -> Color {
    Rgb([
        lerp_channel(start[0], end[0], factor),
        lerp_channel(start[1], end[1], factor),
        lerp_channel(start[2], end[2], factor),
    ])
}

/// Scale a color's intensity (0.0 = black, 1.0 = unchanged)
pub fn scale(color: Color, intensity: f32) -> Color {
    Rgb(color.0.map(|c| (c as f32 * intensity).clamp(0.0, 255.0) as u8))
}

/// Per-channel sum, clamped at 255
pub fn add_clamped(base: Color, glow: Color) -> Color {
    Rgb([
        base[0].saturating_add(glow[0]),
        base[1].saturating_add(glow[1]),
        base[2].saturating_add(glow[2]),
    ])
}

/// Diagonal gradient factor for `(x, y)`, scaled by `strength`
pub fn diagonal_factor(x: u32, y: u32, width: u32, height: u32, strength: f32) -> f32 {
    (x + y) as f32 / (width + height) as f32 * strength
}

pub struct Canvas {
    pixels: RgbaImage,
}

impl Canvas {
    /// Opaque canvas filled with `background`
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        let Rgb([r, g, b]) = background;
        Self {
            pixels: RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255])),
        }
    }

    /// Fully transparent canvas, used as a layer
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn rgb_at(&self, x: u32, y: u32) -> Color {
        let Rgba([r, g, b, _]) = *self.pixels.get_pixel(x, y);
        Rgb([r, g, b])
    }

    #[cfg(test)]
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        self.pixels.get_pixel(x, y)[3]
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height()
    }

    /// Overwrite one pixel with an opaque color; out-of-bounds writes are dropped
    pub fn put(&mut self, x: i32, y: i32, color: Color) {
        if self.contains(x, y) {
            let Rgb([r, g, b]) = color;
            self.pixels.put_pixel(x as u32, y as u32, Rgba([r, g, b, 255]));
        }
    }

    /// Source-over blend of `color` at `opacity` (0.0..=1.0)
    pub fn blend(&mut self, x: i32, y: i32, color: Color, opacity: f32) {
        if !self.contains(x, y) || opacity <= 0.0 {
            return;
        }
        let src_a = opacity.min(1.0);
        let dst = self.pixels.get_pixel_mut(x as u32, y as u32);
        let dst_a = dst[3] as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return;
        }
        for c in 0..3 {
            let v = (color[c] as f32 * src_a + dst[c] as f32 * dst_a * (1.0 - src_a)) / out_a;
            dst[c] = v.round().clamp(0.0, 255.0) as u8;
        }
        dst[3] = (out_a * 255.0).round() as u8;
    }

    /// Fill an axis-aligned rectangle, clipped to the canvas
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color) {
        for dy in 0..height as i32 {
            for dx in 0..width as i32 {
                self.put(x + dx, y + dy, color);
            }
        }
    }

    /// Replace every pixel with the diagonal blend from `start` toward `end`
    pub fn diagonal_gradient(&mut self, start: Color, end: Color, strength: f32) {
        let (width, height) = (self.width(), self.height());
        for (x, y, pixel) in self.pixels.enumerate_pixels_mut() {
            let f = diagonal_factor(x, y, width, height, strength);
            let Rgb([r, g, b]) = lerp(start, end, f);
            *pixel = Rgba([r, g, b, 255]);
        }
    }

    /// Additive glow spreading from the top-left corner along anti-diagonals
    pub fn corner_glow(&mut self, tint: Color, radius: u32, peak: f32) {
        for i in 0..radius {
            let alpha = (1.0 - i as f32 / radius as f32) * peak;
            let glow = scale(tint, alpha);
            for j in 0..i {
                let (x, y) = (j, i - j);
                if x < self.width() && y < self.height() {
                    let lit = add_clamped(self.rgb_at(x, y), glow);
                    self.put(x as i32, y as i32, lit);
                }
            }
        }
    }

    /// Grid of small squares alternating between two colors by `(row + col) % 2`
    pub fn square_grid(&mut self, grid: &SquareGrid, even: Color, odd: Color) {
        for row in 0..grid.rows {
            for col in 0..grid.cols {
                let color = if (row + col) % 2 == 0 { even } else { odd };
                let x = grid.origin.0 + (col * grid.pitch) as i32;
                let y = grid.origin.1 + (row * grid.pitch) as i32;
                self.fill_rect(x, y, grid.size, grid.size, scale(color, grid.intensity));
            }
        }
    }

    /// Alpha-composite an RGBA image with its top-left at `(x, y)`
    pub fn overlay(&mut self, image: &RgbaImage, x: i64, y: i64) {
        imageops::overlay(&mut self.pixels, image, x, y);
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    /// Write the canvas as a 24-bit BMP
    pub fn save_bmp(self, path: &Path) -> Result<()> {
        DynamicImage::ImageRgba8(self.pixels)
            .to_rgb8()
            .save_with_format(path, ImageFormat::Bmp)
            .with_context(|| format!("Failed to write bitmap {}", path.display()))
    }
}

/// Layout of a decorative square pattern
#[derive(Debug, Clone, Copy)]
pub struct SquareGrid {
    pub origin: (i32, i32),
    pub rows: u32,
    pub cols: u32,
    pub size: u32,
    pub pitch: u32,
    pub intensity: f32,
}

impl SquareGrid {
    /// Total footprint in pixels (last square included)
    pub fn extent(&self) -> (u32, u32) {
        (
            (self.cols - 1) * self.pitch + self.size,
            (self.rows - 1) * self.pitch + self.size,
        )
    }
}
