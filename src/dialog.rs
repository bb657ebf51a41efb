//! Background for the welcome and completion dialogs (493 × 312)

use anyhow::Result;
use image::imageops;
use std::path::Path;

use crate::app::Artifact;
use crate::assets;
use crate::canvas::{self, Canvas, SquareGrid};
use crate::config::{ArtConfig, DIALOG_SIZE};
use crate::text::Typeface;
use crate::theme::Palette;

const GRADIENT_STRENGTH: f32 = 0.15;
const ACCENT_HEIGHT: u32 = 3;

const GLOW_RADIUS: u32 = 80;
const GLOW_PEAK: f32 = 0.2;

const LOGO_HEIGHT: u32 = 64;
const LOGO_GAP: i32 = 16;

const TITLE_PX: f32 = 36.0;
const SUBTITLE_PX: f32 = 14.0;
const LINE_GAP: i32 = 6;
const SHADOW_OFFSET: i32 = 2;
const SHADOW_SHADE: f32 = 0.4;

const WATERMARK_PX: f32 = 48.0;
const WATERMARK_ALPHA: f32 = 40.0 / 255.0;
const WATERMARK_MARGIN: i64 = 12;
const LAYER_PADDING: u32 = 10;

/// Distance of the square clusters from the side and bottom edges
const PATTERN_SIDE: u32 = 20;
const PATTERN_RISE: u32 = 60;

pub fn generate(
    palette: &Palette,
    config: &ArtConfig,
    output: &Path,
    logo: Option<&Path>,
) -> Result<Artifact> {
    let canvas = render(palette, config, logo);
    let (width, height) = (canvas.width(), canvas.height());
    canvas.save_bmp(output)?;

    tracing::info!("Wrote dialog {} ({}x{})", output.display(), width, height);
    Ok(Artifact {
        name: "dialog",
        path: output.to_path_buf(),
        width,
        height,
    })
}

/// Compose the dialog background in memory
pub fn render(palette: &Palette, config: &ArtConfig, logo: Option<&Path>) -> Canvas {
    let (width, height) = DIALOG_SIZE;

    let mut canvas = Canvas::new(width, height, palette.dark);
    canvas.diagonal_gradient(palette.dark, palette.dark_lighter, GRADIENT_STRENGTH);
    canvas.corner_glow(palette.primary, GLOW_RADIUS, GLOW_PEAK);
    canvas.fill_rect(0, (height - ACCENT_HEIGHT) as i32, width, ACCENT_HEIGHT, palette.primary);

    let typeface = Typeface::load(&config.font);
    draw_watermark(&mut canvas, &typeface, palette, &config.branding.watermark);

    // Logo centred on the upper third line
    let mut logo_bottom = None;
    if let Some(path) = logo {
        if let Some(image) = assets::logo_or_skip(path, LOGO_HEIGHT) {
            let x = (width as i64 - image.width() as i64) / 2;
            let y = (height / 3) as i64 - (LOGO_HEIGHT / 2) as i64;
            canvas.overlay(&image, x, y);
            logo_bottom = Some(y as i32 + LOGO_HEIGHT as i32);
        }
    }

    let brand = &config.branding;
    let title_face = typeface.face(TITLE_PX);
    let subtitle_face = typeface.face(SUBTITLE_PX);
    let title_box = title_face.measure(&brand.title);
    let subtitle_box = subtitle_face.measure(&brand.subtitle);

    let block_height = title_box.height as i32 + LINE_GAP + subtitle_box.height as i32;
    let title_y = match logo_bottom {
        Some(bottom) => bottom + LOGO_GAP,
        None => ((height - ACCENT_HEIGHT) as i32 - block_height) / 2,
    };
    let title_x = centered(width, title_box.width);
    title_face.draw(
        &mut canvas,
        title_x + SHADOW_OFFSET,
        title_y + SHADOW_OFFSET,
        &brand.title,
        canvas::scale(palette.primary, SHADOW_SHADE),
        1.0,
    );
    title_face.draw(&mut canvas, title_x, title_y, &brand.title, palette.secondary, 1.0);
    subtitle_face.draw(
        &mut canvas,
        centered(width, subtitle_box.width),
        title_y + title_box.height as i32 + LINE_GAP,
        &brand.subtitle,
        palette.placeholder,
        1.0,
    );

    let (left, right) = corner_clusters(width, height);
    canvas.square_grid(&left, palette.primary, palette.tertiary);
    canvas.square_grid(&right, palette.tertiary, palette.secondary);

    canvas
}

fn centered(outer: u32, inner: u32) -> i32 {
    (outer as i32 - inner as i32) / 2
}

/// Square clusters anchored in the bottom-left and bottom-right corners
fn corner_clusters(width: u32, height: u32) -> (SquareGrid, SquareGrid) {
    let left = SquareGrid {
        origin: (PATTERN_SIDE as i32, (height - PATTERN_RISE) as i32),
        rows: 4,
        cols: 6,
        size: 2,
        pitch: 12,
        intensity: 0.3,
    };
    let (cluster_w, _) = left.extent();
    let right = SquareGrid {
        origin: ((width - PATTERN_SIDE - cluster_w) as i32, left.origin.1),
        ..left
    };
    (left, right)
}

/// Faint brand word running up the right edge
fn draw_watermark(canvas: &mut Canvas, typeface: &Typeface, palette: &Palette, word: &str) {
    let face = typeface.face(WATERMARK_PX);
    let size = face.measure(word);

    let mut layer = Canvas::transparent(
        size.width + 2 * LAYER_PADDING,
        size.height + 2 * LAYER_PADDING,
    );
    face.draw(
        &mut layer,
        LAYER_PADDING as i32,
        LAYER_PADDING as i32,
        word,
        palette.primary,
        WATERMARK_ALPHA,
    );

    // 90 degrees counter-clockwise so the word reads bottom to top
    let rotated = imageops::rotate270(&layer.into_image());
    let x = canvas.width() as i64 - rotated.width() as i64 - WATERMARK_MARGIN;
    let y = (canvas.height() as i64 - rotated.height() as i64) / 2;
    canvas.overlay(&rotated, x, y);
}
