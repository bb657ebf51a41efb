//! Top banner shown on every inner installer page (493 × 58)

use anyhow::Result;
use std::path::Path;

use crate::app::Artifact;
use crate::assets;
use crate::canvas::{self, Canvas, SquareGrid};
use crate::config::{ArtConfig, BANNER_SIZE};
use crate::text::Typeface;
use crate::theme::Palette;

const GRADIENT_STRENGTH: f32 = 0.3;
const ACCENT_HEIGHT: u32 = 3;
const PADDING: u32 = 8;

const LOGO_LEFT: i32 = 12;
const LOGO_GAP: i32 = 12;
const TEXT_LEFT: i32 = 20;
const SUBTITLE_GAP: i32 = 10;

const TITLE_PX: f32 = 20.0;
const SUBTITLE_PX: f32 = 12.0;
const SHADOW_OFFSET: i32 = 2;
const SHADOW_SHADE: f32 = 0.4;

const PATTERN_RIGHT_MARGIN: u32 = 16;

pub fn generate(
    palette: &Palette,
    config: &ArtConfig,
    output: &Path,
    logo: Option<&Path>,
) -> Result<Artifact> {
    let canvas = render(palette, config, logo);
    let (width, height) = (canvas.width(), canvas.height());
    canvas.save_bmp(output)?;

    tracing::info!("Wrote banner {} ({}x{})", output.display(), width, height);
    Ok(Artifact {
        name: "banner",
        path: output.to_path_buf(),
        width,
        height,
    })
}

/// Compose the banner in memory
pub fn render(palette: &Palette, config: &ArtConfig, logo: Option<&Path>) -> Canvas {
    let (width, height) = BANNER_SIZE;
    let content_height = height - ACCENT_HEIGHT;

    let mut canvas = Canvas::new(width, height, palette.dark);
    canvas.diagonal_gradient(palette.dark, palette.dark_lighter, GRADIENT_STRENGTH);
    canvas.fill_rect(0, content_height as i32, width, ACCENT_HEIGHT, palette.primary);

    let typeface = Typeface::load(&config.font);

    // Logo pushes the text to the right
    let mut text_x = TEXT_LEFT;
    if let Some(path) = logo {
        if let Some(image) = assets::logo_or_skip(path, content_height - 2 * PADDING) {
            canvas.overlay(&image, LOGO_LEFT as i64, PADDING as i64);
            text_x = LOGO_LEFT + image.width() as i32 + LOGO_GAP;
        }
    }

    let brand = &config.branding;
    let title_face = typeface.face(TITLE_PX);
    let subtitle_face = typeface.face(SUBTITLE_PX);
    let title_box = title_face.measure(&brand.title);
    let subtitle_box = subtitle_face.measure(&brand.subtitle);

    let title_y = (content_height.saturating_sub(title_box.height) / 2) as i32;
    title_face.draw(
        &mut canvas,
        text_x + SHADOW_OFFSET,
        title_y + SHADOW_OFFSET,
        &brand.title,
        canvas::scale(palette.primary, SHADOW_SHADE),
        1.0,
    );
    title_face.draw(&mut canvas, text_x, title_y, &brand.title, palette.secondary, 1.0);

    // Subtitle shares the title's bottom edge
    let subtitle_x = text_x + title_box.width as i32 + SUBTITLE_GAP;
    let subtitle_y = title_y + title_box.height as i32 - subtitle_box.height as i32;
    subtitle_face.draw(&mut canvas, subtitle_x, subtitle_y, &brand.subtitle, palette.text, 1.0);

    let mut grid = SquareGrid {
        origin: (0, 0),
        rows: 3,
        cols: 8,
        size: 3,
        pitch: 8,
        intensity: 0.45,
    };
    let (grid_w, grid_h) = grid.extent();
    grid.origin = (
        (width - grid_w - PATTERN_RIGHT_MARGIN) as i32,
        ((content_height - grid_h) / 2) as i32,
    );
    canvas.square_grid(&grid, palette.primary, palette.tertiary);

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgba, RgbaImage};

    fn offline_config(root: &Path) -> ArtConfig {
        let mut config = ArtConfig::rooted_at(root);
        // keep output independent of installed fonts
        config.font.search_dirs = vec![root.to_path_buf()];
        config
    }

    #[test]
    fn test_banner_layout_without_logo() {
        let dir = tempfile::tempdir().unwrap();
        let palette = Palette::load().unwrap();
        let canvas = render(&palette, &offline_config(dir.path()), None);

        assert_eq!((canvas.width(), canvas.height()), BANNER_SIZE);
        assert_eq!(canvas.rgb_at(0, 0), palette.dark);
        for x in [0, 246, 492] {
            for y in 55..58 {
                assert_eq!(canvas.rgb_at(x, y), palette.primary);
            }
        }
        // gradient brightens toward the bottom-right
        assert!(canvas.rgb_at(400, 5)[0] > canvas.rgb_at(0, 0)[0]);
    }

    #[test]
    fn test_banner_draws_title_in_secondary() {
        let dir = tempfile::tempdir().unwrap();
        let palette = Palette::load().unwrap();
        let canvas = render(&palette, &offline_config(dir.path()), None);

        let title_pixels = (TEXT_LEFT as u32..TEXT_LEFT as u32 + 50)
            .flat_map(|x| (0..55).map(move |y| (x, y)))
            .filter(|&(x, y)| canvas.rgb_at(x, y) == palette.secondary)
            .count();
        assert!(title_pixels > 20);
    }

    #[test]
    fn test_banner_pattern_squares() {
        let dir = tempfile::tempdir().unwrap();
        let palette = Palette::load().unwrap();
        let canvas = render(&palette, &offline_config(dir.path()), None);

        // 8 columns of 3px squares on an 8px pitch: 59 x 19 footprint
        let (x0, y0) = (493 - 59 - 16, (55 - 19) / 2);
        assert_eq!(canvas.rgb_at(x0, y0), canvas::scale(palette.primary, 0.45));
        assert_eq!(canvas.rgb_at(x0 + 8, y0), canvas::scale(palette.tertiary, 0.45));
        assert_eq!(canvas.rgb_at(x0 + 8, y0 + 8), canvas::scale(palette.primary, 0.45));
    }

    #[test]
    fn test_banner_pastes_logo() {
        let dir = tempfile::tempdir().unwrap();
        let logo = dir.path().join("logo.png");
        RgbaImage::from_pixel(64, 64, Rgba([255, 0, 0, 255]))
            .save(&logo)
            .unwrap();

        let palette = Palette::load().unwrap();
        let canvas = render(&palette, &offline_config(dir.path()), Some(&logo));

        // logo is scaled to 39px and placed at (12, 8)
        let reddish = |c: Rgb<u8>| c[0] > 200 && c[1] < 40 && c[2] < 40;
        assert!(reddish(canvas.rgb_at(12, 8)));
        assert!(reddish(canvas.rgb_at(30, 27)));
        assert!(reddish(canvas.rgb_at(50, 46)));
        assert!(!reddish(canvas.rgb_at(51, 47)));
        assert!(!reddish(canvas.rgb_at(11, 27)));
        // title moved past the logo
        let shifted = (63..113)
            .flat_map(|x| (0..55).map(move |y| (x, y)))
            .any(|(x, y)| canvas.rgb_at(x, y) == palette.secondary);
        assert!(shifted);
    }

    #[test]
    fn test_banner_survives_broken_logo() {
        let dir = tempfile::tempdir().unwrap();
        let logo = dir.path().join("logo.png");
        std::fs::write(&logo, b"<svg>not really</svg>").unwrap();
        let out = dir.path().join("banner.bmp");

        let palette = Palette::load().unwrap();
        let artifact = generate(&palette, &offline_config(dir.path()), &out, Some(&logo)).unwrap();

        assert_eq!(artifact.path, out);
        assert_eq!(image::image_dimensions(&out).unwrap(), BANNER_SIZE);
    }
}
