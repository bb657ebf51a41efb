use anyhow::Result;
use std::path::PathBuf;

use crate::assets;
use crate::config::{self, ArtConfig};
use crate::theme::Palette;
use crate::{banner, dialog};

/// A bitmap written by one of the generators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub name: &'static str,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Generate the banner, then the dialog
pub fn run(palette: &Palette, config: &ArtConfig) -> Result<Vec<Artifact>> {
    let output_dir = config::resolve_output_dir(config)?;
    tracing::debug!("Output directory: {}", output_dir.display());

    let logo = assets::first_existing(&config.logo_candidates);
    match logo {
        Some(path) => tracing::info!("Using logo {}", path.display()),
        None => tracing::info!("No logo found, generating text-only artwork"),
    }

    let banner = banner::generate(palette, config, &config.banner_path(), logo)?;
    let dialog = dialog::generate(palette, config, &config.dialog_path(), logo)?;

    Ok(vec![banner, dialog])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BANNER_SIZE, DIALOG_SIZE};
    use image::{Rgba, RgbaImage};
    use std::path::Path;

    fn offline_config(root: &Path) -> ArtConfig {
        let mut config = ArtConfig::rooted_at(root);
        config.font.search_dirs = vec![root.to_path_buf()];
        config
    }

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_run_into_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = offline_config(dir.path());
        let palette = Palette::load().unwrap();

        let artifacts = run(&palette, &config).unwrap();

        assert_eq!(file_names(&config.output_dir), vec!["banner.bmp", "dialog.bmp"]);
        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].path, dir.path().join("wix").join("banner.bmp"));
        assert_eq!(artifacts[1].path, dir.path().join("wix").join("dialog.bmp"));

        let banner = image::open(&artifacts[0].path).unwrap();
        assert_eq!((banner.width(), banner.height()), BANNER_SIZE);
        let dialog = image::open(&artifacts[1].path).unwrap();
        assert_eq!((dialog.width(), dialog.height()), DIALOG_SIZE);

        assert_eq!((artifacts[0].width, artifacts[0].height), BANNER_SIZE);
        assert_eq!((artifacts[1].width, artifacts[1].height), DIALOG_SIZE);
    }

    #[test]
    fn test_run_uses_fallback_logo() {
        let dir = tempfile::tempdir().unwrap();
        let config = offline_config(dir.path());
        std::fs::create_dir_all(dir.path().join("icons")).unwrap();
        RgbaImage::from_pixel(32, 32, Rgba([0, 0, 255, 255]))
            .save(dir.path().join("icons").join("icon.png"))
            .unwrap();
        let palette = Palette::load().unwrap();

        run(&palette, &config).unwrap();

        let banner = image::open(config.banner_path()).unwrap().to_rgb8();
        let logo_px = banner.get_pixel(20, 20);
        assert!(logo_px[2] > 200 && logo_px[0] < 40);
    }

    #[test]
    fn test_run_overwrites_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = offline_config(dir.path());
        std::fs::create_dir_all(&config.output_dir).unwrap();
        std::fs::write(config.banner_path(), b"stale").unwrap();
        let palette = Palette::load().unwrap();

        run(&palette, &config).unwrap();

        assert_eq!(image::image_dimensions(config.banner_path()).unwrap(), BANNER_SIZE);
    }

    #[test]
    fn test_run_fails_when_output_dir_is_blocked() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("wix"), b"file, not a directory").unwrap();
        let palette = Palette::load().unwrap();

        assert!(run(&palette, &offline_config(dir.path())).is_err());
    }
}
