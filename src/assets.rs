//! Optional external inputs: the logo image and the TrueType font
//!
//! Neither is required. Callers get back an [`AssetError`] that tells a
//! missing file apart from one that exists but cannot be used, and decide
//! how loudly to report it.

use image::{imageops, imageops::FilterType, RgbaImage};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    /// Nothing at the expected location
    #[error("{} not found", path.display())]
    Unavailable { path: PathBuf },

    /// Present but unreadable or not in a supported format
    #[error("{} could not be used: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },
}

impl AssetError {
    fn malformed(path: &Path, reason: impl ToString) -> Self {
        Self::Malformed {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Load a logo image and convert it to RGBA
pub fn load_logo(path: &Path) -> Result<RgbaImage, AssetError> {
    if !path.is_file() {
        return Err(AssetError::Unavailable {
            path: path.to_path_buf(),
        });
    }

    let img = image::open(path).map_err(|e| AssetError::malformed(path, e))?;
    if img.width() == 0 || img.height() == 0 {
        return Err(AssetError::malformed(path, "image has no pixels"));
    }

    Ok(img.to_rgba8())
}

/// Resize to `height` pixels tall, keeping the aspect ratio
pub fn fit_height(logo: &RgbaImage, height: u32) -> RgbaImage {
    let scale = height as f32 / logo.height() as f32;
    let width = ((logo.width() as f32 * scale).round() as u32).max(1);
    imageops::resize(logo, width, height.max(1), FilterType::Lanczos3)
}

/// Load a logo scaled to `height`, or warn and carry on without it
pub fn logo_or_skip(path: &Path, height: u32) -> Option<RgbaImage> {
    match load_logo(path) {
        Ok(logo) => Some(fit_height(&logo, height)),
        Err(e @ AssetError::Unavailable { .. }) => {
            tracing::warn!("Logo {}, continuing without it", e);
            None
        }
        Err(e @ AssetError::Malformed { .. }) => {
            tracing::warn!("Could not add logo: {}", e);
            None
        }
    }
}

/// Return the first of `candidates` that exists as a regular file
pub fn first_existing(candidates: &[PathBuf]) -> Option<&Path> {
    candidates
        .iter()
        .map(PathBuf::as_path)
        .find(|p| p.is_file())
}

/// Locate `file_name` in `search_dirs` and parse it as a TrueType/OpenType font
pub fn load_font(file_name: &str, search_dirs: &[PathBuf]) -> Result<fontdue::Font, AssetError> {
    let candidates: Vec<PathBuf> = search_dirs.iter().map(|d| d.join(file_name)).collect();

    let Some(path) = first_existing(&candidates) else {
        return Err(AssetError::Unavailable {
            path: PathBuf::from(file_name),
        });
    };

    let data = std::fs::read(path).map_err(|e| AssetError::malformed(path, e))?;
    fontdue::Font::from_bytes(data, fontdue::FontSettings::default())
        .map_err(|e| AssetError::malformed(path, e))
}
