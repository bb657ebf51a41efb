use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Output file names inside the output directory
pub const BANNER_FILE: &str = "banner.bmp";
pub const DIALOG_FILE: &str = "dialog.bmp";

/// WiX top banner (WixUIBannerBmp)
pub const BANNER_SIZE: (u32, u32) = (493, 58);
/// WiX welcome/exit dialog background (WixUIDialogBmp)
pub const DIALOG_SIZE: (u32, u32) = (493, 312);

#[derive(Debug, Clone)]
pub struct FontConfig {
    /// Font file looked up by name, e.g. `arial.ttf`
    pub file_name: String,
    /// Directories searched in order
    pub search_dirs: Vec<PathBuf>,
}

impl FontConfig {
    pub fn system(file_name: &str) -> Self {
        let mut search_dirs = vec![PathBuf::from(".")];
        if let Some(dir) = dirs::font_dir() {
            search_dirs.push(dir);
        }
        search_dirs.extend(
            [
                "C:\\Windows\\Fonts",
                "/usr/share/fonts/truetype/msttcorefonts",
                "/usr/share/fonts/TTF",
                "/Library/Fonts",
                "/System/Library/Fonts/Supplemental",
            ]
            .iter()
            .map(PathBuf::from),
        );

        Self {
            file_name: file_name.to_string(),
            search_dirs,
        }
    }
}

/// Text painted onto both images
#[derive(Debug, Clone)]
pub struct Branding {
    pub title: String,
    pub subtitle: String,
    /// Rotated watermark word on the dialog
    pub watermark: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            title: "Kable".to_string(),
            subtitle: "Minecraft Launcher".to_string(),
            watermark: "KABLE".to_string(),
        }
    }
}

/// Everything one run needs, fixed before any drawing starts
#[derive(Debug, Clone)]
pub struct ArtConfig {
    pub output_dir: PathBuf,
    /// Checked in order; the first existing file is used
    pub logo_candidates: Vec<PathBuf>,
    pub font: FontConfig,
    pub branding: Branding,
}

impl ArtConfig {
    /// Configuration for this crate's checkout
    pub fn load() -> Self {
        Self::rooted_at(Path::new(env!("CARGO_MANIFEST_DIR")))
    }

    /// Same layout as [`ArtConfig::load`] under an arbitrary root
    pub fn rooted_at(root: &Path) -> Self {
        Self {
            output_dir: root.join("wix"),
            logo_candidates: vec![
                root.join("assets").join("logo.png"),
                root.join("icons").join("icon.png"),
            ],
            font: FontConfig::system("arial.ttf"),
            branding: Branding::default(),
        }
    }

    pub fn banner_path(&self) -> PathBuf {
        self.output_dir.join(BANNER_FILE)
    }

    pub fn dialog_path(&self) -> PathBuf {
        self.output_dir.join(DIALOG_FILE)
    }
}

/// Make sure the output directory exists and return it
pub fn resolve_output_dir(config: &ArtConfig) -> Result<PathBuf> {
    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Could not create output directory {}",
            config.output_dir.display()
        )
    })?;
    Ok(config.output_dir.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_follow_root() {
        let config = ArtConfig::rooted_at(Path::new("/tmp/kable"));

        assert_eq!(config.banner_path(), Path::new("/tmp/kable/wix/banner.bmp"));
        assert_eq!(config.dialog_path(), Path::new("/tmp/kable/wix/dialog.bmp"));
        assert_eq!(
            config.logo_candidates,
            vec![
                PathBuf::from("/tmp/kable/assets/logo.png"),
                PathBuf::from("/tmp/kable/icons/icon.png"),
            ]
        );
        assert_eq!(config.font.file_name, "arial.ttf");
        assert_eq!(config.font.search_dirs[0], PathBuf::from("."));
    }

    #[test]
    fn test_resolve_output_dir_creates_it() {
        let dir = tempfile::tempdir().unwrap();
        let config = ArtConfig::rooted_at(&dir.path().join("nested"));

        let out = resolve_output_dir(&config).unwrap();
        assert!(out.is_dir());
        // second call is a no-op
        assert_eq!(resolve_output_dir(&config).unwrap(), out);
    }

    #[test]
    fn test_resolve_output_dir_fails_on_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("wix"), b"in the way").unwrap();
        let config = ArtConfig::rooted_at(dir.path());

        let err = resolve_output_dir(&config).unwrap_err();
        assert!(err.to_string().contains("Could not create output directory"));
    }
}
