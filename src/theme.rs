//! Theme colors for the installer artwork
//! Mirrors the launcher's global stylesheet so the MSI matches the app

use image::Rgb;
use thiserror::Error;

pub type Color = Rgb<u8>;

/// Hex table the palette is built from, in report order
pub const THEME_HEX: [(&str, &str); 8] = [
    ("dark", "#0a0a0f"),
    ("dark_lighter", "#1e1e20"),
    ("dark_card", "#26262a"),
    ("primary", "#8b5cf6"),
    ("secondary", "#ec4899"),
    ("tertiary", "#0ea5e9"),
    ("text", "#ffffff"),
    ("placeholder", "#a0a0aa"),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("malformed hex color {0:?}")]
    Malformed(String),

    #[error("palette has no entry named {0:?}")]
    MissingEntry(&'static str),
}

/// Theme colors used by both generators
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub dark: Color,
    pub dark_lighter: Color,
    pub dark_card: Color,
    pub primary: Color,      // Accent bars, glow, shadows
    pub secondary: Color,    // Titles
    pub tertiary: Color,     // Second pattern color
    pub text: Color,
    pub placeholder: Color,  // Dimmed text
}

impl Palette {
    /// Build the launcher palette from [`THEME_HEX`]
    pub fn load() -> Result<Self, ColorError> {
        Self::from_table(&THEME_HEX)
    }

    /// Build a palette from `(name, hex)` pairs. Every field must be present.
    pub fn from_table(table: &[(&str, &str)]) -> Result<Self, ColorError> {
        let lookup = |name: &'static str| -> Result<Color, ColorError> {
            let (_, hex) = table
                .iter()
                .find(|(key, _)| *key == name)
                .ok_or(ColorError::MissingEntry(name))?;
            hex_to_rgb(hex)
        };

        Ok(Self {
            dark: lookup("dark")?,
            dark_lighter: lookup("dark_lighter")?,
            dark_card: lookup("dark_card")?,
            primary: lookup("primary")?,
            secondary: lookup("secondary")?,
            tertiary: lookup("tertiary")?,
            text: lookup("text")?,
            placeholder: lookup("placeholder")?,
        })
    }

    /// Named entries in declaration order, for reporting
    pub fn entries(&self) -> [(&'static str, Color); 8] {
        [
            ("dark", self.dark),
            ("dark_lighter", self.dark_lighter),
            ("dark_card", self.dark_card),
            ("primary", self.primary),
            ("secondary", self.secondary),
            ("tertiary", self.tertiary),
            ("text", self.text),
            ("placeholder", self.placeholder),
        ]
    }
}

/// Parse a hex color string (#RRGGBB or #RGB, leading `#` optional)
pub fn hex_to_rgb(s: &str) -> Result<Color, ColorError> {
    let digits = s.trim().trim_start_matches('#');
    let malformed = || ColorError::Malformed(s.to_string());

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(malformed());
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16);

    match digits.len() {
        6 => {
            let r = channel(0..2).map_err(|_| malformed())?;
            let g = channel(2..4).map_err(|_| malformed())?;
            let b = channel(4..6).map_err(|_| malformed())?;
            Ok(Rgb([r, g, b]))
        }
        3 => {
            let r = channel(0..1).map_err(|_| malformed())? * 17;
            let g = channel(1..2).map_err(|_| malformed())? * 17;
            let b = channel(2..3).map_err(|_| malformed())? * 17;
            Ok(Rgb([r, g, b]))
        }
        _ => Err(malformed()),
    }
}

/// Render a color as lowercase `#rrggbb`
pub fn rgb_to_hex(color: Color) -> String {
    let Rgb([r, g, b]) = color;
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}
