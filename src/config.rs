//! Run configuration: the style enumeration, color parsing, and the
//! per-run generator config.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use palette::Srgb;
use thiserror::Error;

/// Errors raised while validating caller-supplied configuration values.
///
/// These belong to the CLI boundary; the core pipeline only ever sees
/// values that have already been parsed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The value is not a 3- or 6-digit hex color.
    #[error("`{value}` is not a 3- or 6-digit hex color")]
    InvalidColor { value: String },

    /// The value does not name a known icon style.
    #[error("`{value}` is not a recognized icon style")]
    UnknownStyle { value: String },
}

// ============================================================================
// Style
// ============================================================================

/// A named glyph family variant.
///
/// The style controls which subset of the catalog applies and which font
/// family the glyphs are drawn with. `Light`, `Sharp` and `Thin` only exist
/// in the licensed cut of the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Style {
    Regular,
    #[default]
    Solid,
    Brands,
    Light,
    Sharp,
    Thin,
}

impl Style {
    /// The style identifier as it appears in catalog `styles` lists.
    pub fn as_str(self) -> &'static str {
        match self {
            Style::Regular => "regular",
            Style::Solid => "solid",
            Style::Brands => "brands",
            Style::Light => "light",
            Style::Sharp => "sharp",
            Style::Thin => "thin",
        }
    }

    /// The font family this style is drawn with.
    ///
    /// Each style maps to exactly one family; for the styles shipped in
    /// both cuts the licensed flag picks the Free or Pro family name.
    pub fn family_name(self, licensed: bool) -> &'static str {
        match (self, licensed) {
            (Style::Regular, false) => "Font Awesome 6 Free Regular",
            (Style::Regular, true) => "Font Awesome 6 Pro Regular",
            (Style::Solid, false) => "Font Awesome 6 Free Solid",
            (Style::Solid, true) => "Font Awesome 6 Pro Solid",
            (Style::Brands, _) => "Font Awesome 6 Brands Regular",
            (Style::Light, _) => "Font Awesome 6 Pro Light",
            (Style::Sharp, _) => "Font Awesome 6 Sharp Solid",
            (Style::Thin, _) => "Font Awesome 6 Pro Thin",
        }
    }

    /// File name of the webfont carrying this style's glyphs.
    pub fn font_file(self) -> &'static str {
        match self {
            Style::Regular => "fa-regular-400.ttf",
            Style::Solid => "fa-solid-900.ttf",
            Style::Brands => "fa-brands-400.ttf",
            Style::Light => "fa-light-300.ttf",
            Style::Sharp => "fa-sharp-solid-900.ttf",
            Style::Thin => "fa-thin-100.ttf",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regular" => Ok(Style::Regular),
            "solid" => Ok(Style::Solid),
            "brands" => Ok(Style::Brands),
            "light" => Ok(Style::Light),
            "sharp" => Ok(Style::Sharp),
            "thin" => Ok(Style::Thin),
            _ => Err(ConfigError::UnknownStyle {
                value: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// Colors
// ============================================================================

/// Parses a 3- or 6-digit hex color, with or without a leading `#`.
///
/// Shorthand digits are doubled (`f80` becomes `ff8800`) before parsing.
pub fn parse_hex_color(input: &str) -> Result<Srgb<u8>, ConfigError> {
    let hex = input.strip_prefix('#').unwrap_or(input);
    let expanded;
    let hex = if hex.len() == 3 {
        expanded = hex.chars().flat_map(|c| [c, c]).collect::<String>();
        expanded.as_str()
    } else {
        hex
    };

    hex.parse::<Srgb<u8>>().map_err(|_| ConfigError::InvalidColor {
        value: input.to_string(),
    })
}

// ============================================================================
// GeneratorConfig
// ============================================================================

/// Immutable configuration for one `generate` run.
///
/// Colors and the style arrive already validated and typed; the core never
/// re-validates them. The same cached catalog serves runs with different
/// configs, so the style filter is applied per run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Which glyph family variant to generate.
    pub style: Style,

    /// Glyph foreground color.
    pub icon_color: Srgb<u8>,

    /// Canvas fill color.
    pub background_color: Srgb<u8>,

    /// Directory the pack is materialized under.
    pub output_root: PathBuf,

    /// Whether the licensed metadata/font source was selected. Picks the
    /// licensed font family names; source paths are resolved by the caller.
    pub licensed: bool,
}
