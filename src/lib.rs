//! glyphpack: glyph-font icon pack generation.
//!
//! This crate turns a glyph-font icon library (a TTF plus YAML icon and
//! category catalogs) into a directory of rasterized PNG icons and a JSON
//! manifest of names, file paths and search tags, the layout consumed by
//! launcher-style devices as an icon pack.
//!
//! The pipeline: load the catalogs once, filter by the requested
//! [`Style`], then per icon derive a slug, rasterize the glyph onto a
//! fixed 144x144 canvas in the configured colors, and append a manifest
//! entry. Fonts are injected through [`FontCatalog`] rather than any
//! process-global registration, so rendering stays testable and
//! side-effect free.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use glyphpack::{
//!     parse_hex_color, CatalogSource, FontCatalog, GeneratorConfig, GlyphRenderer,
//!     PackGenerator, Style,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut fonts = FontCatalog::new(false);
//! fonts.register(Style::Solid, &std::fs::read("webfonts/fa-solid-900.ttf")?)?;
//!
//! let generator = PackGenerator::new(
//!     CatalogSource::in_dir(Path::new("metadata")),
//!     GlyphRenderer::new(fonts),
//! );
//!
//! let output = generator.generate(&GeneratorConfig {
//!     style: Style::Solid,
//!     icon_color: parse_hex_color("FFFFFF")?,
//!     background_color: parse_hex_color("0A1423")?,
//!     output_root: "icon-pack-solid".into(),
//!     licensed: false,
//! })?;
//! println!("generated {} icons", output.entries.len());
//! # Ok(())
//! # }
//! ```

mod catalog;
mod config;
mod fsutil;
mod generator;
mod manifest;
mod render;
mod slug;

pub use catalog::{Catalog, CatalogError, CatalogSource, CategoryRecord, IconRecord};
pub use config::{parse_hex_color, ConfigError, GeneratorConfig, Style};
pub use fsutil::{copy_with_parents, remove_dir_best_effort, write_with_parents};
pub use generator::{GenerateError, PackGenerator, PackOutput};
pub use manifest::{assemble, to_json, ManifestEntry};
pub use render::{
    decode_codepoint, FontCatalog, GlyphBitmap, GlyphRenderer, GlyphSource, RenderError,
    CANVAS_SIZE, GLYPH_SIZE,
};
pub use slug::slugify;
