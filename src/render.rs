//! Glyph rasterization onto fixed-size PNG canvases.
//!
//! Rendering is split across a seam: [`FontCatalog`] owns the parsed fonts
//! and produces coverage masks through the [`GlyphSource`] trait, while
//! [`GlyphRenderer`] turns a mask into an encoded PNG. The split keeps the
//! canvas and compositing logic testable without real font files.

use std::collections::HashMap;
use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use log::warn;
use palette::Srgb;
use thiserror::Error;

use crate::config::Style;

/// Output canvas edge length in pixels.
pub const CANVAS_SIZE: u32 = 144;

/// Point size glyphs are rasterized at.
pub const GLYPH_SIZE: f32 = 72.0;

/// Errors raised while rendering a glyph.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The catalog's `unicode` value does not name a valid code point.
    #[error("`{value}` is not a valid hex code point")]
    InvalidCodepoint { value: String },

    /// The font data for a family could not be parsed. Raised when the
    /// catalog is built, not per icon.
    #[error("failed to load font for family `{family}`: {reason}")]
    FontLoad { family: String, reason: String },

    /// Neither the requested family nor the solid fallback has a font.
    #[error("no font registered for family `{family}`")]
    FontNotRegistered { family: String },

    /// PNG encoding failed.
    #[error("failed to encode png")]
    Encode(#[from] image::ImageError),
}

// ============================================================================
// GlyphSource
// ============================================================================

/// An alpha coverage mask for a single rasterized glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBitmap {
    pub width: u32,
    pub height: u32,
    /// Row-major coverage values, `width * height` entries, 0 = no ink.
    pub coverage: Vec<u8>,
}

impl GlyphBitmap {
    pub fn new(width: u32, height: u32, coverage: Vec<u8>) -> Self {
        debug_assert_eq!(coverage.len(), (width * height) as usize);
        Self {
            width,
            height,
            coverage,
        }
    }
}

/// Produces coverage masks for glyphs of a given style.
///
/// [`FontCatalog`] is the production implementation; tests substitute
/// synthetic sources so the renderer can be exercised without font files.
pub trait GlyphSource {
    fn rasterize(&self, style: Style, glyph: char) -> Result<GlyphBitmap, RenderError>;
}

// ============================================================================
// FontCatalog
// ============================================================================

/// Fonts registered per family name, resolved from styles.
///
/// Built once up front and handed to the renderer; font problems surface
/// at registration time and resolution is read-only afterwards.
pub struct FontCatalog {
    licensed: bool,
    fonts: HashMap<&'static str, fontdue::Font>,
}

impl FontCatalog {
    /// Creates an empty catalog. The licensed flag selects which family
    /// names styles resolve to.
    pub fn new(licensed: bool) -> Self {
        Self {
            licensed,
            fonts: HashMap::new(),
        }
    }

    /// Parses `bytes` and registers the font under `style`'s family name.
    pub fn register(&mut self, style: Style, bytes: &[u8]) -> Result<(), RenderError> {
        let family = style.family_name(self.licensed);
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default()).map_err(
            |reason| RenderError::FontLoad {
                family: family.to_string(),
                reason: reason.to_string(),
            },
        )?;
        self.fonts.insert(family, font);
        Ok(())
    }

    /// Resolves the font for `style`, falling back to the solid family
    /// when the style's own family has nothing registered.
    fn resolve(&self, style: Style) -> Result<&fontdue::Font, RenderError> {
        let family = style.family_name(self.licensed);
        if let Some(font) = self.fonts.get(family) {
            return Ok(font);
        }
        let fallback = Style::Solid.family_name(self.licensed);
        self.fonts
            .get(fallback)
            .ok_or_else(|| RenderError::FontNotRegistered {
                family: family.to_string(),
            })
    }
}

impl GlyphSource for FontCatalog {
    fn rasterize(&self, style: Style, glyph: char) -> Result<GlyphBitmap, RenderError> {
        let font = self.resolve(style)?;
        if font.lookup_glyph_index(glyph) == 0 {
            warn!(
                "font for style `{style}` has no glyph for U+{:04X}",
                glyph as u32
            );
        }
        let (metrics, coverage) = font.rasterize(glyph, GLYPH_SIZE);
        Ok(GlyphBitmap::new(
            metrics.width as u32,
            metrics.height as u32,
            coverage,
        ))
    }
}

// ============================================================================
// GlyphRenderer
// ============================================================================

/// Renders single glyphs onto fixed-size, solid-background canvases.
pub struct GlyphRenderer<S> {
    source: S,
}

impl<S: GlyphSource> GlyphRenderer<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Draws the glyph for `codepoint` (a hex string such as `f0f4`)
    /// centered on a [`CANVAS_SIZE`] square canvas filled with
    /// `background`, and returns the canvas encoded as PNG bytes.
    ///
    /// Every call composes onto a fresh canvas; no state carries over
    /// between icons.
    pub fn render(
        &self,
        codepoint: &str,
        style: Style,
        background: Srgb<u8>,
        foreground: Srgb<u8>,
    ) -> Result<Vec<u8>, RenderError> {
        let glyph = decode_codepoint(codepoint)?;
        let mask = self.source.rasterize(style, glyph)?;
        let canvas = compose(&mask, background, foreground);
        encode_png(&canvas)
    }
}

/// Decodes a hex code point string (`"f0f4"`) into a `char`.
pub fn decode_codepoint(value: &str) -> Result<char, RenderError> {
    u32::from_str_radix(value.trim(), 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| RenderError::InvalidCodepoint {
            value: value.to_string(),
        })
}

/// Fills a fresh canvas with `background` and blends the mask, centered on
/// both axes, in `foreground`. Mask regions falling outside the canvas are
/// clipped.
fn compose(mask: &GlyphBitmap, background: Srgb<u8>, foreground: Srgb<u8>) -> RgbaImage {
    let bg = Rgba([background.red, background.green, background.blue, 255]);
    let mut canvas = RgbaImage::from_pixel(CANVAS_SIZE, CANVAS_SIZE, bg);

    let x0 = (CANVAS_SIZE as i64 - mask.width as i64) / 2;
    let y0 = (CANVAS_SIZE as i64 - mask.height as i64) / 2;

    for my in 0..mask.height {
        for mx in 0..mask.width {
            let coverage = mask.coverage[(my * mask.width + mx) as usize];
            if coverage == 0 {
                continue;
            }
            let x = x0 + i64::from(mx);
            let y = y0 + i64::from(my);
            if x < 0 || y < 0 || x >= i64::from(CANVAS_SIZE) || y >= i64::from(CANVAS_SIZE) {
                continue;
            }
            let pixel = canvas.get_pixel_mut(x as u32, y as u32);
            *pixel = blend_coverage(foreground, *pixel, coverage);
        }
    }

    canvas
}

/// Blends `foreground` over an opaque destination pixel, using the
/// coverage value as source alpha.
fn blend_coverage(foreground: Srgb<u8>, dst: Rgba<u8>, coverage: u8) -> Rgba<u8> {
    let alpha = coverage as f32 / 255.0;
    let mix = |fg: u8, bg: u8| -> u8 { (fg as f32 * alpha + bg as f32 * (1.0 - alpha)).round() as u8 };
    Rgba([
        mix(foreground.red, dst[0]),
        mix(foreground.green, dst[1]),
        mix(foreground.blue, dst[2]),
        255,
    ])
}

fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();
    canvas.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn white() -> Srgb<u8> {
        Srgb::new(255, 255, 255)
    }

    fn black() -> Srgb<u8> {
        Srgb::new(0, 0, 0)
    }

    /// Returns a uniform block regardless of the requested glyph.
    struct SolidBlock {
        width: u32,
        height: u32,
        value: u8,
    }

    impl GlyphSource for SolidBlock {
        fn rasterize(&self, _style: Style, _glyph: char) -> Result<GlyphBitmap, RenderError> {
            Ok(GlyphBitmap::new(
                self.width,
                self.height,
                vec![self.value; (self.width * self.height) as usize],
            ))
        }
    }

    fn decode(png: &[u8]) -> RgbaImage {
        image::load_from_memory(png).unwrap().to_rgba8()
    }

    #[test]
    fn decodes_valid_codepoints() {
        assert_eq!(decode_codepoint("f0f4").unwrap(), '\u{f0f4}');
        assert_eq!(decode_codepoint("F0F4").unwrap(), '\u{f0f4}');
        assert_eq!(decode_codepoint("41").unwrap(), 'A');
    }

    #[test]
    fn rejects_non_hex_codepoints() {
        assert!(matches!(
            decode_codepoint("not-hex"),
            Err(RenderError::InvalidCodepoint { .. })
        ));
        assert!(decode_codepoint("").is_err());
    }

    #[test]
    fn rejects_out_of_range_codepoints() {
        assert!(decode_codepoint("110000").is_err());
        // Surrogates are not chars.
        assert!(decode_codepoint("d800").is_err());
    }

    #[test]
    fn fills_background_and_centers_glyph() {
        let renderer = GlyphRenderer::new(SolidBlock {
            width: 4,
            height: 4,
            value: 255,
        });
        let png = renderer.render("f0f4", Style::Solid, black(), white()).unwrap();
        let img = decode(&png);

        assert_eq!(img.dimensions(), (CANVAS_SIZE, CANVAS_SIZE));
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(143, 143).0, [0, 0, 0, 255]);

        // A 4x4 block on a 144 canvas spans 70..=73 on both axes.
        assert_eq!(img.get_pixel(70, 70).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(73, 73).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(69, 70).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(74, 73).0, [0, 0, 0, 255]);
    }

    #[test]
    fn partial_coverage_blends_toward_background() {
        let renderer = GlyphRenderer::new(SolidBlock {
            width: 2,
            height: 2,
            value: 128,
        });
        let png = renderer.render("41", Style::Solid, black(), white()).unwrap();
        let img = decode(&png);

        assert_eq!(img.get_pixel(71, 71).0, [128, 128, 128, 255]);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn oversized_masks_are_clipped() {
        let renderer = GlyphRenderer::new(SolidBlock {
            width: 200,
            height: 10,
            value: 255,
        });
        let png = renderer.render("41", Style::Solid, black(), white()).unwrap();
        let img = decode(&png);

        assert_eq!(img.dimensions(), (CANVAS_SIZE, CANVAS_SIZE));
        // The band is centered vertically and runs off both horizontal edges.
        assert_eq!(img.get_pixel(0, 69).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(143, 69).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn empty_mask_renders_plain_background() {
        let renderer = GlyphRenderer::new(SolidBlock {
            width: 0,
            height: 0,
            value: 0,
        });
        let png = renderer
            .render("41", Style::Solid, Srgb::new(10, 20, 35), white())
            .unwrap();
        let img = decode(&png);
        assert_eq!(img.get_pixel(72, 72).0, [10, 20, 35, 255]);
    }

    #[test]
    fn renders_are_independent() {
        let renderer = GlyphRenderer::new(SolidBlock {
            width: 4,
            height: 4,
            value: 255,
        });
        let first = renderer.render("41", Style::Solid, black(), white()).unwrap();
        let second = renderer.render("41", Style::Solid, black(), white()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unregistered_style_fails_resolution() {
        let catalog = FontCatalog::new(false);
        let err = catalog.rasterize(Style::Brands, 'a').unwrap_err();
        assert!(matches!(err, RenderError::FontNotRegistered { .. }));
    }

    #[test]
    fn garbage_font_bytes_fail_registration() {
        let mut catalog = FontCatalog::new(false);
        let err = catalog.register(Style::Solid, b"definitely not a font").unwrap_err();
        match err {
            RenderError::FontLoad { family, .. } => {
                assert_eq!(family, "Font Awesome 6 Free Solid");
            }
            other => panic!("expected FontLoad, got {other:?}"),
        }
    }
}
