//! End-to-end pack generation.

use std::path::PathBuf;

use log::{debug, info};
use once_cell::sync::OnceCell;
use thiserror::Error;

use crate::catalog::{Catalog, CatalogError, CatalogSource};
use crate::config::GeneratorConfig;
use crate::fsutil;
use crate::manifest::{self, ManifestEntry};
use crate::render::{GlyphRenderer, GlyphSource, RenderError};
use crate::slug::slugify;

/// Errors raised while generating a pack, tagged by pipeline stage.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to load the icon catalog")]
    Catalog(#[from] CatalogError),

    #[error("failed to render icon `{label}` ({slug})")]
    Render {
        label: String,
        slug: String,
        #[source]
        source: RenderError,
    },

    #[error("failed to write {path}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize the manifest")]
    Manifest(#[from] serde_json::Error),
}

/// The materialized result of one `generate` run.
#[derive(Debug)]
pub struct PackOutput {
    /// Normalized output root the pack was written under.
    pub root: PathBuf,

    /// Manifest entries, in catalog order.
    pub entries: Vec<ManifestEntry>,
}

// ============================================================================
// PackGenerator
// ============================================================================

/// Drives the generation pipeline: stale-output cleanup, per-icon
/// rendering and persistence, and the final manifest write.
///
/// The catalog is loaded on the first `generate` call and reused for
/// subsequent calls with different configs; records are never mutated.
pub struct PackGenerator<S> {
    source: CatalogSource,
    renderer: GlyphRenderer<S>,
    catalog: OnceCell<Catalog>,
}

impl<S: GlyphSource> PackGenerator<S> {
    pub fn new(source: CatalogSource, renderer: GlyphRenderer<S>) -> Self {
        Self {
            source,
            renderer,
            catalog: OnceCell::new(),
        }
    }

    /// Generates the pack described by `config`.
    ///
    /// Idempotent per config: stale `icons/` output is cleared up front,
    /// so a retry after a failed run starts from a clean slate. A failure
    /// mid-iteration leaves already-written images behind; nothing is
    /// rolled back.
    pub fn generate(&self, config: &GeneratorConfig) -> Result<PackOutput, GenerateError> {
        let catalog = self
            .catalog
            .get_or_try_init(|| Catalog::load(&self.source))?;

        let root = std::path::absolute(&config.output_root).map_err(|source| {
            GenerateError::Persist {
                path: config.output_root.clone(),
                source,
            }
        })?;
        let icons_dir = root.join("icons");

        // Cleanup must finish before the first write.
        fsutil::remove_dir_best_effort(&icons_dir);

        let selected: Vec<_> = catalog.icons_for_style(config.style).collect();
        info!(
            "generating {} {} icons under {}",
            selected.len(),
            config.style,
            root.display()
        );

        let mut entries = Vec::with_capacity(selected.len());
        for record in selected {
            let slug = slugify(&record.label);
            debug!("rendering {slug}.png");

            let png = self
                .renderer
                .render(
                    &record.unicode,
                    config.style,
                    config.background_color,
                    config.icon_color,
                )
                .map_err(|source| GenerateError::Render {
                    label: record.label.clone(),
                    slug: slug.clone(),
                    source,
                })?;

            let image_path = icons_dir.join(format!("{slug}.png"));
            fsutil::write_with_parents(&image_path, &png).map_err(|source| {
                GenerateError::Persist {
                    path: image_path.clone(),
                    source,
                }
            })?;

            entries.push(manifest::assemble(record, &slug, &catalog.categories));
        }

        let json = manifest::to_json(&entries)?;
        let manifest_path = root.join("icons.json");
        fsutil::write_with_parents(&manifest_path, json.as_bytes()).map_err(|source| {
            GenerateError::Persist {
                path: manifest_path.clone(),
                source,
            }
        })?;

        info!(
            "wrote {} manifest entries to {}",
            entries.len(),
            manifest_path.display()
        );

        Ok(PackOutput { root, entries })
    }
}

// ============================================================================
// Tests
// ============================================================================
