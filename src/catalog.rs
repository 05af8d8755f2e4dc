//! Icon and category catalog loading.
//!
//! Both catalogs are YAML mappings keyed by an internal id. Document order
//! is meaningful: the manifest lists icons in the order the catalog
//! declares them, so parsing goes through [`serde_yaml::Mapping`], which
//! preserves insertion order, rather than a sorted map.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::Style;

/// Errors raised while loading the icon/category catalogs.
///
/// All of them are fatal to a run; they surface before anything is written.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog document {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed {document} catalog")]
    Parse {
        document: &'static str,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{document} entry `{key}` is malformed")]
    Entry {
        document: &'static str,
        key: String,
        #[source]
        source: serde_yaml::Error,
    },
}

// ============================================================================
// Records
// ============================================================================

/// One entry from the icon catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRecord {
    /// Human-readable name, unique within a style.
    pub label: String,

    /// Style identifiers the glyph is available in. These are free-form
    /// document values and may name styles outside the fixed enumeration.
    pub styles: Vec<String>,

    /// Hex code point of the glyph to render.
    ///
    /// Not validated at load time; a bogus value fails the single icon at
    /// render time instead of rejecting the whole catalog.
    pub unicode: String,

    /// Free-text search terms, order preserved, duplicates allowed.
    pub search_terms: Vec<String>,
}

/// Groups icon labels under a topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRecord {
    /// Category name, used verbatim as a search tag.
    pub label: String,

    /// Member icon labels. References to unknown icons are tolerated.
    pub icons: Vec<String>,
}

/// Paths to the two catalog documents.
#[derive(Debug, Clone)]
pub struct CatalogSource {
    pub icons: PathBuf,
    pub categories: PathBuf,
}

impl CatalogSource {
    /// The conventional `icons.yml` + `categories.yml` layout under one
    /// metadata directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            icons: dir.join("icons.yml"),
            categories: dir.join("categories.yml"),
        }
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// The full set of icon and category records from one metadata source.
///
/// Immutable after loading. Expected to be loaded at most once per source;
/// [`PackGenerator`](crate::PackGenerator) caches it across runs.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub icons: Vec<IconRecord>,
    pub categories: Vec<CategoryRecord>,
}

#[derive(Debug, Deserialize)]
struct RawIcon {
    label: String,
    #[serde(default)]
    styles: Vec<String>,
    unicode: String,
    #[serde(default)]
    search: RawSearch,
}

#[derive(Debug, Default, Deserialize)]
struct RawSearch {
    #[serde(default)]
    terms: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    label: String,
    #[serde(default)]
    icons: Vec<String>,
}

impl Catalog {
    /// Reads and parses both documents from disk.
    pub fn load(source: &CatalogSource) -> Result<Self, CatalogError> {
        let icons = read_document(&source.icons)?;
        let categories = read_document(&source.categories)?;
        Self::parse(&icons, &categories)
    }

    /// Parses the icon and category documents.
    ///
    /// Only document structure is validated here.
    pub fn parse(icons_yaml: &str, categories_yaml: &str) -> Result<Self, CatalogError> {
        let icons = parse_mapping(icons_yaml, "icon", |raw: RawIcon| IconRecord {
            label: raw.label,
            styles: raw.styles,
            unicode: raw.unicode,
            search_terms: raw.search.terms,
        })?;
        let categories = parse_mapping(categories_yaml, "category", |raw: RawCategory| {
            CategoryRecord {
                label: raw.label,
                icons: raw.icons,
            }
        })?;
        Ok(Self { icons, categories })
    }

    /// Records whose `styles` list contains the requested style.
    pub fn icons_for_style(&self, style: Style) -> impl Iterator<Item = &IconRecord> {
        let wanted = style.as_str();
        self.icons
            .iter()
            .filter(move |icon| icon.styles.iter().any(|s| s == wanted))
    }
}

fn read_document(path: &Path) -> Result<String, CatalogError> {
    fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_mapping<R, T>(
    document: &str,
    kind: &'static str,
    build: impl Fn(R) -> T,
) -> Result<Vec<T>, CatalogError>
where
    R: DeserializeOwned,
{
    let mapping: serde_yaml::Mapping = serde_yaml::from_str(document)
        .map_err(|source| CatalogError::Parse {
            document: kind,
            source,
        })?;

    let mut records = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        let raw: R = serde_yaml::from_value(value).map_err(|source| CatalogError::Entry {
            document: kind,
            key: key.as_str().unwrap_or_default().to_string(),
            source,
        })?;
        records.push(build(raw));
    }
    Ok(records)
}
