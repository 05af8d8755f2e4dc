//! Manifest assembly and serialization.

use serde::{Deserialize, Serialize};

use crate::catalog::{CategoryRecord, IconRecord};

/// One row of the pack manifest.
///
/// Field order here is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// The icon's display name, straight from the catalog.
    pub name: String,

    /// Image file name, relative to the `icons/` directory.
    pub path: String,

    /// Search tags: the record's terms, the slug, the slug with hyphens
    /// replaced by spaces, then matching category labels. Duplicates are
    /// preserved; consumers tolerate them.
    pub tags: Vec<String>,
}

/// Builds the manifest entry for one rendered icon.
///
/// A category contributes its label when its member list contains either
/// the record's label or the slug. References to unknown icons never fail.
pub fn assemble(record: &IconRecord, slug: &str, categories: &[CategoryRecord]) -> ManifestEntry {
    let mut tags = record.search_terms.clone();
    tags.push(slug.to_string());
    tags.push(slug.replace('-', " "));
    tags.extend(
        categories
            .iter()
            .filter(|category| {
                category
                    .icons
                    .iter()
                    .any(|icon| icon == &record.label || icon == slug)
            })
            .map(|category| category.label.clone()),
    );

    ManifestEntry {
        name: record.label.clone(),
        path: format!("{slug}.png"),
        tags,
    }
}

/// Serializes the manifest as a pretty-printed JSON array, 2-space indent.
pub fn to_json(entries: &[ManifestEntry]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(label: &str, terms: &[&str]) -> IconRecord {
        IconRecord {
            label: label.to_string(),
            styles: vec!["solid".to_string()],
            unicode: "f0f4".to_string(),
            search_terms: terms.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn category(label: &str, icons: &[&str]) -> CategoryRecord {
        CategoryRecord {
            label: label.to_string(),
            icons: icons.iter().map(|i| i.to_string()).collect(),
        }
    }

    #[test]
    fn tag_order_is_terms_slug_spaced_slug_categories() {
        let entry = assemble(
            &record("Code Branch", &["git", "fork"]),
            "code-branch",
            &[category("Development", &["Code Branch"])],
        );

        assert_eq!(entry.name, "Code Branch");
        assert_eq!(entry.path, "code-branch.png");
        assert_eq!(
            entry.tags,
            ["git", "fork", "code-branch", "code branch", "Development"]
        );
    }

    #[test]
    fn duplicate_tags_are_preserved() {
        // A single-word label yields the slug twice: once verbatim and once
        // with hyphens replaced, which is the same string.
        let entry = assemble(
            &record("Coffee", &["drink"]),
            "coffee",
            &[category("Food", &["Coffee"])],
        );
        assert_eq!(entry.tags, ["drink", "coffee", "coffee", "Food"]);
    }

    #[test]
    fn categories_match_by_slug_too() {
        let entry = assemble(
            &record("Coffee", &[]),
            "coffee",
            &[
                category("By Label", &["Coffee"]),
                category("By Slug", &["coffee"]),
                category("Unrelated", &["Tea"]),
            ],
        );
        assert_eq!(entry.tags, ["coffee", "coffee", "By Label", "By Slug"]);
    }

    #[test]
    fn unmatched_category_references_are_tolerated() {
        let entry = assemble(
            &record("Coffee", &[]),
            "coffee",
            &[category("Ghosts", &["No Such Icon", "Another Ghost"])],
        );
        assert_eq!(entry.tags, ["coffee", "coffee"]);
    }

    #[test]
    fn json_shape_is_stable() {
        let entries = vec![ManifestEntry {
            name: "Coffee".to_string(),
            path: "coffee.png".to_string(),
            tags: vec![
                "drink".to_string(),
                "coffee".to_string(),
                "coffee".to_string(),
                "Food".to_string(),
            ],
        }];

        let expected = r#"[
  {
    "name": "Coffee",
    "path": "coffee.png",
    "tags": [
      "drink",
      "coffee",
      "coffee",
      "Food"
    ]
  }
]"#;
        assert_eq!(to_json(&entries).unwrap(), expected);
    }

    #[test]
    fn empty_manifest_serializes_to_empty_array() {
        assert_eq!(to_json(&[]).unwrap(), "[]");
    }
}
