//! Document and metadata types produced by pipeline modules.
//!
//! A document is a content string plus an ordered metadata record. Metadata
//! keys are not forced to be unique because a record may legitimately carry
//! the same value under two keys (the promoted "url" alias), but modules are
//! expected to emit each source field exactly once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::delivery::models::ContentItem;

/// A downloadable asset attached to a document through an asset-list
/// metadata entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// File name as managed by the CMS (e.g. "photo.jpg")
    pub name: String,

    /// Absolute URL the asset is served from
    pub url: String,
}

/// A single metadata value.
///
/// The wire payload is dynamically typed; this is the closed set of shapes
/// metadata can take after parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    /// Plain text (also rich-text HTML and URL slugs)
    Str(String),

    /// Numeric element value
    Number(f64),

    /// Date/time element value
    DateTime(DateTime<Utc>),

    /// An ordered list of codenames (linked items, choice options)
    Strings(Vec<String>),

    /// An ordered list of assets
    Assets(Vec<Asset>),

    /// The full source content item, stored for typed access
    Item(Box<ContentItem>),
}

impl MetaValue {
    /// Borrow the value as a string, if it is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the value as an asset list, if it is one
    pub fn as_assets(&self) -> Option<&[Asset]> {
        match self {
            MetaValue::Assets(assets) => Some(assets),
            _ => None,
        }
    }

    /// Borrow the value as a stored content item, if it is one
    pub fn as_item(&self) -> Option<&ContentItem> {
        match self {
            MetaValue::Item(item) => Some(item),
            _ => None,
        }
    }
}

/// An ordered key/value record attached to a document.
///
/// Entries keep insertion order; lookups return the first entry with a
/// matching key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    entries: Vec<(String, MetaValue)>,
}

impl Metadata {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, preserving insertion order
    pub fn push(&mut self, key: impl Into<String>, value: MetaValue) {
        self.entries.push((key.into(), value));
    }

    /// First value stored under `key`
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// First string value stored under `key`
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(MetaValue::as_str)
    }

    /// Whether any entry uses `key`
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Keys in insertion order (duplicates included)
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Asset lists in insertion order, skipping every other value shape
    pub fn asset_lists(&self) -> impl Iterator<Item = &[Asset]> {
        self.entries.iter().filter_map(|(_, v)| v.as_assets())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A pipeline document: a content stream plus its metadata record.
///
/// Documents are materialized by a [`DocumentFactory`](super::DocumentFactory)
/// and never mutated afterwards; passes that change content derive a new
/// document from the old one.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Primary content of the document
    pub content: String,

    /// Ordered metadata record
    pub metadata: Metadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_preserves_insertion_order() {
        let mut metadata = Metadata::new();
        metadata.push("name", MetaValue::Str("First".into()));
        metadata.push("codename", MetaValue::Str("first".into()));
        metadata.push("title", MetaValue::Str("First post".into()));

        let keys: Vec<&str> = metadata.keys().collect();
        assert_eq!(keys, vec!["name", "codename", "title"]);
    }

    #[test]
    fn test_metadata_get_returns_first_match() {
        let mut metadata = Metadata::new();
        metadata.push("url", MetaValue::Str("/first".into()));
        metadata.push("url", MetaValue::Str("/second".into()));

        assert_eq!(metadata.get_str("url"), Some("/first"));
        assert_eq!(metadata.len(), 2);
    }

    #[test]
    fn test_metadata_missing_key() {
        let metadata = Metadata::new();
        assert!(metadata.get("anything").is_none());
        assert!(!metadata.contains_key("anything"));
        assert!(metadata.is_empty());
    }

    #[test]
    fn test_asset_lists_skips_other_values() {
        let mut metadata = Metadata::new();
        metadata.push("title", MetaValue::Str("Post".into()));
        metadata.push(
            "teaser",
            MetaValue::Assets(vec![Asset {
                name: "photo.jpg".into(),
                url: "https://cdn.example.com/x/photo.jpg".into(),
            }]),
        );

        let lists: Vec<&[Asset]> = metadata.asset_lists().collect();
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0][0].name, "photo.jpg");
    }
}
