//! Typed models for the delivery API wire format.
//!
//! An items response carries content items; each item is a `system` block of
//! identity attributes plus a map of named elements. Element values are
//! dynamically typed on the wire and tagged with a `type` string, so decoding
//! maps each element into the [`ElementValue`] sum type. Unrecognized tags
//! and malformed payloads degrade to [`ElementValue::Unknown`] rather than
//! failing the whole response.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Errors raised when projecting a content item into a caller-defined model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Failed to materialize typed model for `{codename}`: {source}")]
    Deserialize {
        codename: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Identity attributes of a content item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemAttributes {
    pub id: String,

    /// Display name shown to editors
    pub name: String,

    /// Unique machine name within the project
    pub codename: String,

    /// Codename of the item's content type
    #[serde(rename = "type")]
    pub content_type: String,

    #[serde(default)]
    pub language: Option<String>,

    #[serde(default)]
    pub sitemap_locations: Vec<String>,

    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,
}

/// One asset of an asset element, as served by the CMS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRef {
    pub name: String,

    #[serde(rename = "type", default)]
    pub content_type: Option<String>,

    #[serde(default)]
    pub size: Option<u64>,

    #[serde(default)]
    pub description: Option<String>,

    pub url: String,
}

/// One selected option of a multiple-choice or taxonomy element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub name: String,
    pub codename: String,
}

/// Rich-text element value: rendered HTML plus the codenames of content
/// items embedded inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichTextValue {
    pub html: String,
    pub inline_items: Vec<String>,
}

/// The closed set of element value shapes.
///
/// `Null` means the element exists on the content type but has no value for
/// this item. `Unknown` keeps the raw JSON of tags this crate does not
/// understand, so they still flow through metadata instead of being dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementValue {
    Text(String),
    RichText(RichTextValue),
    Assets(Vec<AssetRef>),
    LinkedItems(Vec<String>),
    Number(f64),
    DateTime(DateTime<Utc>),
    UrlSlug(String),
    Options(Vec<ChoiceOption>),
    Null,
    Unknown { kind: String, value: Value },
}

impl ElementValue {
    fn from_tagged(kind: &str, value: Value, inline_items: Vec<String>) -> Self {
        if value.is_null() {
            return ElementValue::Null;
        }
        match kind {
            "text" => match value {
                Value::String(s) => ElementValue::Text(s),
                other => unrecognized(kind, other),
            },
            "rich_text" => match value {
                Value::String(html) => ElementValue::RichText(RichTextValue {
                    html,
                    inline_items,
                }),
                other => unrecognized(kind, other),
            },
            "asset" => match serde_json::from_value::<Vec<AssetRef>>(value.clone()) {
                Ok(refs) => ElementValue::Assets(refs),
                Err(_) => unrecognized(kind, value),
            },
            "modular_content" => match serde_json::from_value::<Vec<String>>(value.clone()) {
                Ok(codenames) => ElementValue::LinkedItems(codenames),
                Err(_) => unrecognized(kind, value),
            },
            "number" => match value.as_f64() {
                Some(n) => ElementValue::Number(n),
                None => unrecognized(kind, value),
            },
            "date_time" => match value
                .as_str()
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            {
                Some(dt) => ElementValue::DateTime(dt.with_timezone(&Utc)),
                None => unrecognized(kind, value),
            },
            "url_slug" => match value {
                Value::String(s) => ElementValue::UrlSlug(s),
                other => unrecognized(kind, other),
            },
            "multiple_choice" | "taxonomy" => {
                match serde_json::from_value::<Vec<ChoiceOption>>(value.clone()) {
                    Ok(options) => ElementValue::Options(options),
                    Err(_) => unrecognized(kind, value),
                }
            }
            other => {
                debug!(kind = other, "Unrecognized element kind; keeping raw value");
                ElementValue::Unknown {
                    kind: other.to_string(),
                    value,
                }
            }
        }
    }

    /// Plain-text rendering of the value, for elements used as document
    /// content. Structured shapes have no plain-text form.
    pub fn plain_text(&self) -> Option<String> {
        match self {
            ElementValue::Text(s) | ElementValue::UrlSlug(s) => Some(s.clone()),
            ElementValue::RichText(rt) => Some(rt.html.clone()),
            ElementValue::Number(n) => Some(n.to_string()),
            ElementValue::DateTime(dt) => Some(dt.to_rfc3339()),
            _ => None,
        }
    }

    /// Project the value into plain JSON for typed-model materialization.
    ///
    /// Rich text flattens to its HTML, options and linked items keep their
    /// structure, assets serialize with their full attribute set.
    pub fn to_json_value(&self) -> Value {
        match self {
            ElementValue::Text(s) | ElementValue::UrlSlug(s) => Value::String(s.clone()),
            ElementValue::RichText(rt) => Value::String(rt.html.clone()),
            ElementValue::Assets(refs) => {
                serde_json::to_value(refs).unwrap_or(Value::Null)
            }
            ElementValue::LinkedItems(codenames) => {
                serde_json::to_value(codenames).unwrap_or(Value::Null)
            }
            ElementValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            ElementValue::DateTime(dt) => Value::String(dt.to_rfc3339()),
            ElementValue::Options(options) => {
                serde_json::to_value(options).unwrap_or(Value::Null)
            }
            ElementValue::Null => Value::Null,
            ElementValue::Unknown { value, .. } => value.clone(),
        }
    }
}

fn unrecognized(kind: &str, value: Value) -> ElementValue {
    debug!(kind, "Element payload does not match its kind; keeping raw value");
    ElementValue::Unknown {
        kind: kind.to_string(),
        value,
    }
}

/// One named element of a content item.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Display name from the content type (e.g. "Post date")
    pub name: Option<String>,

    pub value: ElementValue,
}

// Wire shape of an element before tag dispatch. Rich-text elements carry
// their inline item codenames in a `modular_content` array next to `value`.
#[derive(Debug, Deserialize)]
struct RawElement {
    #[serde(rename = "type")]
    kind: String,

    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    value: Value,

    #[serde(default)]
    modular_content: Vec<String>,
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawElement::deserialize(deserializer)?;
        let value = ElementValue::from_tagged(&raw.kind, raw.value, raw.modular_content);
        Ok(Element {
            name: raw.name,
            value,
        })
    }
}

/// A content item: identity attributes plus elements in delivery order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContentItem {
    pub system: SystemAttributes,

    #[serde(default)]
    pub elements: IndexMap<String, Element>,
}

impl ContentItem {
    /// Plain-text value of the element named `codename`, or an empty string
    /// when the element is absent or has no value.
    pub fn content_string(&self, codename: &str) -> String {
        self.elements
            .get(codename)
            .and_then(|element| element.value.plain_text())
            .unwrap_or_default()
    }

    /// Materialize this item into a caller-defined model.
    ///
    /// The model deserializes from a flat JSON object: one field per element
    /// under its codename, plus the `system` block. Unknown fields are
    /// ignored by serde, so models only need the elements they care about.
    pub fn to_model<T: DeserializeOwned>(&self) -> Result<T, ModelError> {
        let mut object = serde_json::Map::new();
        let system = serde_json::to_value(&self.system).map_err(|source| {
            ModelError::Deserialize {
                codename: self.system.codename.clone(),
                source,
            }
        })?;
        object.insert("system".to_string(), system);
        for (codename, element) in &self.elements {
            object.insert(codename.clone(), element.value.to_json_value());
        }
        serde_json::from_value(Value::Object(object)).map_err(|source| {
            ModelError::Deserialize {
                codename: self.system.codename.clone(),
                source,
            }
        })
    }
}

/// Paging block of an items response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: u64,

    #[serde(default)]
    pub limit: u64,

    #[serde(default)]
    pub count: u64,

    #[serde(default)]
    pub next_page: Option<String>,
}

/// Response of the items endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemsResponse {
    pub items: Vec<ContentItem>,

    /// Items referenced by rich-text and linked-items elements, keyed by
    /// codename
    #[serde(default)]
    pub modular_content: IndexMap<String, ContentItem>,

    #[serde(default)]
    pub pagination: Option<Pagination>,
}
