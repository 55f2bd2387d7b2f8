//! Element parsing: turning a content item's elements into metadata pairs.
//!
//! Asset elements get their own parser because their payload is a list of
//! structured references; every other element shape goes through the default
//! parser. Both return at most one metadata pair per element.

use serde_json::Value;

use crate::delivery::models::{AssetRef, ElementValue};
use crate::pipeline::{Asset, MetaValue};

/// Parse one element into a metadata pair, or nothing when the element has
/// no representable value.
pub fn parse_element(codename: &str, value: &ElementValue) -> Option<(String, MetaValue)> {
    match value {
        ElementValue::Assets(refs) => parse_assets(codename, refs),
        other => parse_default(codename, other),
    }
}

/// Parse an asset element. Empty asset lists yield nothing.
pub fn parse_assets(codename: &str, refs: &[AssetRef]) -> Option<(String, MetaValue)> {
    if refs.is_empty() {
        return None;
    }
    let assets = refs
        .iter()
        .map(|r| Asset {
            name: r.name.clone(),
            url: r.url.clone(),
        })
        .collect();
    Some((codename.to_string(), MetaValue::Assets(assets)))
}

/// Parse any non-asset element.
///
/// A null value yields nothing; an empty string is still a value. Unknown
/// element kinds keep their raw JSON, rendered to a scalar where possible.
pub fn parse_default(codename: &str, value: &ElementValue) -> Option<(String, MetaValue)> {
    let parsed = match value {
        ElementValue::Null => return None,
        ElementValue::Assets(refs) => return parse_assets(codename, refs),
        ElementValue::Text(s) | ElementValue::UrlSlug(s) => MetaValue::Str(s.clone()),
        ElementValue::RichText(rt) => MetaValue::Str(rt.html.clone()),
        ElementValue::Number(n) => MetaValue::Number(*n),
        ElementValue::DateTime(dt) => MetaValue::DateTime(*dt),
        ElementValue::LinkedItems(codenames) => MetaValue::Strings(codenames.clone()),
        ElementValue::Options(options) => {
            MetaValue::Strings(options.iter().map(|o| o.codename.clone()).collect())
        }
        ElementValue::Unknown { value, .. } => raw_value(value),
    };
    Some((codename.to_string(), parsed))
}

fn raw_value(value: &Value) -> MetaValue {
    match value {
        Value::String(s) => MetaValue::Str(s.clone()),
        Value::Number(n) => match n.as_f64() {
            Some(f) => MetaValue::Number(f),
            None => MetaValue::Str(n.to_string()),
        },
        other => MetaValue::Str(other.to_string()),
    }
}
