//! Content source configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::SourceError;
use crate::delivery::query::{QueryParameter, SortOrder};

/// Ordering applied to fetched items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    /// Field path, e.g. `elements.post_date` or `system.name`
    pub field: String,

    #[serde(default)]
    pub order: SortOrder,
}

/// Settings of a content source module.
///
/// The value is immutable once constructed; every run of the module sees the
/// same settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Codename of the element whose value becomes document content
    pub content_field: String,

    /// Codename of the element to promote as the document's `url` entry
    #[serde(default)]
    pub url_field: Option<String>,

    /// Restrict fetching to items of this content type
    #[serde(default)]
    pub content_type: Option<String>,

    #[serde(default)]
    pub order_by: Option<OrderBy>,
}

impl SourceConfig {
    /// Load settings from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read source config: {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: SourceConfig =
            serde_yaml::from_str(yaml).context("Failed to parse source config YAML")?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings for structural problems
    pub fn validate(&self) -> Result<(), SourceError> {
        if self.content_field.trim().is_empty() {
            return Err(SourceError::MissingContentField);
        }
        Ok(())
    }

    /// Render the settings into items-endpoint query parameters
    pub fn query_parameters(&self) -> Vec<QueryParameter> {
        let mut params = Vec::new();
        if let Some(content_type) = self.content_type.as_deref() {
            if !content_type.trim().is_empty() {
                params.push(QueryParameter::Equals {
                    field: "system.type".to_string(),
                    value: content_type.trim().to_string(),
                });
            }
        }
        if let Some(order_by) = &self.order_by {
            params.push(QueryParameter::Order {
                field: order_by.field.clone(),
                order: order_by.order,
            });
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
content_field: body_copy
url_field: url_pattern
content_type: article
order_by:
  field: elements.post_date
  order: descending
"#;
        let config = SourceConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.content_field, "body_copy");
        assert_eq!(config.url_field.as_deref(), Some("url_pattern"));
        assert_eq!(config.content_type.as_deref(), Some("article"));
        assert_eq!(
            config.order_by,
            Some(OrderBy {
                field: "elements.post_date".into(),
                order: SortOrder::Descending,
            })
        );
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = SourceConfig::from_yaml("content_field: body_copy").unwrap();
        assert!(config.url_field.is_none());
        assert!(config.content_type.is_none());
        assert!(config.order_by.is_none());
        assert!(config.query_parameters().is_empty());
    }

    #[test]
    fn test_missing_content_field_is_rejected() {
        let err = SourceConfig::from_yaml("content_field: \"  \"").unwrap_err();
        assert!(err.to_string().contains("content_field"));
    }

    #[test]
    fn test_order_defaults_to_ascending() {
        let yaml = r#"
content_field: body_copy
order_by:
  field: system.name
"#;
        let config = SourceConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.order_by.unwrap().order, SortOrder::Ascending);
    }

    #[test]
    fn test_query_parameters_render_filter_then_order() {
        let yaml = r#"
content_field: body_copy
content_type: article
order_by:
  field: elements.post_date
  order: descending
"#;
        let config = SourceConfig::from_yaml(yaml).unwrap();
        let params = config.query_parameters();
        let pairs: Vec<(&str, String)> = params
            .iter()
            .map(QueryParameter::as_pair)
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("system.type", "article".to_string()),
                ("order", "elements.post_date[desc]".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_content_type_is_ignored() {
        let config = SourceConfig::from_yaml("content_field: body_copy\ncontent_type: \"  \"")
            .unwrap();
        assert!(config.query_parameters().is_empty());
    }

    #[test]
    fn test_from_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("source.yaml");
        std::fs::write(&path, "content_field: body_copy\ncontent_type: article\n").unwrap();

        let config = SourceConfig::from_file(&path).unwrap();
        assert_eq!(config.content_field, "body_copy");
        assert_eq!(config.content_type.as_deref(), Some("article"));
    }
}
