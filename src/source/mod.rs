//! Content source module: fetches content items and turns each one into a
//! pipeline document.

pub mod config;
pub mod elements;

use anyhow::{Context, Result};
use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

use crate::delivery::models::{ContentItem, ElementValue};
use crate::delivery::query::QueryParameter;
use crate::delivery::DeliveryClient;
use crate::pipeline::{Document, DocumentFactory, MetaValue, Metadata, Module};
use crate::typed::SOURCE_ITEM_KEY;

// Re-export commonly used types
pub use config::{OrderBy, SourceConfig};

/// Errors raised while setting up a content source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("No content field configured; set `content_field` to the element whose value becomes document content")]
    MissingContentField,
}

/// Pipeline module that sources documents from a delivery project.
///
/// Every execution fetches all items matching the configured filter and
/// ordering, then assembles one document per item. A fetch failure fails the
/// whole execution; there is no partial output.
pub struct ContentSource<C> {
    client: C,
    config: SourceConfig,
    query: Vec<QueryParameter>,
}

impl<C> std::fmt::Debug for ContentSource<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentSource")
            .field("config", &self.config)
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}

impl<C: DeliveryClient> ContentSource<C> {
    /// Validate `config` and bind the source to a delivery client.
    pub fn new(client: C, config: SourceConfig) -> Result<Self, SourceError> {
        config.validate()?;
        let query = config.query_parameters();
        Ok(Self {
            client,
            config,
            query,
        })
    }

    fn create_document(&self, factory: &dyn DocumentFactory, item: ContentItem) -> Document {
        let content = item.content_string(&self.config.content_field);

        let mut element_entries: Vec<(String, MetaValue)> = Vec::new();
        for (codename, element) in &item.elements {
            let Some((key, value)) = elements::parse_element(codename, &element.value) else {
                continue;
            };
            // The url alias applies to plain fields only; asset lists keep
            // their own key.
            let from_assets = matches!(element.value, ElementValue::Assets(_));
            if !from_assets && self.config.url_field.as_deref() == Some(key.as_str()) {
                element_entries.push(("url".to_string(), value.clone()));
            }
            element_entries.push((key, value));
        }

        debug!(
            codename = %item.system.codename,
            entries = element_entries.len(),
            "Assembled document metadata"
        );

        let mut metadata = Metadata::new();
        metadata.push("name", MetaValue::Str(item.system.name.clone()));
        metadata.push("codename", MetaValue::Str(item.system.codename.clone()));
        metadata.push(SOURCE_ITEM_KEY, MetaValue::Item(Box::new(item)));
        for (key, value) in element_entries {
            metadata.push(key, value);
        }

        factory.new_document(content, metadata)
    }
}

#[async_trait]
impl<C: DeliveryClient> Module for ContentSource<C> {
    fn name(&self) -> &str {
        "content_source"
    }

    async fn execute(
        &self,
        _inputs: &[Document],
        factory: &dyn DocumentFactory,
    ) -> Result<Vec<Document>> {
        info!(params = self.query.len(), "Fetching content items");
        let response = self
            .client
            .items(&self.query)
            .await
            .context("Failed to fetch content items from the delivery API")?;

        let documents: Vec<Document> = response
            .items
            .into_iter()
            .map(|item| self.create_document(factory, item))
            .collect();
        info!(count = documents.len(), "Created documents from content items");
        Ok(documents)
    }
}
