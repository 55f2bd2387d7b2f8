//! Delivery API access: wire models, query parameters, and the client
//! abstraction over the items endpoint.

pub mod client;
pub mod models;
pub mod query;

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

// Re-export commonly used types
pub use client::{DeliveryConfig, HttpDeliveryClient};
pub use models::{
    AssetRef, ChoiceOption, ContentItem, Element, ElementValue, ItemsResponse, ModelError,
    Pagination, RichTextValue, SystemAttributes,
};
pub use query::{QueryParameter, SortOrder};

/// Errors raised while talking to the delivery API.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Invalid delivery configuration: {0}")]
    Config(String),

    #[error("Delivery request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Delivery API returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode delivery response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Read access to a project's published (or preview) content.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait DeliveryClient: Send + Sync {
    /// Fetch all content items matching `query`
    async fn items(&self, query: &[QueryParameter]) -> Result<ItemsResponse, DeliveryError>;
}
