//! papermill - Headless CMS content source for static-site pipelines
//!
//! Pipeline modules that pull published content from a delivery API and
//! hand it to a static-site generator as documents.
//!
//! # Architecture
//!
//! The crate is built around immutable documents:
//! - A source module fetches content items and assembles one document per
//!   item, content plus an ordered metadata record
//! - Transform modules derive new documents through the host's factory
//! - The full source item rides along in metadata for typed access
//!
//! # Modules
//!
//! - `pipeline`: Module trait, documents, and the document factory
//! - `delivery`: Delivery API client, wire models, query parameters
//! - `source`: The content source module and its configuration
//! - `assets`: Local asset placeholder rewriting
//! - `typed`: Typed views over sourced documents
//!
//! # Usage
//!
//! ```no_run
//! use papermill::{
//!     ContentSource, DefaultDocumentFactory, DeliveryConfig, HttpDeliveryClient, Module,
//!     SourceConfig,
//! };
//! use uuid::Uuid;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let client = HttpDeliveryClient::new(DeliveryConfig::new(Uuid::new_v4()))?;
//! let config = SourceConfig::from_yaml("content_field: body_copy\ncontent_type: article")?;
//! let source = ContentSource::new(client, config)?;
//! let documents = source.execute(&[], &DefaultDocumentFactory).await?;
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod delivery;
pub mod pipeline;
pub mod source;
pub mod typed;

// Re-export main types at crate root for convenience
pub use delivery::{
    DeliveryClient, DeliveryConfig, DeliveryError, HttpDeliveryClient, QueryParameter, SortOrder,
};
pub use pipeline::{
    Asset, DefaultDocumentFactory, Document, DocumentFactory, MetaValue, Metadata, Module,
};
pub use source::{ContentSource, OrderBy, SourceConfig, SourceError};

// Asset path rewriting
pub use assets::LocalAssetRewriter;

// Typed access to source items
pub use typed::{TypedContent, TypedContentError, SOURCE_ITEM_KEY};
