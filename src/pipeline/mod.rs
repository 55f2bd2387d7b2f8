//! Pipeline seam: the module trait and document factory.
//!
//! A static-site pipeline runs an ordered list of modules; each module maps
//! a batch of input documents to a batch of output documents. Modules never
//! construct documents directly, they go through the [`DocumentFactory`]
//! provided by the host so the host controls document materialization.

pub mod document;

use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

// Re-export commonly used types
pub use document::{Asset, Document, MetaValue, Metadata};

/// A pipeline module.
///
/// Implementations must be stateless with respect to a single execution:
/// `execute` may run against any batch of inputs and must not retain them.
#[async_trait]
pub trait Module: Send + Sync {
    /// Stable name of the module, used in logs
    fn name(&self) -> &str;

    /// Map a batch of input documents to output documents.
    ///
    /// Modules that source content from elsewhere ignore `inputs`; transform
    /// modules derive their outputs from them via `factory`.
    async fn execute(
        &self,
        inputs: &[Document],
        factory: &dyn DocumentFactory,
    ) -> Result<Vec<Document>>;
}

/// Creates and derives pipeline documents on behalf of modules.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait DocumentFactory: Send + Sync {
    /// Materialize a new document from content and metadata
    fn new_document(&self, content: String, metadata: Metadata) -> Document;

    /// Derive a document from an existing one, replacing its content and
    /// keeping its metadata
    fn with_content(&self, original: &Document, content: String) -> Document;
}

/// Factory backing plain in-memory documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDocumentFactory;

impl DocumentFactory for DefaultDocumentFactory {
    fn new_document(&self, content: String, metadata: Metadata) -> Document {
        Document { content, metadata }
    }

    fn with_content(&self, original: &Document, content: String) -> Document {
        Document {
            content,
            metadata: original.metadata.clone(),
        }
    }
}
