//! Typed access to the content item a document was sourced from.

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::delivery::models::{ContentItem, ModelError};
use crate::pipeline::{Document, MetaValue};

/// Metadata key under which the content source stores the full source item.
pub const SOURCE_ITEM_KEY: &str = "SOURCE_ITEM";

/// Errors raised by typed document access.
#[derive(Debug, Error)]
pub enum TypedContentError {
    #[error("Document does not carry a source content item")]
    NotSourced,

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Typed views over documents produced by a content source.
pub trait TypedContent {
    /// Borrow the source content item stored in the document's metadata
    fn as_item(&self) -> Result<&ContentItem, TypedContentError>;

    /// Materialize the source item into a caller-defined model
    fn to_model<T: DeserializeOwned>(&self) -> Result<T, TypedContentError>;
}

impl TypedContent for Document {
    fn as_item(&self) -> Result<&ContentItem, TypedContentError> {
        self.metadata
            .get(SOURCE_ITEM_KEY)
            .and_then(MetaValue::as_item)
            .ok_or(TypedContentError::NotSourced)
    }

    fn to_model<T: DeserializeOwned>(&self) -> Result<T, TypedContentError> {
        Ok(self.as_item()?.to_model()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{DefaultDocumentFactory, DocumentFactory, Metadata};

    #[test]
    fn test_document_without_source_item() {
        let doc = DefaultDocumentFactory.new_document("content".into(), Metadata::new());
        let err = doc.as_item().unwrap_err();
        assert!(matches!(err, TypedContentError::NotSourced));
    }

    #[test]
    fn test_as_item_returns_stored_item() {
        let item: ContentItem = serde_json::from_value(serde_json::json!({
            "system": { "id": "1", "name": "Post", "codename": "post", "type": "article" },
            "elements": {}
        }))
        .unwrap();

        let mut metadata = Metadata::new();
        metadata.push(SOURCE_ITEM_KEY, MetaValue::Item(Box::new(item)));
        let doc = DefaultDocumentFactory.new_document(String::new(), metadata);

        assert_eq!(doc.as_item().unwrap().system.codename, "post");
    }
}
