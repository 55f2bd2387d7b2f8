//! Rewrites local asset placeholders in document content to site paths.
//!
//! Content editors reference downloaded assets with a `!!local-assets/<name>`
//! placeholder. This module resolves each placeholder against the document's
//! asset metadata and replaces it with `/<folder>/<file>`, where the file
//! name is derived from the asset's CDN URL.

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use crate::pipeline::{Document, DocumentFactory, Module};

/// Placeholder prefix editors use to reference a local asset by name.
pub const LOCAL_ASSET_PREFIX: &str = "!!local-assets/";

/// File name of an asset, derived from the final segment of its URL with
/// any query or fragment stripped.
pub fn asset_file_name(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').next().unwrap_or(path)
}

/// Pipeline module that rewrites local asset placeholders.
///
/// Documents without asset metadata pass through unchanged. Documents with
/// asset metadata are re-materialized through the factory even when no
/// placeholder matched, so the host sees a consistent document lineage.
pub struct LocalAssetRewriter {
    folder_path: String,
}

impl LocalAssetRewriter {
    /// Rewrite placeholders to paths under `/<folder_path>/`. An empty
    /// folder path maps assets to the site root.
    pub fn new(folder_path: impl Into<String>) -> Self {
        let trimmed = folder_path.into().trim_matches('/').to_string();
        let folder_path = if trimmed.is_empty() {
            String::new()
        } else {
            format!("{trimmed}/")
        };
        Self { folder_path }
    }

    fn rewrite(&self, doc: &Document) -> Option<String> {
        let mut asset_lists = doc.metadata.asset_lists().peekable();
        asset_lists.peek()?;

        let mut content = doc.content.clone();
        for assets in asset_lists {
            for asset in assets {
                let placeholder = format!("{LOCAL_ASSET_PREFIX}{}", asset.name);
                let resolved = format!("/{}{}", self.folder_path, asset_file_name(&asset.url));
                content = content.replace(&placeholder, &resolved);
            }
        }
        Some(content)
    }
}

#[async_trait]
impl Module for LocalAssetRewriter {
    fn name(&self) -> &str {
        "local_asset_rewriter"
    }

    async fn execute(
        &self,
        inputs: &[Document],
        factory: &dyn DocumentFactory,
    ) -> Result<Vec<Document>> {
        let mut output = Vec::with_capacity(inputs.len());
        let mut rewritten = 0usize;
        for doc in inputs {
            match self.rewrite(doc) {
                Some(content) => {
                    rewritten += 1;
                    output.push(factory.with_content(doc, content));
                }
                None => output.push(doc.clone()),
            }
        }
        debug!(rewritten, total = inputs.len(), "Rewrote local asset paths");
        Ok(output)
    }
}
