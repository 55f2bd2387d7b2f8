//! Local Asset Rewriter Integration Tests
//!
//! Placeholder resolution against document asset metadata.

use papermill::pipeline::MockDocumentFactory;
use papermill::{
    Asset, DefaultDocumentFactory, Document, DocumentFactory, LocalAssetRewriter, MetaValue,
    Metadata, Module,
};

fn doc(content: &str, assets: Vec<Asset>) -> Document {
    let mut metadata = Metadata::new();
    metadata.push("title", MetaValue::Str("Post".into()));
    if !assets.is_empty() {
        metadata.push("teaser_image", MetaValue::Assets(assets));
    }
    DefaultDocumentFactory.new_document(content.to_string(), metadata)
}

fn photo() -> Asset {
    Asset {
        name: "photo.jpg".into(),
        url: "https://cdn.example.com/x/photo.jpg".into(),
    }
}

#[tokio::test]
async fn test_placeholder_resolves_to_folder_path() {
    let rewriter = LocalAssetRewriter::new("assets");
    let input = doc("<img src=\"!!local-assets/photo.jpg\">", vec![photo()]);

    let output = rewriter
        .execute(&[input], &DefaultDocumentFactory)
        .await
        .unwrap();

    assert_eq!(output[0].content, "<img src=\"/assets/photo.jpg\">");
}

#[tokio::test]
async fn test_file_name_is_derived_from_asset_url() {
    // The placeholder uses the asset's managed name; the resolved path uses
    // the file name the CDN actually serves.
    let rewriter = LocalAssetRewriter::new("assets");
    let asset = Asset {
        name: "coffee.jpg".into(),
        url: "https://cdn.example.com/p/coffee-beverages-explained-1080px.jpg?w=720".into(),
    };
    let input = doc("see !!local-assets/coffee.jpg here", vec![asset]);

    let output = rewriter
        .execute(&[input], &DefaultDocumentFactory)
        .await
        .unwrap();

    assert_eq!(
        output[0].content,
        "see /assets/coffee-beverages-explained-1080px.jpg here"
    );
}

#[tokio::test]
async fn test_document_without_assets_passes_through() {
    let rewriter = LocalAssetRewriter::new("assets");
    let input = doc("untouched !!local-assets/photo.jpg", vec![]);

    let output = rewriter
        .execute(&[input.clone()], &DefaultDocumentFactory)
        .await
        .unwrap();

    assert_eq!(output, vec![input]);
}

#[tokio::test]
async fn test_rewrite_is_idempotent() {
    let rewriter = LocalAssetRewriter::new("assets");
    let input = doc("<img src=\"!!local-assets/photo.jpg\">", vec![photo()]);

    let once = rewriter
        .execute(&[input], &DefaultDocumentFactory)
        .await
        .unwrap();
    let twice = rewriter
        .execute(&once, &DefaultDocumentFactory)
        .await
        .unwrap();

    assert_eq!(once, twice);
}

#[tokio::test]
async fn test_all_assets_are_resolved() {
    let rewriter = LocalAssetRewriter::new("img");
    let assets = vec![
        photo(),
        Asset {
            name: "diagram.png".into(),
            url: "https://cdn.example.com/x/diagram.png".into(),
        },
    ];
    let input = doc(
        "!!local-assets/photo.jpg and !!local-assets/diagram.png",
        assets,
    );

    let output = rewriter
        .execute(&[input], &DefaultDocumentFactory)
        .await
        .unwrap();

    assert_eq!(output[0].content, "/img/photo.jpg and /img/diagram.png");
}

#[tokio::test]
async fn test_empty_folder_path_maps_to_site_root() {
    let rewriter = LocalAssetRewriter::new("");
    let input = doc("!!local-assets/photo.jpg", vec![photo()]);

    let output = rewriter
        .execute(&[input], &DefaultDocumentFactory)
        .await
        .unwrap();

    assert_eq!(output[0].content, "/photo.jpg");
}

#[tokio::test]
async fn test_only_asset_documents_are_rematerialized() {
    let mut factory = MockDocumentFactory::new();
    factory
        .expect_with_content()
        .times(1)
        .returning(|original: &Document, content| Document {
            content,
            metadata: original.metadata.clone(),
        });

    let rewriter = LocalAssetRewriter::new("assets");
    // One document with assets but no placeholder, one without assets: only
    // the first goes through the factory.
    let inputs = vec![doc("no placeholder", vec![photo()]), doc("plain", vec![])];

    let output = rewriter.execute(&inputs, &factory).await.unwrap();
    assert_eq!(output.len(), 2);
    assert_eq!(output[0].content, "no placeholder");
    assert_eq!(output[1].content, "plain");
}
