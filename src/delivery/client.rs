//! HTTP client for the delivery API.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use super::models::ItemsResponse;
use super::query::QueryParameter;
use super::{DeliveryClient, DeliveryError};

const PRODUCTION_BASE_URL: &str = "https://deliver.kontent.ai";
const PREVIEW_BASE_URL: &str = "https://preview-deliver.kontent.ai";

/// Connection settings for a delivery project.
///
/// At most one of the two API keys may be set. A preview key switches the
/// client to the preview host and returns unpublished content; a production
/// key enables secure access on the production host; with neither, the
/// client reads published content anonymously. Blank keys count as unset.
#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryConfig {
    pub project_id: Uuid,

    #[serde(default)]
    pub preview_api_key: Option<String>,

    #[serde(default)]
    pub production_api_key: Option<String>,

    /// Override the API host, mainly for tests and self-hosted proxies
    #[serde(default)]
    pub base_url: Option<String>,
}

impl DeliveryConfig {
    /// Settings for anonymous access to published content
    pub fn new(project_id: Uuid) -> Self {
        Self {
            project_id,
            preview_api_key: None,
            production_api_key: None,
            base_url: None,
        }
    }

    fn credentials(&self) -> Result<Credentials, DeliveryError> {
        let preview = normalize_key(self.preview_api_key.as_deref());
        let production = normalize_key(self.production_api_key.as_deref());
        match (preview, production) {
            (Some(_), Some(_)) => Err(DeliveryError::Config(
                "preview_api_key and production_api_key are mutually exclusive".to_string(),
            )),
            (Some(key), None) => Ok(Credentials::Preview(key)),
            (None, Some(key)) => Ok(Credentials::Production(key)),
            (None, None) => Ok(Credentials::Public),
        }
    }
}

fn normalize_key(key: Option<&str>) -> Option<String> {
    match key {
        Some(k) if !k.trim().is_empty() => Some(k.trim().to_string()),
        _ => None,
    }
}

#[derive(Debug, Clone)]
enum Credentials {
    Public,
    Production(String),
    Preview(String),
}

impl Credentials {
    fn api_key(&self) -> Option<&str> {
        match self {
            Credentials::Public => None,
            Credentials::Production(key) | Credentials::Preview(key) => Some(key),
        }
    }

    fn default_base_url(&self) -> &'static str {
        match self {
            Credentials::Preview(_) => PREVIEW_BASE_URL,
            _ => PRODUCTION_BASE_URL,
        }
    }
}

/// Delivery API client over HTTP.
///
/// Construction validates the configuration and resolves the endpoint, so a
/// misconfigured project fails at setup time rather than on the first fetch.
#[derive(Debug)]
pub struct HttpDeliveryClient {
    client: reqwest::Client,
    base_url: String,
    project_id: Uuid,
    credentials: Credentials,
}

impl HttpDeliveryClient {
    pub fn new(config: DeliveryConfig) -> Result<Self, DeliveryError> {
        let credentials = config.credentials()?;
        let base_url = config
            .base_url
            .as_deref()
            .unwrap_or_else(|| credentials.default_base_url())
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            project_id: config.project_id,
            credentials,
        })
    }

    fn items_url(&self) -> String {
        format!("{}/{}/items", self.base_url, self.project_id)
    }
}

#[async_trait]
impl DeliveryClient for HttpDeliveryClient {
    async fn items(&self, query: &[QueryParameter]) -> Result<ItemsResponse, DeliveryError> {
        let pairs: Vec<(&str, String)> = query.iter().map(QueryParameter::as_pair).collect();
        let mut request = self.client.get(self.items_url()).query(&pairs);
        if let Some(key) = self.credentials.api_key() {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let items: ItemsResponse = serde_json::from_str(&body)?;
        debug!(
            count = items.items.len(),
            linked = items.modular_content.len(),
            "Fetched content items"
        );
        Ok(items)
    }
}
