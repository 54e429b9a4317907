//! HTTP gateway resolver

use super::{MetadataResolver, ResolvedMetadata};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{info, warn};

/// Public gateway used when nothing else is configured
pub const DEFAULT_GATEWAY_TEMPLATE: &str = "https://ipfs.io/ipfs/{cid}";

/// Replaced by the identifier when building a request URL
pub const CID_PLACEHOLDER: &str = "{cid}";

#[derive(Debug, thiserror::Error)]
enum FetchError {
    #[error("HTTP status {0}")]
    Status(StatusCode),
    #[error("{0}")]
    Request(#[from] reqwest::Error),
}

/// Resolves metadata by issuing one GET per identifier against a gateway.
///
/// No timeout and no retry: a failed lookup is simply reported as `None`.
pub struct GatewayResolver {
    client: Client,
    template: String,
}

impl GatewayResolver {
    /// Create a resolver for a URL template such as `https://ipfs.io/ipfs/{cid}`
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        url::Url::parse(&expand_template(&template, "probe"))?;

        let client = Client::builder()
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, template })
    }

    /// Request URL for `identifier`, substituted verbatim
    pub fn url_for(&self, identifier: &str) -> String {
        expand_template(&self.template, identifier)
    }

    async fn fetch(&self, identifier: &str) -> std::result::Result<ResolvedMetadata, FetchError> {
        let url = self.url_for(identifier);
        info!("Fetching metadata from {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        Ok(response.json::<ResolvedMetadata>().await?)
    }
}

#[async_trait]
impl MetadataResolver for GatewayResolver {
    async fn resolve(&self, identifier: &str) -> Option<ResolvedMetadata> {
        match self.fetch(identifier).await {
            Ok(metadata) => Some(metadata),
            Err(FetchError::Status(status)) => {
                let reason = status.canonical_reason().unwrap_or("Unknown status");
                warn!(%status, "Failed to fetch metadata for {}", identifier);
                eprintln!("Failed to fetch metadata for {identifier}: {reason}");
                None
            }
            Err(e) => {
                warn!(error = %e, "Error fetching metadata for {}", identifier);
                eprintln!("Error fetching metadata for {identifier}: {e}");
                None
            }
        }
    }
}

fn expand_template(template: &str, identifier: &str) -> String {
    if template.contains(CID_PLACEHOLDER) {
        template.replace(CID_PLACEHOLDER, identifier)
    } else {
        format!("{template}{identifier}")
    }
}
