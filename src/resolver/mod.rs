//! Metadata resolution through an IPFS gateway
//!
//! Resolution is fallible by nature: gateways time out, CIDs go unpinned and
//! metadata documents are sometimes malformed. The resolver reports all of
//! that as `None` so the driver can keep the original record and move on.

pub mod gateway;
pub mod mock;

pub use gateway::{GatewayResolver, CID_PLACEHOLDER, DEFAULT_GATEWAY_TEMPLATE};
pub use mock::MockMetadataResolver;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The part of an NFT metadata document this tool cares about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMetadata {
    #[serde(default)]
    pub name: String,
    pub image: String,
}

impl ResolvedMetadata {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
        }
    }
}

/// Looks up the metadata document addressed by a content identifier
#[async_trait]
pub trait MetadataResolver: Send + Sync {
    /// Fetch and parse the metadata for `identifier`.
    ///
    /// Returns `None` on any failure; implementations log the reason
    /// themselves.
    async fn resolve(&self, identifier: &str) -> Option<ResolvedMetadata>;
}
