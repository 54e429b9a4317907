//! Scripted resolver for tests

use super::{MetadataResolver, ResolvedMetadata};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Resolver that answers from a fixed table and records every lookup.
///
/// Identifiers without an entry resolve to the fallback (`None` unless set
/// with [`MockMetadataResolver::with_fallback`]).
#[derive(Default)]
pub struct MockMetadataResolver {
    responses: HashMap<String, Option<ResolvedMetadata>>,
    fallback: Option<ResolvedMetadata>,
    panic_on: Vec<String>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockMetadataResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `identifier` to the given metadata
    pub fn with_response(mut self, identifier: &str, metadata: ResolvedMetadata) -> Self {
        self.responses.insert(identifier.to_string(), Some(metadata));
        self
    }

    /// Make `identifier` fail to resolve
    pub fn with_failure(mut self, identifier: &str) -> Self {
        self.responses.insert(identifier.to_string(), None);
        self
    }

    /// Answer for identifiers without an explicit entry
    pub fn with_fallback(mut self, metadata: ResolvedMetadata) -> Self {
        self.fallback = Some(metadata);
        self
    }

    /// Panic when asked for `identifier`
    pub fn panicking_on(mut self, identifier: &str) -> Self {
        self.panic_on.push(identifier.to_string());
        self
    }

    /// Identifiers looked up so far, in call order
    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl MetadataResolver for MockMetadataResolver {
    async fn resolve(&self, identifier: &str) -> Option<ResolvedMetadata> {
        self.calls.lock().await.push(identifier.to_string());

        if self.panic_on.iter().any(|id| id == identifier) {
            panic!("mock resolver asked to fail hard for {identifier}");
        }

        match self.responses.get(identifier) {
            Some(response) => response.clone(),
            None => self.fallback.clone(),
        }
    }
}
