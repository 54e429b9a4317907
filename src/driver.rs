//! Sequential transform over the record store
//!
//! One record is fully resolved before the next begins, and every record
//! produces exactly one output record at the same position. A lookup that
//! fails, or that panics, leaves that record untouched.

use crate::dataset::NftData;
use crate::extract::extract_bare_identifier;
use crate::resolver::{MetadataResolver, ResolvedMetadata};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error};

/// Pause between records so the gateway is not hammered
pub const DEFAULT_PACING: Duration = Duration::from_millis(100);

/// What happened to a single record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Updated {
        id: i64,
        previous: String,
        current: String,
    },
    Kept {
        id: i64,
    },
}

/// Per-record outcomes of one pass, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub outcomes: Vec<RecordOutcome>,
}

impl RunReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn updated(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RecordOutcome::Updated { .. }))
            .count()
    }

    pub fn kept(&self) -> usize {
        self.total() - self.updated()
    }
}

/// Output of [`TransformDriver::run_with_report`]
#[derive(Debug, Clone)]
pub struct TransformOutput {
    pub records: Vec<NftData>,
    pub report: RunReport,
}

/// Walks records in order, resolving each one's metadata
pub struct TransformDriver {
    resolver: Arc<dyn MetadataResolver>,
    pacing: Duration,
}

impl TransformDriver {
    pub fn new(resolver: Arc<dyn MetadataResolver>) -> Self {
        Self {
            resolver,
            pacing: DEFAULT_PACING,
        }
    }

    /// Set the delay applied after each record
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn pacing(&self) -> Duration {
        self.pacing
    }

    /// Transform `records`, returning a new sequence of the same length and order
    pub async fn run(&self, records: &[NftData]) -> Vec<NftData> {
        self.run_with_report(records).await.records
    }

    pub async fn run_with_report(&self, records: &[NftData]) -> TransformOutput {
        let total = records.len();
        let mut output = Vec::with_capacity(total);
        let mut report = RunReport::default();

        println!("Starting to update {total} NFT image IDs...");

        for (index, record) in records.iter().enumerate() {
            println!("Processing NFT {} ({}/{})...", record.id, index + 1, total);

            let (next, outcome) = match self.resolve_record(record).await {
                Some(metadata) => {
                    let bare = extract_bare_identifier(&metadata.image);
                    println!("✓ Updated NFT {}: {} → {}", record.id, record.image_id, bare);
                    (
                        record.with_image_id(bare),
                        RecordOutcome::Updated {
                            id: record.id,
                            previous: record.image_id.clone(),
                            current: bare.to_string(),
                        },
                    )
                }
                None => {
                    println!(
                        "✗ Failed to update NFT {}, keeping original imageId",
                        record.id
                    );
                    (record.clone(), RecordOutcome::Kept { id: record.id })
                }
            };

            output.push(next);
            report.outcomes.push(outcome);

            // Applied after the last record too.
            if !self.pacing.is_zero() {
                sleep(self.pacing).await;
            }
        }

        debug!(
            total = report.total(),
            updated = report.updated(),
            kept = report.kept(),
            "Transform pass finished"
        );

        TransformOutput {
            records: output,
            report,
        }
    }

    /// Resolve one record's metadata, treating an empty `image` or a panic
    /// inside the resolver as a failed lookup
    async fn resolve_record(&self, record: &NftData) -> Option<ResolvedMetadata> {
        let lookup = AssertUnwindSafe(self.resolver.resolve(&record.image_id)).catch_unwind();

        match lookup.await {
            Ok(metadata) => metadata.filter(|m| !m.image.is_empty()),
            Err(panic) => {
                let reason = panic_message(panic.as_ref());
                error!(id = record.id, "Resolver panicked: {}", reason);
                eprintln!("Error processing NFT {}: {reason}", record.id);
                None
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
