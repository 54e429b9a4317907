//! One complete enrichment run
//!
//! Loads the dataset, transforms it, saves the result and prints the
//! operator summary. A failed save is reported but does not fail the run.

use crate::app::AppConfig;
use crate::dataset::{Dataset, NftData};
use crate::driver::{RunReport, TransformDriver};
use crate::persist::PersistenceWriter;
use crate::resolver::{GatewayResolver, MetadataResolver};
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::info;

/// Number of before/after pairs shown after a run
const EXAMPLE_COUNT: usize = 3;

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub original: Vec<NftData>,
    pub updated: Vec<NftData>,
    pub report: RunReport,
    pub saved: bool,
}

pub struct Runner {
    config: AppConfig,
    resolver: Arc<dyn MetadataResolver>,
}

impl Runner {
    pub fn new(config: AppConfig, resolver: Arc<dyn MetadataResolver>) -> Self {
        Self { config, resolver }
    }

    /// Runner backed by the configured HTTP gateway
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let resolver = GatewayResolver::new(config.gateway.clone())
            .with_context(|| format!("Invalid gateway template {:?}", config.gateway))?;
        Ok(Self::new(config, Arc::new(resolver)))
    }

    /// Load, transform and save. The start banner is printed by the caller
    /// (see [`print_banner`]) so it precedes resolver construction as well.
    pub async fn run(&self) -> Result<RunSummary> {
        let dataset = self.load_dataset()?;
        info!(
            records = dataset.len(),
            source = %dataset.source(),
            "Loaded dataset"
        );

        let writer = PersistenceWriter::new(&self.config.output)?;
        let driver = TransformDriver::new(Arc::clone(&self.resolver)).with_pacing(self.config.pacing);

        let output = driver.run_with_report(dataset.records()).await;

        println!("\n=== Update Summary ===");
        println!("Total NFTs processed: {}", output.records.len());
        println!(
            "Updated: {}, kept original: {}",
            output.report.updated(),
            output.report.kept()
        );

        let saved = writer.save(&output.records).is_ok();

        println!("\n=== First {EXAMPLE_COUNT} Examples ===");
        print!("{}", format_examples(dataset.records(), &output.records));

        println!("Process completed successfully!");

        Ok(RunSummary {
            original: dataset.records().to_vec(),
            updated: output.records,
            report: output.report,
            saved,
        })
    }

    fn load_dataset(&self) -> Result<Dataset> {
        match &self.config.input {
            Some(path) => Dataset::load(path)
                .with_context(|| format!("Failed to load dataset from {}", path.display())),
            None => Ok(Dataset::embedded()?),
        }
    }
}

/// First line of every run
pub fn print_banner() {
    println!("Starting NFT imageId update process...");
}

/// Before/after blocks for the first few records
pub fn format_examples(original: &[NftData], updated: &[NftData]) -> String {
    let mut out = String::new();
    for (before, after) in original.iter().zip(updated).take(EXAMPLE_COUNT) {
        let _ = writeln!(out, "NFT {}:", after.id);
        let _ = writeln!(out, "  Original: {}", before.image_id);
        let _ = writeln!(out, "  Updated:  {}", after.image_id);
        let _ = writeln!(out);
    }
    out
}
