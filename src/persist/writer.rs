use super::template::{DATASET_MODULE_TEMPLATE, MODULE_TEMPLATE_NAME};
use crate::dataset::{NftData, COLLECTION_NAME};
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};
use tracing::{debug, error};

/// Where the updated dataset goes when no path is configured
pub const DEFAULT_OUTPUT_PATH: &str = "nftDatas-updated.ts";

/// Shape of the written file, chosen from the output path's extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Dataset module with interface declarations and an exported array
    Module,
    /// Bare JSON array of records
    Json,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => OutputFormat::Json,
            _ => OutputFormat::Module,
        }
    }
}

/// Writes the transformed records to a single file, replacing it entirely
pub struct PersistenceWriter {
    path: PathBuf,
    format: OutputFormat,
    template_engine: Tera,
}

impl PersistenceWriter {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let format = OutputFormat::from_path(&path);

        let mut template_engine = Tera::default();
        template_engine.add_raw_template(MODULE_TEMPLATE_NAME, DATASET_MODULE_TEMPLATE)?;

        Ok(Self {
            path,
            format,
            template_engine,
        })
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Render the file contents without touching disk
    pub fn render(&self, records: &[NftData]) -> Result<String> {
        let records_json = serde_json::to_string_pretty(records)?;

        match self.format {
            OutputFormat::Json => Ok(format!("{records_json}\n")),
            OutputFormat::Module => {
                let mut context = Context::new();
                context.insert("collection", COLLECTION_NAME);
                context.insert("records_json", &records_json);
                Ok(self.template_engine.render(MODULE_TEMPLATE_NAME, &context)?)
            }
        }
    }

    /// Write `records` to the output path.
    ///
    /// Failures are logged here and handed back to the caller; nothing is
    /// retried or rolled back.
    pub fn save(&self, records: &[NftData]) -> Result<()> {
        match self.write(records) {
            Ok(()) => {
                println!("✓ Updated data saved to {}", self.path.display());
                Ok(())
            }
            Err(e) => {
                error!("Failed to save {}: {}", self.path.display(), e);
                eprintln!("Error saving updated data: {e}");
                Err(e)
            }
        }
    }

    fn write(&self, records: &[NftData]) -> Result<()> {
        let content = self.render(records)?;

        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| {
                Error::Persist(format!("{} is not a file path", self.path.display()))
            })?
            .to_string_lossy();
        let temp_file = self.path.with_file_name(format!("{file_name}.tmp"));

        debug!(
            "Writing {} records to {} via {}",
            records.len(),
            self.path.display(),
            temp_file.display()
        );

        fs::write(&temp_file, content)?;
        if let Err(e) = fs::rename(&temp_file, &self.path) {
            let _ = fs::remove_file(&temp_file);
            return Err(e.into());
        }

        Ok(())
    }
}
