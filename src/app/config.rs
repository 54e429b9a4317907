//! Application configuration
//!
//! Settings come from built-in defaults, then an optional TOML file, then
//! command-line flags, each layer overriding the previous one.

use crate::driver::DEFAULT_PACING;
use crate::persist::DEFAULT_OUTPUT_PATH;
use crate::resolver::DEFAULT_GATEWAY_TEMPLATE;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration structure
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Verbosity level for logging
    pub verbose: u8,
    /// Gateway URL template, `{cid}` is replaced by the identifier
    pub gateway: String,
    /// Dataset file to read; the embedded dataset when unset
    pub input: Option<PathBuf>,
    /// Where the updated dataset is written
    pub output: PathBuf,
    /// Delay after each record
    pub pacing: Duration,
}

/// On-disk configuration, every field optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub gateway: Option<String>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    #[serde(default, with = "humantime_serde")]
    pub pacing: Option<Duration>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn parse(content: &str) -> crate::error::Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

impl AppConfig {
    /// Create a configuration with default settings
    pub fn new(verbose: u8) -> Self {
        Self {
            verbose,
            ..Self::default()
        }
    }

    /// Apply values present in a config file
    pub fn merge_file(mut self, file: FileConfig) -> Self {
        if let Some(gateway) = file.gateway {
            self.gateway = gateway;
        }
        if let Some(input) = file.input {
            self.input = Some(input);
        }
        if let Some(output) = file.output {
            self.output = output;
        }
        if let Some(pacing) = file.pacing {
            self.pacing = pacing;
        }
        self
    }

    pub fn with_gateway(mut self, gateway: impl Into<String>) -> Self {
        self.gateway = gateway.into();
        self
    }

    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Get the log level string based on verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            2 => "trace",
            _ => "trace,hyper=debug,reqwest=debug",
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            verbose: 0,
            gateway: DEFAULT_GATEWAY_TEMPLATE.to_string(),
            input: None,
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            pacing: DEFAULT_PACING,
        }
    }
}
