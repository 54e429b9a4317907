//! Read-only record store
//!
//! Records come either from the dataset compiled into the binary or from a
//! file on disk. Two file shapes are accepted:
//! - a plain JSON array of records (`.json`)
//! - a dataset module as written by [`crate::persist`], where the records
//!   follow `export const nftDatas: NftData[] =`

pub mod types;

pub use types::{NftAttribute, NftData};

use crate::error::{Error, Result};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the exported collection in a dataset module.
pub const COLLECTION_NAME: &str = "nftDatas";

const EMBEDDED_DATASET: &str = include_str!("../../data/nft_datas.json");

/// Where a [`Dataset`] was loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Embedded,
    File(PathBuf),
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::Embedded => write!(f, "embedded dataset"),
            DatasetSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Ordered, immutable collection of input records
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<NftData>,
    source: DatasetSource,
}

impl Dataset {
    /// The dataset shipped with the binary
    pub fn embedded() -> Result<Self> {
        let records = serde_json::from_str(EMBEDDED_DATASET)
            .map_err(|e| Error::Dataset(format!("Embedded dataset is malformed: {e}")))?;
        Ok(Self {
            records,
            source: DatasetSource::Embedded,
        })
    }

    /// Load records from a `.json` array or a dataset module file
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading dataset from {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Dataset(format!("Failed to read {}: {e}", path.display()))
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let records = if is_json {
            serde_json::from_str(&content)?
        } else {
            parse_module(&content)?
        };

        Ok(Self {
            records,
            source: DatasetSource::File(path.to_path_buf()),
        })
    }

    pub fn records(&self) -> &[NftData] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn source(&self) -> &DatasetSource {
        &self.source
    }
}

/// Extract the record array from a dataset module.
///
/// The array literal after the collection's `=` must be valid JSON, which is
/// what the writer emits. Anything after the literal (the closing `;`) is
/// ignored. Longer names sharing the prefix, such as `nftDatasBackup`, are
/// skipped.
pub fn parse_module(content: &str) -> Result<Vec<NftData>> {
    let declaration = format!("export const {COLLECTION_NAME}");
    let mut search_from = 0;
    let after_decl = loop {
        let found = content[search_from..].find(&declaration).ok_or_else(|| {
            Error::Dataset(format!("No `{declaration}` declaration found"))
        })?;
        let end = search_from + found + declaration.len();
        let rest = &content[end..];
        match rest.chars().next() {
            Some(c) if is_identifier_char(c) => search_from = end,
            _ => break rest,
        }
    };

    let eq = after_decl.find('=').ok_or_else(|| {
        Error::Dataset(format!("`{COLLECTION_NAME}` declaration has no initializer"))
    })?;
    let literal = &after_decl[eq + 1..];

    let mut stream = serde_json::Deserializer::from_str(literal).into_iter::<Vec<NftData>>();
    match stream.next() {
        Some(records) => Ok(records?),
        None => Err(Error::Dataset(format!(
            "`{COLLECTION_NAME}` initializer is empty"
        ))),
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
