//! # cid-enrich
//!
//! A one-shot batch tool that walks a dataset of NFT records, resolves each
//! record's metadata CID through an IPFS gateway, and writes a copy of the
//! dataset where `imageId` points at the image CID instead of the metadata.
//!
//! ## Usage
//!
//! ```bash
//! cid-enrich [--input nftDatas.json] [--output nftDatas-updated.ts] [--gateway URL] [--delay-ms 100]
//! ```
//!
//! ## Modules
//!
//! - `app` - Configuration, logging and fatal error handling for the binary
//! - `dataset` - Record types and the read-only record store
//! - `resolver` - Gateway metadata lookup behind a mockable trait
//! - `extract` - `ipfs://` prefix stripping
//! - `driver` - Sequential, paced transform over the record store
//! - `persist` - Writes the transformed dataset as a loadable module
//! - `runner` - One complete run with operator-facing progress output
pub mod app;
pub mod dataset;
pub mod driver;
pub mod error;
pub mod extract;
pub mod persist;
pub mod resolver;
pub mod runner;

pub use error::{Error, Result};
