//! Persistence of the transformed dataset

pub mod template;
pub mod writer;

pub use writer::{OutputFormat, PersistenceWriter, DEFAULT_OUTPUT_PATH};
