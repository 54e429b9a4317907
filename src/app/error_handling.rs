//! Error handling utilities
//!
//! This module provides centralized handling for errors that end the run.

use tracing::error;

/// Report a top-level failure and exit with status 1
///
/// # Verbose Mode Behavior
/// - `verbose = 0`: The error message only
/// - `verbose >= 1`: Includes the full error chain
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    error!("Fatal error: {:#}", error);
    eprintln!("Error in main process: {error}");

    if verbose >= 1 {
        eprintln!("\nError chain:");
        for (i, cause) in error.chain().enumerate() {
            eprintln!("  {}: {}", i, cause);
        }
    }

    std::process::exit(1)
}
