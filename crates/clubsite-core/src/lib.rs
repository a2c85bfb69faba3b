//! Core of the club's static site generator: record models, facet
//! derivation, the list filter/sort/window pipeline, fixed-zone date
//! formatting, and embed-URL normalization.
//!
//! Everything here is a pure, synchronous function over small in-memory
//! collections. The content loader and the page templates are external
//! collaborators: they hand in already-validated records and print the
//! strings this crate returns.

pub mod config;
pub mod datetime;
pub mod embed;
pub mod facet;
pub mod period;
pub mod pipeline;
pub mod record;
pub mod render;

use anyhow::anyhow;
use std::io::IsTerminal;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Install the tracing subscriber for the host build process.
pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}
