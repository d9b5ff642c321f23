//! # Utilities
//!
//! This crate includes logging helpers.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Converts a verbosity level, ranging from 0 (none) to 5 (highest), to a
/// level filter. Returns `None` if level is out of range.
pub fn verbosity_to_level(level: u8) -> Option<LevelFilter> {
    match level {
        0 => Some(LevelFilter::OFF),
        1 => Some(LevelFilter::ERROR),
        2 => Some(LevelFilter::WARN),
        3 => Some(LevelFilter::INFO),
        4 => Some(LevelFilter::DEBUG),
        5 => Some(LevelFilter::TRACE),
        _ => None,
    }
}

/// Initializes `tracing` as the logger.
///
/// `RUST_LOG` directives take precedence over `level`.
///
/// # Returns
///
/// Returns `Err` if `tracing` can't be initialized. Multiple subscription error
/// is emmitted and will return `Ok(())`.
pub fn initialize_logger(level: LevelFilter) -> Result<(), tracing_subscriber::util::TryInitError> {
    let layer = fmt::layer().with_test_writer();
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    if let Err(e) = tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()
    {
        // If it failed because of a re-initialization, do not care about
        // the error.
        if e.to_string() != "a global default trace dispatcher has already been set" {
            return Err(e);
        }

        tracing::trace!("Tracing is already initialized, skipping without errors...");
    };

    Ok(())
}
