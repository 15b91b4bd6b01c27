// Media Harvester Library - Public API

// Re-export error types
pub mod error;
pub use error::{HarvestError, Result};

// Module declarations
pub mod commands;
pub mod core;
pub mod platform;
pub mod ui;

// Re-export commonly used types
pub use crate::core::settings::Settings;

/// Initialize logging.
///
/// Defaults to `warn` so the interactive menu stays readable; `--verbose`
/// raises it to `debug`. `RUST_LOG` still overrides both.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
