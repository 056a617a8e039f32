//! CLI command implementations

pub mod build;
pub mod clean;
pub mod init;
pub mod sync;

use capdroid_cli::output::Status;
use capdroid_core::config::{BuildConfig, ConfigSource, CONFIG_FILE};
use std::path::Path;

/// Load the build config from the invocation root, reporting its provenance.
pub(crate) fn load_config() -> BuildConfig {
    let loaded = BuildConfig::load(Path::new(CONFIG_FILE));
    match &loaded.source {
        ConfigSource::File(path) => {
            Status::info(&format!("Using config: {}", path.display()));
        }
        ConfigSource::Created(path) => {
            Status::warning(&format!(
                "Created default config: {} (edit it and rerun)",
                path.display()
            ));
        }
        ConfigSource::Fallback(reason) => {
            Status::warning(&format!("Using built-in defaults: {reason}"));
        }
    }
    loaded.config
}
