//! Core utilities for the capdroid packaging tool
//!
//! This crate provides the platform-agnostic building blocks used across
//! the packaging pipeline:
//!
//! - **Error handling**: structured errors with codes, context, and recovery suggestions
//! - **Process execution**: captured and streamed invocation of external tools
//! - **Configuration**: `args.yaml` loading that always yields a usable config
//! - **Text patching**: ordered regex rewrites of generated project files
//! - **Color handling**: hex color normalization for web-derived theming
//! - **Asset manifests**: name+size fingerprints for on-device cache busting
//! - **Health checks**: packaging toolchain verification
//!
//! # Example
//!
//! ```rust,no_run
//! use capdroid_core::config::BuildConfig;
//! use capdroid_core::health::HealthChecker;
//! use std::path::Path;
//!
//! // Check the packaging toolchain
//! let report = HealthChecker::new().with_packaging_checks().run();
//! if !report.is_healthy() {
//!     eprintln!("Environment issues detected!");
//! }
//!
//! // Load the build configuration (never fails)
//! let loaded = BuildConfig::load(Path::new("args.yaml"));
//! println!("packaging {}", loaded.config.name);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod asset_manifest;
pub mod color;
pub mod config;
pub mod error;
pub mod health;
pub mod patch;
pub mod process;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::asset_manifest::{AssetEntry, AssetManifest};
    pub use crate::config::{BuildConfig, ConfigSource, LoadedConfig};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::health::{HealthChecker, HealthReport, HealthStatus};
    pub use crate::patch::PatchRule;
    pub use crate::process::CommandResult;
}
