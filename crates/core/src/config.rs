//! Build configuration (`args.yaml`) loading
//!
//! The loader never fails: a missing file is created from defaults, and an
//! unreadable or malformed file falls back to defaults without touching
//! disk. Callers get the resulting config plus where it came from, so the
//! CLI can tell the user what actually happened.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file, looked up at the invocation root.
pub const CONFIG_FILE: &str = "args.yaml";

/// Build settings for the packaged app
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Display name of the app
    pub name: String,
    /// Reverse-DNS application id
    pub pkg: String,
    /// Version string, with an optional leading `v`
    pub version: String,
    /// Launcher icon path, absolute or relative to the invocation root
    pub icon: String,
    /// Whether pinch zoom is enabled inside the embedded web view
    pub enable_zoom: bool,
    /// Directory the built APK is copied into
    pub out_dir: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            name: "My App".to_string(),
            pkg: "com.example.app".to_string(),
            version: "v1.0".to_string(),
            icon: "./icon.png".to_string(),
            enable_zoom: true,
            out_dir: ".".to_string(),
        }
    }
}

/// Where a loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from an existing file
    File(PathBuf),
    /// File was absent; defaults were written out and returned
    Created(PathBuf),
    /// File was unusable; defaults returned, nothing written
    Fallback(String),
}

/// A configuration together with its provenance
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The effective configuration
    pub config: BuildConfig,
    /// How it was obtained
    pub source: ConfigSource,
}

impl BuildConfig {
    /// Load the configuration from `path`, falling back to defaults.
    ///
    /// Unknown keys are ignored, missing or empty fields keep their
    /// defaults, and scalar values are coerced to strings (so
    /// `version: 1.2` works the same as `version: "1.2"`).
    pub fn load(path: &Path) -> LoadedConfig {
        let defaults = BuildConfig::default();

        if !path.exists() {
            return match save(&defaults, path) {
                Ok(()) => LoadedConfig {
                    config: defaults,
                    source: ConfigSource::Created(path.to_path_buf()),
                },
                Err(e) => LoadedConfig {
                    config: defaults,
                    source: ConfigSource::Fallback(format!("could not write defaults: {e}")),
                },
            };
        }

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                return LoadedConfig {
                    config: defaults,
                    source: ConfigSource::Fallback(format!("could not read {}: {e}", path.display())),
                };
            }
        };

        let value: Value = match serde_yaml::from_str(&text) {
            Ok(value) => value,
            Err(e) => {
                return LoadedConfig {
                    config: defaults,
                    source: ConfigSource::Fallback(format!("invalid YAML: {e}")),
                };
            }
        };

        let Some(map) = value.as_mapping() else {
            return LoadedConfig {
                config: defaults,
                source: ConfigSource::Fallback("top level is not a mapping".to_string()),
            };
        };

        let config = BuildConfig {
            name: string_field(map, "name", &defaults.name),
            pkg: string_field(map, "pkg", &defaults.pkg),
            version: string_field(map, "version", &defaults.version),
            icon: string_field(map, "icon", &defaults.icon),
            enable_zoom: bool_field(map, "enable_zoom", defaults.enable_zoom),
            out_dir: string_field(map, "out_dir", &defaults.out_dir),
        };

        LoadedConfig {
            config,
            source: ConfigSource::File(path.to_path_buf()),
        }
    }

    /// Version string with the leading `v` stripped, as Gradle wants it.
    pub fn version_name(&self) -> &str {
        self.version.trim_start_matches('v')
    }

    /// Last segment of the application id (`com.example.foo` -> `foo`).
    pub fn package_tail(&self) -> &str {
        self.pkg.rsplit('.').next().unwrap_or(&self.pkg)
    }

    /// File name the built APK is copied out under.
    pub fn apk_name(&self) -> String {
        format!("{}-app-debug.apk", self.package_tail())
    }
}

fn save(config: &BuildConfig, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(config)?;
    fs::write(path, yaml)?;
    Ok(())
}

fn string_field(map: &serde_yaml::Mapping, key: &str, default: &str) -> String {
    let value = match map.get(&Value::from(key)) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => return default.to_string(),
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

fn bool_field(map: &serde_yaml::Mapping, key: &str, default: bool) -> bool {
    match map.get(&Value::from(key)) {
        Some(Value::Bool(b)) => *b,
        _ => default,
    }
}
