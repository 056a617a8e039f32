//! Android packaging tools for capdroid
//!
//! This crate provides the Android side of the packaging pipeline:
//! - Capacitor bridge project scaffolding and sync
//! - npm dependency management for the bridge
//! - Gradle build system integration
//! - Web asset staging and audio manifests
//! - Manifest permissions, activity, theme, and icon synchronization

#![warn(missing_docs)]

pub mod activity;
pub mod assets;
pub mod capacitor;
pub mod gradle;
pub mod icons;
pub mod metadata;
pub mod npm;
pub mod permissions;
pub mod project;
pub mod theme;
