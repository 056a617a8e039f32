//! Terminal output helpers for the capdroid CLI
//!
//! Thin layer over `owo-colors` giving every lifecycle command the same
//! severity-tagged status lines and human-readable size/duration
//! formatting.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod output;

pub use output::Status;
