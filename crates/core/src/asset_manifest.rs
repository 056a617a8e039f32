//! Content manifest for bundled web assets
//!
//! The packaged app ships an audio library inside its web assets and
//! decides at startup whether its on-device copy is stale. The manifest
//! fingerprints the file set by name and size: stable for an unchanged
//! tree regardless of filesystem enumeration order, and guaranteed to
//! move when a file is added, removed, renamed, or resized.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Manifest version reported when the walked root does not exist.
pub const EMPTY_VERSION: &str = "empty";

/// Hex digits of the digest kept as the version string.
const VERSION_LEN: usize = 16;

/// One bundled file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEntry {
    /// Path relative to the manifest root, `/`-separated on every platform
    pub path: String,
    /// File size in bytes
    pub size: u64,
}

/// Descriptor of every regular file under a directory tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Truncated SHA-256 over the sorted (path, size) pairs
    pub version: String,
    /// Number of files, always `files.len()`
    pub count: usize,
    /// Entries sorted by path
    pub files: Vec<AssetEntry>,
}

/// Walk `root` and fingerprint its file set.
///
/// A missing root is not an error: it yields the `empty` sentinel version
/// with no entries, so a project without bundled audio still gets a valid
/// manifest.
pub fn build(root: &Path) -> Result<AssetManifest> {
    if !root.exists() {
        return Ok(AssetManifest {
            version: EMPTY_VERSION.to_string(),
            count: 0,
            files: Vec::new(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry.path().strip_prefix(root).unwrap_or_else(|_| entry.path());
        let path = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let size = entry
            .metadata()
            .map_err(|e| Error::io(format!("Failed to stat {}: {e}", entry.path().display())))?
            .len();
        files.push(AssetEntry { path, size });
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));

    let mut hasher = Sha256::new();
    for file in &files {
        hasher.update(file.path.as_bytes());
        hasher.update(b"\n");
        hasher.update(file.size.to_string().as_bytes());
        hasher.update(b"\n");
    }
    let digest = hex::encode(hasher.finalize());

    Ok(AssetManifest {
        version: digest[..VERSION_LEN].to_string(),
        count: files.len(),
        files,
    })
}

/// Serialize `manifest` as pretty-printed JSON at `path`.
pub fn write(manifest: &AssetManifest, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(manifest)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_root_yields_empty_sentinel() {
        let dir = TempDir::new().unwrap();
        let manifest = build(&dir.path().join("absent")).unwrap();

        assert_eq!(manifest.version, EMPTY_VERSION);
        assert_eq!(manifest.count, 0);
        assert!(manifest.files.is_empty());
    }

    #[test]
    fn test_entries_are_sorted_relative_posix_paths() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("zeta.mp3"), b"zz").unwrap();
        fs::write(dir.path().join("sub/alpha.mp3"), b"a").unwrap();

        let manifest = build(dir.path()).unwrap();

        assert_eq!(manifest.count, 2);
        assert_eq!(manifest.files[0].path, "sub/alpha.mp3");
        assert_eq!(manifest.files[0].size, 1);
        assert_eq!(manifest.files[1].path, "zeta.mp3");
        assert_eq!(manifest.files[1].size, 2);
    }

    #[test]
    fn test_version_is_deterministic() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.mp3"), b"aaa").unwrap();
        fs::write(dir.path().join("b.mp3"), b"bb").unwrap();

        let first = build(dir.path()).unwrap();
        let second = build(dir.path()).unwrap();

        assert_eq!(first.version, second.version);
        assert_eq!(first.version.len(), 16);
        assert!(first.version.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_version_independent_of_creation_order() {
        let one = TempDir::new().unwrap();
        fs::write(one.path().join("a.mp3"), b"xx").unwrap();
        fs::write(one.path().join("b.mp3"), b"yyy").unwrap();

        let two = TempDir::new().unwrap();
        fs::write(two.path().join("b.mp3"), b"yyy").unwrap();
        fs::write(two.path().join("a.mp3"), b"xx").unwrap();

        assert_eq!(build(one.path()).unwrap().version, build(two.path()).unwrap().version);
    }

    #[test]
    fn test_version_moves_when_size_changes() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.mp3"), b"one").unwrap();
        let before = build(dir.path()).unwrap();

        fs::write(dir.path().join("a.mp3"), b"longer").unwrap();
        let after = build(dir.path()).unwrap();

        assert_ne!(before.version, after.version);
    }

    #[test]
    fn test_version_moves_when_file_added() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.mp3"), b"one").unwrap();
        let before = build(dir.path()).unwrap();

        fs::write(dir.path().join("b.mp3"), b"two").unwrap();
        let after = build(dir.path()).unwrap();

        assert_ne!(before.version, after.version);
        assert_eq!(after.count, 2);
    }

    #[test]
    fn test_empty_directory_differs_from_missing() {
        let dir = TempDir::new().unwrap();
        let manifest = build(dir.path()).unwrap();

        assert_eq!(manifest.count, 0);
        assert_ne!(manifest.version, EMPTY_VERSION);
    }

    #[test]
    fn test_write_emits_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.mp3"), b"one").unwrap();
        let manifest = build(dir.path()).unwrap();

        let out = dir.path().join("manifest.json");
        write(&manifest, &out).unwrap();

        let parsed: AssetManifest =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(parsed, manifest);
    }
}
