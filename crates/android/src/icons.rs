//! Launcher icon sync.
//!
//! The configured icon is copied verbatim over every density variant that
//! the generated project already ships. The adaptive-icon descriptors are
//! removed so the platform renders the plain bitmap instead of rescaling a
//! foreground layer.

use capdroid_core::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of a launcher icon sync pass.
#[derive(Debug, PartialEq, Eq)]
pub enum IconSync {
    /// Bitmaps overwritten and adaptive descriptors dropped.
    Synced {
        /// Launcher bitmaps overwritten.
        copied: usize,
        /// Adaptive-icon descriptors deleted.
        removed_adaptive: usize,
    },
    /// Configured icon is not a regular file; nothing was touched.
    MissingSource(PathBuf),
}

/// Resolve the configured icon path: `~` expanded, relative paths anchored
/// at the invocation root.
#[must_use]
pub fn resolve_icon_path(icon: &str, root: &Path) -> PathBuf {
    let expanded = shellexpand::tilde(icon);
    let path = Path::new(expanded.as_ref());
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Copy `icon` over every existing `ic_launcher.png` / `ic_launcher_round.png`
/// under the `mipmap-*` resource directories, then delete the adaptive-icon
/// descriptors for the default launcher icon.
pub fn sync_launcher_icons(icon: &Path, res_dir: &Path) -> Result<IconSync> {
    if !icon.is_file() {
        return Ok(IconSync::MissingSource(icon.to_path_buf()));
    }

    let mut copied = 0;
    let pattern = res_dir.join("mipmap-*");
    for mipmap_dir in glob::glob(&pattern.to_string_lossy())
        .map_err(|e| Error::validation(format!("bad mipmap glob: {e}")))?
        .filter_map(std::result::Result::ok)
    {
        for name in ["ic_launcher.png", "ic_launcher_round.png"] {
            let target = mipmap_dir.join(name);
            if target.exists() {
                fs::copy(icon, &target)?;
                copied += 1;
            }
        }
    }

    let mut removed_adaptive = 0;
    let anydpi = res_dir.join("mipmap-anydpi-v26");
    for name in ["ic_launcher.xml", "ic_launcher_round.xml"] {
        let descriptor = anydpi.join(name);
        if descriptor.exists() {
            fs::remove_file(&descriptor)?;
            removed_adaptive += 1;
        }
    }

    Ok(IconSync::Synced {
        copied,
        removed_adaptive,
    })
}
