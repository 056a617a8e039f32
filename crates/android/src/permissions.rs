//! AndroidManifest permission injection.

use capdroid_core::error::Result;
use std::fs;
use std::path::Path;

/// Runtime permissions the packaged web app depends on.
pub const REQUIRED_PERMISSIONS: [&str; 8] = [
    "android.permission.INTERNET",
    "android.permission.READ_EXTERNAL_STORAGE",
    "android.permission.WRITE_EXTERNAL_STORAGE",
    "android.permission.RECORD_AUDIO",
    "android.permission.MODIFY_AUDIO_SETTINGS",
    "android.permission.MANAGE_EXTERNAL_STORAGE",
    "android.permission.ACCESS_NETWORK_STATE",
    "android.permission.ACCESS_WIFI_STATE",
];

/// Outcome of a permission injection pass.
#[derive(Debug, PartialEq, Eq)]
pub enum Injection {
    /// New `uses-permission` entries were written.
    Updated {
        /// Entries added this pass.
        added: usize,
    },
    /// Every permission was already declared.
    Unchanged,
    /// Manifest not generated yet.
    MissingManifest,
}

/// Insert missing `<uses-permission>` entries before `</manifest>`.
///
/// Presence is checked per entry, so a partially patched manifest is
/// completed rather than duplicated.
pub fn inject(manifest_path: &Path) -> Result<Injection> {
    if !manifest_path.exists() {
        return Ok(Injection::MissingManifest);
    }

    let mut content = fs::read_to_string(manifest_path)?;
    let mut added = 0;

    for permission in REQUIRED_PERMISSIONS {
        let line = format!("<uses-permission android:name=\"{permission}\" />");
        if content.contains(&line) {
            continue;
        }
        let updated = content.replacen("</manifest>", &format!("    {line}\n</manifest>"), 1);
        if updated != content {
            content = updated;
            added += 1;
        }
    }

    if added == 0 {
        return Ok(Injection::Unchanged);
    }
    fs::write(manifest_path, &content)?;
    Ok(Injection::Updated { added })
}
