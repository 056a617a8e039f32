//! Web asset staging into the bridge webroot.
//!
//! The webroot (`android_build/www`) is the only web asset root; earlier
//! layouts left duplicates directly in the bridge project root, which are
//! cleaned up on every sync.

use crate::icons;
use crate::project::ProjectLayout;
use capdroid_cli::output::{format_count, Status};
use capdroid_core::asset_manifest;
use capdroid_core::config::BuildConfig;
use capdroid_core::error::{Error, ErrorCode, Result};
use std::fs;
use std::path::Path;

/// Stage the web application into the webroot and refresh the audio
/// manifest. Required inputs (`index.html`, `js/`, `yaml/`) abort the sync
/// when missing; the icon and `audio/` tree are optional.
pub fn stage_web_assets(config: &BuildConfig, layout: &ProjectLayout) -> Result<()> {
    fs::create_dir_all(&layout.webroot)?;
    cleanup_legacy_root_assets(layout)?;

    let index_src = layout.root.join("index.html");
    if !index_src.exists() {
        return Err(Error::file_not_found(&index_src)
            .with_suggestion("Run capdroid from the web project root"));
    }
    fs::copy(&index_src, layout.index_html())?;
    Status::success("Copied index.html");

    for dir in ["js", "yaml"] {
        let src = layout.root.join(dir);
        if !src.is_dir() {
            return Err(Error::new(
                ErrorCode::DirectoryNotFound,
                format!("Directory not found: {}", src.display()),
            )
            .with_suggestion("Run capdroid from the web project root"));
        }
        replace_tree(&src, &layout.webroot.join(dir))?;
        Status::success(&format!("Copied {dir}/"));
    }

    let audio_src = layout.root.join("audio");
    if audio_src.is_dir() {
        replace_tree(&audio_src, &layout.audio_dir())?;
        Status::success("Copied audio/");
    }

    let icon = icons::resolve_icon_path(&config.icon, &layout.root);
    if icon.is_file() {
        fs::copy(&icon, layout.webroot.join("icon.png"))?;
        Status::success(&format!("Copied icon: {} -> www/icon.png", icon.display()));
    } else {
        Status::warning(&format!("Icon not found: {}", icon.display()));
    }

    let manifest = asset_manifest::build(&layout.audio_dir())?;
    asset_manifest::write(&manifest, &layout.audio_manifest())?;
    Status::success(&format!(
        "Wrote audio manifest: {}, version {}",
        format_count(manifest.count, "file", "files"),
        manifest.version
    ));

    Ok(())
}

/// Remove web asset duplicates that predate the webroot-only layout.
pub(crate) fn cleanup_legacy_root_assets(layout: &ProjectLayout) -> Result<()> {
    for dir in ["js", "yaml"] {
        let path = layout.bridge_dir.join(dir);
        if path.is_dir() {
            fs::remove_dir_all(&path)?;
            Status::info(&format!("Removed legacy directory: {}", path.display()));
        }
    }
    for file in ["index.html", "icon.png"] {
        let path = layout.bridge_dir.join(file);
        if path.is_file() {
            fs::remove_file(&path)?;
            Status::info(&format!("Removed legacy file: {}", path.display()));
        }
    }
    Ok(())
}

/// Copy `src` over `dest`, dropping any previous `dest` contents first.
fn replace_tree(src: &Path, dest: &Path) -> Result<()> {
    if dest.exists() {
        fs::remove_dir_all(dest)?;
    }
    copy_tree(src, dest)
}

fn copy_tree(src: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seed_web_project(root: &Path) {
        fs::write(root.join("index.html"), "<html></html>").unwrap();
        fs::create_dir_all(root.join("js")).unwrap();
        fs::write(root.join("js/app.js"), "console.log(1);").unwrap();
        fs::create_dir_all(root.join("yaml/lessons")).unwrap();
        fs::write(root.join("yaml/lessons/one.yaml"), "a: 1").unwrap();
    }

    #[test]
    fn test_stage_copies_required_trees_and_manifest() {
        let temp = TempDir::new().unwrap();
        seed_web_project(temp.path());
        fs::create_dir_all(temp.path().join("audio")).unwrap();
        fs::write(temp.path().join("audio/a.mp3"), vec![0u8; 10]).unwrap();
        fs::write(temp.path().join("icon.png"), b"png").unwrap();

        let layout = ProjectLayout::new(temp.path());
        let config = BuildConfig::default();
        stage_web_assets(&config, &layout).unwrap();

        assert!(layout.index_html().exists());
        assert!(layout.webroot.join("js/app.js").exists());
        assert!(layout.webroot.join("yaml/lessons/one.yaml").exists());
        assert!(layout.webroot.join("icon.png").exists());
        assert!(layout.audio_dir().join("a.mp3").exists());

        let manifest: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(layout.audio_manifest()).unwrap()).unwrap();
        assert_eq!(manifest["count"], 1);
        assert_eq!(manifest["files"][0]["path"], "a.mp3");
    }

    #[test]
    fn test_stage_requires_js_tree() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("index.html"), "<html></html>").unwrap();

        let layout = ProjectLayout::new(temp.path());
        let err = stage_web_assets(&BuildConfig::default(), &layout).unwrap_err();
        assert_eq!(err.code, ErrorCode::DirectoryNotFound);
    }

    #[test]
    fn test_stage_requires_entry_file() {
        let temp = TempDir::new().unwrap();

        let layout = ProjectLayout::new(temp.path());
        let err = stage_web_assets(&BuildConfig::default(), &layout).unwrap_err();
        assert_eq!(err.code, ErrorCode::FileNotFound);
    }

    #[test]
    fn test_missing_icon_and_audio_are_not_fatal() {
        let temp = TempDir::new().unwrap();
        seed_web_project(temp.path());

        let layout = ProjectLayout::new(temp.path());
        stage_web_assets(&BuildConfig::default(), &layout).unwrap();

        assert!(!layout.webroot.join("icon.png").exists());
        // No audio tree: the manifest still exists with the empty sentinel.
        let manifest: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(layout.audio_manifest()).unwrap()).unwrap();
        assert_eq!(manifest["version"], "empty");
        assert_eq!(manifest["count"], 0);
    }

    #[test]
    fn test_restaging_replaces_stale_tree_contents() {
        let temp = TempDir::new().unwrap();
        seed_web_project(temp.path());
        let layout = ProjectLayout::new(temp.path());
        stage_web_assets(&BuildConfig::default(), &layout).unwrap();

        // Simulate an earlier sync having staged a file that no longer exists.
        fs::write(layout.webroot.join("js/stale.js"), "old").unwrap();
        stage_web_assets(&BuildConfig::default(), &layout).unwrap();

        assert!(!layout.webroot.join("js/stale.js").exists());
        assert!(layout.webroot.join("js/app.js").exists());
    }

    #[test]
    fn test_legacy_root_assets_removed() {
        let temp = TempDir::new().unwrap();
        seed_web_project(temp.path());
        let layout = ProjectLayout::new(temp.path());
        fs::create_dir_all(layout.bridge_dir.join("js")).unwrap();
        fs::write(layout.bridge_dir.join("js/dup.js"), "dup").unwrap();
        fs::write(layout.bridge_dir.join("index.html"), "dup").unwrap();

        stage_web_assets(&BuildConfig::default(), &layout).unwrap();

        assert!(!layout.bridge_dir.join("js").exists());
        assert!(!layout.bridge_dir.join("index.html").exists());
        // The webroot copies are untouched by the cleanup.
        assert!(layout.index_html().exists());
    }
}
