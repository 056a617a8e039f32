//! Build output cleanup

use capdroid_android::project::ProjectLayout;
use capdroid_cli::output::Status;
use capdroid_core::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Remove built APKs, the Gradle build directory, and installed bridge
/// dependencies.
pub fn run() -> Result<()> {
    let config = super::load_config();
    let layout = ProjectLayout::current();

    Status::header("Cleaning build outputs");

    // The APK may sit at the invocation root or in the configured output
    // directory; with `out_dir: .` both candidates name the same file and
    // the second pass sees it already gone.
    let apk_candidates = [
        PathBuf::from(config.apk_name()),
        Path::new(&config.out_dir).join(config.apk_name()),
    ];
    for apk in apk_candidates {
        if apk.exists() {
            fs::remove_file(&apk)?;
            Status::success(&format!("Removed {}", apk.display()));
        }
    }

    let build_dir = layout.app_build_dir();
    if build_dir.exists() {
        fs::remove_dir_all(&build_dir)?;
        Status::success("Removed the Gradle build directory");
    }

    let node_modules = layout.node_modules();
    if node_modules.exists() {
        Status::info("Removing node_modules...");
        fs::remove_dir_all(&node_modules)?;
        Status::success("Removed node_modules");
    }

    Status::success("Clean complete");
    Ok(())
}
