//! APK assembly and copy-out

use capdroid_android::project::ProjectLayout;
use capdroid_android::gradle;
use capdroid_cli::output::{format_duration, format_size, Status};
use capdroid_core::error::{Error, Result};
use std::fs;
use std::time::Instant;

/// Sync, run the Gradle debug build, and copy the APK to the output
/// directory.
pub fn run() -> Result<()> {
    let started = Instant::now();

    super::sync::run()?;

    let config = super::load_config();
    let layout = ProjectLayout::current();

    Status::header("Building APK");
    if !gradle::has_wrapper(&layout.native_dir) {
        return Err(Error::gradle("Gradle wrapper not found")
            .with_suggestion("Run `capdroid init` to generate the native project first"));
    }

    gradle::assemble_debug(&layout.native_dir)?;
    Status::success("Gradle build finished");

    let apk = gradle::find_debug_apk(&layout.native_dir)?;
    Status::info(&format!("Found APK: {}", apk.display()));

    fs::create_dir_all(&config.out_dir)?;
    let dest = std::path::Path::new(&config.out_dir).join(config.apk_name());
    fs::copy(&apk, &dest)?;

    let size = fs::metadata(&dest).map(|m| m.len()).unwrap_or(0);
    Status::success(&format!("APK ready: {} ({})", dest.display(), format_size(size)));
    Status::detail(&format!("completed in {}", format_duration(started.elapsed())));
    Ok(())
}
