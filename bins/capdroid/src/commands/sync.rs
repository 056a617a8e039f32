//! Web asset staging and Capacitor sync

use capdroid_android::permissions::{self, Injection};
use capdroid_android::project::ProjectLayout;
use capdroid_android::{assets, capacitor, metadata};
use capdroid_cli::output::Status;
use capdroid_core::error::Result;

/// Stage web assets into the bridge project and sync the native tree.
pub fn run() -> Result<()> {
    let config = super::load_config();
    let layout = ProjectLayout::current();

    Status::header("Staging web assets");
    assets::stage_web_assets(&config, &layout)?;

    Status::header("Syncing native project");
    metadata::apply(&config, &layout);

    capacitor::sync(&layout.bridge_dir)?;
    Status::success("Capacitor sync finished");

    // Capacitor sync can write generated defaults back, so stamp the
    // configured identity again.
    metadata::apply(&config, &layout);

    match permissions::inject(&layout.android_manifest()) {
        Ok(Injection::Updated { added }) => {
            Status::success(&format!("Manifest permissions configured ({added} added)"));
        }
        Ok(Injection::Unchanged) => {
            Status::success("Manifest permissions configured");
        }
        Ok(Injection::MissingManifest) => {
            Status::error("AndroidManifest.xml not found; run `capdroid init` first");
        }
        Err(e) => {
            Status::error(&format!("Failed to configure manifest permissions: {e}"));
        }
    }

    Status::success("Sync complete");
    Ok(())
}
