//! Environment checks and one-time bridge project scaffolding

use capdroid_android::{capacitor, gradle, metadata, npm};
use capdroid_android::project::ProjectLayout;
use capdroid_cli::output::Status;
use capdroid_core::error::{Error, Result};
use capdroid_core::health::{EnvVarCheck, HealthChecker, HealthStatus};
use std::fs;

/// Scaffold the Capacitor bridge project and generate the native tree.
pub fn run() -> Result<()> {
    let layout = ProjectLayout::current();

    Status::header("Checking environment");
    let report = HealthChecker::new()
        .with_packaging_checks()
        .add_check(EnvVarCheck::optional("ANDROID_SDK_ROOT"))
        .add_check(gradle::GradleWrapperCheck::new(&layout.native_dir))
        .run();

    for check in &report.checks {
        let label = match check.details.get("version") {
            Some(version) => format!("{}: {}", check.name, version),
            None => match &check.message {
                Some(message) => format!("{}: {}", check.name, message),
                None => check.name.clone(),
            },
        };
        match check.status {
            HealthStatus::Healthy => Status::success(&label),
            HealthStatus::Degraded => Status::warning(&label),
            _ => Status::error(&label),
        }
    }

    if !report.status.is_operational() {
        return Err(Error::environment("Required packaging tools are missing")
            .with_suggestion("Install the tools reported above, then rerun `capdroid init`"));
    }

    let config = super::load_config();

    Status::header("Scaffolding bridge project");
    fs::create_dir_all(&layout.bridge_dir)?;

    Status::step(1, 5, "Writing package.json");
    npm::write_package_json(&config, &layout.package_json())?;

    Status::step(2, 5, "Installing bridge dependencies");
    npm::install(&layout.bridge_dir)?;

    Status::step(3, 5, "Initializing Capacitor");
    capacitor::init(&layout.bridge_dir, &config.name, &config.pkg)?;

    Status::step(4, 5, "Generating the native Android project");
    capacitor::add_android(&layout.bridge_dir)?;

    // Capacitor scaffolds with its own defaults, so stamp the configured
    // identity before anything else reads the tree.
    Status::step(5, 5, "Applying project metadata");
    metadata::apply(&config, &layout);

    gradle::configure_local_distribution(&layout);
    gradle::configure_sdk_version(&layout);

    Status::success("Bridge project ready");
    Ok(())
}
