//! Gradle integration for the generated native project.
//!
//! Covers wrapper invocation, debug-APK discovery, a wrapper health probe,
//! and the two init-time overrides: seeding the wrapper cache with a locally
//! downloaded distribution and bumping the compile/target SDK when the
//! matching platform is installed.

use crate::project::ProjectLayout;
use capdroid_cli::output::Status;
use capdroid_core::error::{Error, Result};
use capdroid_core::health::{CheckResult, HealthCheck};
use capdroid_core::patch::{apply_rules, replacement_literal, PatchRule};
use capdroid_core::process::{run_command_in_dir, run_command_streaming_in_dir};
use once_cell::sync::Lazy;
use regex::Regex;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming a locally downloaded Gradle distribution zip.
pub const GRADLE_DIST_ENV: &str = "CAPDROID_GRADLE_DIST";

/// Fixed directory name inside the wrapper dists cache. Gradle derives a
/// hash here for distributions it downloads itself; a fixed name keeps the
/// pre-seeded copy discoverable across runs.
const DIST_CACHE_DIR: &str = "bhlb1v25mvn5uk2d4746t5w8lf";

static DIST_STEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^gradle-\d+(\.\d+){1,2}-(all|bin)$").unwrap());

/// Wrapper script path inside the native project.
#[must_use]
pub fn wrapper_path(native_dir: &Path) -> PathBuf {
    let script = if cfg!(windows) { "gradlew.bat" } else { "gradlew" };
    native_dir.join(script)
}

/// Check whether `capdroid init` has generated the wrapper yet.
#[must_use]
pub fn has_wrapper(native_dir: &Path) -> bool {
    wrapper_path(native_dir).exists()
}

/// Run a single wrapper task, streaming Gradle's output through.
pub fn run_wrapper_task(native_dir: &Path, task: &str) -> Result<()> {
    // Absolute path, so the working directory can be the native project.
    let wrapper = std::path::absolute(wrapper_path(native_dir))?;
    let code = run_command_streaming_in_dir(&wrapper.to_string_lossy(), &[task], native_dir)?;
    if code != 0 {
        return Err(Error::gradle(format!(
            "gradle {task} exited with status {code}"
        )));
    }
    Ok(())
}

/// Build the debug APK.
pub fn assemble_debug(native_dir: &Path) -> Result<()> {
    run_wrapper_task(native_dir, "assembleDebug")
}

/// Locate the debug APK produced by `assembleDebug`.
pub fn find_debug_apk(native_dir: &Path) -> Result<PathBuf> {
    let output_dir = native_dir.join("app/build/outputs/apk/debug");
    let pattern = output_dir.join("*.apk");
    let mut apks: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())
        .map_err(|e| Error::gradle(format!("bad APK glob: {e}")))?
        .filter_map(std::result::Result::ok)
        .collect();
    apks.sort();
    apks.into_iter()
        .next()
        .ok_or_else(|| Error::apk_not_found(&output_dir))
}

/// Health probe for the generated Gradle wrapper.
///
/// A missing wrapper is degraded rather than unhealthy: init generates it.
pub struct GradleWrapperCheck {
    native_dir: PathBuf,
}

impl GradleWrapperCheck {
    /// Probe the wrapper of the native project under `native_dir`.
    pub fn new(native_dir: &Path) -> Self {
        Self {
            native_dir: native_dir.to_path_buf(),
        }
    }
}

impl HealthCheck for GradleWrapperCheck {
    fn check(&self) -> CheckResult {
        let wrapper = wrapper_path(&self.native_dir);
        if !wrapper.exists() {
            return CheckResult::degraded("gradle", "wrapper not generated yet (created by init)");
        }

        match run_command_in_dir(&wrapper.to_string_lossy(), &["--version"], &self.native_dir) {
            Ok(output) if output.success => {
                let version = output
                    .combined_output()
                    .lines()
                    .find(|line| line.trim().starts_with("Gradle"))
                    .unwrap_or("Gradle")
                    .trim()
                    .to_string();
                CheckResult::healthy("gradle").with_detail("version", version)
            }
            _ => CheckResult::degraded("gradle", "wrapper exists but failed to report a version"),
        }
    }
}

/// Seed the wrapper dists cache from [`GRADLE_DIST_ENV`] and pin the wrapper
/// to that distribution. Best-effort: every branch logs and returns.
pub fn configure_local_distribution(layout: &ProjectLayout) {
    let Ok(dist) = env::var(GRADLE_DIST_ENV) else {
        Status::info(&format!(
            "{GRADLE_DIST_ENV} not set; Gradle will fetch its own distribution"
        ));
        return;
    };

    let dist_zip = PathBuf::from(dist);
    if !dist_zip.is_file() {
        Status::warning(&format!(
            "Local Gradle distribution not found: {}",
            dist_zip.display()
        ));
        return;
    }

    let Some(home) = dirs::home_dir() else {
        Status::warning("Home directory unknown; cannot seed the Gradle wrapper cache");
        return;
    };
    let dists_root = home.join(".gradle/wrapper/dists");

    let stem = match install_distribution(&dist_zip, &dists_root) {
        Ok(installed) => {
            if installed.copied {
                Status::success(&format!(
                    "Seeded Gradle distribution cache: {}",
                    installed.stem
                ));
            } else {
                Status::info(&format!(
                    "Gradle distribution already cached: {}",
                    installed.stem
                ));
            }
            installed.stem
        }
        Err(e) => {
            Status::error(&format!("Failed to seed the Gradle distribution cache: {e}"));
            return;
        }
    };

    let properties = layout.gradle_wrapper_properties();
    if !properties.exists() {
        Status::warning("gradle-wrapper.properties not found; wrapper not pinned");
        return;
    }
    match point_wrapper_at(&properties, &stem) {
        Ok(true) => Status::success(&format!("Gradle wrapper pinned to {stem}")),
        Ok(false) => Status::info(&format!("Gradle wrapper already pinned to {stem}")),
        Err(e) => Status::error(&format!("Failed to pin the Gradle wrapper: {e}")),
    }
}

/// Outcome of seeding the dists cache.
#[derive(Debug)]
pub(crate) struct InstalledDist {
    pub stem: String,
    pub copied: bool,
}

/// Copy `dist_zip` into `<dists_root>/<stem>/<cache dir>/` unless already
/// present. The zip name must look like `gradle-<version>-(all|bin).zip`.
pub(crate) fn install_distribution(dist_zip: &Path, dists_root: &Path) -> Result<InstalledDist> {
    let file_name = dist_zip
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let stem = file_name.strip_suffix(".zip").unwrap_or_default();
    if !DIST_STEM_RE.is_match(stem) {
        return Err(Error::validation(format!(
            "Unrecognized Gradle distribution name: {file_name}"
        ))
        .with_suggestion("Expected a name like gradle-8.14.3-all.zip"));
    }

    let target_dir = dists_root.join(stem).join(DIST_CACHE_DIR);
    fs::create_dir_all(&target_dir)?;

    let target = target_dir.join(&file_name);
    if target.exists() {
        return Ok(InstalledDist {
            stem: stem.to_string(),
            copied: false,
        });
    }

    fs::copy(dist_zip, &target)?;
    Ok(InstalledDist {
        stem: stem.to_string(),
        copied: true,
    })
}

/// Rewrite the `distributionUrl` zip reference to `<stem>.zip`.
pub(crate) fn point_wrapper_at(properties: &Path, stem: &str) -> Result<bool> {
    let rule = PatchRule::new(
        r"gradle-[0-9][^/\\]*\.zip",
        replacement_literal(&format!("{stem}.zip")),
    )?;
    apply_rules(properties, &[rule])
}

/// Bump the generated project to SDK 34 when that platform is installed
/// under `ANDROID_SDK_ROOT` (or `ANDROID_HOME`). Best-effort.
pub fn configure_sdk_version(layout: &ProjectLayout) {
    if !layout.native_dir.exists() {
        return;
    }

    let Some(sdk) = sdk_root() else {
        Status::info("ANDROID_SDK_ROOT not set; keeping the generated SDK versions");
        return;
    };
    if !sdk.join("platforms/android-34").exists() {
        Status::warning("android-34 platform not installed; keeping the generated SDK versions");
        return;
    }

    let build_gradle = layout.app_build_gradle();
    if !build_gradle.exists() {
        return;
    }
    match apply_sdk_bump(&build_gradle) {
        Ok(true) => Status::success("SDK version set to 34"),
        Ok(false) => Status::info("SDK version already configured"),
        Err(e) => Status::error(&format!("Failed to configure the SDK version: {e}")),
    }
}

fn sdk_root() -> Option<PathBuf> {
    ["ANDROID_SDK_ROOT", "ANDROID_HOME"]
        .iter()
        .filter_map(|var| env::var(var).ok())
        .find(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}

pub(crate) fn apply_sdk_bump(build_gradle: &Path) -> Result<bool> {
    let rules = [
        PatchRule::new("compileSdk 33", "compileSdk 34")?,
        PatchRule::new("targetSdk 33", "targetSdk 34")?,
    ];
    apply_rules(build_gradle, &rules)
}
