//! Metadata synchronizer.
//!
//! Applies the loaded config across the generated tree: bridge config,
//! string resources, Gradle identity, activity entry points, themes, and
//! launcher icons. Capacitor regenerates some of these files with defaults,
//! so the synchronizer runs again after every `cap sync`.

use crate::activity::{self, ActivityKind};
use crate::capacitor;
use crate::icons::{self, IconSync};
use crate::project::ProjectLayout;
use crate::theme;
use capdroid_cli::output::Status;
use capdroid_core::color;
use capdroid_core::config::BuildConfig;
use capdroid_core::error::Result;
use capdroid_core::patch::{apply_rules, replacement_literal, PatchRule};
use std::fs;

/// Apply config identity, theming, and icons to the generated tree.
///
/// Idempotent. Best-effort: each sub-step checks that its target exists and
/// a failing sub-step logs without aborting the rest, so a rerun recovers
/// partial failures.
pub fn apply(config: &BuildConfig, layout: &ProjectLayout) {
    let theme_color = theme::detect_theme_color(&layout.index_html());
    let theme_color_argb = color::to_argb8(&theme_color);

    match write_bridge_config(config, layout, &theme_color_argb) {
        Ok(()) => Status::success("Wrote capacitor.config.ts"),
        Err(e) => Status::error(&format!("Failed to write capacitor.config.ts: {e}")),
    }

    match patch_string_resources(config, layout) {
        Ok(true) => Status::success("Synced app name and package in strings.xml"),
        Ok(false) => {}
        Err(e) => Status::error(&format!("Failed to patch strings.xml: {e}")),
    }

    match patch_build_gradle(config, layout) {
        Ok(true) => Status::success("Synced package id and version in app/build.gradle"),
        Ok(false) => {}
        Err(e) => Status::error(&format!("Failed to patch app/build.gradle: {e}")),
    }

    sync_entry_points(config, layout);

    match write_styles(layout, &theme_color) {
        Ok(true) => Status::success(&format!("Synced chrome color: {theme_color}")),
        Ok(false) => {}
        Err(e) => Status::error(&format!("Failed to write styles.xml: {e}")),
    }

    let icon = icons::resolve_icon_path(&config.icon, &layout.root);
    match icons::sync_launcher_icons(&icon, &layout.res_dir()) {
        Ok(IconSync::Synced {
            copied,
            removed_adaptive,
        }) => {
            if copied > 0 || removed_adaptive > 0 {
                Status::success(&format!(
                    "Synced launcher icon ({copied} bitmaps, {removed_adaptive} adaptive descriptors removed)"
                ));
            }
        }
        Ok(IconSync::MissingSource(path)) => {
            Status::warning(&format!(
                "Icon not found, launcher icons unchanged: {}",
                path.display()
            ));
        }
        Err(e) => Status::error(&format!("Failed to sync launcher icons: {e}")),
    }
}

fn write_bridge_config(
    config: &BuildConfig,
    layout: &ProjectLayout,
    status_bar_argb: &str,
) -> Result<()> {
    let rendered = capacitor::config_ts(&config.pkg, &config.name, status_bar_argb);
    fs::write(layout.capacitor_config(), rendered)?;
    Ok(())
}

fn xml_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn string_rule(key: &str, value: &str) -> Result<PatchRule> {
    PatchRule::new(
        &format!(r#"(<string name="{key}">).*?(</string>)"#),
        format!("${{1}}{}${{2}}", replacement_literal(value)),
    )
}

fn patch_string_resources(config: &BuildConfig, layout: &ProjectLayout) -> Result<bool> {
    let name = xml_escape(&config.name);
    let pkg = xml_escape(&config.pkg);
    let rules = [
        string_rule("app_name", &name)?,
        string_rule("title_activity_main", &name)?,
        string_rule("package_name", &pkg)?,
        string_rule("custom_url_scheme", &pkg)?,
    ];
    apply_rules(&layout.strings_xml(), &rules)
}

fn patch_build_gradle(config: &BuildConfig, layout: &ProjectLayout) -> Result<bool> {
    let pkg = replacement_literal(&config.pkg);
    let version = replacement_literal(config.version_name());
    let rules = [
        PatchRule::new(r#"namespace\s+"[^"]+""#, format!(r#"namespace "{pkg}""#))?,
        PatchRule::new(
            r#"applicationId\s+"[^"]+""#,
            format!(r#"applicationId "{pkg}""#),
        )?,
        PatchRule::new(
            r#"versionName\s+"[^"]+""#,
            format!(r#"versionName "{version}""#),
        )?,
    ];
    apply_rules(&layout.app_build_gradle(), &rules)
}

fn sync_entry_points(config: &BuildConfig, layout: &ProjectLayout) {
    for path in activity::find_entry_points(&layout.java_src_root()) {
        let Some(kind) = ActivityKind::from_path(&path) else {
            continue;
        };
        match kind.apply(&path, &config.pkg, config.enable_zoom) {
            Ok(true) => match kind {
                ActivityKind::Java => {
                    Status::success(&format!("Regenerated activity: {}", path.display()));
                }
                ActivityKind::Kotlin => {
                    Status::success(&format!("Synced activity package: {}", path.display()));
                }
            },
            Ok(false) => {}
            Err(e) => Status::error(&format!("Failed to update {}: {e}", path.display())),
        }
    }
}

fn write_styles(layout: &ProjectLayout, theme_color: &str) -> Result<bool> {
    let path = layout.styles_xml();
    if !path.exists() {
        return Ok(false);
    }
    fs::write(&path, theme::styles_xml(theme_color))?;
    Ok(true)
}
