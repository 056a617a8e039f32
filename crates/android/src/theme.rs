//! Chrome color detection and theme generation.
//!
//! The status and navigation bars are kept visually consistent with the web
//! content by lifting its background color into the generated styles.

use capdroid_core::color;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Fallback chrome color when the web entry file gives no answer.
pub const DEFAULT_THEME_COLOR: &str = "#ffffff";

static NAV_BG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"--nav-bg\s*:\s*([^;]+);").unwrap());

static BODY_BG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"body\s*\{[\s\S]*?background-color\s*:\s*([^;]+);").unwrap());

/// Extract the chrome color from the staged web entry file.
///
/// The `--nav-bg` CSS variable wins; a `body { background-color: ... }`
/// declaration is the fallback. A matched but malformed value normalizes to
/// the default instead of falling through to the next rule.
pub fn detect_theme_color(index_html: &Path) -> String {
    let Ok(content) = fs::read_to_string(index_html) else {
        return DEFAULT_THEME_COLOR.to_string();
    };

    if let Some(caps) = NAV_BG_RE.captures(&content) {
        return color::normalize(&caps[1], DEFAULT_THEME_COLOR);
    }
    if let Some(caps) = BODY_BG_RE.captures(&content) {
        return color::normalize(&caps[1], DEFAULT_THEME_COLOR);
    }
    DEFAULT_THEME_COLOR.to_string()
}

/// Render `styles.xml` with the three app themes carrying the chrome color.
#[must_use]
pub fn styles_xml(status_bar_color: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<resources>

    <style name="AppTheme" parent="Theme.AppCompat.Light.DarkActionBar">
        <item name="colorPrimary">@color/colorPrimary</item>
        <item name="colorPrimaryDark">@color/colorPrimaryDark</item>
        <item name="colorAccent">@color/colorAccent</item>
        <item name="android:statusBarColor">{status_bar_color}</item>
        <item name="android:navigationBarColor">{status_bar_color}</item>
        <item name="android:windowLightStatusBar">true</item>
    </style>

    <style name="AppTheme.NoActionBar" parent="Theme.AppCompat.DayNight.NoActionBar">
        <item name="windowActionBar">false</item>
        <item name="windowNoTitle">true</item>
        <item name="android:background">@null</item>
        <item name="android:statusBarColor">{status_bar_color}</item>
        <item name="android:navigationBarColor">{status_bar_color}</item>
        <item name="android:windowLightStatusBar">true</item>
    </style>

    <style name="AppTheme.NoActionBarLaunch" parent="Theme.SplashScreen">
        <item name="android:background">@drawable/splash</item>
        <item name="android:statusBarColor">{status_bar_color}</item>
        <item name="android:navigationBarColor">{status_bar_color}</item>
        <item name="android:windowLightStatusBar">true</item>
    </style>
</resources>
"#
    )
}
