//! Path layout of the generated bridge project.
//!
//! The tree under [`BRIDGE_DIR`] is owned by the Capacitor CLI; everything
//! resolved here is a target for existence-checked edits, never a directory
//! this tool assumes it created.

use std::path::{Path, PathBuf};

/// Directory the bridge project is scaffolded into, relative to the
/// invocation root.
pub const BRIDGE_DIR: &str = "android_build";

/// Web asset directory name inside the bridge project.
pub const WEB_DIR: &str = "www";

/// Resolved paths of the bridge project tree.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    /// Invocation root (where the config file lives).
    pub root: PathBuf,
    /// Bridge project root (`<root>/android_build`).
    pub bridge_dir: PathBuf,
    /// Generated native Android project (`<bridge>/android`).
    pub native_dir: PathBuf,
    /// Staged web assets (`<bridge>/www`).
    pub webroot: PathBuf,
}

impl ProjectLayout {
    /// Layout rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        let bridge_dir = root.join(BRIDGE_DIR);
        let native_dir = bridge_dir.join("android");
        let webroot = bridge_dir.join(WEB_DIR);
        Self {
            root,
            bridge_dir,
            native_dir,
            webroot,
        }
    }

    /// Layout rooted at the current working directory.
    #[must_use]
    pub fn current() -> Self {
        Self::new(".")
    }

    /// `package.json` of the bridge project.
    #[must_use]
    pub fn package_json(&self) -> PathBuf {
        self.bridge_dir.join("package.json")
    }

    /// `capacitor.config.ts` of the bridge project.
    #[must_use]
    pub fn capacitor_config(&self) -> PathBuf {
        self.bridge_dir.join("capacitor.config.ts")
    }

    /// `node_modules` of the bridge project.
    #[must_use]
    pub fn node_modules(&self) -> PathBuf {
        self.bridge_dir.join("node_modules")
    }

    /// Gradle build script of the app module.
    #[must_use]
    pub fn app_build_gradle(&self) -> PathBuf {
        self.native_dir.join("app/build.gradle")
    }

    /// Build output directory of the app module (removed by `clean`).
    #[must_use]
    pub fn app_build_dir(&self) -> PathBuf {
        self.native_dir.join("app/build")
    }

    /// Manifest of the app module.
    #[must_use]
    pub fn android_manifest(&self) -> PathBuf {
        self.native_dir.join("app/src/main/AndroidManifest.xml")
    }

    /// Resource root of the app module.
    #[must_use]
    pub fn res_dir(&self) -> PathBuf {
        self.native_dir.join("app/src/main/res")
    }

    /// Generated string resources.
    #[must_use]
    pub fn strings_xml(&self) -> PathBuf {
        self.res_dir().join("values/strings.xml")
    }

    /// Generated theme definitions.
    #[must_use]
    pub fn styles_xml(&self) -> PathBuf {
        self.res_dir().join("values/styles.xml")
    }

    /// Root of the generated Java/Kotlin sources.
    #[must_use]
    pub fn java_src_root(&self) -> PathBuf {
        self.native_dir.join("app/src/main/java")
    }

    /// Wrapper properties file pinning the Gradle distribution.
    #[must_use]
    pub fn gradle_wrapper_properties(&self) -> PathBuf {
        self.native_dir.join("gradle/wrapper/gradle-wrapper.properties")
    }

    /// Staged web entry file.
    #[must_use]
    pub fn index_html(&self) -> PathBuf {
        self.webroot.join("index.html")
    }

    /// Staged audio assets.
    #[must_use]
    pub fn audio_dir(&self) -> PathBuf {
        self.webroot.join("audio")
    }

    /// Manifest the packaged app reads to detect stale cached audio.
    #[must_use]
    pub fn audio_manifest(&self) -> PathBuf {
        self.webroot.join("audio-manifest.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_nests_under_bridge_dir() {
        let layout = ProjectLayout::new("/work");
        assert_eq!(layout.bridge_dir, PathBuf::from("/work/android_build"));
        assert_eq!(layout.native_dir, PathBuf::from("/work/android_build/android"));
        assert_eq!(layout.webroot, PathBuf::from("/work/android_build/www"));
    }

    #[test]
    fn test_generated_file_paths() {
        let layout = ProjectLayout::new("/work");
        assert!(layout
            .android_manifest()
            .ends_with("app/src/main/AndroidManifest.xml"));
        assert!(layout.strings_xml().ends_with("values/strings.xml"));
        assert!(layout.styles_xml().ends_with("values/styles.xml"));
        assert!(layout
            .gradle_wrapper_properties()
            .ends_with("gradle/wrapper/gradle-wrapper.properties"));
        assert!(layout.app_build_gradle().starts_with(&layout.native_dir));
    }

    #[test]
    fn test_web_asset_paths() {
        let layout = ProjectLayout::new("/work");
        assert_eq!(layout.index_html(), layout.webroot.join("index.html"));
        assert_eq!(layout.audio_manifest(), layout.webroot.join("audio-manifest.json"));
        assert!(layout.audio_dir().starts_with(&layout.webroot));
    }
}
