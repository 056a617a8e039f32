//! Capacitor CLI wrappers.
//!
//! The CLI is always the bridge project's local installation at
//! `node_modules/.bin/cap`, never a global install, so the scaffolded
//! toolchain version is the one that runs.

use crate::project::WEB_DIR;
use capdroid_core::error::{Error, Result};
use capdroid_core::process::run_command_streaming_in_dir;
use std::path::{Path, PathBuf};

/// Path of the locally installed Capacitor binary.
#[must_use]
pub fn cap_binary(bridge_dir: &Path) -> PathBuf {
    let name = if cfg!(windows) { "cap.cmd" } else { "cap" };
    bridge_dir.join("node_modules").join(".bin").join(name)
}

/// Check whether the local Capacitor binary has been installed.
#[must_use]
pub fn is_installed(bridge_dir: &Path) -> bool {
    cap_binary(bridge_dir).exists()
}

fn run_cap(bridge_dir: &Path, args: &[&str]) -> Result<()> {
    let binary = cap_binary(bridge_dir);
    if !is_installed(bridge_dir) {
        return Err(Error::capacitor(format!(
            "Capacitor CLI not found: {}",
            binary.display()
        ))
        .with_suggestion("Run `capdroid init` to install the bridge dependencies"));
    }

    // Absolute path, so the working directory can be the bridge project.
    let binary = std::path::absolute(&binary)?;
    let code = run_command_streaming_in_dir(&binary.to_string_lossy(), args, bridge_dir)?;
    if code != 0 {
        return Err(Error::capacitor(format!(
            "cap {} exited with status {code}",
            args.join(" ")
        )));
    }
    Ok(())
}

/// `cap init <name> <pkg>` — passing both up front keeps the scaffold from
/// falling back to its interactive defaults.
pub fn init(bridge_dir: &Path, name: &str, pkg: &str) -> Result<()> {
    run_cap(bridge_dir, &["init", name, pkg])
}

/// `cap add android` — generates the native project.
pub fn add_android(bridge_dir: &Path) -> Result<()> {
    run_cap(bridge_dir, &["add", "android"])
}

/// `cap sync` — copies the webroot into the native project.
pub fn sync(bridge_dir: &Path) -> Result<()> {
    run_cap(bridge_dir, &["sync"])
}

/// Render `capacitor.config.ts` with app identity and status-bar color.
#[must_use]
pub fn config_ts(app_id: &str, app_name: &str, status_bar_argb: &str) -> String {
    format!(
        r"import {{ CapacitorConfig }} from '@capacitor/cli';

const config: CapacitorConfig = {{
  appId: '{app_id}',
  appName: '{app_name}',
  webDir: '{WEB_DIR}',
  server: {{
    androidScheme: 'https'
  }},
  plugins: {{
    StatusBar: {{
      overlaysWebView: false,
      backgroundColor: '{status_bar_argb}'
    }}
  }}
}};

export default config;
"
    )
}
