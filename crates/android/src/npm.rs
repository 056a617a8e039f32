//! npm wrappers for the bridge project.

use capdroid_core::config::BuildConfig;
use capdroid_core::error::{Error, Result};
use capdroid_core::process::run_command_streaming_in_dir;
use std::fs;
use std::path::Path;

/// Install the bridge dependencies, streaming npm's output through.
pub fn install(bridge_dir: &Path) -> Result<()> {
    let code = run_command_streaming_in_dir("npm", &["install"], bridge_dir)?;
    if code != 0 {
        return Err(Error::npm(format!(
            "npm install exited with status {code}"
        )));
    }
    Ok(())
}

/// Write the bridge project's `package.json` scaffold.
///
/// Pins the Capacitor 5 toolchain; `npm install` resolves everything else.
pub fn write_package_json(config: &BuildConfig, path: &Path) -> Result<()> {
    let scaffold = serde_json::json!({
        "name": format!("{}-android", config.package_tail()),
        "version": config.version_name(),
        "description": format!("{} Android app", config.name),
        "main": "index.html",
        "scripts": {
            "build": "echo 'Build completed'",
            "sync": "npx cap sync"
        },
        "dependencies": {
            "@capacitor/core": "^5.0.0",
            "@capacitor/android": "^5.0.0"
        },
        "devDependencies": {
            "typescript": "^5.0.0",
            "@capacitor/cli": "^5.0.0"
        }
    });

    let body = serde_json::to_string_pretty(&scaffold)?;
    fs::write(path, body)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_package_json_scaffold() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("package.json");

        let config = BuildConfig {
            name: "Foo".to_string(),
            pkg: "com.example.foo".to_string(),
            version: "v1.2".to_string(),
            ..BuildConfig::default()
        };
        write_package_json(&config, &path).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["name"], "foo-android");
        assert_eq!(parsed["version"], "1.2");
        assert_eq!(parsed["description"], "Foo Android app");
        assert_eq!(parsed["dependencies"]["@capacitor/android"], "^5.0.0");
        assert_eq!(parsed["devDependencies"]["@capacitor/cli"], "^5.0.0");
    }

    #[test]
    fn test_scaffold_scripts_delegate_to_cap() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("package.json");

        write_package_json(&BuildConfig::default(), &path).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["scripts"]["sync"], "npx cap sync");
        assert_eq!(parsed["main"], "index.html");
    }
}
