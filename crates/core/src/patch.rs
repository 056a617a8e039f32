//! Regex patching of generated text files
//!
//! The native project tree is owned by the Capacitor CLI; this tool only
//! performs targeted rewrites of the files it generates. Each edit is a
//! list of ordered find/replace rules applied to one file, and the file is
//! rewritten only when the result actually differs.

use crate::error::Result;
use regex::RegexBuilder;
use std::fs;
use std::path::Path;

/// One compiled find/replace rule
#[derive(Debug, Clone)]
pub struct PatchRule {
    pattern: regex::Regex,
    replacement: String,
}

impl PatchRule {
    /// Compile a rule. Patterns match with multi-line anchors enabled,
    /// and the replacement may use `$1`/`${1}` group references.
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        let pattern = RegexBuilder::new(pattern).multi_line(true).build()?;
        Ok(Self {
            pattern,
            replacement: replacement.into(),
        })
    }
}

/// Escape `$` so `text` passes through a replacement verbatim.
pub fn replacement_literal(text: &str) -> String {
    text.replace('$', "$$")
}

/// Apply `rules` in order to the file at `path`.
///
/// Returns `Ok(false)` without touching anything when the file does not
/// exist, since the generated tree may not have been created yet. Rules
/// are applied sequentially, each seeing the output of the previous one,
/// and every occurrence of a pattern is replaced.
pub fn apply_rules(path: &Path, rules: &[PatchRule]) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }

    let content = fs::read_to_string(path)?;
    let mut patched = content.clone();
    for rule in rules {
        patched = rule
            .pattern
            .replace_all(&patched, rule.replacement.as_str())
            .into_owned();
    }

    if patched == content {
        return Ok(false);
    }

    fs::write(path, patched)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.xml");
        let rules = [PatchRule::new("a", "b").unwrap()];

        let changed = apply_rules(&path, &rules).unwrap();

        assert!(!changed);
        assert!(!path.exists());
    }

    #[test]
    fn test_rules_apply_in_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file.txt");
        fs::write(&path, "alpha").unwrap();

        let rules = [
            PatchRule::new("alpha", "beta").unwrap(),
            PatchRule::new("beta", "gamma").unwrap(),
        ];
        let changed = apply_rules(&path, &rules).unwrap();

        assert!(changed);
        assert_eq!(fs::read_to_string(&path).unwrap(), "gamma");
    }

    #[test]
    fn test_no_change_skips_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file.txt");
        fs::write(&path, "unrelated").unwrap();

        let rules = [PatchRule::new("absent", "value").unwrap()];
        let changed = apply_rules(&path, &rules).unwrap();

        assert!(!changed);
        assert_eq!(fs::read_to_string(&path).unwrap(), "unrelated");
    }

    #[test]
    fn test_group_references() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("strings.xml");
        fs::write(&path, r#"<string name="app_name">Old</string>"#).unwrap();

        let rules = [PatchRule::new(
            r#"(<string name="app_name">).*?(</string>)"#,
            "${1}New${2}",
        )
        .unwrap()];
        apply_rules(&path, &rules).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            r#"<string name="app_name">New</string>"#
        );
    }

    #[test]
    fn test_multi_line_anchors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Main.kt");
        fs::write(&path, "package com.old.app\n\nclass Main\n").unwrap();

        let rules = [PatchRule::new(
            r"^\s*package\s+[A-Za-z0-9_.]+[ \t]*;?",
            "package com.new.app",
        )
        .unwrap()];
        apply_rules(&path, &rules).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "package com.new.app\n\nclass Main\n"
        );
    }

    #[test]
    fn test_replacement_literal_escapes_dollars() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file.txt");
        fs::write(&path, "name=PLACEHOLDER").unwrap();

        let rules =
            [PatchRule::new("PLACEHOLDER", replacement_literal("Cash $ App")).unwrap()];
        apply_rules(&path, &rules).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "name=Cash $ App");
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("build.gradle");
        fs::write(&path, "compileSdk 33\ntargetSdk 33\n").unwrap();

        let rules = [PatchRule::new(r"Sdk 33", "Sdk 34").unwrap()];
        apply_rules(&path, &rules).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "compileSdk 34\ntargetSdk 34\n"
        );
    }
}
