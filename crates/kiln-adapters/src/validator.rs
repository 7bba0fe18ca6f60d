//! Post-generation sanity checks over the written tree.

use std::fs;
use std::path::Path;

use tracing::{debug, instrument};
use walkdir::{DirEntry, WalkDir};

use kiln_core::{
    application::ProjectValidator,
    domain::{ProjectConfig, ValidationFinding},
};

use crate::package_manifest::MANIFEST_FILE;

const MAX_DEPTH: usize = 2;

/// Checks the manifest, the source directory and that JSON files parse.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicValidator;

impl BasicValidator {
    pub fn new() -> Self {
        Self
    }
}

impl ProjectValidator for BasicValidator {
    #[instrument(skip_all, fields(root = %root.display()))]
    fn validate(&self, root: &Path, _config: &ProjectConfig) -> Vec<ValidationFinding> {
        let mut findings = Vec::new();

        let manifest = root.join(MANIFEST_FILE);
        match fs::read_to_string(&manifest) {
            Ok(raw) => {
                if let Err(e) = serde_json::from_str::<serde_json::Value>(&raw) {
                    findings.push(ValidationFinding::new(MANIFEST_FILE, format!("invalid JSON: {e}")));
                }
            }
            Err(_) => findings.push(ValidationFinding::new(MANIFEST_FILE, "missing")),
        }

        if !root.join("src").is_dir() {
            findings.push(ValidationFinding::new("src", "source directory is missing"));
        }

        let json_files = WalkDir::new(root)
            .max_depth(MAX_DEPTH)
            .into_iter()
            .filter_entry(|e| e.file_name() != "node_modules")
            .filter_map(Result::ok)
            .filter(is_checked_json);

        for entry in json_files {
            let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
            if rel == Path::new(MANIFEST_FILE) {
                continue;
            }
            let parsed = fs::read_to_string(entry.path())
                .map_err(|e| e.to_string())
                .and_then(|raw| {
                    serde_json::from_str::<serde_json::Value>(&raw).map_err(|e| e.to_string())
                });
            if let Err(reason) = parsed {
                findings.push(ValidationFinding::new(rel, format!("invalid JSON: {reason}")));
            }
        }

        debug!(count = findings.len(), "Validation finished");
        findings
    }
}

/// `*.json`, except TypeScript/JavaScript configs which may hold comments.
fn is_checked_json(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    entry.file_type().is_file()
        && name.ends_with(".json")
        && !name.starts_with("tsconfig")
        && !name.starts_with("jsconfig")
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::domain::Framework;

    fn config() -> ProjectConfig {
        ProjectConfig::builder("app")
            .framework(Framework::React)
            .build()
            .unwrap()
    }

    fn messages(root: &Path) -> Vec<String> {
        BasicValidator
            .validate(root, &config())
            .into_iter()
            .map(|f| f.to_string())
            .collect()
    }

    #[test]
    fn healthy_project_has_no_findings() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();
        fs::write(dir.path().join("tsconfig.json"), "{ // comments allowed\n}").unwrap();
        assert!(messages(dir.path()).is_empty());
    }

    #[test]
    fn missing_manifest_and_src_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let found = messages(dir.path());
        assert_eq!(found, vec!["package.json: missing", "src: source directory is missing"]);
    }

    #[test]
    fn broken_nested_json_is_reported_but_node_modules_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::create_dir_all(dir.path().join("node_modules")).unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();
        fs::write(dir.path().join("src/data.json"), "{ broken").unwrap();
        fs::write(dir.path().join("node_modules/bad.json"), "{ broken").unwrap();

        let found = messages(dir.path());
        assert_eq!(found.len(), 1);
        assert!(found[0].starts_with("src/data.json: invalid JSON"));
    }
}
