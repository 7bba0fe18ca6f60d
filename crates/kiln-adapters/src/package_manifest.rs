//! Non-destructive merging into an existing `package.json`.
//!
//! Upstream scaffolders own the manifest they create; kiln only adds the
//! packages and scripts they do not already declare.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, instrument};

use kiln_core::{application::ApplicationError, error::KilnResult};

use crate::filesystem::map_io_error;
use crate::renderer::to_pretty_json;

pub const MANIFEST_FILE: &str = "package.json";

#[derive(Debug, Error)]
enum ManifestError {
    #[error("file not found")]
    Missing,
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("top level is not an object")]
    NotAnObject,
    #[error("`{0}` is not an object")]
    SectionNotAnObject(&'static str),
}

impl ManifestError {
    fn at(self, path: PathBuf) -> ApplicationError {
        ApplicationError::ManifestMerge {
            path,
            reason: self.to_string(),
        }
    }
}

/// Insert absent `dependencies`, `devDependencies` and `scripts` entries
/// into `dir/package.json`.
///
/// Existing values always win and key order is kept. The file is written
/// at most once, and not at all when every key was already present.
/// Returns the number of inserted keys.
#[instrument(skip_all, fields(dir = %dir.display()))]
pub fn merge_package_manifest(
    dir: &Path,
    dependencies: &[(String, String)],
    dev_dependencies: &[(String, String)],
    scripts: &[(String, String)],
) -> KilnResult<usize> {
    let path = dir.join(MANIFEST_FILE);
    if !path.is_file() {
        return Err(ManifestError::Missing.at(path).into());
    }
    let raw = fs::read_to_string(&path).map_err(|e| map_io_error(&path, e, "read manifest"))?;

    let mut manifest: Value =
        serde_json::from_str(&raw).map_err(|e| ManifestError::from(e).at(path.clone()))?;
    let root = manifest
        .as_object_mut()
        .ok_or_else(|| ManifestError::NotAnObject.at(path.clone()))?;

    let mut inserted = 0;
    for (section, entries) in [
        ("dependencies", dependencies),
        ("devDependencies", dev_dependencies),
        ("scripts", scripts),
    ] {
        inserted += merge_section(root, section, entries).map_err(|e| e.at(path.clone()))?;
    }

    if inserted == 0 {
        debug!("Manifest already complete");
        return Ok(0);
    }

    let out = to_pretty_json(&manifest)?;
    fs::write(&path, out).map_err(|e| map_io_error(&path, e, "write manifest"))?;
    debug!(inserted, "Merged manifest");
    Ok(inserted)
}

fn merge_section(
    root: &mut Map<String, Value>,
    section: &'static str,
    entries: &[(String, String)],
) -> Result<usize, ManifestError> {
    if entries.is_empty() {
        return Ok(0);
    }
    let target = root
        .entry(section)
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or(ManifestError::SectionNotAnObject(section))?;

    let mut inserted = 0;
    for (name, value) in entries {
        if !target.contains_key(name) {
            target.insert(name.clone(), Value::String(value.clone()));
            inserted += 1;
        }
    }
    Ok(inserted)
}
