//! Write sinks: where a generation pass sends its directories and files.
//!
//! One sink is chosen per run. `FilesystemSink` writes through the
//! [`Filesystem`] port and remembers what it created so the run can be
//! undone; `ManifestSink` only records into a [`DryRunManifest`].

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::application::ports::Filesystem;
use crate::domain::DryRunManifest;
use crate::error::KilnResult;

pub(crate) trait Sink {
    fn write_dir(&mut self, path: &Path) -> KilnResult<()>;
    fn write_file(&mut self, path: &Path, content: &str) -> KilnResult<()>;
}

/// Paths created by a real run, in creation order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CreatedPaths(Vec<PathBuf>);

impl CreatedPaths {
    pub fn push(&mut self, path: PathBuf) {
        self.0.push(path);
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Delete every tracked path, newest first. Failures are logged and
    /// skipped.
    pub fn rollback(&self, fs: &dyn Filesystem) {
        for path in self.0.iter().rev() {
            if !fs.exists(path) {
                continue;
            }
            let result = if fs.is_dir(path) {
                fs.remove_dir_all(path)
            } else {
                fs.remove_file(path)
            };
            match result {
                Ok(()) => debug!(path = %path.display(), "Rolled back"),
                Err(e) => warn!(path = %path.display(), error = %e, "Rollback failed"),
            }
        }
    }
}

pub(crate) struct FilesystemSink<'a> {
    fs: &'a dyn Filesystem,
    /// `None` when the project directory pre-existed: nothing is tracked.
    created: Option<&'a mut CreatedPaths>,
}

impl<'a> FilesystemSink<'a> {
    pub(crate) fn new(fs: &'a dyn Filesystem, created: Option<&'a mut CreatedPaths>) -> Self {
        Self { fs, created }
    }

    /// Ancestors of `path` (inclusive) that do not exist yet, outermost
    /// first.
    fn missing_dirs(&self, path: &Path) -> Vec<PathBuf> {
        let mut missing: Vec<PathBuf> = path
            .ancestors()
            .take_while(|p| !p.as_os_str().is_empty() && !self.fs.exists(p))
            .map(Path::to_path_buf)
            .collect();
        missing.reverse();
        missing
    }
}

impl Sink for FilesystemSink<'_> {
    fn write_dir(&mut self, path: &Path) -> KilnResult<()> {
        let missing = self.missing_dirs(path);
        if missing.is_empty() {
            return Ok(());
        }
        self.fs.create_dir_all(path)?;
        if let Some(created) = self.created.as_deref_mut() {
            for dir in missing {
                created.push(dir);
            }
        }
        Ok(())
    }

    fn write_file(&mut self, path: &Path, content: &str) -> KilnResult<()> {
        if let Some(parent) = path.parent() {
            self.write_dir(parent)?;
        }
        let existed = self.fs.exists(path);
        self.fs.write_file(path, content)?;
        if !existed {
            if let Some(created) = self.created.as_deref_mut() {
                created.push(path.to_path_buf());
            }
        }
        Ok(())
    }
}

pub(crate) struct ManifestSink {
    manifest: DryRunManifest,
}

impl ManifestSink {
    pub(crate) fn new(root: &Path) -> Self {
        Self {
            manifest: DryRunManifest::new(root),
        }
    }

    pub(crate) fn into_manifest(self) -> DryRunManifest {
        self.manifest
    }
}

impl Sink for ManifestSink {
    fn write_dir(&mut self, path: &Path) -> KilnResult<()> {
        self.manifest.add_dir(path);
        Ok(())
    }

    fn write_file(&mut self, path: &Path, content: &str) -> KilnResult<()> {
        self.manifest.add_file(path, content);
        Ok(())
    }
}
