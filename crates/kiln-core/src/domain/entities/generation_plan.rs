use std::collections::HashSet;
use std::fmt;

use crate::domain::{entities::common::RelativePath, error::DomainError};

/// One step of the fixed write sequence.
///
/// The declaration order is the write order; rollback walks it backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    Manifest,
    BuildConfig,
    LanguageConfig,
    SourceTree,
    EntryFiles,
    Styling,
    Testing,
    Linting,
}

impl Stage {
    pub const ORDERED: &'static [Stage] = &[
        Stage::Manifest,
        Stage::BuildConfig,
        Stage::LanguageConfig,
        Stage::SourceTree,
        Stage::EntryFiles,
        Stage::Styling,
        Stage::Testing,
        Stage::Linting,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Manifest => "manifest",
            Self::BuildConfig => "build-config",
            Self::LanguageConfig => "language-config",
            Self::SourceTree => "source-tree",
            Self::EntryFiles => "entry-files",
            Self::Styling => "styling",
            Self::Testing => "testing",
            Self::Linting => "linting",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single filesystem artifact produced by the template renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    Directory(RelativePath),
    File { path: RelativePath, content: String },
}

impl Artifact {
    pub fn dir(path: impl Into<RelativePath>) -> Self {
        Self::Directory(path.into())
    }

    pub fn file(path: impl Into<RelativePath>, content: impl Into<String>) -> Self {
        Self::File {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn path(&self) -> &RelativePath {
        match self {
            Self::Directory(path) | Self::File { path, .. } => path,
        }
    }

    pub const fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }
}

/// Everything a non-meta generation run will write, grouped by stage.
///
/// This is the output of the template renderer and the input of the write
/// sequence. It contains no business logic, only data.
#[derive(Debug, Clone, Default)]
pub struct GenerationPlan {
    pub(crate) steps: Vec<(Stage, Vec<Artifact>)>,
}

impl GenerationPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the artifacts of one stage. Empty stages are skipped.
    pub fn push(&mut self, stage: Stage, artifacts: Vec<Artifact>) {
        if !artifacts.is_empty() {
            self.steps.push((stage, artifacts));
        }
    }

    pub fn steps(&self) -> impl Iterator<Item = (Stage, &[Artifact])> {
        self.steps.iter().map(|(s, a)| (*s, a.as_slice()))
    }

    pub fn artifacts(&self) -> impl Iterator<Item = &Artifact> {
        self.steps.iter().flat_map(|(_, a)| a.iter())
    }

    pub fn file_count(&self) -> usize {
        self.artifacts().filter(|a| a.is_file()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Every artifact is written exactly once.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for artifact in self.artifacts() {
            let path = artifact.path();
            if !seen.insert(path.as_path()) {
                return Err(DomainError::DuplicatePath {
                    path: path.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_order_starts_with_manifest() {
        assert_eq!(Stage::ORDERED.first(), Some(&Stage::Manifest));
        assert!(Stage::ORDERED.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn empty_stages_are_dropped() {
        let mut plan = GenerationPlan::new();
        plan.push(Stage::Manifest, vec![Artifact::file("package.json", "{}")]);
        plan.push(Stage::LanguageConfig, vec![]);
        assert_eq!(plan.steps().count(), 1);
        assert_eq!(plan.file_count(), 1);
    }

    #[test]
    fn duplicate_paths_are_rejected() {
        let mut plan = GenerationPlan::new();
        plan.push(Stage::SourceTree, vec![Artifact::dir("src")]);
        plan.push(Stage::EntryFiles, vec![Artifact::dir("src")]);
        assert!(matches!(
            plan.validate(),
            Err(DomainError::DuplicatePath { .. })
        ));
    }

    #[test]
    fn distinct_paths_validate() {
        let mut plan = GenerationPlan::new();
        plan.push(Stage::SourceTree, vec![Artifact::dir("src")]);
        plan.push(Stage::EntryFiles, vec![Artifact::file("src/main.ts", "")]);
        assert!(plan.validate().is_ok());
    }
}
