//! Generator - the generation orchestrator.
//!
//! This service drives one generation run:
//! 1. Resolve the project directory
//! 2. Delegate to a meta-framework plugin, or render and write the
//!    built-in plan stage by stage through a sink
//! 3. Validate the result (real, non-meta runs)
//!
//! Any failure of a real run removes everything the run created.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::registry::Registry;
use super::sink::{CreatedPaths, FilesystemSink, ManifestSink, Sink};
use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, ProcessRunner, ProjectValidator, TemplateRenderer},
    },
    domain::{
        Artifact, DomainValidator, DryRunManifest, GenerationPlan, ProjectConfig,
        Stage, ValidationFinding,
    },
    error::{Context, KilnError, KilnResult},
};

/// How a successful run produced its project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// Nothing was written.
    DryRun,
    /// Files were written from the built-in templates.
    Written,
    /// An upstream scaffolder generated the project.
    Delegated,
}

/// Outcome of a successful [`Generator::generate`] call.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub project_path: PathBuf,
    pub mode: GenerationMode,
    /// Files written, or recorded in dry-run. Zero for delegated runs.
    pub files: usize,
    /// Present for dry runs of built-in frameworks.
    pub manifest: Option<DryRunManifest>,
    /// Commands a meta-framework dry run would have executed.
    pub commands: Vec<String>,
    pub findings: Vec<ValidationFinding>,
}

/// Resolve where `config`'s project lives: the explicit path, or
/// `<cwd>/<name>`.
pub fn resolve_project_dir(config: &ProjectConfig) -> KilnResult<PathBuf> {
    match config.project_path() {
        Some(path) => Ok(path.to_path_buf()),
        None => {
            let cwd = std::env::current_dir().context("Cannot read the working directory")?;
            Ok(cwd.join(config.project_name()))
        }
    }
}

/// Main generation service.
///
/// Holds the collaborators for one or more runs. The registry is borrowed
/// and only read.
pub struct Generator<'r> {
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
    validator: Box<dyn ProjectValidator>,
    registry: &'r Registry,
    runner: Option<Arc<dyn ProcessRunner>>,
}

impl<'r> Generator<'r> {
    pub fn new(
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
        validator: Box<dyn ProjectValidator>,
        registry: &'r Registry,
    ) -> Self {
        Self {
            renderer,
            filesystem,
            validator,
            registry,
            runner: None,
        }
    }

    /// Attach the runner the registry's plugins share, so dry runs can
    /// report the commands they skipped.
    pub fn with_runner(mut self, runner: Arc<dyn ProcessRunner>) -> Self {
        self.runner = Some(runner);
        self
    }

    /// Generate the project described by `config`.
    #[instrument(
        skip_all,
        fields(
            project = %config.project_name(),
            framework = %config.framework(),
            dry_run = config.dry_run()
        )
    )]
    pub fn generate(&self, config: &ProjectConfig) -> KilnResult<GenerationReport> {
        DomainValidator::validate_config(config)?;
        if config.framework().is_meta() {
            if let Some(plugin) = self.registry.get(config.framework()) {
                DomainValidator::validate_options(&plugin.supported_options(), config)?;
            }
        }

        let root = resolve_project_dir(config)?;
        info!(path = %root.display(), "Generating {}", config);

        if config.dry_run() {
            return self.dry_run(config, root);
        }

        let dir_existed = self.filesystem.exists(&root);
        let mut created = CreatedPaths::default();

        match self.run(config, &root, dir_existed, &mut created) {
            Ok(report) => {
                info!(files = report.files, "Generation completed successfully");
                Ok(report)
            }
            Err(e) => {
                warn!(error = %e, tracked = created.as_slice().len(), "Generation failed, rolling back");
                created.rollback(self.filesystem.as_ref());
                Err(note_rollback(e, !dir_existed))
            }
        }
    }

    /// Render every stage and check the plan before anything is written.
    pub fn plan(&self, config: &ProjectConfig) -> KilnResult<GenerationPlan> {
        let mut plan = GenerationPlan::new();
        for stage in Stage::ORDERED {
            plan.push(*stage, self.renderer.render(config, *stage)?);
        }
        DomainValidator::validate_plan(&plan)?;
        Ok(plan)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn dry_run(&self, config: &ProjectConfig, root: PathBuf) -> KilnResult<GenerationReport> {
        if config.framework().is_meta() {
            self.registry.run_meta_scaffold(config)?;
            let commands = self
                .runner
                .as_ref()
                .map(|r| r.recorded_commands())
                .unwrap_or_default();
            return Ok(GenerationReport {
                project_path: root,
                mode: GenerationMode::DryRun,
                files: 0,
                manifest: None,
                commands,
                findings: Vec::new(),
            });
        }

        let plan = self.plan(config)?;
        let mut sink = ManifestSink::new(&root);
        write_plan(&plan, &root, &mut sink)?;
        let manifest = sink.into_manifest();

        Ok(GenerationReport {
            project_path: root,
            mode: GenerationMode::DryRun,
            files: manifest.file_count(),
            manifest: Some(manifest),
            commands: Vec::new(),
            findings: Vec::new(),
        })
    }

    fn run(
        &self,
        config: &ProjectConfig,
        root: &Path,
        dir_existed: bool,
        created: &mut CreatedPaths,
    ) -> KilnResult<GenerationReport> {
        if !dir_existed {
            self.filesystem.create_dir_all(root)?;
            created.push(root.to_path_buf());
        }

        if config.framework().is_meta() {
            self.registry.run_meta_scaffold(config)?;
            return Ok(GenerationReport {
                project_path: root.to_path_buf(),
                mode: GenerationMode::Delegated,
                files: 0,
                manifest: None,
                commands: Vec::new(),
                findings: Vec::new(),
            });
        }

        let plan = self.plan(config)?;
        let tracked = (!dir_existed).then_some(created);
        let mut sink = FilesystemSink::new(self.filesystem.as_ref(), tracked);
        write_plan(&plan, root, &mut sink)?;

        let findings = self.validator.validate(root, config);
        for finding in &findings {
            warn!(%finding, "Validation finding");
        }

        Ok(GenerationReport {
            project_path: root.to_path_buf(),
            mode: GenerationMode::Written,
            files: plan.file_count(),
            manifest: None,
            commands: Vec::new(),
            findings,
        })
    }
}

fn write_plan(plan: &GenerationPlan, root: &Path, sink: &mut dyn Sink) -> KilnResult<()> {
    for (stage, artifacts) in plan.steps() {
        info!(%stage, artifacts = artifacts.len(), "Writing stage");
        for artifact in artifacts {
            let path = artifact.path().under(root);
            let result = match artifact {
                Artifact::Directory(_) => sink.write_dir(&path),
                Artifact::File { content, .. } => sink.write_file(&path, content),
            };
            result.map_err(|e| stage_failure(stage, artifact, e))?;
        }
    }
    Ok(())
}

fn stage_failure(stage: Stage, artifact: &Artifact, cause: KilnError) -> KilnError {
    ApplicationError::Generation {
        stage,
        message: format!("cannot write {}", artifact.path()),
        cause: Some(Box::new(cause)),
        rolled_back: false,
    }
    .into()
}

fn note_rollback(err: KilnError, removed: bool) -> KilnError {
    match err {
        KilnError::Application(ApplicationError::Generation {
            stage,
            message,
            cause,
            ..
        }) => ApplicationError::Generation {
            stage,
            message,
            cause,
            rolled_back: removed,
        }
        .into(),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ScaffoldError;
    use crate::application::ports::{
        MockFilesystem, MockMetaGenerator, MockProcessRunner, MockProjectValidator,
        MockTemplateRenderer,
    };
    use crate::domain::{Framework, OptionMatrix, Styling};
    use std::sync::{Arc, Mutex};

    const ROOT: &str = "/work/my-app";

    fn react(dry_run: bool) -> ProjectConfig {
        ProjectConfig::builder("my-app")
            .project_path(ROOT)
            .framework(Framework::React)
            .dry_run(dry_run)
            .build()
            .unwrap()
    }

    fn renderer() -> MockTemplateRenderer {
        let mut mock = MockTemplateRenderer::new();
        mock.expect_render().returning(|_, stage| {
            Ok(match stage {
                Stage::Manifest => vec![Artifact::file("package.json", "{}")],
                Stage::SourceTree => vec![Artifact::dir("public"), Artifact::dir("src")],
                Stage::EntryFiles => vec![Artifact::file("src/main.tsx", "main")],
                _ => vec![],
            })
        });
        mock
    }

    fn quiet_validator() -> MockProjectValidator {
        let mut mock = MockProjectValidator::new();
        mock.expect_validate().returning(|_, _| vec![]);
        mock
    }

    #[test]
    fn dry_run_records_plan_without_touching_filesystem() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().never();
        fs.expect_create_dir_all().never();
        fs.expect_write_file().never();
        let mut validator = MockProjectValidator::new();
        validator.expect_validate().never();

        let registry = Registry::new();
        let generator = Generator::new(
            Box::new(renderer()),
            Box::new(fs),
            Box::new(validator),
            &registry,
        );
        let report = generator.generate(&react(true)).unwrap();

        assert_eq!(report.mode, GenerationMode::DryRun);
        assert_eq!(report.files, 2);
        let manifest = report.manifest.unwrap();
        assert!(manifest.render().starts_with("my-app/\n├── public/\n├── src/"));
    }

    #[test]
    fn write_failure_rolls_back_created_paths() {
        let existing: Arc<Mutex<Vec<PathBuf>>> = Arc::default();
        let mut fs = MockFilesystem::new();
        {
            let existing = Arc::clone(&existing);
            fs.expect_exists()
                .returning(move |p| existing.lock().unwrap().iter().any(|e| e == p));
        }
        {
            let existing = Arc::clone(&existing);
            fs.expect_create_dir_all().returning(move |p| {
                existing.lock().unwrap().push(p.to_path_buf());
                Ok(())
            });
        }
        {
            let existing = Arc::clone(&existing);
            fs.expect_write_file().returning(move |p, _| {
                if p.ends_with("main.tsx") {
                    return Err(KilnError::Internal {
                        message: "disk full".into(),
                    });
                }
                existing.lock().unwrap().push(p.to_path_buf());
                Ok(())
            });
        }
        fs.expect_is_dir().returning(|p| p.extension().is_none());
        fs.expect_remove_file()
            .withf(|p| p == Path::new("/work/my-app/package.json"))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_remove_dir_all().times(3).returning(|_| Ok(()));

        let registry = Registry::new();
        let generator = Generator::new(
            Box::new(renderer()),
            Box::new(fs),
            Box::new(quiet_validator()),
            &registry,
        );
        let err = generator.generate(&react(false)).unwrap_err();
        assert!(matches!(
            err,
            KilnError::Application(ApplicationError::Generation {
                stage: Stage::EntryFiles,
                rolled_back: true,
                ..
            })
        ));
    }

    #[test]
    fn existing_directory_is_never_removed() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_write_file().returning(|p, _| {
            if p.ends_with("main.tsx") {
                Err(KilnError::Internal {
                    message: "denied".into(),
                })
            } else {
                Ok(())
            }
        });
        fs.expect_remove_dir_all().never();
        fs.expect_remove_file().never();

        let registry = Registry::new();
        let generator = Generator::new(
            Box::new(renderer()),
            Box::new(fs),
            Box::new(quiet_validator()),
            &registry,
        );
        let err = generator.generate(&react(false)).unwrap_err();
        assert!(matches!(
            err,
            KilnError::Application(ApplicationError::Generation {
                rolled_back: false,
                ..
            })
        ));
        assert!(err.suggestions()[0].contains("left in place"));
    }

    #[test]
    fn validation_findings_are_reported_not_fatal() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));
        let mut validator = MockProjectValidator::new();
        validator
            .expect_validate()
            .times(1)
            .returning(|root, _| vec![ValidationFinding::new(root.join("src"), "missing")]);

        let registry = Registry::new();
        let generator =
            Generator::new(Box::new(renderer()), Box::new(fs), Box::new(validator), &registry);
        let report = generator.generate(&react(false)).unwrap();

        assert_eq!(report.mode, GenerationMode::Written);
        assert_eq!(report.files, 2);
        assert_eq!(report.findings.len(), 1);
    }

    #[test]
    fn meta_failure_removes_created_root() {
        let root_created = Arc::new(Mutex::new(false));
        let mut fs = MockFilesystem::new();
        {
            let root_created = Arc::clone(&root_created);
            fs.expect_exists()
                .returning(move |_| *root_created.lock().unwrap());
        }
        {
            let root_created = Arc::clone(&root_created);
            fs.expect_create_dir_all().times(1).returning(move |_| {
                *root_created.lock().unwrap() = true;
                Ok(())
            });
        }
        fs.expect_is_dir().returning(|_| true);
        fs.expect_remove_dir_all()
            .withf(|p| p == Path::new("/work/site"))
            .times(1)
            .returning(|_| Ok(()));

        let mut plugin = MockMetaGenerator::new();
        plugin.expect_framework().return_const(Framework::Astro);
        plugin.expect_supported_options().return_const(OptionMatrix::hidden());
        plugin.expect_scaffold().returning(|_| {
            Err(ScaffoldError::process_failure("astro", "npm create astro@latest", 1, "E404"))
        });
        plugin.expect_post_scaffold().never();

        let registry = Registry::new().with(Box::new(plugin));
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().never();
        let generator =
            Generator::new(Box::new(renderer), Box::new(fs), Box::new(quiet_validator()), &registry);

        let config = ProjectConfig::builder("site")
            .project_path("/work/site")
            .framework(Framework::Astro)
            .build()
            .unwrap();
        let err = generator.generate(&config).unwrap_err();
        assert_eq!(err.as_scaffold().map(|e| e.exit_code), Some(1));
    }

    #[test]
    fn unsupported_meta_option_is_rejected_before_any_write() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().never();

        let mut plugin = MockMetaGenerator::new();
        plugin.expect_framework().return_const(Framework::Astro);
        plugin.expect_supported_options().return_const(OptionMatrix {
            styling: Some(&[Styling::Css]),
            ..OptionMatrix::hidden()
        });
        plugin.expect_scaffold().never();

        let registry = Registry::new().with(Box::new(plugin));
        let generator = Generator::new(
            Box::new(MockTemplateRenderer::new()),
            Box::new(fs),
            Box::new(quiet_validator()),
            &registry,
        );
        let config = ProjectConfig::builder("site")
            .project_path("/work/site")
            .framework(Framework::Astro)
            .styling(Styling::Tailwind)
            .build()
            .unwrap();
        assert!(matches!(generator.generate(&config), Err(KilnError::Domain(_))));
    }

    #[test]
    fn meta_dry_run_reports_recorded_commands() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().never();

        let mut plugin = MockMetaGenerator::new();
        plugin.expect_framework().return_const(Framework::Astro);
        plugin.expect_supported_options().return_const(OptionMatrix::hidden());
        plugin.expect_scaffold().times(1).returning(|_| Ok(()));
        plugin.expect_post_scaffold().never();

        let mut runner = MockProcessRunner::new();
        runner
            .expect_recorded_commands()
            .times(1)
            .returning(|| vec!["npm create astro@latest site".into()]);

        let registry = Registry::new().with(Box::new(plugin));
        let generator = Generator::new(
            Box::new(MockTemplateRenderer::new()),
            Box::new(fs),
            Box::new(quiet_validator()),
            &registry,
        )
        .with_runner(Arc::new(runner));

        let config = ProjectConfig::builder("site")
            .project_path("/work/site")
            .framework(Framework::Astro)
            .dry_run(true)
            .build()
            .unwrap();
        let report = generator.generate(&config).unwrap();
        assert_eq!(report.mode, GenerationMode::DryRun);
        assert_eq!(report.commands, vec!["npm create astro@latest site"]);
    }
}
