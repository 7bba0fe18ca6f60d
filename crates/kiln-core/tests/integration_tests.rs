//! Integration tests for kiln-core, driven through the public API with
//! in-test port implementations.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use kiln_core::{
    application::ports::{Filesystem, ProjectValidator, TemplateRenderer},
    domain::{Artifact, Stage, ValidationFinding},
    prelude::*,
};

#[derive(Default)]
struct FakeFs {
    // path -> Some(content) for files, None for directories
    entries: Mutex<BTreeMap<PathBuf, Option<String>>>,
}

impl Filesystem for &'static FakeFs {
    fn create_dir_all(&self, path: &Path) -> KilnResult<()> {
        let mut entries = self.entries.lock().unwrap();
        for dir in path.ancestors().filter(|p| !p.as_os_str().is_empty()) {
            entries.entry(dir.to_path_buf()).or_insert(None);
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> KilnResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), Some(content.to_string()));
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> KilnResult<String> {
        self.entries
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .flatten()
            .ok_or_else(|| KilnError::Internal {
                message: format!("no file {}", path.display()),
            })
    }

    fn exists(&self, path: &Path) -> bool {
        self.entries.lock().unwrap().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.entries.lock().unwrap().get(path), Some(None))
    }

    fn remove_file(&self, path: &Path) -> KilnResult<()> {
        self.entries.lock().unwrap().remove(path);
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> KilnResult<()> {
        self.entries.lock().unwrap().retain(|p, _| !p.starts_with(path));
        Ok(())
    }
}

struct TwoFileRenderer;

impl TemplateRenderer for TwoFileRenderer {
    fn render(&self, config: &ProjectConfig, stage: Stage) -> KilnResult<Vec<Artifact>> {
        Ok(match stage {
            Stage::Manifest => vec![Artifact::file(
                "package.json",
                format!("{{\"name\":\"{}\"}}", config.project_name()),
            )],
            Stage::SourceTree => vec![Artifact::dir("src")],
            Stage::EntryFiles => vec![Artifact::file("src/main.ts", "console.log(1)")],
            _ => vec![],
        })
    }
}

struct NoFindings;

impl ProjectValidator for NoFindings {
    fn validate(&self, _root: &Path, _config: &ProjectConfig) -> Vec<ValidationFinding> {
        vec![]
    }
}

fn leak_fs() -> &'static FakeFs {
    Box::leak(Box::default())
}

fn config(framework: Framework, dry_run: bool) -> ProjectConfig {
    ProjectConfig::builder("demo")
        .project_path("/out/demo")
        .framework(framework)
        .dry_run(dry_run)
        .build()
        .unwrap()
}

#[test]
fn dry_run_and_real_run_agree_on_file_count() {
    let registry = Registry::new();

    let dry_fs = leak_fs();
    let dry = Generator::new(
        Box::new(TwoFileRenderer),
        Box::new(dry_fs),
        Box::new(NoFindings),
        &registry,
    )
    .generate(&config(Framework::Vanilla, true))
    .unwrap();
    assert!(dry_fs.entries.lock().unwrap().is_empty());

    let real_fs = leak_fs();
    let real = Generator::new(
        Box::new(TwoFileRenderer),
        Box::new(real_fs),
        Box::new(NoFindings),
        &registry,
    )
    .generate(&config(Framework::Vanilla, false))
    .unwrap();

    assert_eq!(dry.mode, GenerationMode::DryRun);
    assert_eq!(real.mode, GenerationMode::Written);
    assert_eq!(dry.files, real.files);
    assert_eq!(
        real_fs
            .read_to_string(Path::new("/out/demo/package.json"))
            .unwrap(),
        "{\"name\":\"demo\"}"
    );
}

#[test]
fn unregistered_meta_framework_reports_registry_miss_and_cleans_up() {
    let registry = Registry::new();
    let fs = leak_fs();
    let err = Generator::new(
        Box::new(TwoFileRenderer),
        Box::new(fs),
        Box::new(NoFindings),
        &registry,
    )
    .generate(&config(Framework::SvelteKit, false))
    .unwrap_err();

    let scaffold = err.as_scaffold().expect("scaffold error");
    assert_eq!(scaffold.exit_code, -1);
    assert!(scaffold.command.is_empty());
    assert!(!fs.exists(Path::new("/out/demo")));
}

#[test]
fn dry_run_tree_lists_directories_first() {
    let registry = Registry::new();
    let report = Generator::new(
        Box::new(TwoFileRenderer),
        Box::new(leak_fs()),
        Box::new(NoFindings),
        &registry,
    )
    .generate(&config(Framework::Vanilla, true))
    .unwrap();

    let tree = report.manifest.unwrap().render();
    assert_eq!(
        tree,
        "demo/\n├── src/\n│   └── main.ts\n└── package.json\n\n2 files\n"
    );
}
