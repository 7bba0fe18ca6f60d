//! Meta-framework plugins.
//!
//! Each plugin delegates project creation to the framework's own CLI, then
//! layers kiln's selections on top of whatever that CLI generated.

mod astro;
mod nextjs;
mod sveltekit;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use kiln_core::{
    application::{CommandSpec, ProcessRunner, Registry, ScaffoldError, resolve_project_dir},
    domain::{Framework, ProjectConfig},
};

use crate::package_manifest::merge_package_manifest;
use crate::renderer::packages::selection_packages;

pub use astro::AstroGenerator;
pub use nextjs::NextJsGenerator;
pub use sveltekit::SvelteKitGenerator;

/// A registry holding every built-in meta-framework plugin.
pub fn default_registry(runner: Arc<dyn ProcessRunner>) -> Registry {
    Registry::new()
        .with(Box::new(NextJsGenerator::new(Arc::clone(&runner))))
        .with(Box::new(AstroGenerator::new(Arc::clone(&runner))))
        .with(Box::new(SvelteKitGenerator::new(runner)))
}

/// Project directory and the parent the upstream CLI runs in.
fn project_dirs(
    framework: Framework,
    config: &ProjectConfig,
) -> Result<(PathBuf, PathBuf), ScaffoldError> {
    let dir = resolve_project_dir(config).map_err(|e| {
        ScaffoldError::process_failure(framework.as_str(), "resolve project directory", -1, &e.to_string())
    })?;
    let parent = dir
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    Ok((parent, dir))
}

/// Parent directory the upstream CLI runs in, and the directory name it is
/// asked to create there.
fn scaffold_site(
    framework: Framework,
    config: &ProjectConfig,
) -> Result<(PathBuf, String), ScaffoldError> {
    let (parent, dir) = project_dirs(framework, config)?;
    let target = dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| config.project_name().to_string());
    Ok((parent, target))
}

/// `<exec> <package> <args..>` run from `cwd`, e.g. `npx sv create app`.
fn exec_command(config: &ProjectConfig, package: &str, cwd: &Path) -> CommandSpec {
    let (program, lead) = config.package_manager().exec();
    CommandSpec::new(program, cwd)
        .args(lead.iter().copied())
        .arg(package)
}

/// Shared post-scaffold step: merge selection packages, then install.
#[instrument(skip_all, fields(framework = %framework))]
fn merge_and_install(
    runner: &dyn ProcessRunner,
    framework: Framework,
    config: &ProjectConfig,
) -> Result<(), ScaffoldError> {
    let (_, dir) = project_dirs(framework, config)?;
    let packages = selection_packages(config);

    if !packages.is_empty() {
        let inserted = merge_package_manifest(
            &dir,
            &packages.dependencies,
            &packages.dev_dependencies,
            &packages.scripts,
        )
        .map_err(|e| {
            ScaffoldError::process_failure(framework.as_str(), "merge package.json", -1, &e.to_string())
        })?;
        debug!(inserted, "Merged selection packages");
    }

    let install = CommandSpec::new(config.package_manager().binary(), &dir).arg("install");
    runner.run(&install, config.dry_run(), framework.as_str())
}

/// `npm view <package> version` through the runner's probe.
fn latest_version(runner: &dyn ProcessRunner, package: &str) -> Option<String> {
    runner.probe(&CommandSpec::new("npm", ".").args(["view", package, "version"]))
}
