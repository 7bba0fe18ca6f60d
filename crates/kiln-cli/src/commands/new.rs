//! Implementation of the `kiln new` command.
//!
//! Responsibility: turn flags and configured defaults into a
//! `ProjectConfig`, wire the adapters, run the generator and display the
//! result. No generation logic lives here.

use std::io::IsTerminal as _;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use kiln_adapters::{
    BasicValidator, BuiltinRenderer, LocalFilesystem, SystemPreflight, SystemProcessRunner,
    default_registry,
};
use kiln_core::{
    application::{GenerationMode, GenerationReport, Generator, resolve_project_dir},
    application::ports::{Preflight, ProcessRunner},
    domain::{
        DataFetching, Framework, Language, Linting, PackageManager, ProjectConfig, Routing,
        StateManagement, Structure, Styling, Testing, ValidationFinding, validate_project_name,
    },
    error::KilnError,
};

use crate::{
    cli::NewArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `kiln new` command.
///
/// 1. Validate the name, resolve every option and check it against the
///    meta-framework plugin
/// 2. Refuse a non-empty target directory unless `--here`
/// 3. Check the environment (skipped for dry runs)
/// 4. Confirm on an interactive terminal
/// 5. Generate, then print the tree or the next steps
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(args: NewArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    validate_project_name(&args.name).map_err(KilnError::from)?;

    let project = build_config(&args, &config)?;
    debug!(config = %project, "Options resolved");

    let runner: Arc<dyn ProcessRunner> = Arc::new(SystemProcessRunner::with_timeout(
        Duration::from_secs(config.generation.timeout_secs),
    ));
    let registry = default_registry(Arc::clone(&runner));

    // Unsupported plugin options fail before preflight.
    if let Some(plugin) = registry.get(project.framework()) {
        plugin
            .supported_options()
            .check(&project)
            .map_err(KilnError::from)?;
    }

    let project_path = resolve_project_dir(&project)?;
    if !args.here {
        ensure_free(&project_path)?;
    }

    if !project.dry_run() && !args.skip_preflight && !config.generation.skip_preflight {
        preflight(&project, Arc::clone(&runner), &output)?;
    }

    if should_confirm(&args, &output) {
        show_configuration(&project, &project_path, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    let generator = Generator::new(
        Box::new(BuiltinRenderer::new()),
        Box::new(LocalFilesystem::new()),
        Box::new(BasicValidator::new()),
        &registry,
    )
    .with_runner(Arc::clone(&runner));

    let verb = if project.dry_run() { "Planning" } else { "Creating" };
    let spinner = output.spinner(&format!("{verb} '{}'...", project.project_name()));
    let result = generator.generate(&project);
    spinner.finish_and_clear();
    let report = result?;

    info!(
        path = %report.project_path.display(),
        files = report.files,
        "Generation finished"
    );

    if output.is_json() {
        output.json(&Summary::from_report(&project, &report))?;
        return Ok(());
    }

    present(&project, &report, &output)
}

// ── Option resolution ─────────────────────────────────────────────────────────

/// Flags win; anything unset comes from the `[defaults]` table. Axes with
/// no configured default fall back to the core default.
pub fn build_config(args: &NewArgs, config: &AppConfig) -> CliResult<ProjectConfig> {
    let defaults = &config.defaults;

    let framework: Framework = pick(args.framework.as_deref(), &defaults.framework)?;
    let language: Language = pick(args.language.as_deref(), &defaults.language)?;
    let package_manager: PackageManager =
        pick(args.package_manager.as_deref(), &defaults.package_manager)?;

    let mut builder = ProjectConfig::builder(&args.name)
        .language(language)
        .package_manager(package_manager)
        .dry_run(args.dry_run)
        .no_scaffold(args.no_scaffold)
        .framework(framework)
        .styling(pick::<Styling>(args.styling.as_deref(), &defaults.styling)?)
        .testing(pick::<Testing>(args.testing.as_deref(), &defaults.testing)?)
        .linting(pick::<Linting>(args.linting.as_deref(), &defaults.linting)?)
        .structure(pick::<Structure>(args.structure.as_deref(), &defaults.structure)?);

    if let Some(routing) = args.routing.as_deref() {
        builder = builder.routing(parse::<Routing>(routing)?);
    }
    if let Some(state) = args.state_management.as_deref() {
        builder = builder.state_management(parse::<StateManagement>(state)?);
    }
    if let Some(data) = args.data_fetching.as_deref() {
        builder = builder.data_fetching(parse::<DataFetching>(data)?);
    }

    Ok(builder.build().map_err(KilnError::from)?)
}

fn pick<T>(flag: Option<&str>, default: &str) -> CliResult<T>
where
    T: FromStr<Err = kiln_core::domain::DomainError>,
{
    parse(flag.unwrap_or(default))
}

fn parse<T>(value: &str) -> CliResult<T>
where
    T: FromStr<Err = kiln_core::domain::DomainError>,
{
    Ok(value.parse::<T>().map_err(KilnError::from)?)
}

// ── Pre-generation checks ─────────────────────────────────────────────────────

fn ensure_free(path: &Path) -> CliResult<()> {
    if !path.exists() {
        return Ok(());
    }
    let occupied = !path.is_dir()
        || std::fs::read_dir(path)
            .map_err(|e| CliError::IoError {
                message: format!("cannot read {}", path.display()),
                source: e,
            })?
            .next()
            .is_some();
    if occupied {
        return Err(CliError::ProjectExists {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn preflight(
    project: &ProjectConfig,
    runner: Arc<dyn ProcessRunner>,
    output: &OutputManager,
) -> CliResult<()> {
    let report = SystemPreflight::new(runner).run_all_checks(project);

    for check in report.checks.iter().filter(|c| !c.passed && !c.fatal) {
        warn!(check = %check.name, "{}", check.message);
        output.warning(&format!("{}: {}", check.name, check.message))?;
    }

    if report.fatal_error {
        return Err(CliError::PreflightFailed {
            failed: report
                .blocking()
                .map(|c| format!("{}: {}", c.name, c.message))
                .collect(),
        });
    }
    Ok(())
}

fn should_confirm(args: &NewArgs, output: &OutputManager) -> bool {
    !args.yes
        && !args.dry_run
        && !output.is_quiet()
        && !output.is_json()
        && std::io::stdin().is_terminal()
}

fn show_configuration(
    project: &ProjectConfig,
    path: &Path,
    out: &OutputManager,
) -> CliResult<()> {
    out.header("Configuration")?;
    out.print(&format!("  Project:         {}", project.project_name()))?;
    out.print(&format!("  Framework:       {}", project.framework().display_name()))?;
    out.print(&format!("  Language:        {}", project.language()))?;
    out.print(&format!("  Package manager: {}", project.package_manager()))?;
    out.print(&format!("  Styling:         {}", project.styling()))?;
    if !project.routing().is_default() {
        out.print(&format!("  Routing:         {}", project.routing()))?;
    }
    if !project.state_management().is_default() {
        out.print(&format!("  State:           {}", project.state_management()))?;
    }
    if !project.data_fetching().is_default() {
        out.print(&format!("  Data fetching:   {}", project.data_fetching()))?;
    }
    out.print(&format!("  Testing:         {}", project.testing()))?;
    out.print(&format!("  Linting:         {}", project.linting()))?;
    out.print(&format!("  Location:        {}", path.display()))?;
    out.print("")?;
    Ok(())
}

#[cfg(feature = "interactive")]
fn confirm() -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt("Continue?")
        .default(true)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm() -> CliResult<bool> {
    use std::io::{self, Write};

    print!("Continue? [Y/n] ");
    io::stdout().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stdout".into(),
        source: e,
    })?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}

// ── Results ───────────────────────────────────────────────────────────────────

fn present(
    project: &ProjectConfig,
    report: &GenerationReport,
    out: &OutputManager,
) -> CliResult<()> {
    let name = project.project_name();
    match report.mode {
        GenerationMode::DryRun => {
            match &report.manifest {
                Some(manifest) => {
                    out.header(&format!("Dry run: '{name}' would be created"))?;
                    out.print("")?;
                    out.block(&manifest.render())?;
                }
                None => {
                    out.info(&format!("Dry run: nothing was executed for '{name}'"))?;
                    for command in &report.commands {
                        out.print(&format!("would run: {command}"))?;
                    }
                }
            }
            return Ok(());
        }
        GenerationMode::Written => {
            out.success(&format!("Created '{name}' ({} files)", report.files))?;
        }
        GenerationMode::Delegated => {
            out.success(&format!(
                "Created '{name}' with the {} scaffolder",
                project.framework().display_name()
            ))?;
        }
    }

    for finding in &report.findings {
        out.warning(&finding.to_string())?;
    }

    out.print("")?;
    out.print("Next steps:")?;
    for step in next_steps(project, report.mode) {
        out.print(&format!("  {step}"))?;
    }
    Ok(())
}

fn next_steps(project: &ProjectConfig, mode: GenerationMode) -> Vec<String> {
    let pm = project.package_manager();
    let mut steps = vec![format!("cd {}", project.project_name())];
    if mode == GenerationMode::Written {
        steps.push(format!("{} install", pm.binary()));
    }
    steps.push(pm.run_script("dev"));
    steps
}

/// Machine-readable outcome for `--output-format json`.
#[derive(Debug, Serialize)]
struct Summary<'a> {
    project: &'a str,
    framework: Framework,
    path: String,
    mode: &'static str,
    files: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    tree: Option<Vec<String>>,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    commands: &'a [String],
    findings: &'a [ValidationFinding],
}

impl<'a> Summary<'a> {
    fn from_report(project: &'a ProjectConfig, report: &'a GenerationReport) -> Self {
        Self {
            project: project.project_name(),
            framework: project.framework(),
            path: report.project_path.display().to_string(),
            mode: match report.mode {
                GenerationMode::DryRun => "dry-run",
                GenerationMode::Written => "written",
                GenerationMode::Delegated => "delegated",
            },
            files: report.files,
            tree: report.manifest.as_ref().map(|m| {
                m.entries()
                    .iter()
                    .filter(|e| !e.is_dir)
                    .map(|e| e.path.display().to_string())
                    .collect()
            }),
            commands: &report.commands,
            findings: &report.findings,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
