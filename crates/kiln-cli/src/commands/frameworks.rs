//! Implementation of the `kiln frameworks` command.

use std::sync::Arc;

use serde::Serialize;

use kiln_adapters::{SystemProcessRunner, default_registry};
use kiln_core::{
    application::{Registry, ports::ProcessRunner},
    domain::{DataFetching, Framework, Routing, StateManagement, capabilities::find_framework},
};

use crate::{
    cli::{FrameworksArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
};

/// One framework as shown to the user.
#[derive(Debug, Serialize)]
struct FrameworkRow {
    name: &'static str,
    display_name: &'static str,
    meta: bool,
    /// `(axis, values)` the framework accepts beyond the defaults.
    options: Vec<(&'static str, Vec<&'static str>)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    latest: Option<String>,
}

pub fn execute(args: FrameworksArgs, output: OutputManager) -> CliResult<()> {
    let runner: Arc<dyn ProcessRunner> = Arc::new(SystemProcessRunner::new());
    let registry = default_registry(runner);

    let spinner = if args.probe {
        output.spinner("Querying the npm registry...")
    } else {
        indicatif::ProgressBar::hidden()
    };
    let rows = collect_rows(&registry, args.probe);
    spinner.finish_and_clear();

    match args.format {
        ListFormat::Json => output.json(&rows)?,
        _ if output.is_json() => output.json(&rows)?,
        ListFormat::List => {
            for row in &rows {
                println!("{}", row.name);
            }
        }
        ListFormat::Table => {
            output.header("Supported frameworks:")?;
            for row in &rows {
                let kind = if row.meta { "meta" } else { "vite" };
                let version = row
                    .latest
                    .as_deref()
                    .map(|v| format!(" @ {v}"))
                    .unwrap_or_default();
                output.print(&format!(
                    "  {:<10} {:<11} {kind}{version}",
                    row.name, row.display_name
                ))?;
                for (axis, values) in &row.options {
                    output.print(&format!("    {axis}: {}", values.join(", ")))?;
                }
            }
        }
    }

    Ok(())
}

fn collect_rows(registry: &Registry, probe: bool) -> Vec<FrameworkRow> {
    Framework::ALL
        .iter()
        .map(|fw| {
            let plugin = registry.get(*fw);
            FrameworkRow {
                name: fw.as_str(),
                display_name: fw.display_name(),
                meta: fw.is_meta(),
                options: match plugin {
                    Some(plugin) => plugin.supported_options().visible_axes(),
                    None => pairings(*fw),
                },
                latest: plugin.filter(|_| probe).and_then(|p| p.probe_version()),
            }
        })
        .collect()
}

/// Router and library pairings of a built-in framework.
fn pairings(framework: Framework) -> Vec<(&'static str, Vec<&'static str>)> {
    let Some(def) = find_framework(framework) else {
        return Vec::new();
    };
    let mut axes = Vec::new();
    if !def.routers.is_empty() {
        axes.push((Routing::AXIS, def.routers.iter().map(|r| r.as_str()).collect()));
    }
    if !def.state_libraries.is_empty() {
        axes.push((
            StateManagement::AXIS,
            def.state_libraries.iter().map(|s| s.as_str()).collect(),
        ));
    }
    if !def.data_libraries.is_empty() {
        axes.push((
            DataFetching::AXIS,
            def.data_libraries.iter().map(|d| d.as_str()).collect(),
        ));
    }
    axes
}
