use std::path::Path;
use std::sync::Arc;

use tracing::instrument;

use kiln_core::{
    application::{CommandSpec, MetaGenerator, ProcessRunner, ScaffoldError},
    domain::{DataFetching, Framework, OptionMatrix, ProjectConfig, Styling, Testing},
};

use super::{exec_command, latest_version, merge_and_install, scaffold_site};

const SUPPORTED: OptionMatrix = OptionMatrix {
    styling: Some(&[Styling::Css, Styling::Tailwind, Styling::Sass]),
    testing: Some(&[Testing::None, Testing::Vitest, Testing::Playwright]),
    state_management: None,
    data_fetching: Some(&[DataFetching::None, DataFetching::TanStackQuery]),
};

/// SvelteKit through the `sv` CLI.
pub struct SvelteKitGenerator {
    runner: Arc<dyn ProcessRunner>,
}

impl SvelteKitGenerator {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self { runner }
    }
}

fn scaffold_command(config: &ProjectConfig, cwd: &Path, target: &str) -> CommandSpec {
    let types = if config.language().is_typescript() { "ts" } else { "jsdoc" };
    exec_command(config, "sv", cwd)
        .arg("create")
        .arg(target)
        .args(["--template", "minimal", "--types", types])
        .args(["--no-add-ons", "--no-install"])
}

impl MetaGenerator for SvelteKitGenerator {
    fn framework(&self) -> Framework {
        Framework::SvelteKit
    }

    #[instrument(skip_all, fields(project = %config.project_name()))]
    fn scaffold(&self, config: &ProjectConfig) -> Result<(), ScaffoldError> {
        let (parent, target) = scaffold_site(Framework::SvelteKit, config)?;
        let command = scaffold_command(config, &parent, &target);
        self.runner.run(&command, config.dry_run(), Framework::SvelteKit.as_str())
    }

    fn post_scaffold(&self, config: &ProjectConfig) -> Result<(), ScaffoldError> {
        merge_and_install(self.runner.as_ref(), Framework::SvelteKit, config)
    }

    fn supported_options(&self) -> OptionMatrix {
        SUPPORTED
    }

    fn probe_version(&self) -> Option<String> {
        latest_version(self.runner.as_ref(), "sv")
    }
}
