use std::path::Path;
use std::sync::Arc;

use tracing::instrument;

use kiln_core::{
    application::{CommandSpec, MetaGenerator, ProcessRunner, ScaffoldError},
    domain::{Framework, OptionMatrix, PackageManager, ProjectConfig, Styling, Testing},
};

use super::{latest_version, merge_and_install, scaffold_site};

const SUPPORTED: OptionMatrix = OptionMatrix {
    styling: Some(&[Styling::Css, Styling::Tailwind, Styling::Sass]),
    testing: Some(&[Testing::None, Testing::Vitest, Testing::Playwright]),
    state_management: None,
    data_fetching: None,
};

/// Astro through `create astro`.
pub struct AstroGenerator {
    runner: Arc<dyn ProcessRunner>,
}

impl AstroGenerator {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self { runner }
    }
}

fn scaffold_command(config: &ProjectConfig, cwd: &Path, target: &str) -> CommandSpec {
    let pm = config.package_manager();
    let mut command = CommandSpec::new(pm.binary(), cwd)
        .args(["create", "astro@latest"])
        .arg(target);
    // npm forwards initializer flags only after `--`.
    if pm == PackageManager::Npm {
        command = command.arg("--");
    }
    command.args([
        "--template",
        "minimal",
        "--no-install",
        "--no-git",
        "--skip-houston",
        "--yes",
    ])
}

impl MetaGenerator for AstroGenerator {
    fn framework(&self) -> Framework {
        Framework::Astro
    }

    #[instrument(skip_all, fields(project = %config.project_name()))]
    fn scaffold(&self, config: &ProjectConfig) -> Result<(), ScaffoldError> {
        let (parent, target) = scaffold_site(Framework::Astro, config)?;
        let command = scaffold_command(config, &parent, &target);
        self.runner.run(&command, config.dry_run(), Framework::Astro.as_str())
    }

    fn post_scaffold(&self, config: &ProjectConfig) -> Result<(), ScaffoldError> {
        merge_and_install(self.runner.as_ref(), Framework::Astro, config)
    }

    fn supported_options(&self) -> OptionMatrix {
        SUPPORTED
    }

    fn probe_version(&self) -> Option<String> {
        latest_version(self.runner.as_ref(), "create-astro")
    }
}
