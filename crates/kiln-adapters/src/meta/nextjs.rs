use std::path::Path;
use std::sync::Arc;

use tracing::instrument;

use kiln_core::{
    application::{CommandSpec, MetaGenerator, ProcessRunner, ScaffoldError},
    domain::{
        DataFetching, Framework, Linting, OptionMatrix, ProjectConfig, StateManagement, Styling,
        Testing,
    },
};

use super::{exec_command, latest_version, merge_and_install, scaffold_site};

const SUPPORTED: OptionMatrix = OptionMatrix {
    styling: Some(&[Styling::Css, Styling::CssModules, Styling::Tailwind]),
    testing: Some(&[Testing::None, Testing::Vitest, Testing::Jest, Testing::Playwright]),
    state_management: Some(&[
        StateManagement::None,
        StateManagement::Zustand,
        StateManagement::Redux,
        StateManagement::Jotai,
    ]),
    data_fetching: Some(&[DataFetching::None, DataFetching::TanStackQuery, DataFetching::Swr]),
};

/// Next.js through `create-next-app`.
pub struct NextJsGenerator {
    runner: Arc<dyn ProcessRunner>,
}

impl NextJsGenerator {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self { runner }
    }
}

fn scaffold_command(config: &ProjectConfig, cwd: &Path, target: &str) -> CommandSpec {
    let flag = |on: bool, yes: &'static str, no: &'static str| if on { yes } else { no };
    exec_command(config, "create-next-app@latest", cwd)
        .arg(target)
        .arg(flag(config.language().is_typescript(), "--ts", "--js"))
        .arg(flag(config.styling() == Styling::Tailwind, "--tailwind", "--no-tailwind"))
        .arg(flag(config.linting() == Linting::Eslint, "--eslint", "--no-eslint"))
        .args(["--app", "--src-dir", "--import-alias", "@/*"])
        .arg(format!("--use-{}", config.package_manager()))
        .args(["--skip-install", "--yes"])
}

impl MetaGenerator for NextJsGenerator {
    fn framework(&self) -> Framework {
        Framework::NextJs
    }

    #[instrument(skip_all, fields(project = %config.project_name()))]
    fn scaffold(&self, config: &ProjectConfig) -> Result<(), ScaffoldError> {
        let (parent, target) = scaffold_site(Framework::NextJs, config)?;
        let command = scaffold_command(config, &parent, &target);
        self.runner.run(&command, config.dry_run(), Framework::NextJs.as_str())
    }

    fn post_scaffold(&self, config: &ProjectConfig) -> Result<(), ScaffoldError> {
        merge_and_install(self.runner.as_ref(), Framework::NextJs, config)
    }

    fn supported_options(&self) -> OptionMatrix {
        SUPPORTED
    }

    fn probe_version(&self) -> Option<String> {
        latest_version(self.runner.as_ref(), "create-next-app")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::domain::{Language, PackageManager};

    #[test]
    fn typescript_tailwind_npm_command() {
        let config = ProjectConfig::builder("shop")
            .project_path("/work/shop")
            .framework(Framework::NextJs)
            .styling(Styling::Tailwind)
            .build()
            .unwrap();
        let cmd = scaffold_command(&config, Path::new("/work"), "shop");
        assert_eq!(
            cmd.to_string(),
            "npx create-next-app@latest shop --ts --tailwind --eslint --app --src-dir \
             --import-alias @/* --use-npm --skip-install --yes"
        );
        assert_eq!(cmd.cwd, Path::new("/work"));
    }

    #[test]
    fn javascript_pnpm_without_lint() {
        let config = ProjectConfig::builder("shop")
            .language(Language::JavaScript)
            .package_manager(PackageManager::Pnpm)
            .framework(Framework::NextJs)
            .linting(Linting::None)
            .build()
            .unwrap();
        let line = scaffold_command(&config, Path::new("."), "shop").to_string();
        assert!(line.starts_with("pnpm dlx create-next-app@latest shop --js --no-tailwind --no-eslint"));
        assert!(line.contains("--use-pnpm"));
    }

    #[test]
    fn every_option_axis_is_visible() {
        assert_eq!(SUPPORTED.visible_axes().len(), 4);
    }
}
