//! Meta-framework plugin registry and dispatch.

use std::collections::BTreeMap;

use tracing::{debug, info, instrument};

use crate::application::{ScaffoldError, ports::MetaGenerator};
use crate::domain::{Framework, ProjectConfig};

/// Maps each meta framework to the plugin that generates it.
///
/// Built once at startup, then only read. Registering a second plugin for
/// the same framework replaces the first.
#[derive(Default)]
pub struct Registry {
    generators: BTreeMap<Framework, Box<dyn MetaGenerator>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, generator: Box<dyn MetaGenerator>) {
        let framework = generator.framework();
        debug!(%framework, "Registering meta generator");
        self.generators.insert(framework, generator);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, generator: Box<dyn MetaGenerator>) -> Self {
        self.register(generator);
        self
    }

    pub fn get(&self, framework: Framework) -> Option<&dyn MetaGenerator> {
        self.generators.get(&framework).map(|g| &**g)
    }

    pub fn contains(&self, framework: Framework) -> bool {
        self.generators.contains_key(&framework)
    }

    /// Registered frameworks, in declaration order.
    pub fn frameworks(&self) -> impl Iterator<Item = Framework> + '_ {
        self.generators.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Run the two-phase plugin sequence for `config.framework()`.
    ///
    /// Scaffold is skipped under `no_scaffold`; post-scaffold is skipped
    /// under `dry_run` and never runs after a failed scaffold.
    #[instrument(skip_all, fields(framework = %config.framework()))]
    pub fn run_meta_scaffold(&self, config: &ProjectConfig) -> Result<(), ScaffoldError> {
        let framework = config.framework();
        let Some(generator) = self.get(framework) else {
            return Err(ScaffoldError::registry_miss(framework.as_str()));
        };

        if config.no_scaffold() {
            info!("Skipping upstream scaffold");
        } else {
            generator.scaffold(config)?;
        }

        if config.dry_run() {
            return Ok(());
        }

        generator.post_scaffold(config)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.generators.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockMetaGenerator;
    use mockall::Sequence;

    fn config(no_scaffold: bool, dry_run: bool) -> ProjectConfig {
        ProjectConfig::builder("site")
            .framework(Framework::Astro)
            .no_scaffold(no_scaffold)
            .dry_run(dry_run)
            .build()
            .unwrap()
    }

    fn plugin() -> MockMetaGenerator {
        let mut mock = MockMetaGenerator::new();
        mock.expect_framework().return_const(Framework::Astro);
        mock
    }

    #[test]
    fn scaffold_runs_before_post_scaffold() {
        let mut mock = plugin();
        let mut seq = Sequence::new();
        mock.expect_scaffold()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        mock.expect_post_scaffold()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let registry = Registry::new().with(Box::new(mock));
        assert!(registry.run_meta_scaffold(&config(false, false)).is_ok());
    }

    #[test]
    fn failed_scaffold_skips_post_scaffold() {
        let mut mock = plugin();
        mock.expect_scaffold().times(1).returning(|_| {
            Err(ScaffoldError::process_failure("astro", "npm create astro", 1, "boom"))
        });
        mock.expect_post_scaffold().never();

        let registry = Registry::new().with(Box::new(mock));
        let err = registry.run_meta_scaffold(&config(false, false)).unwrap_err();
        assert_eq!(err.exit_code, 1);
    }

    #[test]
    fn no_scaffold_still_runs_post_scaffold() {
        let mut mock = plugin();
        mock.expect_scaffold().never();
        mock.expect_post_scaffold().times(1).returning(|_| Ok(()));

        let registry = Registry::new().with(Box::new(mock));
        assert!(registry.run_meta_scaffold(&config(true, false)).is_ok());
    }

    #[test]
    fn dry_run_skips_post_scaffold() {
        let mut mock = plugin();
        mock.expect_scaffold().times(1).returning(|_| Ok(()));
        mock.expect_post_scaffold().never();

        let registry = Registry::new().with(Box::new(mock));
        assert!(registry.run_meta_scaffold(&config(false, true)).is_ok());
    }

    #[test]
    fn unregistered_framework_is_a_registry_miss() {
        let registry = Registry::new();
        let err = registry.run_meta_scaffold(&config(false, false)).unwrap_err();
        assert_eq!(err.exit_code, -1);
        assert_eq!(err.command, "");
        assert_eq!(err.framework, "astro");
    }

    #[test]
    fn later_registration_replaces_earlier() {
        let registry = Registry::new().with(Box::new(plugin())).with(Box::new(plugin()));
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(Framework::Astro));
    }
}
