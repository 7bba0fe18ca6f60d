//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "kiln",
    bin_name = "kiln",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f525} Frontend projects, fired in one pass",
    long_about = "kiln generates Vite-based frontend projects from built-in \
                  templates and delegates Next.js, Astro and SvelteKit to their \
                  own scaffolders. Failed runs leave nothing behind.",
    after_help = "EXAMPLES:\n\
        \x20 kiln new my-app --framework react --styling tailwind --state zustand\n\
        \x20 kiln new docs   --framework astro --dry-run\n\
        \x20 kiln frameworks --probe\n\
        \x20 kiln completions bash > /usr/share/bash-completion/completions/kiln",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new frontend project.
    #[command(
        visible_alias = "n",
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 kiln new my-app\n\
            \x20 kiln new my-app -f vue --routing vue-router --state pinia\n\
            \x20 kiln new shop   -f nextjs -p pnpm --testing vitest\n\
            \x20 kiln new my-app -f svelte --dry-run"
    )]
    New(NewArgs),

    /// List supported frameworks and their options.
    #[command(
        visible_alias = "ls",
        about = "List supported frameworks",
        after_help = "EXAMPLES:\n\
            \x20 kiln frameworks\n\
            \x20 kiln frameworks --format json\n\
            \x20 kiln frameworks --probe"
    )]
    Frameworks(FrameworksArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 kiln init\n\
            \x20 kiln init --force\n\
            \x20 kiln --config ./kiln.toml init"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 kiln completions bash > ~/.local/share/bash-completion/completions/kiln\n\
            \x20 kiln completions zsh  > ~/.zfunc/_kiln\n\
            \x20 kiln completions fish > ~/.config/fish/completions/kiln.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the active configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 kiln config get defaults.framework\n\
            \x20 kiln config list\n\
            \x20 kiln config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `kiln new`.
///
/// Option values are parsed by the core value objects so the accepted
/// spellings and aliases live in one place. Unset options fall back to the
/// `[defaults]` table of the configuration.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name; also the directory created under the working directory.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    #[arg(
        short = 'f',
        long = "framework",
        value_name = "FRAMEWORK",
        help = "react, vue, svelte, solid, preact, vanilla, nextjs, astro, sveltekit"
    )]
    pub framework: Option<String>,

    #[arg(
        short = 'l',
        long = "lang",
        value_name = "LANGUAGE",
        help = "typescript (ts) or javascript (js)"
    )]
    pub language: Option<String>,

    #[arg(
        short = 'p',
        long = "package-manager",
        visible_alias = "pm",
        value_name = "PM",
        help = "npm, pnpm, yarn or bun"
    )]
    pub package_manager: Option<String>,

    #[arg(long, value_name = "STYLING", help = "css, css-modules, tailwind, sass")]
    pub styling: Option<String>,

    #[arg(long, value_name = "ROUTER", help = "none, react-router, tanstack-router, vue-router")]
    pub routing: Option<String>,

    #[arg(long, value_name = "RUNNER", help = "none, vitest, jest, playwright")]
    pub testing: Option<String>,

    #[arg(long = "state", value_name = "LIBRARY", help = "none, zustand, redux, jotai, pinia")]
    pub state_management: Option<String>,

    #[arg(long = "data", value_name = "LIBRARY", help = "none, tanstack-query, swr")]
    pub data_fetching: Option<String>,

    #[arg(long, value_name = "LAYOUT", help = "flat or feature-based")]
    pub structure: Option<String>,

    #[arg(long = "lint", value_name = "LINTER", help = "none, eslint, biome")]
    pub linting: Option<String>,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,

    /// Skip the upstream scaffolder of a meta framework.
    #[arg(
        long = "no-scaffold",
        help = "Skip the upstream scaffolder (meta frameworks only)"
    )]
    pub no_scaffold: bool,

    /// Allow generating into an existing, non-empty directory.
    #[arg(long = "here", help = "Allow an existing non-empty project directory")]
    pub here: bool,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and create immediately"
    )]
    pub yes: bool,

    /// Do not check for Node.js and the package manager first.
    #[arg(long = "skip-preflight", help = "Skip environment checks")]
    pub skip_preflight: bool,
}

// ── frameworks ────────────────────────────────────────────────────────────────

/// Arguments for `kiln frameworks`.
#[derive(Debug, Args)]
pub struct FrameworksArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,

    /// Ask the npm registry for the latest scaffolder versions.
    #[arg(long = "probe", help = "Query upstream scaffolder versions")]
    pub probe: bool,
}

/// Output format for the `frameworks` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `kiln init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `kiln completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `kiln config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.framework`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_new_command_with_options() {
        let cli = Cli::parse_from([
            "kiln",
            "new",
            "my-app",
            "-f",
            "vue",
            "--state",
            "pinia",
            "--pm",
            "pnpm",
            "--dry-run",
        ]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(args.name, "my-app");
        assert_eq!(args.framework.as_deref(), Some("vue"));
        assert_eq!(args.state_management.as_deref(), Some("pinia"));
        assert_eq!(args.package_manager.as_deref(), Some("pnpm"));
        assert!(args.dry_run);
        assert!(!args.here);
    }

    #[test]
    fn frameworks_alias_and_format() {
        let cli = Cli::parse_from(["kiln", "ls", "--format", "json", "--probe"]);
        let Commands::Frameworks(args) = cli.command else {
            panic!("expected Frameworks command");
        };
        assert_eq!(args.format, ListFormat::Json);
        assert!(args.probe);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["kiln", "--quiet", "--verbose", "frameworks"]);
        assert!(result.is_err());
    }
}
