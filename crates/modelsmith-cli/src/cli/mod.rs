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
    name    = "modelsmith",
    bin_name = "modelsmith",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Interactive entity scaffolding",
    long_about = "modelsmith asks for an entity's fields and relations, then \
                  writes the model (and optionally a migration and a seeder) \
                  from templates. Nothing is written until the session ends.",
    after_help = "EXAMPLES:\n\
        \x20 modelsmith model Book\n\
        \x20 modelsmith model Book --all\n\
        \x20 modelsmith model Tag --yes --dry-run\n\
        \x20 modelsmith types\n\
        \x20 modelsmith completions bash > /usr/share/bash-completion/completions/modelsmith",
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
    /// Create a model interactively.
    #[command(
        visible_alias = "m",
        about = "Create a model",
        after_help = "EXAMPLES:\n\
            \x20 modelsmith model              # asks for the name\n\
            \x20 modelsmith model Book -m      # model + migration\n\
            \x20 modelsmith model Book -a      # model + migration + seeder\n\
            \x20 modelsmith model Book --dry-run"
    )]
    Model(ModelArgs),

    /// List every field type.
    #[command(about = "List available field types")]
    Types(TypesArgs),

    /// List the entities relations can point to.
    #[command(
        visible_alias = "ls",
        about = "List known entities",
        after_help = "EXAMPLES:\n\
            \x20 modelsmith list\n\
            \x20 modelsmith list --format json"
    )]
    List(ListArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 modelsmith init              # ./modelsmith.toml\n\
            \x20 modelsmith init --global     # user config directory\n\
            \x20 modelsmith init --templates  # also copy built-in templates"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 modelsmith completions bash > ~/.local/share/bash-completion/completions/modelsmith\n\
            \x20 modelsmith completions zsh  > ~/.zfunc/_modelsmith\n\
            \x20 modelsmith completions fish > ~/.config/fish/completions/modelsmith.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 modelsmith config get models.directory\n\
            \x20 modelsmith config list\n\
            \x20 modelsmith config path"
    )]
    Config(ConfigCommands),
}

// ── model ─────────────────────────────────────────────────────────────────────

/// Arguments for `modelsmith model`.
#[derive(Debug, Args)]
pub struct ModelArgs {
    /// Class name of the model, e.g. `Book`. Asked for when omitted.
    #[arg(value_name = "NAME", help = "Class name of the model")]
    pub name: Option<String>,

    /// Also generate a migration.
    #[arg(short = 'm', long = "migration", help = "Also generate a migration")]
    pub migration: bool,

    /// Also generate a seeder.
    #[arg(short = 's', long = "seed", help = "Also generate a seeder")]
    pub seed: bool,

    /// Generate the migration and the seeder.
    #[arg(short = 'a', long = "all", help = "Generate migration and seeder too")]
    pub all: bool,

    /// Print what would be written without writing anything.
    #[arg(long = "dry-run", help = "Show the generated files without writing")]
    pub dry_run: bool,

    /// Answer every question with its default. The model gets no fields.
    #[arg(
        short = 'y',
        long = "yes",
        requires = "name",
        help = "Accept all defaults (non-interactive)"
    )]
    pub yes: bool,
}

// ── types ─────────────────────────────────────────────────────────────────────

/// Arguments for `modelsmith types`.
#[derive(Debug, Args)]
pub struct TypesArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `modelsmith list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only project entities.
    #[arg(long = "project", conflicts_with = "external", help = "Only project entities")]
    pub project: bool,

    /// Only configured external entities.
    #[arg(long = "external", help = "Only external entities")]
    pub external: bool,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `modelsmith init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to the user config directory instead of `./modelsmith.toml`.
    #[arg(long = "global", help = "Create global configuration")]
    pub global: bool,

    /// Copy the built-in templates to the configured template directory.
    #[arg(long = "templates", help = "Copy built-in templates for customisation")]
    pub templates: bool,

    /// Overwrite existing files.
    #[arg(short = 'f', long = "force", help = "Overwrite existing files")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `modelsmith completions`.
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

/// Subcommands for `modelsmith config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `models.directory`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the configuration files that are read, in priority order.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_no_color_flag_takes_no_value() {
        let cli = Cli::parse_from(["modelsmith", "--no-color", "types"]);
        assert!(cli.global.no_color);
        assert!(!Cli::parse_from(["modelsmith", "types"]).global.no_color);
    }

    #[test]
    fn parse_model_command() {
        let cli = Cli::parse_from(["modelsmith", "model", "Book", "-m", "-s"]);
        let Commands::Model(args) = cli.command else {
            panic!("expected Model command");
        };
        assert_eq!(args.name.as_deref(), Some("Book"));
        assert!(args.migration && args.seed && !args.all);
    }

    #[test]
    fn model_name_is_optional() {
        let cli = Cli::parse_from(["modelsmith", "m"]);
        assert!(matches!(cli.command, Commands::Model(ModelArgs { name: None, .. })));
    }

    #[test]
    fn yes_requires_a_name() {
        assert!(Cli::try_parse_from(["modelsmith", "model", "--yes"]).is_err());
        assert!(Cli::try_parse_from(["modelsmith", "model", "Book", "--yes"]).is_ok());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["modelsmith", "--quiet", "--verbose", "types"]);
        assert!(result.is_err());
    }

    #[test]
    fn list_filters_conflict() {
        let result = Cli::try_parse_from(["modelsmith", "list", "--project", "--external"]);
        assert!(result.is_err());
    }
}
