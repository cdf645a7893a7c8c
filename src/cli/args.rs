//! CLI argument definitions using clap derive
//!
//! Defines all command-line arguments and subcommands.

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// SLO dashboard generator
///
/// Builds Grafana dashboards for latency and availability SLOs from a TOML
/// catalog.
#[derive(Parser, Debug)]
#[command(name = "slodash")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Path to the SLO catalog
    #[arg(short, long, global = true, env = "SLODASH_CONFIG")]
    pub config: Option<String>,

    /// Dry run mode - report what would be written without writing
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate dashboard JSON files
    Generate(GenerateArgs),

    /// List the SLOs in the catalog
    List,

    /// Print one dashboard's JSON to stdout
    Show {
        /// SLO uid
        uid: String,
    },

    /// Validate the catalog
    Validate,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the generate command
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Directory to write dashboards to (overrides the config file)
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Only generate the SLO with this uid (repeatable)
    #[arg(long = "only", value_name = "UID")]
    pub only: Vec<String>,
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_list() {
        let args = Cli::try_parse_from(["slodash", "list"]).unwrap();
        assert!(matches!(args.command, Commands::List));
    }

    #[test]
    fn test_cli_parse_verbose() {
        let args = Cli::try_parse_from(["slodash", "-v", "list"]).unwrap();
        assert!(args.verbose);
    }

    #[test]
    fn test_cli_parse_generate() {
        let args = Cli::try_parse_from([
            "slodash",
            "--dry-run",
            "generate",
            "-o",
            "dist",
            "--only",
            "a",
            "--only",
            "b",
        ])
        .unwrap();

        assert!(args.dry_run);
        if let Commands::Generate(generate) = args.command {
            assert_eq!(generate.output_dir.as_deref(), Some("dist"));
            assert_eq!(generate.only, vec!["a", "b"]);
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn test_cli_parse_generate_defaults() {
        let args = Cli::try_parse_from(["slodash", "generate"]).unwrap();
        if let Commands::Generate(generate) = args.command {
            assert!(generate.output_dir.is_none());
            assert!(generate.only.is_empty());
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn test_cli_parse_show() {
        let args = Cli::try_parse_from(["slodash", "show", "my-slo"]).unwrap();
        assert!(matches!(args.command, Commands::Show { uid } if uid == "my-slo"));
    }

    #[test]
    fn test_cli_show_requires_uid() {
        assert!(Cli::try_parse_from(["slodash", "show"]).is_err());
    }

    #[test]
    fn test_cli_parse_format_and_config() {
        let args = Cli::try_parse_from(["slodash", "--format", "json", "-c", "x.toml", "validate"])
            .unwrap();
        assert!(matches!(args.format, OutputFormat::Json));
        assert_eq!(args.config.as_deref(), Some("x.toml"));
        assert!(matches!(args.command, Commands::Validate));
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }
}
