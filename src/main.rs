//! slodash - SLO dashboard generator
//!
//! A command-line tool that builds Grafana dashboards for latency and
//! availability SLOs from a TOML catalog.

use clap::Parser;
use slodash::cli::args::{generate_completions, Cli, Commands};
use slodash::cli::logging::logger_builder;
use slodash::commands::{run_generate, run_list, run_show, run_validate};
use slodash::config::{Config, ConfigBuilder};
use slodash::error::{AppError, ConfigError};

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    logger_builder(cli.verbose).init();

    // Run the appropriate command
    let result = run(&cli);

    if let Err(e) = result {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli, output_dir: Option<String>) -> Result<Config, AppError> {
    let config = ConfigBuilder::new()
        .with_file(cli.config.as_deref())?
        .with_dry_run(cli.dry_run.then_some(true))
        .with_output_dir(output_dir)
        .build();
    Ok(config)
}

fn run(cli: &Cli) -> Result<(), AppError> {
    match &cli.command {
        Commands::Generate(args) => {
            let config = load_config(cli, args.output_dir.clone())?;
            run_generate(args, &config, cli.format)
        }

        Commands::List => run_list(&load_config(cli, None)?, cli.format),

        Commands::Show { uid } => run_show(&load_config(cli, None)?, uid),

        Commands::Validate => run_validate(&load_config(cli, None)?, cli.format),

        Commands::Completions { shell } => {
            generate_completions(*shell);
            Ok(())
        }
    }
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::NoSlosConfigured => {
            eprintln!();
            eprintln!("Hint: Add [[slo]] entries to slos.toml, or point --config");
            eprintln!("      (or SLODASH_CONFIG) at a catalog file.");
        }
        AppError::SloNotFound(_) => {
            eprintln!();
            eprintln!("Hint: Run 'slodash list' to see the configured uids.");
        }
        AppError::Config(ConfigError::FileNotFound(_)) => {
            eprintln!();
            eprintln!("Hint: Check the --config path or the SLODASH_CONFIG variable.");
        }
        AppError::Domain(_) => {
            eprintln!();
            eprintln!("Hint: Run 'slodash validate' to list every problem in the catalog.");
        }
        _ => {}
    }
}
