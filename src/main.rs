use clap::Parser;
use colored::Colorize;
use mtinstall::cli::{Cli, Commands};
use mtinstall::{colors, commands, layout};
use std::path::PathBuf;

fn main() {
    let cli = Cli::parse();

    // Initialize logging; -v bumps the default level
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    colors::init_colors();

    let result = match cli.command {
        Commands::Install {
            formula,
            source,
            prefix,
            skip_postinstall,
        } => commands::install(&formula, &source, &resolve(prefix), skip_postinstall),
        Commands::Postinstall { formula, prefix } => {
            commands::postinstall(&formula, &resolve(prefix))
        }
        Commands::Uninstall { formula, prefix } => {
            commands::uninstall(&formula, &resolve(prefix))
        }
        Commands::List { versions, prefix } => commands::list(&resolve(prefix), versions),
        Commands::Info { formula, prefix } => commands::info(&formula, &resolve(prefix)),
        Commands::Env(args) => commands::env(&args),
        Commands::Completions { shell } => commands::completions(shell),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn resolve(prefix: Option<PathBuf>) -> PathBuf {
    prefix.unwrap_or_else(layout::detect_prefix)
}
