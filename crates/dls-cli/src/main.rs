//! `dls`: export design tokens and keep a design file's variables in sync.

mod commands;
mod config;
mod error;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dls_sync::{RebindReport, SyncReport};
use dls_tokens::Theme;

use crate::commands::Layer;
use crate::config::DlsConfig;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "dls")]
#[command(about = "DLS design tokens and variable-collection sync")]
#[command(version)]
struct Cli {
    /// Config file to use instead of the user config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the token export as JSON
    Tokens {
        /// Only this theme's semantic and component values
        #[arg(long)]
        theme: Option<Theme>,
        #[arg(long, value_enum, default_value = "all")]
        layer: Layer,
    },

    /// Reconcile the semantic collection with the canonical variables
    Sync {
        /// Snapshot JSON file to sync in place
        #[arg(long, conflicts_with = "file_key")]
        snapshot: Option<PathBuf>,
        /// Figma file key (overrides figma.file_key)
        #[arg(long)]
        file_key: Option<String>,
        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Move legacy paint bindings in a snapshot onto 4-layer variables
    Rebind {
        #[arg(long)]
        snapshot: PathBuf,
        /// Only this page id
        #[arg(long)]
        page: Option<String>,
        #[arg(long)]
        dry_run: bool,
        #[arg(long)]
        json: bool,
    },

    /// Print the effective config
    Config {
        /// Also write it to the user config file
        #[arg(long)]
        write: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match DlsConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("dls: {e}");
            return ExitCode::FAILURE;
        }
    };

    let _guard = match logging::init(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("dls: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(cli.command, &config).await {
        Ok(true) => ExitCode::SUCCESS,
        // Completed, but with per-item issues.
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            ExitCode::FAILURE
        }
    }
}

/// Run one command. `Ok(false)` means it finished with issues to look at.
async fn run(command: Command, config: &DlsConfig) -> Result<bool, CliError> {
    match command {
        Command::Tokens { theme, layer } => {
            let value = commands::tokens_json(theme, layer)?;
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(true)
        }
        Command::Sync {
            snapshot,
            file_key,
            dry_run,
            json,
        } => {
            let report = match (snapshot, file_key.or_else(|| config.figma.file_key.clone())) {
                (Some(path), _) => commands::sync_snapshot(config, &path, dry_run).await?,
                (None, Some(key)) => commands::sync_remote(config, &key, dry_run).await?,
                (None, None) => return Err(CliError::NoTarget),
            };
            print_sync(&report, json)?;
            Ok(report.issues.is_empty())
        }
        Command::Rebind {
            snapshot,
            page,
            dry_run,
            json,
        } => {
            let report = commands::rebind_snapshot(config, &snapshot, page, dry_run).await?;
            print_rebind(&report, json)?;
            Ok(true)
        }
        Command::Config { write } => {
            let content =
                toml::to_string_pretty(config).map_err(|e| CliError::Config(e.to_string()))?;
            print!("{content}");
            if write {
                let path = DlsConfig::config_path();
                config.save(&path)?;
                eprintln!("wrote {}", path.display());
            }
            Ok(true)
        }
    }
}

fn print_sync(report: &SyncReport, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{report}");
        for issue in &report.issues {
            println!("  {issue}");
        }
    }
    Ok(())
}

fn print_rebind(report: &RebindReport, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{report}");
        for node in &report.touched {
            println!("  {:?} {} {}", node.binding, node.id, node.name);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_tokens_args() {
        let cli = Cli::parse_from(["dls", "tokens", "--theme", "dark", "--layer", "semantic"]);
        match cli.command {
            Command::Tokens { theme, layer } => {
                assert_eq!(theme, Some(Theme::Dark));
                assert_eq!(layer, Layer::Semantic);
            }
            _ => panic!("Expected tokens command"),
        }
    }

    #[test]
    fn test_snapshot_conflicts_with_file_key() {
        let result = Cli::try_parse_from([
            "dls",
            "sync",
            "--snapshot",
            "a.json",
            "--file-key",
            "k",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_theme_rejected() {
        assert!(Cli::try_parse_from(["dls", "tokens", "--theme", "sepia"]).is_err());
    }
}
