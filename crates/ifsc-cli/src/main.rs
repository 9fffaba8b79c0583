//! IFSC CLI
//!
//! Command-line interface for the bank branch directory

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ifsc_core::logging_facility::{self, Profile};

mod commands;
mod settings;

use settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "ifsc")]
#[command(about = "IFSC - Indian bank and branch directory", long_about = None)]
struct Cli {
    /// Settings file (defaults to ./ifsc.toml when present)
    #[arg(long, global = true, env = "IFSC_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database path
    #[arg(long, global = true, env = "IFSC_DATABASE_PATH")]
    db: Option<PathBuf>,

    /// Logging profile: development, production or test
    #[arg(long, global = true, env = "IFSC_LOG_PROFILE")]
    log_profile: Option<Profile>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build the database from a bank branches CSV file
    Import(commands::import::ImportArgs),
    /// Bank queries
    Banks(commands::query::BankArgs),
    /// Branch queries
    Branches(commands::query::BranchArgs),
    /// Bank and branch counts
    Stats,
    /// Check that the database can be reached
    Health,
    /// Run the HTTP API
    Serve(commands::serve::ServeArgs),
}

fn main() {
    let cli = Cli::parse();

    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(mut settings) => {
            if let Some(db) = cli.db {
                settings.database_path = db;
            }
            if let Some(profile) = cli.log_profile {
                settings.log_profile = profile;
            }
            settings
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    logging_facility::init(settings.log_profile);

    let result = match cli.command {
        Commands::Import(args) => commands::import::execute(args, &settings),
        Commands::Banks(args) => commands::query::execute_banks(args, &settings),
        Commands::Branches(args) => commands::query::execute_branches(args, &settings),
        Commands::Stats => commands::query::execute_stats(&settings),
        Commands::Health => commands::query::execute_health(&settings),
        Commands::Serve(args) => commands::serve::execute(args, &settings),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
