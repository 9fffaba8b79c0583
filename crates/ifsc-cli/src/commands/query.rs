//! Read commands: banks, branches, stats and health
//!
//! Each command builds one `EngineQuery`, runs it and prints the result as
//! JSON on stdout. A point lookup that finds nothing exits non-zero.

use clap::{Args, Subcommand};
use ifsc_core::BranchFilter;
use ifsc_engine::{EngineQuery, EngineQueryResult, ListOptions};

use super::open_engine;
use crate::settings::Settings;

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Debug, Args)]
pub struct PageArgs {
    /// Page size (falls back to the configured default)
    #[arg(long, allow_hyphen_values = true)]
    pub first: Option<i64>,

    /// Cursor of the last edge of the previous page
    #[arg(long)]
    pub after: Option<String>,
}

impl From<PageArgs> for ListOptions {
    fn from(args: PageArgs) -> Self {
        ListOptions::new(args.first, args.after)
    }
}

#[derive(Debug, Args)]
pub struct BankArgs {
    #[command(subcommand)]
    pub command: BankCommand,
}

#[derive(Debug, Subcommand)]
pub enum BankCommand {
    /// List banks ordered by name
    List(PageArgs),
    /// Look up one bank by id or exact name
    Get {
        #[arg(long, conflicts_with = "name", required_unless_present = "name")]
        id: Option<i64>,
        #[arg(long)]
        name: Option<String>,
    },
    /// Banks whose name contains PATTERN
    Search {
        pattern: String,
        #[arg(long)]
        limit: Option<i64>,
    },
}

#[derive(Debug, Args)]
pub struct BranchArgs {
    #[command(subcommand)]
    pub command: BranchCommand,
}

#[derive(Debug, Subcommand)]
pub enum BranchCommand {
    /// List branches ordered by IFSC, optionally filtered
    List {
        #[command(flatten)]
        page: PageArgs,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Look up one branch by IFSC code
    Get { ifsc: String },
}

/// Substring filters; all given filters must match.
#[derive(Debug, Args)]
pub struct FilterArgs {
    #[arg(long)]
    pub ifsc: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub district: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub bank_name: Option<String>,
    #[arg(long)]
    pub branch_name: Option<String>,
}

impl From<FilterArgs> for BranchFilter {
    fn from(args: FilterArgs) -> Self {
        BranchFilter {
            ifsc: args.ifsc,
            city: args.city,
            district: args.district,
            state: args.state,
            bank_name: args.bank_name,
            branch_name: args.branch_name,
        }
    }
}

pub fn execute_banks(args: BankArgs, settings: &Settings) -> CliResult {
    let query = match args.command {
        BankCommand::List(page) => EngineQuery::BankList(page.into()),
        BankCommand::Get { id: Some(id), .. } => EngineQuery::BankGet { id },
        BankCommand::Get {
            name: Some(name), ..
        } => EngineQuery::BankGetByName { name },
        BankCommand::Get { .. } => return Err("either --id or --name is required".into()),
        BankCommand::Search { pattern, limit } => EngineQuery::BankSearch { pattern, limit },
    };
    run(query, settings, "Bank not found")
}

pub fn execute_branches(args: BranchArgs, settings: &Settings) -> CliResult {
    let query = match args.command {
        BranchCommand::List { page, filter } => EngineQuery::BranchList {
            options: page.into(),
            filter: filter.into(),
        },
        BranchCommand::Get { ifsc } => EngineQuery::BranchGet { ifsc },
    };
    run(query, settings, "Branch not found")
}

pub fn execute_stats(settings: &Settings) -> CliResult {
    run(EngineQuery::Stats, settings, "")
}

/// Prints `true`/`false`; exits non-zero when the database is unreachable.
pub fn execute_health(settings: &Settings) -> CliResult {
    let engine = open_engine(settings)?;
    let result = engine.apply(EngineQuery::Health)?;
    print_json(&result)?;
    match result {
        EngineQueryResult::Health(true) => Ok(()),
        _ => Err("database is not reachable".into()),
    }
}

fn run(query: EngineQuery, settings: &Settings, not_found: &str) -> CliResult {
    let engine = open_engine(settings)?;
    let result = engine.apply(query)?;
    if result.is_absent() {
        return Err(not_found.into());
    }
    print_json(&result)
}

fn print_json(result: &EngineQueryResult) -> CliResult {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}
