//! Serve command
//!
//! Usage: ifsc serve [--host ADDR] [--port PORT]

use std::net::IpAddr;
use std::sync::Arc;

use clap::Args;
use ifsc_api::ServeOptions;
use ifsc_engine::{QueryEngine, StatsResult};
use ifsc_store::QueryExecutor;

use super::open_engine;
use crate::settings::Settings;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Interface to bind
    #[arg(long, env = "IFSC_HOST")]
    pub host: Option<IpAddr>,

    /// Listening port
    #[arg(long, env = "IFSC_PORT")]
    pub port: Option<u16>,
}

pub fn execute(args: ServeArgs, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let engine = open_engine(settings)?;
    let stats = preflight(&engine)?;
    tracing::info!(
        component = module_path!(),
        database = %settings.database_path.display(),
        banks = stats.banks,
        branches = stats.branches,
        "database ready"
    );

    let options = ServeOptions {
        host: args.host.unwrap_or(settings.host),
        port: args.port.unwrap_or(settings.port),
        allow_origins: settings.cors_origins.clone(),
    };

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(ifsc_api::serve(Arc::new(engine), options))?;
    Ok(())
}

/// Refuse to serve a store that fails its health check.
fn preflight<E: QueryExecutor>(
    engine: &QueryEngine<E>,
) -> Result<StatsResult, Box<dyn std::error::Error>> {
    if !engine.check_connection() {
        return Err("database is not reachable; refusing to start".into());
    }
    Ok(engine.stats()?)
}
