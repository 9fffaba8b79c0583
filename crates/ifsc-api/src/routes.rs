//! Route table and handlers.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use ifsc_core::errors::{ExError, ExErrorKind};
use ifsc_core::BranchFilter;
use ifsc_engine::{EngineQuery, EngineQueryResult, ListOptions};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::task;

use crate::{AppError, AppState};

const APP_NAME: &str = "Bank Branches API";
const VERSION: &str = env!("CARGO_PKG_VERSION");

pub(crate) fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/stats", get(stats))
        .route("/banks", get(list_banks))
        .route("/banks/search", get(search_banks))
        .route("/bank", get(get_bank))
        .route("/branches", get(list_branches))
        .route("/branch", get(get_branch))
}

/// Run a query on the blocking pool; SQLite calls block.
async fn run(engine: AppState, query: EngineQuery) -> Result<EngineQueryResult, AppError> {
    let result = task::spawn_blocking(move || engine.apply(query)).await??;
    Ok(result)
}

/// Like [`run`], but an absent point lookup becomes a 404.
async fn lookup(
    engine: AppState,
    query: EngineQuery,
    not_found: &str,
) -> Result<Json<EngineQueryResult>, AppError> {
    let result = run(engine, query).await?;
    if result.is_absent() {
        return Err(AppError::NotFound(not_found.to_string()));
    }
    Ok(Json(result))
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": format!("Welcome to {}", APP_NAME),
        "version": VERSION,
        "health": "/health",
        "endpoints": ["/stats", "/banks", "/banks/search", "/bank", "/branches", "/branch"],
    }))
}

async fn health(State(engine): State<AppState>) -> Result<Json<Value>, AppError> {
    let connected = matches!(
        run(engine, EngineQuery::Health).await?,
        EngineQueryResult::Health(true)
    );
    Ok(Json(json!({
        "status": if connected { "healthy" } else { "unhealthy" },
        "app": APP_NAME,
        "version": VERSION,
        "database": if connected { "connected" } else { "disconnected" },
    })))
}

async fn stats(State(engine): State<AppState>) -> Result<Json<Value>, AppError> {
    let EngineQueryResult::Stats(stats) = run(engine, EngineQuery::Stats).await? else {
        return Err(ExError::new(ExErrorKind::Internal)
            .with_op("stats")
            .with_message("unexpected query result")
            .into());
    };
    Ok(Json(json!({
        "banks": stats.banks,
        "branches": stats.branches,
        "apiVersion": VERSION,
    })))
}

async fn list_banks(
    State(engine): State<AppState>,
    Query(options): Query<ListOptions>,
) -> Result<Json<EngineQueryResult>, AppError> {
    Ok(Json(run(engine, EngineQuery::BankList(options)).await?))
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    name: String,
    limit: Option<i64>,
}

async fn search_banks(
    State(engine): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<EngineQueryResult>, AppError> {
    let query = EngineQuery::BankSearch {
        pattern: params.name,
        limit: params.limit,
    };
    Ok(Json(run(engine, query).await?))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BankParams {
    id: Option<i64>,
    name: Option<String>,
}

async fn get_bank(
    State(engine): State<AppState>,
    Query(params): Query<BankParams>,
) -> Result<Json<EngineQueryResult>, AppError> {
    let query = match params {
        BankParams { id: Some(id), .. } => EngineQuery::BankGet { id },
        BankParams {
            name: Some(name), ..
        } => EngineQuery::BankGetByName { name },
        _ => return Err(AppError::BadRequest("either `id` or `name` is required".to_string())),
    };
    lookup(engine, query, "Bank not found").await
}

/// Query string of `/branches`.
///
/// Spelled out field by field: `#[serde(flatten)]` loses the numeric parse
/// of `first` under `serde_urlencoded`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BranchParams {
    first: Option<i64>,
    after: Option<String>,
    ifsc: Option<String>,
    city: Option<String>,
    district: Option<String>,
    state: Option<String>,
    bank_name: Option<String>,
    branch_name: Option<String>,
}

impl BranchParams {
    fn into_query(self) -> EngineQuery {
        EngineQuery::BranchList {
            options: ListOptions::new(self.first, self.after),
            filter: BranchFilter {
                ifsc: self.ifsc,
                city: self.city,
                district: self.district,
                state: self.state,
                bank_name: self.bank_name,
                branch_name: self.branch_name,
            },
        }
    }
}

async fn list_branches(
    State(engine): State<AppState>,
    Query(params): Query<BranchParams>,
) -> Result<Json<EngineQueryResult>, AppError> {
    Ok(Json(run(engine, params.into_query()).await?))
}

#[derive(Debug, Deserialize)]
struct BranchLookup {
    ifsc: String,
}

async fn get_branch(
    State(engine): State<AppState>,
    Query(params): Query<BranchLookup>,
) -> Result<Json<EngineQueryResult>, AppError> {
    lookup(engine, EngineQuery::BranchGet { ifsc: params.ifsc }, "Branch not found").await
}
