use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use ifsc_core::PaginationConfig;
use ifsc_engine::QueryEngine;
use ifsc_store::{db, import_csv, migrations, SqliteExecutor};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

const CSV: &str = "\
ifsc,bank_name,branch,address,city,district,state
ALPH0000001,Alpha,MAIN,\"1 MG ROAD, MUMBAI\",MUMBAI,MUMBAI,MAHARASHTRA
BETA0000001,Beta,FORT,\"2 FORT, MUMBAI\",MUMBAI,MUMBAI,MAHARASHTRA
BETA0000002,Beta,CAMP,\"3 CAMP, PUNE\",PUNE,PUNE,MAHARASHTRA
GAMM0000001,Gamma,PARK STREET,\"4 PARK STREET, KOLKATA\",KOLKATA,KOLKATA,WEST BENGAL
";

pub struct TestApp {
    _dir: TempDir,
    pub db_path: PathBuf,
    pub router: Router,
}

pub fn app() -> TestApp {
    let dir = tempfile::tempdir().expect("temp dir");
    let csv_path = dir.path().join("bank_branches.csv");
    std::fs::File::create(&csv_path)
        .and_then(|mut f| f.write_all(CSV.as_bytes()))
        .expect("write csv");

    let db_path = dir.path().join("indian_banks.db");
    let mut conn = db::open(&db_path).expect("open");
    db::configure(&conn).expect("configure");
    migrations::apply_migrations(&mut conn).expect("migrate");
    import_csv(&csv_path, &mut conn).expect("import");
    drop(conn);

    let executor = SqliteExecutor::open(&db_path).expect("executor");
    let engine = QueryEngine::new(executor, PaginationConfig::default()).expect("engine");
    let router = ifsc_api::build_router(Arc::new(engine), &[]);

    TestApp {
        _dir: dir,
        db_path,
        router,
    }
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }
}
