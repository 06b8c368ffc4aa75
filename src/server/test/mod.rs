use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use serde_json::json;
use test_utils::{client::TestClient, error::TestError, log::LogCapture};
use tower_cookies::Key;

use crate::server::{
    database::middleware::QueryParams,
    error::{
        config::ConfigError,
        database::DatabaseError,
        mapper::ErrorMapper,
        mapping::ErrorCodeMapping,
        AppError,
    },
    fixture::{self, MEMORY_DATABASE_URL},
    startup,
    state::AppState,
};


const UNREACHABLE_DATABASE_URL: &str = "sqlite:///definitely/missing/dir/app.db";

/// Application as the bootstrap assembles it, backed by an in-memory database.
async fn app_client(cors_origins: &str) -> Result<(TestClient, AppState), AppError> {
    let config = fixture::config_from(&[
        ("PORT", "3000"),
        ("DATABASE_URL", MEMORY_DATABASE_URL),
        ("CORS_ORIGINS", cors_origins),
    ])?;
    let state = fixture::test_state(&[]).await?;
    let cors = startup::cors_layer(&config)?;

    let app = startup::build_app(state.clone(), cors, ErrorMapper::default());

    Ok((TestClient::new(app), state))
}
