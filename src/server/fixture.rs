//! Shared setup for server tests.

use std::{collections::HashMap, sync::Arc};

use axum::Router;
use sea_orm::ConnectionTrait;
use tower_cookies::Key;

use crate::server::{
    config::Config,
    database::{
        client::DatabaseClient,
        middleware::QueryParams,
        options::{DatabaseClientOptions, DriverOptions},
    },
    error::{mapper::ErrorMapper, mapping::DatabaseErrorMapping, AppError},
    middleware::exception::route_not_found,
    startup,
    state::AppState,
};

pub const MEMORY_DATABASE_URL: &str = "sqlite::memory:";

/// Builds a configuration from the given variables only.
pub fn config_from(vars: &[(&str, &str)]) -> Result<Config, AppError> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

    Config::from_lookup(move |name| vars.get(name).cloned())
}

/// Options for a single-connection in-memory database.
///
/// SQLite in-memory databases live per connection, so the pool is capped at one.
pub fn memory_options() -> DatabaseClientOptions {
    DatabaseClientOptions {
        driver_options: Some(DriverOptions {
            max_connections: Some(1),
            min_connections: Some(1),
            ..DriverOptions::default()
        }),
        ..DatabaseClientOptions::default()
    }
}

/// Ready in-memory client with the given SQL statements applied.
pub async fn memory_client(
    options: DatabaseClientOptions,
    statements: &[&str],
) -> Result<Arc<DatabaseClient>, AppError> {
    let client = DatabaseClient::new(MEMORY_DATABASE_URL, options).await?;
    client.initialize().await?;

    for statement in statements {
        let statement = statement.to_string();
        client
            .query(QueryParams::raw("executeRaw"), move |db| async move {
                db.execute_unprepared(&statement).await
            })
            .await?;
    }

    Ok(Arc::new(client))
}

pub async fn test_state(statements: &[&str]) -> Result<AppState, AppError> {
    let db = memory_client(memory_options(), statements).await?;

    Ok(AppState::new(db, Key::generate()))
}

/// Mounts test routes behind the full pipeline with the given code mapping.
pub fn pipeline_app(routes: Router<AppState>, state: AppState, mapping: DatabaseErrorMapping) -> Router {
    let (api, _) = crate::server::router::api_router().split_for_parts();
    let routes = api
        .merge(routes)
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found);

    startup::apply_pipeline(
        routes,
        tower_http::cors::CorsLayer::very_permissive(),
        ErrorMapper::new(mapping),
    )
    .with_state(state)
}
