use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    Extension, Router,
};
use tokio::{net::TcpListener, signal};
use tower::ServiceBuilder;
use tower_cookies::CookieManagerLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    config::Config,
    database::{client::DatabaseClient, options::DatabaseOptionsProvider},
    error::{config::ConfigError, mapper::ErrorMapper, mapping::DatabaseErrorMapping, AppError},
    middleware::{
        cookie::cookie_key,
        envelope::wrap_success,
        exception::{map_errors, route_not_found},
        validation::ValidationOptions,
    },
    router,
    state::AppState,
};

/// Constructs and initializes the database client.
///
/// Resolves the client options from the provider, builds the client and brings it
/// into the ready state. With explicit connect enabled the connection is opened
/// here, so an unreachable database aborts startup before the server listens.
///
/// # Arguments
/// - `database_url` - SeaORM connection URL
/// - `provider` - Source of the client options
///
/// # Returns
/// - `Ok(DatabaseClient)` - Client ready to serve queries
/// - `Err(AppError)` - Options could not be resolved or the connection failed
pub async fn connect_to_database(
    database_url: &str,
    provider: &impl DatabaseOptionsProvider,
) -> Result<DatabaseClient, AppError> {
    let options = provider.create_database_options().await?;
    let client = DatabaseClient::new(database_url, options).await?;

    if let Err(e) = client.initialize().await {
        disconnect(&client).await;
        return Err(e.into());
    }

    Ok(client)
}

/// Builds the CORS policy.
///
/// Development mode, or a deployment without configured origins, allows any
/// origin. Otherwise only the configured origins are allowed, with credentials.
///
/// # Arguments
/// - `config` - Application configuration containing the mode and origins
///
/// # Returns
/// - `Ok(CorsLayer)` - Policy to install as the outermost stage
/// - `Err(ConfigError::InvalidEnvVar)` - An origin is not a valid header value
pub fn cors_layer(config: &Config) -> Result<CorsLayer, ConfigError> {
    if config.dev_mode || config.cors_origins.is_empty() {
        return Ok(CorsLayer::very_permissive());
    }

    let origins = config
        .cors_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    name: "CORS_ORIGINS".to_string(),
                    value: origin.clone(),
                    reason: e.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_credentials(true))
}

/// Installs the global pipeline on a router.
///
/// Stages run in this order for every request: CORS, validation options,
/// success envelope, error mapper, cookie parsing. Responses travel back in
/// reverse, so the error mapper renders failures before the envelope stage
/// sees them.
///
/// # Arguments
/// - `router` - Routes (and fallback) the pipeline applies to
/// - `cors` - CORS policy from [`cors_layer`]
/// - `mapper` - Error mapper configured with the user error codes
///
/// # Returns
/// - `Router<S>` - Router with every stage applied
pub fn apply_pipeline<S>(router: Router<S>, cors: CorsLayer, mapper: ErrorMapper) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(
        ServiceBuilder::new()
            .layer(cors)
            .layer(Extension(ValidationOptions::strict()))
            .layer(from_fn(wrap_success))
            .layer(from_fn_with_state(Arc::new(mapper), map_errors))
            .layer(CookieManagerLayer::new()),
    )
}

/// Assembles the application router.
///
/// API routes and the unknown-route fallback go through the pipeline. A
/// known path requested with an unrouted method is answered by the same
/// fallback, so it is rendered by the error mapper too. The
/// API documentation is merged afterwards and served as-is.
///
/// # Arguments
/// - `state` - Shared application state
/// - `cors` - CORS policy from [`cors_layer`]
/// - `mapper` - Error mapper configured with the user error codes
///
/// # Returns
/// - `Router` - Application ready to be served
pub fn build_app(state: AppState, cors: CorsLayer, mapper: ErrorMapper) -> Router {
    let (api, openapi) = router::api_router().split_for_parts();
    let api = api
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found);
    let api = apply_pipeline(api, cors, mapper);

    api.with_state(state)
        .merge(SwaggerUi::new("/docs").url("/docs-json", openapi))
}

/// Runs the application until a shutdown signal arrives.
///
/// Connects the database client, installs the pipeline, then listens on the
/// configured host and port. The client is disconnected exactly once: after
/// the server stops, or when binding the listener fails.
///
/// # Arguments
/// - `config` - Application configuration loaded from the environment
///
/// # Returns
/// - `Ok(())` - Server shut down gracefully
/// - `Err(AppError)` - Startup failed or the server stopped with an error
pub async fn bootstrap(config: Config) -> Result<(), AppError> {
    let cors = cors_layer(&config)?;
    let db = Arc::new(connect_to_database(&config.database_url, &config).await?);

    let mapper = ErrorMapper::new(DatabaseErrorMapping::new(
        config.database_error_codes.clone(),
    ));
    let state = AppState::new(db.clone(), cookie_key(config.cookie_secret.as_deref()));
    let app = build_app(state, cors, mapper);

    let address = format!("{}:{}", config.host, config.port);
    let listener = match TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", address, e);
            disconnect(&db).await;
            return Err(e.into());
        }
    };

    tracing::info!("Server running on {}", address);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    disconnect(&db).await;
    served?;

    Ok(())
}

async fn disconnect(db: &DatabaseClient) {
    if let Err(e) = db.disconnect().await {
        tracing::error!("Failed to disconnect database client: {}", e);
    }
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
