//! Database client options and the providers that produce them.
//!
//! The bootstrap resolves exactly one [`DatabaseOptionsProvider`] before the
//! client is constructed. Providers exist for a fixed value, for a closure
//! computed at startup, and for the environment-backed [`Config`].

use std::{future::Future, sync::Arc, time::Duration};

use async_trait::async_trait;
use sea_orm::ConnectOptions;

use crate::server::{
    config::Config,
    database::middleware::{QueryLogger, QueryMiddleware},
    error::AppError,
};

/// Connection pool settings passed through to the driver.
///
/// Unset fields keep the driver defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriverOptions {
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub connect_timeout: Option<Duration>,
    pub acquire_timeout: Option<Duration>,
    /// Enables SQLx statement logging, disabled when unset.
    pub sqlx_logging: Option<bool>,
}

impl DriverOptions {
    /// Applies the configured settings onto SeaORM connect options.
    pub fn apply(&self, opt: &mut ConnectOptions) {
        if let Some(max_connections) = self.max_connections {
            opt.max_connections(max_connections);
        }
        if let Some(min_connections) = self.min_connections {
            opt.min_connections(min_connections);
        }
        if let Some(connect_timeout) = self.connect_timeout {
            opt.connect_timeout(connect_timeout);
        }
        if let Some(acquire_timeout) = self.acquire_timeout {
            opt.acquire_timeout(acquire_timeout);
        }
        opt.sqlx_logging(self.sqlx_logging.unwrap_or(false));
    }
}

/// Options the database client is constructed from.
#[derive(Clone, Default)]
pub struct DatabaseClientOptions {
    /// Pool settings, driver defaults when `None`.
    pub driver_options: Option<DriverOptions>,

    /// Opens a connection during startup instead of on the first query.
    ///
    /// When set, a failed connection aborts startup before the server listens.
    pub explicit_connect: bool,

    /// Query middlewares, applied in this order around every query.
    pub middlewares: Vec<Arc<dyn QueryMiddleware>>,
}

impl DatabaseClientOptions {
    /// Appends a middleware to the chain.
    pub fn with_middleware(mut self, middleware: impl QueryMiddleware + 'static) -> Self {
        self.middlewares.push(Arc::new(middleware));
        self
    }
}

/// Source of the database client options, resolved once at startup.
#[async_trait]
pub trait DatabaseOptionsProvider: Send + Sync {
    /// Produces the options the database client is constructed from.
    ///
    /// # Returns
    /// - `Ok(DatabaseClientOptions)` - Options to build the client with
    /// - `Err(AppError)` - Options could not be produced; startup aborts
    async fn create_database_options(&self) -> Result<DatabaseClientOptions, AppError>;
}

/// A fixed options value provides a copy of itself.
#[async_trait]
impl DatabaseOptionsProvider for DatabaseClientOptions {
    async fn create_database_options(&self) -> Result<DatabaseClientOptions, AppError> {
        Ok(self.clone())
    }
}

/// Options computed by a closure when the bootstrap resolves them.
pub struct OptionsFactory<F> {
    factory: F,
}

impl<F, Fut> OptionsFactory<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<DatabaseClientOptions, AppError>> + Send,
{
    pub fn new(factory: F) -> Self {
        Self { factory }
    }
}

#[async_trait]
impl<F, Fut> DatabaseOptionsProvider for OptionsFactory<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<DatabaseClientOptions, AppError>> + Send,
{
    async fn create_database_options(&self) -> Result<DatabaseClientOptions, AppError> {
        (self.factory)().await
    }
}

/// Options derived from the environment configuration.
///
/// Registers [`QueryLogger`] when `DATABASE_LOG_QUERIES` is enabled.
#[async_trait]
impl DatabaseOptionsProvider for Config {
    async fn create_database_options(&self) -> Result<DatabaseClientOptions, AppError> {
        let driver_options = DriverOptions {
            max_connections: self.database_max_connections,
            connect_timeout: self.database_connect_timeout,
            ..DriverOptions::default()
        };

        let mut options = DatabaseClientOptions {
            driver_options: Some(driver_options),
            explicit_connect: self.database_explicit_connect,
            middlewares: Vec::new(),
        };

        if self.database_log_queries {
            options = options.with_middleware(QueryLogger);
        }

        Ok(options)
    }
}
