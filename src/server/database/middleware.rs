//! Query middleware chain.
//!
//! Middlewares observe or intercept every query issued through the
//! [`DatabaseClient`](super::client::DatabaseClient). They run in registration
//! order; each one receives the query descriptor and a [`Next`] continuation
//! that runs the remaining middlewares and finally the query itself.

use std::{fmt, sync::Arc, time::Instant};

use async_trait::async_trait;
use futures_util::future::BoxFuture;

use crate::server::error::database::DatabaseError;

/// Descriptor of a query passed through the middleware chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    /// Model (table or entity) the query targets, `None` for raw statements.
    pub model: Option<String>,
    /// Operation performed, e.g. `findUnique`, `create`, `ping`.
    pub action: String,
}

impl QueryParams {
    pub fn new(model: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            model: Some(model.into()),
            action: action.into(),
        }
    }

    /// Descriptor for a statement not tied to a model.
    pub fn raw(action: impl Into<String>) -> Self {
        Self {
            model: None,
            action: action.into(),
        }
    }

    /// Printable `model.action()` name used in diagnostics.
    pub fn target(&self) -> String {
        match &self.model {
            Some(model) => format!("{model}.{}()", self.action),
            None => format!("{}()", self.action),
        }
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.target())
    }
}

pub type QueryOutcome = Result<(), DatabaseError>;

/// Final link of the chain, executing the query itself.
pub(crate) type Terminal<'a> = Box<dyn FnOnce(QueryParams) -> BoxFuture<'a, QueryOutcome> + Send + 'a>;

/// Middleware wrapping query execution.
#[async_trait]
pub trait QueryMiddleware: Send + Sync {
    /// Handles one query.
    ///
    /// Call `next.run(params)` to continue the chain. Returning without
    /// calling it skips the query.
    ///
    /// # Arguments
    /// - `params` - Descriptor of the query being executed
    /// - `next` - Continuation running the rest of the chain
    ///
    /// # Returns
    /// - `Ok(())` - The query (or the middleware) completed
    /// - `Err(DatabaseError)` - The query failed or the middleware rejected it
    async fn handle(&self, params: QueryParams, next: Next<'_>) -> QueryOutcome;
}

/// Continuation handed to a [`QueryMiddleware`].
pub struct Next<'a> {
    chain: &'a [Arc<dyn QueryMiddleware>],
    terminal: Terminal<'a>,
}

impl<'a> Next<'a> {
    pub(crate) fn new(chain: &'a [Arc<dyn QueryMiddleware>], terminal: Terminal<'a>) -> Self {
        Self { chain, terminal }
    }

    /// Runs the remaining middlewares, then the query.
    pub fn run(self, params: QueryParams) -> BoxFuture<'a, QueryOutcome> {
        match self.chain.split_first() {
            Some((middleware, rest)) => middleware.handle(params, Next::new(rest, self.terminal)),
            None => (self.terminal)(params),
        }
    }
}

/// Logs every query with its elapsed time.
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryLogger;

#[async_trait]
impl QueryMiddleware for QueryLogger {
    async fn handle(&self, params: QueryParams, next: Next<'_>) -> QueryOutcome {
        let target = params.target();
        let started = Instant::now();

        let outcome = next.run(params).await;

        match &outcome {
            Ok(()) => tracing::debug!("Query {} took {:?}", target, started.elapsed()),
            Err(e) => tracing::debug!("Query {} failed after {:?}: {}", target, started.elapsed(), e),
        }

        outcome
    }
}
