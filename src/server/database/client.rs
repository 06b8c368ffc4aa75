use std::{
    future::Future,
    sync::{
        atomic::{AtomicU8, Ordering},
        Arc,
    },
};

use futures_util::FutureExt;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tokio::sync::oneshot;

use crate::server::{
    database::{
        middleware::{Next, QueryMiddleware, QueryParams, Terminal},
        options::DatabaseClientOptions,
    },
    error::database::DatabaseError,
};

/// Lifecycle state of the database client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ClientState {
    /// Pool created, no connection opened yet.
    Constructed = 0,
    /// Accepting queries.
    Ready = 1,
    /// Closed; every further operation fails.
    Disconnected = 2,
}

impl ClientState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Constructed,
            1 => Self::Ready,
            _ => Self::Disconnected,
        }
    }
}

/// Process-wide database client.
///
/// Wraps the SeaORM connection pool together with the query middleware chain.
/// A single instance is built at startup and shared with request handlers
/// through an `Arc`; it is disconnected exactly once during shutdown.
pub struct DatabaseClient {
    conn: DatabaseConnection,
    middlewares: Vec<Arc<dyn QueryMiddleware>>,
    explicit_connect: bool,
    state: AtomicU8,
}

impl DatabaseClient {
    /// Constructs the client without opening a connection.
    ///
    /// Applies the driver options onto a lazily connecting pool and registers
    /// the configured middlewares in order.
    ///
    /// # Arguments
    /// - `database_url` - SeaORM connection URL
    /// - `options` - Client options resolved from the options provider
    ///
    /// # Returns
    /// - `Ok(DatabaseClient)` - Client in the `Constructed` state
    /// - `Err(DatabaseError::Driver)` - The URL or pool options were rejected
    pub async fn new(
        database_url: &str,
        options: DatabaseClientOptions,
    ) -> Result<Self, DatabaseError> {
        let mut opt = ConnectOptions::new(database_url);
        opt.sqlx_logging(false);
        if let Some(driver_options) = &options.driver_options {
            driver_options.apply(&mut opt);
        }
        opt.connect_lazy(true);

        let conn = Database::connect(opt).await?;

        Ok(Self {
            conn,
            middlewares: options.middlewares,
            explicit_connect: options.explicit_connect,
            state: AtomicU8::new(ClientState::Constructed as u8),
        })
    }

    /// Brings the client into the `Ready` state.
    ///
    /// With `explicit_connect` a round trip to the database is made so the pool
    /// holds an open connection before the server accepts traffic. Otherwise the
    /// first query connects implicitly.
    ///
    /// # Returns
    /// - `Ok(())` - Client is ready
    /// - `Err(DatabaseError::Driver)` - Explicit connection failed; startup must abort
    /// - `Err(DatabaseError::Disconnected)` - Client was already disconnected
    pub async fn initialize(&self) -> Result<(), DatabaseError> {
        tracing::info!("Initializing database client...");

        if self.state() == ClientState::Disconnected {
            return Err(DatabaseError::Disconnected);
        }

        if self.explicit_connect {
            self.conn.ping().await?;
            tracing::info!("Database client connected");
        }

        self.transition(ClientState::Constructed, ClientState::Ready);
        Ok(())
    }

    /// Closes the connection pool.
    ///
    /// Must be called once, by the bootstrap, during shutdown. No query
    /// succeeds afterwards.
    ///
    /// # Returns
    /// - `Ok(())` - Pool closed
    /// - `Err(DatabaseError::Disconnected)` - Disconnect was already called
    /// - `Err(DatabaseError::Driver)` - The pool failed to close cleanly
    pub async fn disconnect(&self) -> Result<(), DatabaseError> {
        let previous = self
            .state
            .swap(ClientState::Disconnected as u8, Ordering::AcqRel);
        if ClientState::from_u8(previous) == ClientState::Disconnected {
            return Err(DatabaseError::Disconnected);
        }

        self.conn.clone().close().await?;

        tracing::info!("Database client disconnected");
        Ok(())
    }

    pub fn state(&self) -> ClientState {
        ClientState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Executes a query through the middleware chain.
    ///
    /// The operation receives a handle to the shared pool. Driver errors it
    /// returns are classified into known request errors where a vendor code
    /// applies.
    ///
    /// # Arguments
    /// - `params` - Descriptor handed to every middleware
    /// - `operation` - Query to run once the chain reaches its end
    ///
    /// # Returns
    /// - `Ok(T)` - Value produced by the operation
    /// - `Err(DatabaseError::KnownRequest)` - Query failed with a coded error
    /// - `Err(DatabaseError::Driver)` - Query failed for another reason
    /// - `Err(DatabaseError::Disconnected)` - Client is disconnected
    /// - `Err(DatabaseError::Unanswered)` - A middleware skipped the query
    ///
    /// A query failure is reported even when a middleware returns `Ok(())`
    /// after observing it.
    pub async fn query<T, F, Fut>(&self, params: QueryParams, operation: F) -> Result<T, DatabaseError>
    where
        T: Send + 'static,
        F: FnOnce(DatabaseConnection) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, DbErr>> + Send + 'static,
    {
        if self.state() == ClientState::Disconnected {
            return Err(DatabaseError::Disconnected);
        }

        let (tx, mut rx) = oneshot::channel::<Result<T, DatabaseError>>();
        let conn = self.conn.clone();
        let terminal: Terminal<'_> = Box::new(move |params: QueryParams| {
            async move {
                // Receiver outlives the chain.
                match operation(conn).await {
                    Ok(value) => {
                        let _ = tx.send(Ok(value));
                        Ok(())
                    }
                    Err(err) => {
                        let err = DatabaseError::from_query(&params, err);
                        let _ = tx.send(Err(err.replicate()));
                        Err(err)
                    }
                }
            }
            .boxed()
        });

        let target = params.target();
        let outcome = Next::new(&self.middlewares, terminal).run(params).await;

        match (outcome, rx.try_recv()) {
            (Err(err), _) => Err(err),
            // A middleware may swallow the failure; the caller still sees it.
            (Ok(()), Ok(answer)) => answer,
            (Ok(()), Err(_)) => Err(DatabaseError::Unanswered(target)),
        }
    }

    fn transition(&self, from: ClientState, to: ClientState) {
        let _ = self
            .state
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire);
    }
}
