use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DbErr};
use test_utils::{fixture::schema, log::LogCapture};

use crate::server::{
    database::{
        client::{ClientState, DatabaseClient},
        middleware::{Next, QueryLogger, QueryMiddleware, QueryOutcome, QueryParams},
        options::{DatabaseClientOptions, DatabaseOptionsProvider, OptionsFactory},
    },
    error::{
        database::{
            DatabaseError, CODE_FOREIGN_KEY_VIOLATION, CODE_MALFORMED_VALUE,
            CODE_RECORD_NOT_FOUND, CODE_UNIQUE_VIOLATION,
        },
        AppError,
    },
    fixture::{self, MEMORY_DATABASE_URL},
};


/// URL of a SQLite file whose parent directory does not exist.
const UNREACHABLE_DATABASE_URL: &str = "sqlite:///definitely/missing/dir/app.db";

/// Records the order in which middlewares are entered and left.
struct Recorder {
    name: &'static str,
    events: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl QueryMiddleware for Recorder {
    async fn handle(&self, params: QueryParams, next: Next<'_>) -> QueryOutcome {
        self.events
            .lock()
            .unwrap()
            .push(format!("{}:before {}", self.name, params));

        let outcome = next.run(params).await;

        self.events.lock().unwrap().push(format!("{}:after", self.name));
        outcome
    }
}

/// Returns without running the rest of the chain.
struct ShortCircuit;

#[async_trait]
impl QueryMiddleware for ShortCircuit {
    async fn handle(&self, _params: QueryParams, _next: Next<'_>) -> QueryOutcome {
        Ok(())
    }
}

/// Runs the chain and discards its outcome.
struct Swallow;

#[async_trait]
impl QueryMiddleware for Swallow {
    async fn handle(&self, params: QueryParams, next: Next<'_>) -> QueryOutcome {
        let _ = next.run(params).await;
        Ok(())
    }
}

/// Rejects every query with its own error.
struct Reject;

#[async_trait]
impl QueryMiddleware for Reject {
    async fn handle(&self, params: QueryParams, _next: Next<'_>) -> QueryOutcome {
        Err(DatabaseError::Driver(DbErr::Custom(format!("rejected {params}"))))
    }
}

async fn insert_user(client: &DatabaseClient, email: &str) -> Result<u64, DatabaseError> {
    let statement = schema::insert_user(email, "Pilot");

    client
        .query(QueryParams::new("users", "create"), move |db| async move {
            db.execute_unprepared(&statement)
                .await
                .map(|result| result.rows_affected())
        })
        .await
}
