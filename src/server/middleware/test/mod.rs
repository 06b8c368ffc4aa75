use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    response::Html,
    routing::{get, post},
    Json, Router,
};
use sea_orm::ConnectionTrait;
use serde::Deserialize;
use serde_json::{json, Value};
use test_utils::{
    client::TestClient,
    error::TestError,
    fixture::{payload, schema},
    log::LogCapture,
};
use utoipa::ToSchema;
use validator::Validate;

use crate::server::{
    database::middleware::QueryParams,
    error::{
        database::{DatabaseError, KnownRequestError},
        http::HttpError,
        mapping::{DatabaseErrorMapping, ErrorCodeMapping},
        AppError,
    },
    fixture,
    middleware::{
        cookie::SignedCookies,
        validation::{declared_properties, ValidatedJson, ValidationOptions},
    },
    state::AppState,
};

mod cookie;

#[derive(Deserialize, Validate, ToSchema)]
struct CreateUserDto {
    #[validate(email(message = "email must be an email"))]
    email: String,
    #[validate(length(min = 1, message = "name should not be empty"))]
    name: String,
}

async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let statement = schema::insert_user(&dto.email, &dto.name);
    state
        .db
        .query(QueryParams::new("users", "create"), move |db| async move {
            db.execute_unprepared(&statement).await
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({"email": dto.email, "name": dto.name})),
    ))
}

async fn create_post(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<StatusCode, AppError> {
    let author_id = body["authorId"].as_i64().unwrap_or_default();
    let statement = schema::insert_post(author_id, "First");
    state
        .db
        .query(QueryParams::new("posts", "create"), move |db| async move {
            db.execute_unprepared(&statement).await
        })
        .await?;

    Ok(StatusCode::CREATED)
}

async fn unknown_code() -> Result<Json<Value>, AppError> {
    Err(DatabaseError::KnownRequest(KnownRequestError::new(
        "P9999",
        "\nInvalid `users.findMany()` invocation:\n\n\n→ users.findMany()\n\nSomething odd\n",
    ))
    .into())
}

async fn set_cookie(cookies: SignedCookies) -> StatusCode {
    cookies.set("session", "abc");
    StatusCode::NO_CONTENT
}

async fn clear_cookie(cookies: SignedCookies) -> StatusCode {
    cookies.remove("session");
    StatusCode::NO_CONTENT
}

async fn get_cookie(cookies: SignedCookies) -> Json<Option<String>> {
    Json(cookies.get("session"))
}

fn test_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/posts", post(create_post))
        .route("/items", get(|| async { Json(json!([{"id": 1}, {"id": 2}])) }))
        .route("/text", get(|| async { "hello" }))
        .route("/accepted", get(|| async { StatusCode::ACCEPTED }))
        .route("/html", get(|| async { Html("<p>hi</p>") }))
        .route(
            "/teapot",
            get(|| async { (StatusCode::IM_A_TEAPOT, Json(json!({"brew": false}))) }),
        )
        .route(
            "/forbidden",
            get(|| async { Err::<(), AppError>(HttpError::with_message(StatusCode::FORBIDDEN, "nope").into()) }),
        )
        .route(
            "/invalid",
            get(|| async {
                Err::<(), AppError>(
                    HttpError::validation(vec!["a".to_string(), "b".to_string()]).into(),
                )
            }),
        )
        .route("/unknown-code", get(unknown_code))
        .route("/cookie/set", get(set_cookie))
        .route("/cookie/get", get(get_cookie))
        .route("/cookie/clear", get(clear_cookie))
}

async fn client_with(mapping: DatabaseErrorMapping) -> Result<TestClient, AppError> {
    let state = fixture::test_state(&[schema::USERS_TABLE, schema::POSTS_TABLE]).await?;

    Ok(TestClient::new(fixture::pipeline_app(
        test_routes(),
        state,
        mapping,
    )))
}

async fn client() -> Result<TestClient, AppError> {
    client_with(DatabaseErrorMapping::default()).await
}
