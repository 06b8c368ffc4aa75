use axum::{http::StatusCode, Json};

use crate::{
    model::{
        api::{ErrorEnvelope, ResponseEnvelope},
        preferences::PreferencesDto,
    },
    server::{
        error::{http::HttpError, AppError},
        middleware::{cookie::SignedCookies, validation::ValidatedJson},
    },
};

/// Tag for grouping preference endpoints in OpenAPI documentation
pub static PREFERENCES_TAG: &str = "preferences";

const THEME_COOKIE: &str = "theme";
const LANGUAGE_COOKIE: &str = "language";

/// Stores the caller's preferences in signed cookies.
///
/// # Arguments
/// - `cookies` - Signed cookie jar for the request
/// - `dto` - Whitelisted and validated preferences
///
/// # Returns
/// - `200 OK` - Preferences stored, echoed back
/// - `400 Bad Request` - Unknown property or failed field rule
#[utoipa::path(
    put,
    path = "/api/preferences",
    tag = PREFERENCES_TAG,
    request_body = PreferencesDto,
    responses(
        (status = 200, description = "Preferences stored", body = ResponseEnvelope<PreferencesDto>),
        (status = 400, description = "Invalid preferences", body = ErrorEnvelope)
    ),
)]
pub async fn put_preferences(
    cookies: SignedCookies,
    ValidatedJson(dto): ValidatedJson<PreferencesDto>,
) -> Json<PreferencesDto> {
    cookies.set(THEME_COOKIE, &dto.theme);
    cookies.set(LANGUAGE_COOKIE, &dto.language);

    Json(dto)
}

/// Reads the caller's preferences back from signed cookies.
///
/// Cookies with a signature that does not verify count as missing.
///
/// # Returns
/// - `200 OK` - Both preferences present
/// - `400 Bad Request` - Only one of the two cookies is present
/// - `404 Not Found` - No preferences saved
#[utoipa::path(
    get,
    path = "/api/preferences",
    tag = PREFERENCES_TAG,
    responses(
        (status = 200, description = "Saved preferences", body = ResponseEnvelope<PreferencesDto>),
        (status = 400, description = "Incomplete preferences", body = ErrorEnvelope),
        (status = 404, description = "No preferences saved", body = ErrorEnvelope)
    ),
)]
pub async fn get_preferences(cookies: SignedCookies) -> Result<Json<PreferencesDto>, AppError> {
    match (cookies.get(THEME_COOKIE), cookies.get(LANGUAGE_COOKIE)) {
        (Some(theme), Some(language)) => Ok(Json(PreferencesDto { theme, language })),
        (None, None) => Err(HttpError::not_found("No preferences saved").into()),
        _ => Err(AppError::BadRequest(
            "Preferences are incomplete, save them again".to_string(),
        )),
    }
}

/// Clears the caller's preferences.
///
/// # Returns
/// - `204 No Content` - Preference cookies removed
#[utoipa::path(
    delete,
    path = "/api/preferences",
    tag = PREFERENCES_TAG,
    responses(
        (status = 204, description = "Preferences cleared")
    ),
)]
pub async fn delete_preferences(cookies: SignedCookies) -> StatusCode {
    cookies.remove(THEME_COOKIE);
    cookies.remove(LANGUAGE_COOKIE);

    StatusCode::NO_CONTENT
}
