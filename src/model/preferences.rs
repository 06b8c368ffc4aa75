use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Display preferences kept in signed cookies.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Validate, ToSchema)]
pub struct PreferencesDto {
    #[validate(length(min = 1, max = 32, message = "theme must be 1 to 32 characters"))]
    pub theme: String,
    /// Language tag, e.g. `en` or `pt-BR`.
    #[validate(length(min = 2, max = 16, message = "language must be 2 to 16 characters"))]
    pub language: String,
}
