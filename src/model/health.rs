use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct HealthDto {
    /// Always `ok` when the database answered the ping.
    pub status: String,
    pub version: String,
}
