use std::{str::FromStr, time::Duration};

use crate::server::error::{
    config::ConfigError,
    mapping::ErrorCodesStatusMapping,
    AppError,
};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEVELOPMENT_ENV: &str = "development";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// `APP_ENV=development`, relaxes the CORS policy.
    pub dev_mode: bool,

    pub database_url: String,
    pub database_explicit_connect: bool,
    pub database_max_connections: Option<u32>,
    pub database_connect_timeout: Option<Duration>,
    pub database_log_queries: bool,
    pub database_error_codes: ErrorCodesStatusMapping,

    pub cors_origins: Vec<String>,
    pub cookie_secret: Option<String>,
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first so a local `.env` file is honoured.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(AppError::ConfigErr(ConfigError::MissingEnvVar(_)))` - A required variable is missing
    /// - `Err(AppError::ConfigErr(ConfigError::InvalidEnvVar { .. }))` - A variable could not be parsed
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// # Arguments
    /// - `lookup` - Returns the value of a variable, `None` when unset
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(AppError::ConfigErr(_))` - A variable is missing or malformed
    pub fn from_lookup<L>(lookup: L) -> Result<Self, AppError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let vars = EnvVars { lookup };

        Ok(Self {
            host: vars
                .optional("HOST")
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: vars.parse("PORT")?.ok_or_else(|| missing("PORT"))?,
            dev_mode: vars.optional("APP_ENV").as_deref() == Some(DEVELOPMENT_ENV),
            database_url: vars
                .optional("DATABASE_URL")
                .ok_or_else(|| missing("DATABASE_URL"))?,
            database_explicit_connect: vars.flag("DATABASE_EXPLICIT_CONNECT")?,
            database_max_connections: vars.parse("DATABASE_MAX_CONNECTIONS")?,
            database_connect_timeout: vars
                .parse::<u64>("DATABASE_CONNECT_TIMEOUT_SECS")?
                .map(Duration::from_secs),
            database_log_queries: vars.flag("DATABASE_LOG_QUERIES")?,
            database_error_codes: vars.json("DATABASE_ERROR_CODES")?.unwrap_or_default(),
            cors_origins: vars
                .optional("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(str::trim)
                        .filter(|origin| !origin.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            cookie_secret: vars.optional("COOKIE_SECRET"),
        })
    }
}

fn missing(name: &str) -> ConfigError {
    ConfigError::MissingEnvVar(name.to_string())
}

struct EnvVars<L> {
    lookup: L,
}

impl<L> EnvVars<L>
where
    L: Fn(&str) -> Option<String>,
{
    /// Value of a variable, treating empty values as unset.
    fn optional(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|value| !value.trim().is_empty())
    }

    fn parse<T>(&self, name: &str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(name)
            .map(|value| {
                value
                    .trim()
                    .parse::<T>()
                    .map_err(|e| invalid(name, &value, e.to_string()))
            })
            .transpose()
    }

    fn flag(&self, name: &str) -> Result<bool, ConfigError> {
        let Some(value) = self.optional(name) else {
            return Ok(false);
        };

        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(invalid(name, &value, "expected a boolean".to_string())),
        }
    }

    fn json<T>(&self, name: &str) -> Result<Option<T>, ConfigError>
    where
        T: serde::de::DeserializeOwned,
    {
        self.optional(name)
            .map(|value| serde_json::from_str(&value).map_err(|e| invalid(name, &value, e.to_string())))
            .transpose()
    }
}

fn invalid(name: &str, value: &str, reason: String) -> ConfigError {
    ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value: value.to_string(),
        reason,
    }
}
