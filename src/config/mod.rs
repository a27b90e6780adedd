pub mod app_conf;
pub mod mongo_conf;
pub mod jwt_conf;
pub mod admin_credentials_conf;

pub use app_conf::AppConfig;
pub use mongo_conf::MongoConfig;
pub use jwt_conf::JwtConfig;
pub use admin_credentials_conf::{AdminCredential, AdminCredentials};

use std::{env, fmt::Display, str::FromStr};
use tracing::{error, warn};

/// Common configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Parses `var` when set, falling back to `default` when it is absent.
pub(crate) fn parsed_env<T>(var: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(var) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|e| {
            error!("Invalid {} value: {}", var, e);
            ConfigError::ParseError(format!("{}: {}", var, e))
        }),
        Err(_) => {
            warn!("{} not set, using default: {}", var, default);
            Ok(default)
        }
    }
}
