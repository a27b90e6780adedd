use std::env;
use tracing::{debug, error, info};

use crate::config::{parsed_env, ConfigError};

/// Minimum accepted length of the HS256 signing secret.
pub const MIN_SECRET_LEN: usize = 32;

/// JWT configuration structure
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub jwt_secret: String,
    /// User token lifetime in minutes
    pub user_token_expiration: i64,
    /// Admin token lifetime in minutes
    pub admin_token_expiration: i64,
    /// JWT issuer (optional, checked on verification when set)
    pub jwt_issuer: Option<String>,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables
    ///
    /// Expected environment variables:
    /// - JWT_SECRET: Secret key for signing JWT tokens (required)
    /// - JWT_USER_TOKEN_EXPIRY: User token expiration in minutes (defaults to 10080 = 7 days)
    /// - JWT_ADMIN_TOKEN_EXPIRY: Admin token expiration in minutes (defaults to 1440 = 24 hours)
    /// - JWT_ISSUER: JWT issuer (optional)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading JWT configuration from environment variables");

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| {
                error!("JWT_SECRET environment variable not found");
                ConfigError::EnvVarNotFound("JWT_SECRET".to_string())
            })?;
        debug!("JWT secret loaded (length: {} chars)", jwt_secret.len());

        let user_token_expiration = parsed_env::<i64>("JWT_USER_TOKEN_EXPIRY", 10080)?;
        let admin_token_expiration = parsed_env::<i64>("JWT_ADMIN_TOKEN_EXPIRY", 1440)?;

        let jwt_issuer = env::var("JWT_ISSUER").ok().filter(|s| !s.is_empty());
        if let Some(ref issuer) = jwt_issuer {
            debug!("JWT issuer: {}", issuer);
        }

        let config = JwtConfig {
            jwt_secret,
            user_token_expiration,
            admin_token_expiration,
            jwt_issuer,
        };
        config.validate()?;

        info!("JWT configuration loaded successfully");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.len() < MIN_SECRET_LEN {
            error!("JWT secret is too short (minimum {} characters required)", MIN_SECRET_LEN);
            return Err(ConfigError::ValidationError(format!(
                "JWT secret must be at least {} characters long",
                MIN_SECRET_LEN
            )));
        }

        for (label, minutes) in [("User", self.user_token_expiration), ("Admin", self.admin_token_expiration)] {
            if minutes <= 0 {
                return Err(ConfigError::ValidationError(format!(
                    "{} token expiration must be greater than 0",
                    label
                )));
            }
        }
        Ok(())
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        JwtConfig {
            jwt_secret: "test_secret_key_for_jwt_testing_should_be_long_enough_for_security_purposes".to_string(),
            user_token_expiration: 10080,
            admin_token_expiration: 1440,
            jwt_issuer: Some("campus-lost-found".to_string()),
        }
    }
}
