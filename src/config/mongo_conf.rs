use serde::{Deserialize, Serialize};
use std::{env, time::Duration};
use mongodb::{
    options::{ClientOptions, Credential},
    Client, Database,
};
use tracing::{debug, error, info, warn};

use crate::config::{parsed_env, ConfigError};

/// Names of the four collections the service writes to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Collections {
    pub users: String,
    pub lost_items: String,
    pub found_items: String,
    pub claims: String,
}

impl Collections {
    fn from_env() -> Self {
        let defaults = Collections::default();
        Collections {
            users: env::var("MONGO_USERS_COLLECTION").unwrap_or(defaults.users),
            lost_items: env::var("MONGO_LOST_ITEMS_COLLECTION").unwrap_or(defaults.lost_items),
            found_items: env::var("MONGO_FOUND_ITEMS_COLLECTION").unwrap_or(defaults.found_items),
            claims: env::var("MONGO_CLAIMS_COLLECTION").unwrap_or(defaults.claims),
        }
    }

    fn all(&self) -> [&str; 4] {
        [&self.users, &self.lost_items, &self.found_items, &self.claims]
    }
}

impl Default for Collections {
    fn default() -> Self {
        Collections {
            users: "users".to_string(),
            lost_items: "lost_items".to_string(),
            found_items: "found_items".to_string(),
            claims: "claim_requests".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    /// Optional credentials, applied on top of whatever the URI carries.
    pub username: Option<String>,
    pub password: Option<String>,
    pub collections: Collections,
    pub pool_size: u32,
    pub connection_timeout_secs: u64,
}

impl MongoConfig {
    /// Reads `MONGO_URI` (required), `MONGO_DATABASE`, `MONGO_USERNAME`,
    /// `MONGO_PASSWORD`, `MONGO_POOL_SIZE`, `MONGO_CONNECTION_TIMEOUT` and the
    /// `MONGO_*_COLLECTION` overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading MongoDB configuration from environment variables");
        let defaults = MongoConfig::default();

        let uri = env::var("MONGO_URI").map_err(|_| {
            error!("MONGO_URI environment variable not found");
            ConfigError::EnvVarNotFound("MONGO_URI".to_string())
        })?;

        let database = env::var("MONGO_DATABASE").unwrap_or_else(|_| {
            warn!("MONGO_DATABASE not set, using default: {}", defaults.database);
            defaults.database.clone()
        });

        let username = env::var("MONGO_USERNAME").ok();
        let password = env::var("MONGO_PASSWORD").ok();
        if username.is_some() {
            debug!("MongoDB credentials provided");
        }

        let config = MongoConfig {
            uri,
            database,
            username,
            password,
            collections: Collections::from_env(),
            pool_size: parsed_env("MONGO_POOL_SIZE", defaults.pool_size)?,
            connection_timeout_secs: parsed_env("MONGO_CONNECTION_TIMEOUT", defaults.connection_timeout_secs)?,
        };
        config.validate()?;

        debug!(database = %config.database, collections = ?config.collections, "MongoDB configuration loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| {
            error!("Invalid MongoDB configuration: {}", msg);
            Err(ConfigError::ValidationError(msg.to_string()))
        };

        if self.uri.trim().is_empty() {
            return invalid("MongoDB URI cannot be empty");
        }
        if self.database.trim().is_empty() {
            return invalid("MongoDB database cannot be empty");
        }
        if self.collections.all().iter().any(|name| name.trim().is_empty()) {
            return invalid("MongoDB collection names cannot be empty");
        }
        if self.pool_size == 0 {
            return invalid("MongoDB pool size must be greater than 0");
        }
        if self.connection_timeout_secs == 0 {
            return invalid("MongoDB connection timeout must be greater than 0");
        }
        match (&self.username, &self.password) {
            (Some(user), _) if user.is_empty() => invalid("MongoDB username cannot be empty if set"),
            (_, Some(pass)) if pass.is_empty() => invalid("MongoDB password cannot be empty if set"),
            (Some(_), None) | (None, Some(_)) => invalid("MongoDB username and password must be set together"),
            _ => Ok(()),
        }
    }

    /// Opens a pooled client; every repository shares the returned handle.
    pub async fn connect(&self) -> Result<Database, mongodb::error::Error> {
        let mut options = ClientOptions::parse(&self.uri).await?;
        options.app_name = Some("CampusLostFound".to_string());
        options.max_pool_size = Some(self.pool_size);
        options.connect_timeout = Some(Duration::from_secs(self.connection_timeout_secs));
        options.server_selection_timeout = Some(Duration::from_secs(self.connection_timeout_secs));

        if let (Some(username), Some(password)) = (&self.username, &self.password) {
            options.credential = Some(
                Credential::builder()
                    .username(username.clone())
                    .password(password.clone())
                    .build(),
            );
        }

        let client = Client::with_options(options)?;
        info!(database = %self.database, "MongoDB client created");
        Ok(client.database(&self.database))
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "lost_and_found".to_string(),
            username: None,
            password: None,
            collections: Collections::default(),
            pool_size: 10,
            connection_timeout_secs: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MongoConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.database, "lost_and_found");
        assert_eq!(config.collections.claims, "claim_requests");
        assert_eq!(config.pool_size, 10);
    }

    #[test]
    fn test_blank_collection_rejected() {
        let mut config = MongoConfig::default();
        config.collections.found_items = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_pool_or_timeout_rejected() {
        let config = MongoConfig { pool_size: 0, ..MongoConfig::default() };
        assert!(config.validate().is_err());
        let config = MongoConfig { connection_timeout_secs: 0, ..MongoConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_credentials_must_be_paired() {
        let config = MongoConfig {
            username: Some("campus".to_string()),
            ..MongoConfig::default()
        };
        assert!(config.validate().is_err());

        let config = MongoConfig {
            username: Some("campus".to_string()),
            password: Some(String::new()),
            ..MongoConfig::default()
        };
        assert!(config.validate().is_err());

        let config = MongoConfig {
            username: Some("campus".to_string()),
            password: Some("secret".to_string()),
            ..MongoConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
