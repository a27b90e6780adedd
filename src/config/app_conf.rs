use std::env;
use crate::config::ConfigError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub log_dir: String,
    /// Empty means any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    /// `APP_PORT` wins over the plain `PORT` most hosting platforms inject.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("APP_PORT").or_else(|_| env::var("PORT")) {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|e| ConfigError::ParseError(format!("APP_PORT: {}", e)))?,
            Err(_) => 5000,
        };
        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|raw| Self::parse_origins(&raw))
            .unwrap_or_default();
        Ok(AppConfig { host, port, log_dir, cors_allowed_origins })
    }

    fn parse_origins(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "0.0.0.0".to_string(),
            port: 5000,
            log_dir: "logs".to_string(),
            cors_allowed_origins: Vec::new(),
        }
    }
}
