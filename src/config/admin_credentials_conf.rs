use std::collections::HashSet;
use std::env;
use tracing::{info, warn};

use crate::config::ConfigError;

/// Number of `ADMIN_<n>_ID` / `ADMIN_<n>_PASS` slots read from the environment.
pub const ADMIN_SLOTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredential {
    pub admin_id: String,
    pub password: String,
}

/// Fixed admin credential pairs, built once at startup and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct AdminCredentials {
    entries: Vec<AdminCredential>,
}

impl AdminCredentials {
    pub fn new(entries: Vec<AdminCredential>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.admin_id.is_empty() || entry.password.is_empty() {
                return Err(ConfigError::ValidationError("Admin id and password cannot be empty".to_string()));
            }
            if !seen.insert(entry.admin_id.as_str()) {
                return Err(ConfigError::ValidationError(format!("Duplicate admin id: {}", entry.admin_id)));
            }
        }
        Ok(AdminCredentials { entries })
    }

    /// Slots with a missing or empty id or password are skipped.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut entries = Vec::new();
        for slot in 1..=ADMIN_SLOTS {
            let id = env::var(format!("ADMIN_{}_ID", slot)).unwrap_or_default();
            let password = env::var(format!("ADMIN_{}_PASS", slot)).unwrap_or_default();
            match (id.is_empty(), password.is_empty()) {
                (false, false) => entries.push(AdminCredential { admin_id: id, password }),
                (true, true) => {}
                _ => warn!(slot, "Incomplete admin credential slot ignored"),
            }
        }
        if entries.is_empty() {
            warn!("No admin credentials configured; admin login will always fail");
        }
        let credentials = Self::new(entries)?;
        info!(count = credentials.len(), "Admin credentials loaded");
        Ok(credentials)
    }

    /// Exact plaintext match against one configured pair.
    pub fn verify(&self, admin_id: &str, password: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.admin_id == admin_id && entry.password == password)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
