use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub full_name: String,
    pub email: String,
    pub roll_number: String,
    pub password_hash: String,
    #[serde(default)]
    pub role: UserRole,
    pub year: i32,
    pub branch: String,
    pub section: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Partial profile update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub full_name: Option<String>,
    pub year: Option<i32>,
    pub branch: Option<String>,
    pub section: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self == &UserChanges::default()
    }

    /// `$set` body with the stored camelCase field names.
    pub fn to_set_document(&self) -> bson::Document {
        let mut set = bson::Document::new();
        if let Some(ref full_name) = self.full_name {
            set.insert("fullName", full_name.clone());
        }
        if let Some(year) = self.year {
            set.insert("year", year);
        }
        if let Some(ref branch) = self.branch {
            set.insert("branch", branch.clone());
        }
        if let Some(ref section) = self.section {
            set.insert("section", section.clone());
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_document_only_carries_changed_fields() {
        let changes = UserChanges {
            year: Some(3),
            section: Some("C".to_string()),
            ..Default::default()
        };
        let set = changes.to_set_document();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get_i32("year").unwrap(), 3);
        assert_eq!(set.get_str("section").unwrap(), "C");
        assert!(UserChanges::default().to_set_document().is_empty());
    }
}
