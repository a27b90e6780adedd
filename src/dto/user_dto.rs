use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{not_blank, validate_section};
use crate::model::user::{User, UserChanges};

/// Public view of a user; the password hash never leaves the service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub roll_number: String,
    pub role: String,
    pub year: i32,
    pub branch: String,
    pub section: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            full_name: user.full_name,
            email: user.email,
            roll_number: user.roll_number,
            role: user.role.as_str().to_string(),
            year: user.year,
            branch: user.branch,
            section: user.section,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateUserRequest {
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub full_name: Option<String>,
    #[validate(range(min = 1, max = 4))]
    pub year: Option<i32>,
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub branch: Option<String>,
    #[validate(custom(function = "validate_section"))]
    pub section: Option<String>,
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(req: UpdateUserRequest) -> Self {
        UserChanges {
            full_name: req.full_name.map(|v| v.trim().to_string()),
            year: req.year,
            branch: req.branch.map(|v| v.trim().to_string()),
            section: req.section,
        }
    }
}
