use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{not_blank, validate_roll_number, validate_section};
use crate::dto::user_dto::UserResponse;
use crate::util::jwt::IssuedToken;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SignupRequest {
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(range(min = 1, max = 4))]
    pub year: i32,
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub branch: String,
    #[validate(custom(function = "validate_section"))]
    pub section: String,
    #[validate(custom(function = "validate_roll_number"))]
    pub roll_number: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoginRequest {
    /// Only presence is checked; an address that matches no account fails as bad credentials.
    #[validate(custom(function = "not_blank"))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AdminLoginRequest {
    #[validate(custom(function = "not_blank"))]
    pub admin_id: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Body returned by user signup and login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub message: String,
    #[serde(flatten)]
    pub token: IssuedToken,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLoginResponse {
    pub message: String,
    #[serde(flatten)]
    pub token: IssuedToken,
}
