pub mod user_service;
pub mod admin_service;
pub mod item_service;
pub mod claim_service;

use bson::oid::ObjectId;
use crate::util::error::ServiceError;
use crate::util::jwt::Principal;

/// A path id that is not a valid ObjectId can never match a record.
pub(crate) fn parse_object_id(raw: &str, label: &str) -> Result<ObjectId, ServiceError> {
    ObjectId::parse_str(raw.trim()).map_err(|_| ServiceError::NotFound(format!("{} not found", label)))
}

/// Database id of a verified user principal.
pub(crate) fn user_object_id(principal: &Principal) -> Result<ObjectId, ServiceError> {
    match principal {
        Principal::User { user_id } => ObjectId::parse_str(user_id)
            .map_err(|_| ServiceError::Unauthenticated("Invalid user token".to_string())),
        Principal::Admin { .. } => Err(ServiceError::Forbidden("user access required".to_string())),
    }
}
