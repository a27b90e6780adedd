use serde::{Deserialize, Serialize};
use validator::Validate;

use super::not_blank;
use crate::model::claim::{ClaimRequest, ClaimStatus, RegisteredBy};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SubmitClaimRequest {
    #[validate(custom(function = "not_blank"))]
    pub item_id: String,
    #[validate(custom(function = "not_blank"), length(max = 2000))]
    pub claim_description: String,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimSubmittedResponse {
    pub message: String,
    pub claim_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimantResponse {
    pub user_id: String,
    pub email: String,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub roll_number: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResponse {
    pub id: String,
    pub item_id: String,
    pub item_name: String,
    pub item_type: String,
    pub item_description: Option<String>,
    pub item_location: Option<String>,
    pub claimed_by: ClaimantResponse,
    pub registered_by: RegisteredBy,
    pub claim_description: String,
    pub status: ClaimStatus,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<ClaimRequest> for ClaimResponse {
    fn from(claim: ClaimRequest) -> Self {
        ClaimResponse {
            id: claim.id.map(|id| id.to_hex()).unwrap_or_default(),
            item_id: claim.item_id.to_hex(),
            item_name: claim.item_name,
            item_type: claim.item_type,
            item_description: claim.item_description,
            item_location: claim.item_location,
            claimed_by: ClaimantResponse {
                user_id: claim.claimed_by.user_id.to_hex(),
                email: claim.claimed_by.email,
                phone: claim.claimed_by.phone,
                department: claim.claimed_by.department,
                roll_number: claim.claimed_by.roll_number,
            },
            registered_by: claim.registered_by,
            claim_description: claim.claim_description,
            status: claim.status,
            created_at: claim.created_at,
            updated_at: claim.updated_at,
        }
    }
}

/// Entry of the full admin listing: the stored snapshot plus the current
/// name of the found item, `null` once that item is gone.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimListEntry {
    #[serde(flatten)]
    pub claim: ClaimResponse,
    pub live_item_name: Option<String>,
}
