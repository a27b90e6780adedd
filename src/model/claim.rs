use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    Pending,
    Resolved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot move claim from {from} to {to}")]
pub struct InvalidTransition {
    pub from: ClaimStatus,
    pub to: ClaimStatus,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "pending",
            ClaimStatus::Resolved => "resolved",
            ClaimStatus::Rejected => "rejected",
        }
    }

    /// Next status for a requested target. Re-applying the current terminal
    /// status is a no-op; crossing from one terminal status to the other is not allowed.
    pub fn transition(self, to: ClaimStatus) -> Result<ClaimStatus, InvalidTransition> {
        match (self, to) {
            (_, ClaimStatus::Pending) if self != ClaimStatus::Pending => Err(InvalidTransition { from: self, to }),
            (ClaimStatus::Pending, _) => Ok(to),
            (from, to) if from == to => Ok(to),
            (from, to) => Err(InvalidTransition { from, to }),
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claimant {
    pub user_id: ObjectId,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    pub roll_number: String,
}

/// Reporter details copied from the found item at claim time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredBy {
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub roll_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRequest {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub item_id: ObjectId,
    pub item_name: String,
    pub item_type: String,
    #[serde(default)]
    pub item_description: Option<String>,
    #[serde(default)]
    pub item_location: Option<String>,
    pub claimed_by: Claimant,
    pub registered_by: RegisteredBy,
    pub claim_description: String,
    pub status: ClaimStatus,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}
