use serde::Serialize;

/// Live counters for the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub users: u64,
    pub lost_items: u64,
    pub found_items: u64,
    pub pending_claims: u64,
    pub resolved_claims: u64,
    pub rejected_claims: u64,
}
