use async_trait::async_trait;
use bson::oid::ObjectId;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::dto::claim_dto::{ClaimListEntry, ClaimResponse, ClaimSubmittedResponse, SubmitClaimRequest};
use crate::dto::{non_blank, MessageResponse};
use crate::model::claim::{ClaimRequest, ClaimStatus, Claimant, RegisteredBy};
use crate::model::item::ItemKind;
use crate::repository::claim_repo::ClaimRepository;
use crate::repository::item_repo::ItemRepository;
use crate::repository::repository_error::RepositoryError;
use crate::repository::user_repo::UserRepository;
use crate::service::{parse_object_id, user_object_id};
use crate::util::error::ServiceError;
use crate::util::jwt::Principal;

#[async_trait]
pub trait ClaimService: Send + Sync {
    async fn submit(&self, principal: &Principal, request: SubmitClaimRequest) -> Result<ClaimSubmittedResponse, ServiceError>;
    async fn list_all(&self) -> Result<Vec<ClaimListEntry>, ServiceError>;
    async fn list_by_status(&self, status: ClaimStatus) -> Result<Vec<ClaimResponse>, ServiceError>;
    async fn get(&self, id: &str) -> Result<ClaimResponse, ServiceError>;
    async fn resolve(&self, id: &str) -> Result<MessageResponse, ServiceError>;
    async fn reject(&self, id: &str) -> Result<MessageResponse, ServiceError>;
}

pub struct ClaimServiceImpl {
    pub claim_repo: Arc<dyn ClaimRepository>,
    pub found_repo: Arc<dyn ItemRepository>,
    pub user_repo: Arc<dyn UserRepository>,
}

impl ClaimServiceImpl {
    pub fn new(
        claim_repo: Arc<dyn ClaimRepository>,
        found_repo: Arc<dyn ItemRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self { claim_repo, found_repo, user_repo }
    }

    async fn load(&self, id: &str) -> Result<ClaimRequest, ServiceError> {
        let id = parse_object_id(id, "Claim")?;
        match self.claim_repo.get_by_id(id).await {
            Ok(claim) => Ok(claim),
            Err(RepositoryError::NotFound(_)) => Err(ServiceError::NotFound("Claim not found".to_string())),
            Err(e) => Err(e.into()),
        }
    }

    /// Current name of a found item, `None` once it has been deleted.
    async fn live_item_name(&self, item_id: ObjectId) -> Result<Option<String>, ServiceError> {
        match self.found_repo.get_by_id(item_id).await {
            Ok(item) => Ok(Some(item.item_name)),
            Err(RepositoryError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Moves a claim toward `target`. Reapplying the current terminal status
    /// writes nothing; the write itself only lands if the stored status is
    /// still the one that was read.
    async fn transition(&self, id: &str, target: ClaimStatus) -> Result<ClaimStatus, ServiceError> {
        let claim = self.load(id).await?;
        let claim_id = claim.id.ok_or_else(|| ServiceError::InternalError("Stored claim has no id".to_string()))?;

        let next = claim.status.transition(target).map_err(|e| {
            warn!(claim_id = %claim_id, "Refused claim transition: {}", e);
            ServiceError::Conflict(format!("Claim is already {}", claim.status))
        })?;
        if next == claim.status {
            info!(claim_id = %claim_id, "Claim already {}", next);
            return Ok(next);
        }

        if !self.claim_repo.transition_status(claim_id, claim.status, next).await? {
            warn!(claim_id = %claim_id, "Claim changed while being updated");
            return Err(ServiceError::Conflict("Claim status was changed by another request".to_string()));
        }
        info!(claim_id = %claim_id, "Claim moved from {} to {}", claim.status, next);
        Ok(next)
    }
}

#[async_trait]
impl ClaimService for ClaimServiceImpl {
    #[instrument(skip(self, principal, request), fields(item_id = %request.item_id))]
    async fn submit(&self, principal: &Principal, request: SubmitClaimRequest) -> Result<ClaimSubmittedResponse, ServiceError> {
        let user_id = user_object_id(principal)?;
        let item_id = parse_object_id(&request.item_id, ItemKind::Found.label())?;

        let item = match self.found_repo.get_by_id(item_id).await {
            Ok(item) => item,
            Err(RepositoryError::NotFound(_)) => {
                return Err(ServiceError::NotFound(format!("{} not found", ItemKind::Found.label())))
            }
            Err(e) => return Err(e.into()),
        };
        let user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;

        let claim = ClaimRequest {
            id: None,
            item_id,
            item_name: item.item_name,
            item_type: ItemKind::Found.as_str().to_string(),
            item_description: item.description,
            item_location: item.location,
            claimed_by: Claimant {
                user_id,
                email: user.email,
                phone: non_blank(request.phone),
                department: non_blank(request.department),
                roll_number: user.roll_number,
            },
            registered_by: RegisteredBy {
                email: item.reporter.email,
                phone: item.reporter.phone,
                department: item.reporter.department,
                roll_number: item.reporter.roll_number,
            },
            claim_description: request.claim_description.trim().to_string(),
            status: ClaimStatus::Pending,
            created_at: None,
            updated_at: None,
        };

        let created = self.claim_repo.create(claim).await?;
        let claim_id = created.id.map(|id| id.to_hex()).unwrap_or_default();
        info!(claim_id = %claim_id, "Claim submitted");
        Ok(ClaimSubmittedResponse {
            message: "Claim request submitted successfully!".to_string(),
            claim_id,
        })
    }

    async fn list_all(&self) -> Result<Vec<ClaimListEntry>, ServiceError> {
        let claims = self.claim_repo.list(None).await?;
        let mut names: HashMap<ObjectId, Option<String>> = HashMap::new();
        let mut entries = Vec::with_capacity(claims.len());
        for claim in claims {
            let live_item_name = match names.get(&claim.item_id) {
                Some(name) => name.clone(),
                None => {
                    let name = self.live_item_name(claim.item_id).await?;
                    names.insert(claim.item_id, name.clone());
                    name
                }
            };
            entries.push(ClaimListEntry { claim: claim.into(), live_item_name });
        }
        Ok(entries)
    }

    async fn list_by_status(&self, status: ClaimStatus) -> Result<Vec<ClaimResponse>, ServiceError> {
        let claims = self.claim_repo.list(Some(status)).await?;
        Ok(claims.into_iter().map(ClaimResponse::from).collect())
    }

    async fn get(&self, id: &str) -> Result<ClaimResponse, ServiceError> {
        self.load(id).await.map(ClaimResponse::from)
    }

    #[instrument(skip(self))]
    async fn resolve(&self, id: &str) -> Result<MessageResponse, ServiceError> {
        self.transition(id, ClaimStatus::Resolved).await?;
        Ok(MessageResponse::new("Claim successfully resolved"))
    }

    #[instrument(skip(self))]
    async fn reject(&self, id: &str) -> Result<MessageResponse, ServiceError> {
        self.transition(id, ClaimStatus::Rejected).await?;
        Ok(MessageResponse::new("Claim request rejected"))
    }
}
