use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::config::AdminCredentials;
use crate::dto::admin_dto::StatsResponse;
use crate::dto::auth_dto::AdminLoginResponse;
use crate::dto::MessageResponse;
use crate::model::claim::ClaimStatus;
use crate::repository::claim_repo::ClaimRepository;
use crate::repository::item_repo::ItemRepository;
use crate::repository::user_repo::UserRepository;
use crate::util::error::ServiceError;
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl, Principal};

#[async_trait]
pub trait AdminService: Send + Sync {
    async fn login(&self, admin_id: String, password: String) -> Result<AdminLoginResponse, ServiceError>;
    async fn dashboard(&self, principal: &Principal) -> Result<MessageResponse, ServiceError>;
    async fn stats(&self) -> Result<StatsResponse, ServiceError>;
}

pub struct AdminServiceImpl {
    pub credentials: Arc<AdminCredentials>,
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
    pub user_repo: Arc<dyn UserRepository>,
    pub lost_repo: Arc<dyn ItemRepository>,
    pub found_repo: Arc<dyn ItemRepository>,
    pub claim_repo: Arc<dyn ClaimRepository>,
}

#[async_trait]
impl AdminService for AdminServiceImpl {
    #[instrument(skip(self, password), fields(admin_id = %admin_id))]
    async fn login(&self, admin_id: String, password: String) -> Result<AdminLoginResponse, ServiceError> {
        if !self.credentials.verify(&admin_id, &password) {
            warn!("Admin login failed");
            return Err(ServiceError::Unauthenticated("Invalid credentials.".to_string()));
        }
        let token = self
            .jwt_utils
            .issue_token(&Principal::Admin { admin_id })
            .map_err(|e| ServiceError::InternalError(format!("JWT error: {}", e)))?;
        info!("Admin logged in");
        Ok(AdminLoginResponse {
            message: "Admin verified successfully.".to_string(),
            token,
        })
    }

    async fn dashboard(&self, principal: &Principal) -> Result<MessageResponse, ServiceError> {
        match principal {
            Principal::Admin { admin_id } => Ok(MessageResponse::new(format!("Welcome Admin {}!", admin_id))),
            Principal::User { .. } => Err(ServiceError::Forbidden("admin access required".to_string())),
        }
    }

    #[instrument(skip(self))]
    async fn stats(&self) -> Result<StatsResponse, ServiceError> {
        let (users, lost_items, found_items, pending_claims, resolved_claims, rejected_claims) = tokio::try_join!(
            self.user_repo.count(),
            self.lost_repo.count(),
            self.found_repo.count(),
            self.claim_repo.count_by_status(ClaimStatus::Pending),
            self.claim_repo.count_by_status(ClaimStatus::Resolved),
            self.claim_repo.count_by_status(ClaimStatus::Rejected),
        )?;
        Ok(StatsResponse {
            users,
            lost_items,
            found_items,
            pending_claims,
            resolved_claims,
            rejected_claims,
        })
    }
}
