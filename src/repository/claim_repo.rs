use crate::model::claim::{ClaimRequest, ClaimStatus};
use crate::model::now_timestamp;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::stream::TryStreamExt;
use mongodb::options::FindOptions;
use tracing::{error, info, warn};

#[async_trait]
pub trait ClaimRepository: Send + Sync {
    async fn create(&self, claim: ClaimRequest) -> RepositoryResult<ClaimRequest>;
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<ClaimRequest>;
    /// Newest first; `None` lists every claim.
    async fn list(&self, status: Option<ClaimStatus>) -> RepositoryResult<Vec<ClaimRequest>>;
    /// Compare-and-set on `status`. Returns `false` when the claim no longer
    /// has status `from` (or no longer exists).
    async fn transition_status(&self, id: ObjectId, from: ClaimStatus, to: ClaimStatus) -> RepositoryResult<bool>;
    async fn count_by_status(&self, status: ClaimStatus) -> RepositoryResult<u64>;
}

pub struct MongoClaimRepository {
    collection: mongodb::Collection<ClaimRequest>,
}

impl MongoClaimRepository {
    pub fn new(db: &mongodb::Database, collection_name: &str) -> Self {
        MongoClaimRepository { collection: db.collection::<ClaimRequest>(collection_name) }
    }

    fn status_filter(status: Option<ClaimStatus>) -> Option<Document> {
        status.map(|s| doc! { "status": s.as_str() })
    }
}

#[async_trait]
impl ClaimRepository for MongoClaimRepository {
    #[tracing::instrument(skip(self, claim), fields(item_id = %claim.item_id))]
    async fn create(&self, mut claim: ClaimRequest) -> RepositoryResult<ClaimRequest> {
        claim.id = Some(ObjectId::new());
        let now = now_timestamp();
        claim.created_at = Some(now.clone());
        claim.updated_at = Some(now);

        match self.collection.insert_one(claim.clone(), None).await {
            Ok(_) => {
                info!("Claim request created");
                Ok(claim)
            }
            Err(e) => {
                error!("Failed to create claim request: {}", e);
                Err(RepositoryError::database(format!("Failed to create claim request: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<ClaimRequest> {
        match self.collection.find_one(doc! { "_id": id }, None).await {
            Ok(Some(claim)) => Ok(claim),
            Ok(None) => Err(RepositoryError::not_found(format!("Claim not found for ID: {}", id))),
            Err(e) => {
                error!("Failed to fetch claim by ID: {}", e);
                Err(RepositoryError::database(format!("Failed to fetch claim by ID: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self, status: Option<ClaimStatus>) -> RepositoryResult<Vec<ClaimRequest>> {
        let options = FindOptions::builder().sort(doc! { "createdAt": -1 }).build();
        let cursor = self.collection.find(Self::status_filter(status), options).await.map_err(|e| {
            error!("Failed to list claims: {}", e);
            RepositoryError::database(format!("Failed to list claims: {}", e))
        })?;
        cursor.try_collect().await.map_err(|e| {
            error!("Failed to deserialize claim: {}", e);
            RepositoryError::serialization(format!("Failed to deserialize claim: {}", e))
        })
    }

    #[tracing::instrument(skip(self), fields(id = %id, from = %from, to = %to))]
    async fn transition_status(&self, id: ObjectId, from: ClaimStatus, to: ClaimStatus) -> RepositoryResult<bool> {
        let filter = doc! { "_id": id, "status": from.as_str() };
        let update = doc! { "$set": { "status": to.as_str(), "updatedAt": now_timestamp() } };
        let result = self.collection.update_one(filter, update, None).await.map_err(|e| {
            error!("Failed to update claim status: {}", e);
            RepositoryError::database(format!("Failed to update claim status: {}", e))
        })?;
        if result.matched_count == 0 {
            warn!("Claim status changed concurrently or claim missing");
            return Ok(false);
        }
        info!("Claim status updated");
        Ok(true)
    }

    async fn count_by_status(&self, status: ClaimStatus) -> RepositoryResult<u64> {
        self.collection.count_documents(Self::status_filter(Some(status)), None).await
            .map_err(|e| RepositoryError::database(format!("Failed to count claims: {}", e)))
    }
}
