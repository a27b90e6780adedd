use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::dto::item_dto::{CreateItemRequest, ItemResponse};
use crate::dto::MessageResponse;
use crate::model::item::{Item, ItemChanges, ItemKind};
use crate::repository::repository_error::RepositoryError;
use crate::repository::item_repo::ItemRepository;
use crate::service::{parse_object_id, user_object_id};
use crate::util::error::ServiceError;
use crate::util::jwt::Principal;

#[async_trait]
pub trait ItemService: Send + Sync {
    fn kind(&self) -> ItemKind;
    async fn list(&self) -> Result<Vec<ItemResponse>, ServiceError>;
    async fn create(&self, principal: &Principal, request: CreateItemRequest) -> Result<ItemResponse, ServiceError>;
    async fn get(&self, id: &str) -> Result<ItemResponse, ServiceError>;
    async fn update(&self, principal: &Principal, id: &str, changes: ItemChanges) -> Result<ItemResponse, ServiceError>;
    async fn delete(&self, principal: &Principal, id: &str) -> Result<MessageResponse, ServiceError>;
}

/// Lost and found registries are two instances of this service, one per repository.
pub struct ItemServiceImpl {
    pub item_repo: Arc<dyn ItemRepository>,
}

impl ItemServiceImpl {
    pub fn new(item_repo: Arc<dyn ItemRepository>) -> Self {
        Self { item_repo }
    }

    fn not_found(&self) -> ServiceError {
        ServiceError::NotFound(format!("{} not found", self.kind().label()))
    }

    async fn load(&self, id: &str) -> Result<Item, ServiceError> {
        let id = parse_object_id(id, self.kind().label())?;
        match self.item_repo.get_by_id(id).await {
            Ok(item) => Ok(item),
            Err(RepositoryError::NotFound(_)) => Err(self.not_found()),
            Err(e) => Err(e.into()),
        }
    }

    /// Admins may change any record; users only the ones they reported.
    fn authorize(&self, principal: &Principal, item: &Item) -> Result<(), ServiceError> {
        if principal.is_admin() {
            return Ok(());
        }
        let user_id = user_object_id(principal)?;
        if item.is_owned_by(&user_id) {
            Ok(())
        } else {
            warn!(subject = principal.subject(), "Item change refused: not the owner");
            Err(ServiceError::Forbidden(format!(
                "Only the reporter of this {} can change it",
                self.kind().label().to_lowercase()
            )))
        }
    }

    fn response(&self, item: Item) -> ItemResponse {
        ItemResponse::new(self.kind(), item)
    }
}

#[async_trait]
impl ItemService for ItemServiceImpl {
    fn kind(&self) -> ItemKind {
        self.item_repo.kind()
    }

    async fn list(&self) -> Result<Vec<ItemResponse>, ServiceError> {
        let items = self.item_repo.list().await?;
        Ok(items.into_iter().map(|item| self.response(item)).collect())
    }

    #[instrument(skip(self, principal, request), fields(item_name = %request.item_name))]
    async fn create(&self, principal: &Principal, request: CreateItemRequest) -> Result<ItemResponse, ServiceError> {
        let owner = user_object_id(principal)?;
        let created = self.item_repo.create(request.into_item(owner)).await?;
        info!("{} reported", self.kind().label());
        Ok(self.response(created))
    }

    async fn get(&self, id: &str) -> Result<ItemResponse, ServiceError> {
        self.load(id).await.map(|item| self.response(item))
    }

    #[instrument(skip(self, principal, changes))]
    async fn update(&self, principal: &Principal, id: &str, changes: ItemChanges) -> Result<ItemResponse, ServiceError> {
        let item = self.load(id).await?;
        self.authorize(principal, &item)?;
        if changes.is_empty() {
            return Ok(self.response(item));
        }
        let item_id = item.id.ok_or_else(|| ServiceError::InternalError("Stored item has no id".to_string()))?;
        match self.item_repo.update(item_id, &changes).await {
            Ok(updated) => {
                info!("{} updated", self.kind().label());
                Ok(self.response(updated))
            }
            Err(RepositoryError::NotFound(_)) => Err(self.not_found()),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, principal))]
    async fn delete(&self, principal: &Principal, id: &str) -> Result<MessageResponse, ServiceError> {
        let item = self.load(id).await?;
        self.authorize(principal, &item)?;
        let item_id = item.id.ok_or_else(|| ServiceError::InternalError("Stored item has no id".to_string()))?;
        match self.item_repo.delete(item_id).await {
            Ok(()) => {
                info!("{} deleted", self.kind().label());
                Ok(MessageResponse::new(format!("{} deleted successfully", self.kind().label())))
            }
            Err(RepositoryError::NotFound(_)) => Err(self.not_found()),
            Err(e) => Err(e.into()),
        }
    }
}
