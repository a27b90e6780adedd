use crate::model::item::{Item, ItemChanges, ItemKind};
use crate::model::now_timestamp;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::TryStreamExt;
use mongodb::options::FindOptions;
use tracing::{error, info};

/// Storage for one item kind. Lost and found items use two instances of
/// the same implementation over different collections.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    fn kind(&self) -> ItemKind;
    async fn create(&self, item: Item) -> RepositoryResult<Item>;
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Item>;
    /// Newest first.
    async fn list(&self) -> RepositoryResult<Vec<Item>>;
    async fn update(&self, id: ObjectId, changes: &ItemChanges) -> RepositoryResult<Item>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()>;
    async fn count(&self) -> RepositoryResult<u64>;
}

pub struct MongoItemRepository {
    kind: ItemKind,
    collection: mongodb::Collection<Item>,
}

impl MongoItemRepository {
    pub fn new(db: &mongodb::Database, collection_name: &str, kind: ItemKind) -> Self {
        MongoItemRepository {
            kind,
            collection: db.collection::<Item>(collection_name),
        }
    }
}

#[async_trait]
impl ItemRepository for MongoItemRepository {
    fn kind(&self) -> ItemKind {
        self.kind
    }

    #[tracing::instrument(skip(self, item), fields(item_name = %item.item_name))]
    async fn create(&self, mut item: Item) -> RepositoryResult<Item> {
        item.id = Some(ObjectId::new());
        let now = now_timestamp();
        item.created_at = Some(now.clone());
        item.updated_at = Some(now);

        match self.collection.insert_one(item.clone(), None).await {
            Ok(_) => {
                info!("{} created", self.kind.label());
                Ok(item)
            }
            Err(e) => {
                error!("Failed to create {} item: {}", self.kind.as_str(), e);
                Err(RepositoryError::database(format!("Failed to create item: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Item> {
        match self.collection.find_one(doc! { "_id": id }, None).await {
            Ok(Some(item)) => Ok(item),
            Ok(None) => Err(RepositoryError::not_found(format!("{} not found for ID: {}", self.kind.label(), id))),
            Err(e) => {
                error!("Failed to fetch item by ID: {}", e);
                Err(RepositoryError::database(format!("Failed to fetch item by ID: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self) -> RepositoryResult<Vec<Item>> {
        let options = FindOptions::builder().sort(doc! { "createdAt": -1 }).build();
        let cursor = self.collection.find(None, options).await.map_err(|e| {
            error!("Failed to list items: {}", e);
            RepositoryError::database(format!("Failed to list items: {}", e))
        })?;
        let items: Vec<Item> = cursor.try_collect().await.map_err(|e| {
            error!("Failed to deserialize item: {}", e);
            RepositoryError::serialization(format!("Failed to deserialize item: {}", e))
        })?;
        info!("Fetched {} {} items", items.len(), self.kind.as_str());
        Ok(items)
    }

    #[tracing::instrument(skip(self, changes), fields(id = %id))]
    async fn update(&self, id: ObjectId, changes: &ItemChanges) -> RepositoryResult<Item> {
        let mut set = changes.to_set_document();
        set.insert("updatedAt", now_timestamp());
        let result = self.collection
            .update_one(doc! { "_id": id }, doc! { "$set": set }, None)
            .await
            .map_err(|e| {
                error!("Failed to update item: {}", e);
                RepositoryError::database(format!("Failed to update item: {}", e))
            })?;
        if result.matched_count == 0 {
            return Err(RepositoryError::not_found(format!("No item found to update for ID: {}", id)));
        }
        info!("{} updated", self.kind.label());
        self.get_by_id(id).await
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        let result = self.collection.delete_one(doc! { "_id": id }, None).await.map_err(|e| {
            error!("Failed to delete item: {}", e);
            RepositoryError::database(format!("Failed to delete item: {}", e))
        })?;
        if result.deleted_count == 0 {
            return Err(RepositoryError::not_found(format!("No item found to delete for ID: {}", id)));
        }
        info!("{} deleted", self.kind.label());
        Ok(())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        self.collection.count_documents(None, None).await
            .map_err(|e| RepositoryError::database(format!("Failed to count items: {}", e)))
    }
}
