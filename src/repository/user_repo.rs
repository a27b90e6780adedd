use crate::model::now_timestamp;
use crate::model::user::{User, UserChanges};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::TryStreamExt;
use mongodb::{options::{FindOptions, IndexOptions}, IndexModel};
use tracing::{error, info};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: User) -> RepositoryResult<User>;
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    async fn find_by_email_or_roll_number(&self, email: &str, roll_number: &str) -> RepositoryResult<Option<User>>;
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<User>>;
    async fn list(&self) -> RepositoryResult<Vec<User>>;
    async fn update(&self, id: &ObjectId, changes: &UserChanges) -> RepositoryResult<User>;
    async fn delete(&self, id: &ObjectId) -> RepositoryResult<()>;
    async fn count(&self) -> RepositoryResult<u64>;
}

pub struct MongoUserRepository {
    collection: mongodb::Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &mongodb::Database, collection_name: &str) -> Self {
        MongoUserRepository { collection: db.collection::<User>(collection_name) }
    }

    /// Unique indexes back the email / roll number uniqueness checks done in the service.
    pub async fn ensure_indexes(&self) -> RepositoryResult<()> {
        let unique = || IndexOptions::builder().unique(true).build();
        let indexes = vec![
            IndexModel::builder().keys(doc! { "email": 1 }).options(unique()).build(),
            IndexModel::builder().keys(doc! { "rollNumber": 1 }).options(unique()).build(),
        ];
        self.collection.create_indexes(indexes, None).await?;
        info!("User indexes ensured");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[tracing::instrument(skip(self, user), fields(email = %user.email))]
    async fn insert(&self, mut user: User) -> RepositoryResult<User> {
        user.id = Some(ObjectId::new());
        let now = now_timestamp();
        user.created_at = Some(now.clone());
        user.updated_at = Some(now);
        match self.collection.insert_one(user.clone(), None).await {
            Ok(_) => {
                info!("User inserted");
                Ok(user)
            }
            Err(e) => {
                error!("Failed to insert user: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let filter = doc! { "email": email };
        self.collection.find_one(filter, None).await
            .map_err(|e| RepositoryError::database(format!("Failed to find user by email: {}", e)))
    }

    async fn find_by_email_or_roll_number(&self, email: &str, roll_number: &str) -> RepositoryResult<Option<User>> {
        let filter = doc! { "$or": [ { "email": email }, { "rollNumber": roll_number } ] };
        self.collection.find_one(filter, None).await
            .map_err(|e| RepositoryError::database(format!("Failed to find user by email or roll number: {}", e)))
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<User>> {
        let filter = doc! { "_id": id };
        self.collection.find_one(filter, None).await
            .map_err(|e| RepositoryError::database(format!("Failed to find user by id: {}", e)))
    }

    async fn list(&self) -> RepositoryResult<Vec<User>> {
        let options = FindOptions::builder().sort(doc! { "createdAt": -1 }).build();
        let cursor = self.collection.find(None, options).await
            .map_err(|e| RepositoryError::database(format!("Failed to list users: {}", e)))?;
        cursor.try_collect().await
            .map_err(|e| RepositoryError::serialization(format!("Failed to read users: {}", e)))
    }

    #[tracing::instrument(skip(self, changes), fields(id = %id))]
    async fn update(&self, id: &ObjectId, changes: &UserChanges) -> RepositoryResult<User> {
        let mut set = changes.to_set_document();
        set.insert("updatedAt", now_timestamp());
        let result = self.collection
            .update_one(doc! { "_id": id }, doc! { "$set": set }, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to update user: {}", e)))?;
        if result.matched_count == 0 {
            return Err(RepositoryError::not_found(format!("No user found to update for ID: {}", id)));
        }
        self.find_by_id(id).await?
            .ok_or_else(|| RepositoryError::not_found(format!("User vanished after update: {}", id)))
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: &ObjectId) -> RepositoryResult<()> {
        let result = self.collection.delete_one(doc! { "_id": id }, None).await
            .map_err(|e| RepositoryError::database(format!("Failed to delete user: {}", e)))?;
        if result.deleted_count == 0 {
            return Err(RepositoryError::not_found(format!("No user found to delete for ID: {}", id)));
        }
        info!("User deleted");
        Ok(())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        self.collection.count_documents(None, None).await
            .map_err(|e| RepositoryError::database(format!("Failed to count users: {}", e)))
    }
}
