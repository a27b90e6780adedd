#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use bson::oid::ObjectId;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt; // for .oneshot()

use campus_lost_found::app::app::{build_router, AppServices, Repositories};
use campus_lost_found::config::{AdminCredential, AdminCredentials, JwtConfig, MongoConfig};
use campus_lost_found::model::claim::{ClaimRequest, ClaimStatus};
use campus_lost_found::model::item::{Item, ItemChanges, ItemKind};
use campus_lost_found::model::now_timestamp;
use campus_lost_found::model::user::{User, UserChanges};
use campus_lost_found::repository::claim_repo::ClaimRepository;
use campus_lost_found::repository::item_repo::ItemRepository;
use campus_lost_found::repository::repository_error::{RepositoryError, RepositoryResult};
use campus_lost_found::repository::user_repo::UserRepository;

pub const ADMIN_ID: &str = "admin1";
pub const ADMIN_PASS: &str = "admin-pass-1";
pub const PASSWORD: &str = "correct-horse-1";

// ---------------------------------------------------------------------------
// Live MongoDB helpers for the `#[ignore]`d repository tests. Each test works
// in its own freshly named collection and drops it at the end.
// ---------------------------------------------------------------------------

pub async fn live_database() -> mongodb::Database {
    // Load environment variables from .env file
    let _ = dotenv::dotenv();
    let config = MongoConfig::from_env().expect("Failed to load MongoConfig");
    config.connect().await.expect("Failed to connect to MongoDB")
}

pub fn scratch_collection(prefix: &str) -> String {
    format!("{}_test_{}", prefix, ObjectId::new().to_hex())
}

pub async fn drop_collection(db: &mongodb::Database, name: &str) {
    db.collection::<bson::Document>(name)
        .drop(None)
        .await
        .expect("Failed to drop scratch collection");
}

// ---------------------------------------------------------------------------
// In-memory repositories. Vectors keep insertion order; listings reverse it
// to match the newest-first order of the Mongo implementations.
// ---------------------------------------------------------------------------

fn apply_user_changes(changes: &UserChanges, user: &mut User) {
    if let Some(ref full_name) = changes.full_name {
        user.full_name = full_name.clone();
    }
    if let Some(year) = changes.year {
        user.year = year;
    }
    if let Some(ref branch) = changes.branch {
        user.branch = branch.clone();
    }
    if let Some(ref section) = changes.section {
        user.section = section.clone();
    }
}

fn apply_item_changes(changes: &ItemChanges, item: &mut Item) {
    if let Some(ref v) = changes.item_name {
        item.item_name = v.clone();
    }
    if let Some(ref v) = changes.description {
        item.description = Some(v.clone());
    }
    if let Some(ref v) = changes.location {
        item.location = Some(v.clone());
    }
    if let Some(ref v) = changes.date {
        item.date = Some(v.clone());
    }
    if let Some(ref v) = changes.email {
        item.reporter.email = v.clone();
    }
    if let Some(ref v) = changes.phone {
        item.reporter.phone = v.clone();
    }
    if let Some(ref v) = changes.department {
        item.reporter.department = Some(v.clone());
    }
    if let Some(ref v) = changes.roll_number {
        item.reporter.roll_number = Some(v.clone());
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    pub users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, mut user: User) -> RepositoryResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email || u.roll_number == user.roll_number) {
            return Err(RepositoryError::already_exists("duplicate key"));
        }
        user.id = Some(ObjectId::new());
        user.created_at = Some(now_timestamp());
        user.updated_at = user.created_at.clone();
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_email_or_roll_number(&self, email: &str, roll_number: &str) -> RepositoryResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email || u.roll_number == roll_number)
            .cloned())
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id.as_ref() == Some(id)).cloned())
    }

    async fn list(&self) -> RepositoryResult<Vec<User>> {
        Ok(self.users.lock().unwrap().iter().rev().cloned().collect())
    }

    async fn update(&self, id: &ObjectId, changes: &UserChanges) -> RepositoryResult<User> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id.as_ref() == Some(id))
            .ok_or_else(|| RepositoryError::not_found("user"))?;
        apply_user_changes(changes, user);
        user.updated_at = Some(now_timestamp());
        Ok(user.clone())
    }

    async fn delete(&self, id: &ObjectId) -> RepositoryResult<()> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id.as_ref() != Some(id));
        if users.len() == before {
            return Err(RepositoryError::not_found("user"));
        }
        Ok(())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.users.lock().unwrap().len() as u64)
    }
}

pub struct InMemoryItemRepository {
    pub kind: ItemKind,
    pub items: Mutex<Vec<Item>>,
}

impl InMemoryItemRepository {
    pub fn new(kind: ItemKind) -> Self {
        InMemoryItemRepository { kind, items: Mutex::new(Vec::new()) }
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    fn kind(&self) -> ItemKind {
        self.kind
    }

    async fn create(&self, mut item: Item) -> RepositoryResult<Item> {
        item.id = Some(ObjectId::new());
        item.created_at = Some(now_timestamp());
        item.updated_at = item.created_at.clone();
        self.items.lock().unwrap().push(item.clone());
        Ok(item)
    }

    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Item> {
        self.items
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == Some(id))
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("item"))
    }

    async fn list(&self) -> RepositoryResult<Vec<Item>> {
        Ok(self.items.lock().unwrap().iter().rev().cloned().collect())
    }

    async fn update(&self, id: ObjectId, changes: &ItemChanges) -> RepositoryResult<Item> {
        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|i| i.id == Some(id))
            .ok_or_else(|| RepositoryError::not_found("item"))?;
        apply_item_changes(changes, item);
        item.updated_at = Some(now_timestamp());
        Ok(item.clone())
    }

    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|i| i.id != Some(id));
        if items.len() == before {
            return Err(RepositoryError::not_found("item"));
        }
        Ok(())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.len() as u64)
    }
}

#[derive(Default)]
pub struct InMemoryClaimRepository {
    pub claims: Mutex<Vec<ClaimRequest>>,
    /// Number of successful status writes, to observe no-op transitions.
    pub status_writes: Mutex<u32>,
}

impl InMemoryClaimRepository {
    pub fn status_of(&self, id: &str) -> Option<ClaimStatus> {
        let id = ObjectId::parse_str(id).ok()?;
        self.claims.lock().unwrap().iter().find(|c| c.id == Some(id)).map(|c| c.status)
    }

    /// Overwrites a status behind the service's back.
    pub fn force_status(&self, id: &str, status: ClaimStatus) {
        let id = ObjectId::parse_str(id).unwrap();
        if let Some(claim) = self.claims.lock().unwrap().iter_mut().find(|c| c.id == Some(id)) {
            claim.status = status;
        }
    }

    pub fn len(&self) -> usize {
        self.claims.lock().unwrap().len()
    }

    pub fn writes(&self) -> u32 {
        *self.status_writes.lock().unwrap()
    }
}

#[async_trait]
impl ClaimRepository for InMemoryClaimRepository {
    async fn create(&self, mut claim: ClaimRequest) -> RepositoryResult<ClaimRequest> {
        claim.id = Some(ObjectId::new());
        claim.created_at = Some(now_timestamp());
        claim.updated_at = claim.created_at.clone();
        self.claims.lock().unwrap().push(claim.clone());
        Ok(claim)
    }

    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<ClaimRequest> {
        self.claims
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == Some(id))
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("claim"))
    }

    async fn list(&self, status: Option<ClaimStatus>) -> RepositoryResult<Vec<ClaimRequest>> {
        Ok(self
            .claims
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|c| status.map_or(true, |s| c.status == s))
            .cloned()
            .collect())
    }

    async fn transition_status(&self, id: ObjectId, from: ClaimStatus, to: ClaimStatus) -> RepositoryResult<bool> {
        let mut claims = self.claims.lock().unwrap();
        match claims.iter_mut().find(|c| c.id == Some(id) && c.status == from) {
            Some(claim) => {
                claim.status = to;
                claim.updated_at = Some(now_timestamp());
                *self.status_writes.lock().unwrap() += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count_by_status(&self, status: ClaimStatus) -> RepositoryResult<u64> {
        Ok(self.claims.lock().unwrap().iter().filter(|c| c.status == status).count() as u64)
    }
}

// ---------------------------------------------------------------------------
// Application under test
// ---------------------------------------------------------------------------

pub struct TestApp {
    pub router: Router,
    pub users: Arc<InMemoryUserRepository>,
    pub lost_items: Arc<InMemoryItemRepository>,
    pub found_items: Arc<InMemoryItemRepository>,
    pub claims: Arc<InMemoryClaimRepository>,
}

pub struct TestUser {
    pub id: String,
    pub token: String,
    pub email: String,
}

impl TestApp {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let lost_items = Arc::new(InMemoryItemRepository::new(ItemKind::Lost));
        let found_items = Arc::new(InMemoryItemRepository::new(ItemKind::Found));
        let claims = Arc::new(InMemoryClaimRepository::default());

        let repos = Repositories {
            users: users.clone(),
            lost_items: lost_items.clone(),
            found_items: found_items.clone(),
            claims: claims.clone(),
        };
        let admins = AdminCredentials::new(vec![
            AdminCredential { admin_id: ADMIN_ID.to_string(), password: ADMIN_PASS.to_string() },
            AdminCredential { admin_id: "admin2".to_string(), password: "admin-pass-2".to_string() },
        ])
        .unwrap();
        let services = AppServices::new(repos, JwtConfig::default(), admins);

        TestApp {
            router: build_router(&services),
            users,
            lost_items,
            found_items,
            claims,
        }
    }

    pub async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let authorization = token.map(|token| format!("Bearer {}", token));
        self.send_with_authorization(method, uri, authorization, body).await
    }

    /// Sends the `Authorization` header value exactly as given.
    pub async fn send_with_authorization(
        &self,
        method: Method,
        uri: &str,
        authorization: Option<String>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(authorization) = authorization {
            builder = builder.header(header::AUTHORIZATION, authorization);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn signup(&self, full_name: &str, email: &str, roll_number: &str) -> TestUser {
        let (status, body) = self.post("/api/users/signup", None, signup_body(full_name, email, roll_number)).await;
        assert_eq!(status, StatusCode::CREATED, "signup failed: {}", body);
        TestUser {
            id: body["user"]["id"].as_str().unwrap().to_string(),
            token: body["token"].as_str().unwrap().to_string(),
            email: email.to_string(),
        }
    }

    pub async fn admin_token(&self) -> String {
        let (status, body) = self
            .post("/api/admin/login", None, json!({ "adminId": ADMIN_ID, "password": ADMIN_PASS }))
            .await;
        assert_eq!(status, StatusCode::OK, "admin login failed: {}", body);
        body["token"].as_str().unwrap().to_string()
    }

    /// Reports a found item as `user` and returns its id.
    pub async fn report_found(&self, user: &TestUser, item_name: &str) -> String {
        let (status, body) = self
            .post("/api/found-items", Some(&user.token), item_body(item_name, &user.email))
            .await;
        assert_eq!(status, StatusCode::CREATED, "report failed: {}", body);
        body["id"].as_str().unwrap().to_string()
    }

    /// Submits a claim as `user` and returns the claim id.
    pub async fn submit_claim(&self, user: &TestUser, item_id: &str) -> String {
        let (status, body) = self
            .post(
                "/api/claims",
                Some(&user.token),
                json!({ "itemId": item_id, "claimDescription": "It has my student card inside", "phone": "9000000001" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "claim failed: {}", body);
        body["claimId"].as_str().unwrap().to_string()
    }
}

pub fn signup_body(full_name: &str, email: &str, roll_number: &str) -> Value {
    json!({
        "fullName": full_name,
        "email": email,
        "year": 2,
        "branch": "CSE",
        "section": "A",
        "rollNumber": roll_number,
        "password": PASSWORD,
    })
}

pub fn item_body(item_name: &str, email: &str) -> Value {
    json!({
        "itemName": item_name,
        "description": "Brown leather",
        "location": "Library",
        "date": "2024-03-01",
        "email": email,
        "phone": "9999999999",
        "department": "CSE",
    })
}
