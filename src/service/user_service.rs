use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::dto::auth_dto::{AuthResponse, SignupRequest};
use crate::dto::user_dto::UserResponse;
use crate::dto::MessageResponse;
use crate::model::user::{User, UserChanges, UserRole};
use crate::repository::repository_error::RepositoryError;
use crate::repository::user_repo::UserRepository;
use crate::service::{parse_object_id, user_object_id};
use crate::util::error::ServiceError;
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl, Principal};
use crate::util::password::{PasswordUtils, PasswordUtilsImpl};

const DUPLICATE_USER: &str = "Email or Roll Number already exists";
const BAD_CREDENTIALS: &str = "Invalid email or password";

#[async_trait]
pub trait UserService: Send + Sync {
    async fn signup(&self, request: SignupRequest) -> Result<AuthResponse, ServiceError>;
    async fn login(&self, email: String, password: String) -> Result<AuthResponse, ServiceError>;
    async fn me(&self, principal: &Principal) -> Result<UserResponse, ServiceError>;
    async fn list_users(&self) -> Result<Vec<UserResponse>, ServiceError>;
    async fn get_user(&self, id: &str) -> Result<UserResponse, ServiceError>;
    async fn update_user(&self, id: &str, changes: UserChanges) -> Result<UserResponse, ServiceError>;
    async fn delete_user(&self, id: &str) -> Result<MessageResponse, ServiceError>;
}

pub struct UserServiceImpl {
    pub user_repo: Arc<dyn UserRepository>,
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
}

impl UserServiceImpl {
    pub fn new(user_repo: Arc<dyn UserRepository>, jwt_utils: Arc<JwtTokenUtilsImpl>) -> Self {
        Self { user_repo, jwt_utils }
    }

    fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }

    fn auth_response(&self, message: &str, user: User) -> Result<AuthResponse, ServiceError> {
        let user_id = user
            .id
            .ok_or_else(|| ServiceError::InternalError("Stored user has no id".to_string()))?;
        let token = self
            .jwt_utils
            .issue_token(&Principal::User { user_id: user_id.to_hex() })
            .map_err(|e| ServiceError::InternalError(format!("JWT error: {}", e)))?;
        Ok(AuthResponse {
            message: message.to_string(),
            token,
            user: user.into(),
        })
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    #[instrument(skip(self, request), fields(email = %request.email, roll_number = %request.roll_number))]
    async fn signup(&self, request: SignupRequest) -> Result<AuthResponse, ServiceError> {
        info!("Registering new user");
        let email = Self::normalize_email(&request.email);
        let roll_number = request.roll_number.trim().to_string();

        if self.user_repo.find_by_email_or_roll_number(&email, &roll_number).await?.is_some() {
            warn!("Signup rejected: duplicate email or roll number");
            return Err(ServiceError::InvalidInput(DUPLICATE_USER.to_string()));
        }

        let password_hash = PasswordUtilsImpl::hash_password(&request.password)
            .map_err(|e| ServiceError::InternalError(format!("Password hash error: {}", e)))?;

        let user = User {
            id: None,
            full_name: request.full_name.trim().to_string(),
            email,
            roll_number,
            password_hash,
            role: UserRole::User,
            year: request.year,
            branch: request.branch.trim().to_string(),
            section: request.section,
            created_at: None,
            updated_at: None,
        };

        // A concurrent signup can slip past the pre-check; the unique index catches it.
        let inserted = match self.user_repo.insert(user).await {
            Ok(user) => user,
            Err(e) if e.is_duplicate() => {
                warn!("Signup rejected by unique index");
                return Err(ServiceError::InvalidInput(DUPLICATE_USER.to_string()));
            }
            Err(e) => {
                error!("Failed to insert user: {}", e);
                return Err(e.into());
            }
        };
        info!("User registered");
        self.auth_response("User registered successfully!", inserted)
    }

    #[instrument(skip(self, password), fields(email = %email))]
    async fn login(&self, email: String, password: String) -> Result<AuthResponse, ServiceError> {
        info!("User login attempt");
        let user = match self.user_repo.find_by_email(&Self::normalize_email(&email)).await? {
            Some(user) => user,
            None => {
                warn!("Login failed: unknown email");
                return Err(ServiceError::Unauthenticated(BAD_CREDENTIALS.to_string()));
            }
        };

        let valid = PasswordUtilsImpl::verify_password(&password, &user.password_hash)
            .map_err(|e| ServiceError::InternalError(format!("Password verify error: {}", e)))?;
        if !valid {
            warn!("Login failed: password mismatch");
            return Err(ServiceError::Unauthenticated(BAD_CREDENTIALS.to_string()));
        }

        info!("User logged in");
        self.auth_response("Login successful", user)
    }

    async fn me(&self, principal: &Principal) -> Result<UserResponse, ServiceError> {
        let id = user_object_id(principal)?;
        self.user_repo
            .find_by_id(&id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))
    }

    async fn list_users(&self) -> Result<Vec<UserResponse>, ServiceError> {
        let users = self.user_repo.list().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    async fn get_user(&self, id: &str) -> Result<UserResponse, ServiceError> {
        let id = parse_object_id(id, "User")?;
        self.user_repo
            .find_by_id(&id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))
    }

    #[instrument(skip(self, changes))]
    async fn update_user(&self, id: &str, changes: UserChanges) -> Result<UserResponse, ServiceError> {
        let id = parse_object_id(id, "User")?;
        if changes.is_empty() {
            return self.get_user(&id.to_hex()).await;
        }
        match self.user_repo.update(&id, &changes).await {
            Ok(user) => {
                info!("User updated");
                Ok(user.into())
            }
            Err(RepositoryError::NotFound(_)) => Err(ServiceError::NotFound("User not found".to_string())),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, id: &str) -> Result<MessageResponse, ServiceError> {
        let id = parse_object_id(id, "User")?;
        match self.user_repo.delete(&id).await {
            Ok(()) => {
                info!("User deleted");
                Ok(MessageResponse::new("User deleted successfully"))
            }
            Err(RepositoryError::NotFound(_)) => Err(ServiceError::NotFound("User not found".to_string())),
            Err(e) => Err(e.into()),
        }
    }
}
