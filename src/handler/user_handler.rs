use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Extension, Json};
use std::sync::Arc;

use crate::dto::auth_dto::{LoginRequest, SignupRequest};
use crate::dto::user_dto::UpdateUserRequest;
use crate::dto::MessageResponse;
use crate::handler::extract::ValidatedJson;
use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::error::HandlerError;
use crate::util::jwt::Principal;

pub async fn signup_handler(
    State(service): State<Arc<UserServiceImpl>>,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.signup(payload).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn login_handler(
    State(service): State<Arc<UserServiceImpl>>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.login(payload.email, payload.password).await?;
    Ok(Json(res))
}

// Tokens are not revocable; the client drops its copy.
pub async fn logout_handler() -> impl IntoResponse {
    Json(MessageResponse::new("Logged out successfully"))
}

pub async fn me_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.me(&principal).await?;
    Ok(Json(res))
}

pub async fn list_users_handler(
    State(service): State<Arc<UserServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.list_users().await?;
    Ok(Json(res))
}

pub async fn get_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.get_user(&id).await?;
    Ok(Json(res))
}

pub async fn update_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.update_user(&id, payload.into()).await?;
    Ok(Json(res))
}

pub async fn delete_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.delete_user(&id).await?;
    Ok(Json(res))
}
