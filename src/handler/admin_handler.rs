use axum::{extract::State, response::IntoResponse, Extension, Json};
use std::sync::Arc;

use crate::dto::auth_dto::AdminLoginRequest;
use crate::handler::extract::ValidatedJson;
use crate::service::admin_service::{AdminService, AdminServiceImpl};
use crate::util::error::HandlerError;
use crate::util::jwt::Principal;

pub async fn admin_login_handler(
    State(service): State<Arc<AdminServiceImpl>>,
    ValidatedJson(payload): ValidatedJson<AdminLoginRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.login(payload.admin_id, payload.password).await?;
    Ok(Json(res))
}

pub async fn dashboard_handler(
    State(service): State<Arc<AdminServiceImpl>>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.dashboard(&principal).await?;
    Ok(Json(res))
}

pub async fn stats_handler(
    State(service): State<Arc<AdminServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.stats().await?;
    Ok(Json(res))
}
