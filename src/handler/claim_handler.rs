use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Extension, Json};
use std::sync::Arc;

use crate::dto::claim_dto::SubmitClaimRequest;
use crate::handler::extract::ValidatedJson;
use crate::model::claim::ClaimStatus;
use crate::service::claim_service::{ClaimService, ClaimServiceImpl};
use crate::util::error::HandlerError;
use crate::util::jwt::Principal;

pub async fn submit_claim_handler(
    State(service): State<Arc<ClaimServiceImpl>>,
    Extension(principal): Extension<Principal>,
    ValidatedJson(payload): ValidatedJson<SubmitClaimRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.submit(&principal, payload).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn list_claims_handler(
    State(service): State<Arc<ClaimServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.list_all().await?;
    Ok(Json(res))
}

async fn list_with_status(
    service: &ClaimServiceImpl,
    status: ClaimStatus,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.list_by_status(status).await?;
    Ok(Json(res))
}

pub async fn list_pending_claims_handler(
    State(service): State<Arc<ClaimServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    list_with_status(&service, ClaimStatus::Pending).await
}

pub async fn list_resolved_claims_handler(
    State(service): State<Arc<ClaimServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    list_with_status(&service, ClaimStatus::Resolved).await
}

pub async fn list_rejected_claims_handler(
    State(service): State<Arc<ClaimServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    list_with_status(&service, ClaimStatus::Rejected).await
}

pub async fn get_claim_handler(
    State(service): State<Arc<ClaimServiceImpl>>,
    Path(claim_id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.get(&claim_id).await?;
    Ok(Json(res))
}

pub async fn resolve_claim_handler(
    State(service): State<Arc<ClaimServiceImpl>>,
    Path(claim_id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.resolve(&claim_id).await?;
    Ok(Json(res))
}

/// Serves both `PATCH /claims/reject/{id}` and `DELETE /claims/{id}`;
/// the record is kept with status `rejected`.
pub async fn reject_claim_handler(
    State(service): State<Arc<ClaimServiceImpl>>,
    Path(claim_id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.reject(&claim_id).await?;
    Ok(Json(res))
}
