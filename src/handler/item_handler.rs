use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Extension, Json};
use std::sync::Arc;

use crate::dto::item_dto::{CreateItemRequest, UpdateItemRequest};
use crate::handler::extract::ValidatedJson;
use crate::service::item_service::{ItemService, ItemServiceImpl};
use crate::util::error::HandlerError;
use crate::util::jwt::Principal;

// Shared by the lost and found registries; the service carries the kind.

pub async fn list_items_handler(
    State(service): State<Arc<ItemServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.list().await?;
    Ok(Json(res))
}

pub async fn create_item_handler(
    State(service): State<Arc<ItemServiceImpl>>,
    Extension(principal): Extension<Principal>,
    ValidatedJson(payload): ValidatedJson<CreateItemRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.create(&principal, payload).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn get_item_handler(
    State(service): State<Arc<ItemServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.get(&id).await?;
    Ok(Json(res))
}

pub async fn update_item_handler(
    State(service): State<Arc<ItemServiceImpl>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateItemRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.update(&principal, &id, payload.into()).await?;
    Ok(Json(res))
}

pub async fn delete_item_handler(
    State(service): State<Arc<ItemServiceImpl>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.delete(&principal, &id).await?;
    Ok(Json(res))
}
