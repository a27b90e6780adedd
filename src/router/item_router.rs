use axum::{middleware, routing::{get, post, put}, Router};
use std::sync::Arc;

use crate::handler::item_handler::{
    create_item_handler,
    delete_item_handler,
    get_item_handler,
    list_items_handler,
    update_item_handler,
};
use crate::middlewares::auth_middleware::{require_principal, require_user, AuthState};
use crate::service::item_service::{ItemService, ItemServiceImpl};

/// Routes for one item registry, mounted at `/<kind>-items`.
pub fn item_router(service: Arc<ItemServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    let collection = format!("/{}", service.kind().route_segment());
    let member = format!("{}/{{id}}", collection);

    let public = Router::new()
        .route(&collection, get(list_items_handler))
        .route(&member, get(get_item_handler));

    let reporter = Router::new()
        .route(&collection, post(create_item_handler))
        .route_layer(middleware::from_fn_with_state(auth_state.clone(), require_user));

    // Owner or admin; the service checks which
    let maintainer = Router::new()
        .route(&member, put(update_item_handler).delete(delete_item_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, require_principal));

    public
        .merge(reporter)
        .merge(maintainer)
        .with_state(service)
}
