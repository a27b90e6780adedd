use axum::{middleware, routing::{get, patch, post}, Router};
use std::sync::Arc;

use crate::handler::claim_handler::{
    get_claim_handler,
    list_claims_handler,
    list_pending_claims_handler,
    list_rejected_claims_handler,
    list_resolved_claims_handler,
    reject_claim_handler,
    resolve_claim_handler,
    submit_claim_handler,
};
use crate::middlewares::auth_middleware::{require_admin, require_user, AuthState};
use crate::service::claim_service::ClaimServiceImpl;

pub fn claim_router(service: Arc<ClaimServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    let user = Router::new()
        .route("/claims", post(submit_claim_handler))
        .route_layer(middleware::from_fn_with_state(auth_state.clone(), require_user));

    let admin = Router::new()
        .route("/claims", get(list_claims_handler))
        .route("/claims/pending", get(list_pending_claims_handler))
        .route("/claims/resolved", get(list_resolved_claims_handler))
        .route("/claims/rejected", get(list_rejected_claims_handler))
        .route("/claims/{claim_id}", get(get_claim_handler).delete(reject_claim_handler))
        .route("/claims/resolve/{claim_id}", patch(resolve_claim_handler))
        .route("/claims/reject/{claim_id}", patch(reject_claim_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, require_admin));

    user
        .merge(admin)
        .with_state(service)
}
