use axum::{middleware, routing::{get, post}, Router};
use std::sync::Arc;

use crate::handler::admin_handler::{admin_login_handler, dashboard_handler, stats_handler};
use crate::middlewares::auth_middleware::{require_admin, AuthState};
use crate::service::admin_service::AdminServiceImpl;

pub fn admin_router(service: Arc<AdminServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    let public = Router::new()
        .route("/admin/login", post(admin_login_handler));

    let admin = Router::new()
        .route("/admin/dashboard", get(dashboard_handler))
        .route("/admin/stats", get(stats_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, require_admin));

    public
        .merge(admin)
        .with_state(service)
}
