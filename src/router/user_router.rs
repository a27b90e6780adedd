use axum::{middleware, routing::{get, post}, Router};
use std::sync::Arc;

use crate::handler::user_handler::{
    delete_user_handler,
    get_user_handler,
    list_users_handler,
    login_handler,
    logout_handler,
    me_handler,
    signup_handler,
    update_user_handler,
};
use crate::middlewares::auth_middleware::{require_admin, require_user, AuthState};
use crate::service::user_service::UserServiceImpl;

pub fn user_router(service: Arc<UserServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    let public = Router::new()
        .route("/users/signup", post(signup_handler))
        .route("/users/login", post(login_handler))
        .route("/users/logout", post(logout_handler));

    let user = Router::new()
        .route("/users/me", get(me_handler))
        .route_layer(middleware::from_fn_with_state(auth_state.clone(), require_user));

    // Generic user management is admin-only
    let admin = Router::new()
        .route("/users", get(list_users_handler))
        .route(
            "/users/{id}",
            get(get_user_handler).put(update_user_handler).delete(delete_user_handler),
        )
        .route_layer(middleware::from_fn_with_state(auth_state, require_admin));

    public
        .merge(user)
        .merge(admin)
        .with_state(service)
}
