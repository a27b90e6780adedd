use axum::{body::Body, extract::State, http::{header, Request}, middleware::Next, response::Response};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::util::error::HandlerError;
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl, Principal, PrincipalKind};

pub struct AuthState {
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
}

impl AuthState {
    pub fn new(jwt_utils: Arc<JwtTokenUtilsImpl>) -> Arc<Self> {
        Arc::new(AuthState { jwt_utils })
    }
}

/// Resolve the principal behind the bearer token, or fail with 401.
fn authenticate(state: &AuthState, req: &Request<Body>) -> Result<Principal, HandlerError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| HandlerError::unauthorized("No token provided"))?
        .to_str()
        .map_err(|_| HandlerError::unauthorized("Invalid or expired token"))?;

    state.jwt_utils.authenticate_header(auth_header).map_err(|e| {
        debug!("Rejected bearer token: {}", e);
        HandlerError::unauthorized("Invalid or expired token")
    })
}

async fn guard(
    state: &AuthState,
    allowed: Option<PrincipalKind>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    let principal = authenticate(state, &req)?;

    if let Some(kind) = allowed {
        if principal.kind() != kind {
            warn!(
                subject = principal.subject(),
                path = %req.uri().path(),
                "{} token used on {} route", principal.kind().as_str(), kind.as_str()
            );
            return Err(HandlerError::forbidden(format!("{} access required", kind.as_str())));
        }
    }

    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

pub async fn require_user(
    State(state): State<Arc<AuthState>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    guard(&state, Some(PrincipalKind::User), req, next).await
}

pub async fn require_admin(
    State(state): State<Arc<AuthState>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    guard(&state, Some(PrincipalKind::Admin), req, next).await
}

/// Any verified principal; the handler decides what it may do.
pub async fn require_principal(
    State(state): State<Arc<AuthState>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    guard(&state, None, req, next).await
}
