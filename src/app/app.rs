use axum::{http::{header, HeaderValue, Method}, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::{AllowOrigin, Any, CorsLayer}, trace::TraceLayer};
use tracing::{info, warn};

use crate::config::{AdminCredentials, AppConfig, JwtConfig, MongoConfig};
use crate::middlewares::auth_middleware::AuthState;
use crate::model::item::ItemKind;
use crate::repository::claim_repo::{ClaimRepository, MongoClaimRepository};
use crate::repository::item_repo::{ItemRepository, MongoItemRepository};
use crate::repository::user_repo::{MongoUserRepository, UserRepository};
use crate::router::admin_router::admin_router;
use crate::router::claim_router::claim_router;
use crate::router::item_router::item_router;
use crate::router::user_router::user_router;
use crate::service::admin_service::AdminServiceImpl;
use crate::service::claim_service::ClaimServiceImpl;
use crate::service::item_service::ItemServiceImpl;
use crate::service::user_service::UserServiceImpl;
use crate::util::jwt::JwtTokenUtilsImpl;

pub const BANNER: &str = "Lost and Found API Running...";

/// One handle per collection.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub lost_items: Arc<dyn ItemRepository>,
    pub found_items: Arc<dyn ItemRepository>,
    pub claims: Arc<dyn ClaimRepository>,
}

pub struct AppServices {
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
    pub user_service: Arc<UserServiceImpl>,
    pub admin_service: Arc<AdminServiceImpl>,
    pub lost_item_service: Arc<ItemServiceImpl>,
    pub found_item_service: Arc<ItemServiceImpl>,
    pub claim_service: Arc<ClaimServiceImpl>,
}

impl AppServices {
    pub fn new(repos: Repositories, jwt_config: JwtConfig, admin_credentials: AdminCredentials) -> Self {
        let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(jwt_config));
        let user_service = Arc::new(UserServiceImpl::new(repos.users.clone(), jwt_utils.clone()));
        let admin_service = Arc::new(AdminServiceImpl {
            credentials: Arc::new(admin_credentials),
            jwt_utils: jwt_utils.clone(),
            user_repo: repos.users.clone(),
            lost_repo: repos.lost_items.clone(),
            found_repo: repos.found_items.clone(),
            claim_repo: repos.claims.clone(),
        });
        let lost_item_service = Arc::new(ItemServiceImpl::new(repos.lost_items.clone()));
        let found_item_service = Arc::new(ItemServiceImpl::new(repos.found_items.clone()));
        let claim_service = Arc::new(ClaimServiceImpl::new(repos.claims, repos.found_items, repos.users));

        AppServices {
            jwt_utils,
            user_service,
            admin_service,
            lost_item_service,
            found_item_service,
            claim_service,
        }
    }
}

/// Full HTTP surface: `/`, `/health` and everything under `/api`.
pub fn build_router(services: &AppServices) -> Router {
    let auth_state = AuthState::new(services.jwt_utils.clone());

    let api = Router::new()
        .merge(user_router(services.user_service.clone(), auth_state.clone()))
        .merge(admin_router(services.admin_service.clone(), auth_state.clone()))
        .merge(item_router(services.lost_item_service.clone(), auth_state.clone()))
        .merge(item_router(services.found_item_service.clone(), auth_state.clone()))
        .merge(claim_router(services.claim_service.clone(), auth_state));

    Router::new()
        .route("/", get(|| async { BANNER }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", api)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

pub struct App {
    config: AppConfig,
    router: Router,
}

impl App {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config = AppConfig::from_env()?;
        let jwt_config = JwtConfig::from_env()?;
        let mongo_config = MongoConfig::from_env()?;
        let admin_credentials = AdminCredentials::from_env()?;

        let db = mongo_config.connect().await?;
        let users = MongoUserRepository::new(&db, &mongo_config.collections.users);
        users.ensure_indexes().await?;

        let repos = Repositories {
            users: Arc::new(users),
            lost_items: Arc::new(MongoItemRepository::new(&db, &mongo_config.collections.lost_items, ItemKind::Lost)),
            found_items: Arc::new(MongoItemRepository::new(&db, &mongo_config.collections.found_items, ItemKind::Found)),
            claims: Arc::new(MongoClaimRepository::new(&db, &mongo_config.collections.claims)),
        };
        let services = AppServices::new(repos, jwt_config, admin_credentials);

        let router = build_router(&services)
            .layer(cors_layer(&config.cors_allowed_origins))
            .layer(TraceLayer::new_for_http());

        Ok(App { config, router })
    }

    pub async fn start(self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = SocketAddr::new(self.config.host.parse()?, self.config.port);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("Server running at http://{}", addr);
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}
