//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post, put},
    Router,
};
use chrono::Duration;
use sqlx::PgPool;
use tower_http::cors::{self, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::domains::auth::{
    AuthenticationService, CredentialStore, JwtService, PgCredentialStore,
};
use crate::domains::member::{MemberService, MemberStore, PgMemberStore};
use crate::server::middleware::{jwt_auth_middleware, require_role, ADMIN_ONLY, USER_OR_ADMIN};
use crate::server::routes::{
    create_member, delete_member, get_member, health_handler, list_members, login, update_member,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthenticationService>,
    pub member_service: Arc<MemberService>,
    pub member_store: Arc<dyn MemberStore>,
}

/// Build the application router against Postgres-backed stores.
pub fn build_app(pool: PgPool, config: &Config) -> Router {
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt_secret,
        Duration::seconds(config.jwt_expiration_secs),
    ));
    let credentials: Arc<dyn CredentialStore> = Arc::new(PgCredentialStore::new(pool.clone()));
    let member_store: Arc<dyn MemberStore> = Arc::new(PgMemberStore::new(pool));

    build_router(credentials, member_store, jwt_service, &config.allowed_origins)
}

/// Build the router from explicit store and token-service handles.
///
/// Tests use this entry point with in-memory stores.
pub fn build_router(
    credentials: Arc<dyn CredentialStore>,
    member_store: Arc<dyn MemberStore>,
    jwt_service: Arc<JwtService>,
    allowed_origins: &[String],
) -> Router {
    let auth_service = Arc::new(AuthenticationService::new(credentials, jwt_service.clone()));
    let member_service = Arc::new(MemberService::new(member_store.clone()));

    let app_state = AppState {
        auth_service,
        member_service,
        member_store,
    };

    let public = Router::new().route("/auth/login", post(login));

    let user_routes = Router::new()
        .route("/members", get(list_members))
        .route("/members/:id", get(get_member))
        .route_layer(middleware::from_fn(|req, next| {
            require_role(USER_OR_ADMIN, req, next)
        }));

    let admin_routes = Router::new()
        .route("/members", post(create_member))
        .route("/members/:id", put(update_member).delete(delete_member))
        .route_layer(middleware::from_fn(|req, next| {
            require_role(ADMIN_ONLY, req, next)
        }));

    let api = public.merge(user_routes).merge(admin_routes);

    let cors = if allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(cors::Any)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([AUTHORIZATION, CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([AUTHORIZATION, CONTENT_TYPE])
    };

    let jwt_for_middleware = jwt_service.clone();

    Router::new()
        .nest("/api/v1", api)
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_for_middleware.clone(), req, next)
        }))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
