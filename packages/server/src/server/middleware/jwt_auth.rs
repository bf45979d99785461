use crate::domains::auth::JwtService;
use axum::{middleware::Next, response::Response};
use std::sync::Arc;
use tracing::debug;

/// Authenticated user information from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub username: String,
    pub role: String,
}

/// JWT authentication middleware
///
/// Extracts the bearer token from the Authorization header, verifies
/// it, and adds AuthUser to request extensions. If no token or invalid
/// token, the request continues without AuthUser; this stage never
/// rejects on its own.
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    if let Some(user) = extract_auth_user(&request, &jwt_service) {
        debug!("Authenticated user: {} ({})", user.username, user.role);
        request.extensions_mut().insert(user);
    } else {
        debug!("No valid authentication token");
    }

    next.run(request).await
}

/// Extract and verify the JWT from a request
fn extract_auth_user(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Option<AuthUser> {
    let auth_header = request.headers().get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;

    // Strict "Bearer " prefix; whatever follows (even nothing) goes to
    // validation, which rejects the empty string.
    let token = auth_str.strip_prefix("Bearer ")?;

    if !jwt_service.validate(token) {
        return None;
    }

    let username = jwt_service.subject_of(token).ok()?;
    let role = jwt_service.role_of(token).ok()?;
    Some(AuthUser { username, role })
}
