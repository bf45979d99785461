//! Per-route role gate.
//!
//! Composed at router construction with the route's required-role set.
//! Runs after the JWT middleware: missing identity denies with 401,
//! wrong role with 403. Role comparison is exact; there is no
//! hierarchy between roles.

use axum::extract::OriginalUri;
use axum::{middleware::Next, response::IntoResponse, response::Response};
use tracing::warn;

use crate::server::error::ApiError;
use crate::server::middleware::jwt_auth::AuthUser;

pub const USER_OR_ADMIN: &[&str] = &["ROLE_USER", "ROLE_ADMIN"];
pub const ADMIN_ONLY: &[&str] = &["ROLE_ADMIN"];

pub async fn require_role(
    allowed: &'static [&'static str],
    request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    // Nested routers see a stripped URI; the original one lives in the
    // extensions.
    let path = request
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.0.path().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    match request.extensions().get::<AuthUser>() {
        None => {
            warn!("Unauthenticated request to {}", path);
            ApiError::unauthorized(&path).into_response()
        }
        Some(user) if !allowed.contains(&user.role.as_str()) => {
            warn!(
                "Forbidden: user {} with role {} requested {}",
                user.username, user.role, path
            );
            ApiError::forbidden(&path).into_response()
        }
        Some(_) => next.run(request).await,
    }
}
