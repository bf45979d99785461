use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, OriginalUri};
use axum::Json;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::common::validation::{error_messages, not_blank};
use crate::domains::auth::LoginData;
use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom(function = not_blank, message = "Username is required"))]
    pub username: String,
    #[validate(custom(function = not_blank, message = "Password is required"))]
    pub password: String,
}

/// POST /api/v1/auth/login
pub async fn login(
    Extension(state): Extension<AppState>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginData>, ApiError> {
    let path = uri.path();
    let Json(request) = payload.map_err(|rejection| {
        ApiError::bad_request(rejection.body_text(), path)
    })?;
    request
        .validate()
        .map_err(|errors| ApiError::validation(error_messages(&errors), path))?;

    info!("Received login request for user: {}", request.username);
    let outcome = state
        .auth_service
        .authenticate(&request.username, &request.password)
        .await
        .map_err(|err| ApiError::from_auth(err, path))?;

    Ok(Json(outcome))
}
