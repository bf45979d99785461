use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Extension, OriginalUri, Path, Query};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::common::pagination::{PageRequest, SortDirection};
use crate::common::validation::{error_messages, not_blank, past_date};
use crate::domains::member::models::NewMember;
use crate::domains::member::{MemberData, PagedMemberData};
use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    #[validate(custom(function = not_blank, message = "First name is required"))]
    pub first_name: String,
    #[validate(custom(function = not_blank, message = "Last name is required"))]
    pub last_name: String,
    #[validate(custom(function = past_date, message = "Date of birth must be in the past"))]
    pub date_of_birth: NaiveDate,
    #[validate(email(message = "Email must be valid"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    #[validate(custom(function = not_blank, message = "First name is required"))]
    pub first_name: String,
    #[validate(custom(function = not_blank, message = "Last name is required"))]
    pub last_name: String,
    #[validate(custom(function = past_date, message = "Date of birth must be in the past"))]
    pub date_of_birth: NaiveDate,
    #[validate(email(message = "Email must be valid"))]
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMembersQuery {
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
    #[serde(default = "default_sort")]
    pub sort: String,
    #[serde(default = "default_direction")]
    pub direction: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

fn default_size() -> i64 {
    20
}

fn default_sort() -> String {
    "createdAt".to_string()
}

fn default_direction() -> String {
    "DESC".to_string()
}

/// GET /api/v1/members
pub async fn list_members(
    Extension(state): Extension<AppState>,
    OriginalUri(uri): OriginalUri,
    query: Result<Query<ListMembersQuery>, QueryRejection>,
) -> Result<Json<PagedMemberData>, ApiError> {
    let path = uri.path();
    let Query(params) = query.map_err(|rejection| {
        ApiError::validation(vec![rejection.body_text()], path)
    })?;

    let direction: SortDirection = params
        .direction
        .parse()
        .map_err(|message| ApiError::validation(vec![message], path))?;
    let request = PageRequest::new(params.page, params.size, params.sort, direction)
        .map_err(|message| ApiError::validation(vec![message], path))?;

    let page = state
        .member_service
        .list(
            &request,
            params.first_name.as_deref(),
            params.last_name.as_deref(),
        )
        .await
        .map_err(|err| ApiError::from_member(err, path))?;

    Ok(Json(page))
}

/// GET /api/v1/members/{id}
pub async fn get_member(
    Extension(state): Extension<AppState>,
    OriginalUri(uri): OriginalUri,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MemberData>, ApiError> {
    let path = uri.path();
    let Path(id) = id.map_err(|rejection| {
        ApiError::validation(vec![rejection.body_text()], path)
    })?;

    let member = state
        .member_service
        .get_by_id(id)
        .await
        .map_err(|err| ApiError::from_member(err, path))?;

    Ok(Json(member))
}

/// POST /api/v1/members
pub async fn create_member(
    Extension(state): Extension<AppState>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<CreateMemberRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MemberData>), ApiError> {
    let path = uri.path();
    let Json(request) = payload.map_err(|rejection| {
        ApiError::bad_request(rejection.body_text(), path)
    })?;
    request
        .validate()
        .map_err(|errors| ApiError::validation(error_messages(&errors), path))?;

    info!("Received request to create member with email: {}", request.email);
    let member = state
        .member_service
        .create(NewMember {
            first_name: request.first_name,
            last_name: request.last_name,
            date_of_birth: request.date_of_birth,
            email: request.email,
        })
        .await
        .map_err(|err| ApiError::from_member(err, path))?;

    Ok((StatusCode::CREATED, Json(member)))
}

/// PUT /api/v1/members/{id}
pub async fn update_member(
    Extension(state): Extension<AppState>,
    OriginalUri(uri): OriginalUri,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateMemberRequest>, JsonRejection>,
) -> Result<Json<MemberData>, ApiError> {
    let path = uri.path();
    let Path(id) = id.map_err(|rejection| {
        ApiError::validation(vec![rejection.body_text()], path)
    })?;
    let Json(request) = payload.map_err(|rejection| {
        ApiError::bad_request(rejection.body_text(), path)
    })?;
    request
        .validate()
        .map_err(|errors| ApiError::validation(error_messages(&errors), path))?;

    info!("Received request to update member with id: {}", id);
    let member = state
        .member_service
        .update(
            id,
            NewMember {
                first_name: request.first_name,
                last_name: request.last_name,
                date_of_birth: request.date_of_birth,
                email: request.email,
            },
        )
        .await
        .map_err(|err| ApiError::from_member(err, path))?;

    Ok(Json(member))
}

/// DELETE /api/v1/members/{id}
pub async fn delete_member(
    Extension(state): Extension<AppState>,
    OriginalUri(uri): OriginalUri,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let path = uri.path();
    let Path(id) = id.map_err(|rejection| {
        ApiError::validation(vec![rejection.body_text()], path)
    })?;

    info!("Received request to delete member with id: {}", id);
    state
        .member_service
        .delete(id)
        .await
        .map_err(|err| ApiError::from_member(err, path))?;

    Ok(StatusCode::NO_CONTENT)
}
