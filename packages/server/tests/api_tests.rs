//! End-to-end tests against the full router with in-memory stores.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{Duration, NaiveDate};
use serde_json::{json, Value};
use tower::ServiceExt;

use server_core::domains::auth::testing::InMemoryCredentialStore;
use server_core::domains::auth::JwtService;
use server_core::domains::member::testing::InMemoryMemberStore;
use server_core::domains::member::{MemberStore, NewMember};
use server_core::server::build_router;

const SECRET: &str = "test-secret-which-is-long-enough";

fn test_app() -> (Router, Arc<JwtService>, Arc<InMemoryMemberStore>) {
    let credentials = Arc::new(
        InMemoryCredentialStore::new()
            .with_user("admin", "admin-pass", "ROLE_ADMIN")
            .with_user("alice", "alice-pass", "ROLE_USER"),
    );
    let member_store = Arc::new(InMemoryMemberStore::new());
    let jwt_service = Arc::new(JwtService::new(SECRET, Duration::hours(1)));

    let app = build_router(
        credentials,
        member_store.clone(),
        jwt_service.clone(),
        &[],
    );
    (app, jwt_service, member_store)
}

fn admin_token(jwt: &JwtService) -> String {
    jwt.issue("admin", "ROLE_ADMIN").unwrap()
}

fn user_token(jwt: &JwtService) -> String {
    jwt.issue("alice", "ROLE_USER").unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn bare_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn member_payload(first: &str, last: &str, email: &str) -> Value {
    json!({
        "firstName": first,
        "lastName": last,
        "dateOfBirth": "1990-04-01",
        "email": email,
    })
}

async fn seed_members(store: &InMemoryMemberStore, count: usize) {
    for i in 0..count {
        store
            .insert(NewMember {
                first_name: format!("First{i}"),
                last_name: format!("Last{i}"),
                date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
                email: format!("member{i}@example.com"),
            })
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn login_returns_bearer_token_with_role() {
    let (app, _, _) = test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/login",
            None,
            json!({"username": "admin", "password": "admin-pass"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["type"], "Bearer");
    assert_eq!(body["username"], "admin");
    assert_eq!(body["role"], "ROLE_ADMIN");
    assert!(body["token"].as_str().unwrap().split('.').count() == 3);
}

#[tokio::test]
async fn login_failure_message_is_identical_for_bad_password_and_unknown_user() {
    let (app, _, _) = test_app();

    let bad_password = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/login",
            None,
            json!({"username": "admin", "password": "wrong"}),
        ))
        .await
        .unwrap();
    let unknown_user = app
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/login",
            None,
            json!({"username": "nobody", "password": "whatever"}),
        ))
        .await
        .unwrap();

    assert_eq!(bad_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    let a = body_json(bad_password).await;
    let b = body_json(unknown_user).await;
    assert_eq!(a["message"], "Invalid username or password");
    assert_eq!(a["message"], b["message"]);
}

#[tokio::test]
async fn login_with_blank_fields_is_rejected() {
    let (app, _, _) = test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/login",
            None,
            json!({"username": "  ", "password": ""}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Validation Failed");
    let errors: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e.as_str().unwrap())
        .collect();
    assert!(errors.contains(&"Username is required"));
    assert!(errors.contains(&"Password is required"));
}

#[tokio::test]
async fn member_routes_require_a_token() {
    let (app, _, _) = test_app();

    let response = app
        .oneshot(bare_request("GET", "/api/v1/members", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "Full authentication is required to access this resource"
    );
    assert_eq!(body["path"], "/api/v1/members");
}

#[tokio::test]
async fn token_signed_with_another_secret_is_rejected() {
    let (app, _, _) = test_app();
    let foreign = JwtService::new("some-other-secret", Duration::hours(1));
    let token = foreign.issue("admin", "ROLE_ADMIN").unwrap();

    let response = app
        .oneshot(bare_request("GET", "/api/v1/members", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn user_role_cannot_write_members() {
    let (app, jwt, _) = test_app();
    let token = user_token(&jwt);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/members",
            Some(&token),
            member_payload("Jane", "Doe", "jane@example.com"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Access denied: insufficient role");
}

#[tokio::test]
async fn user_role_can_read_members() {
    let (app, jwt, _) = test_app();
    let token = user_token(&jwt);

    let response = app
        .oneshot(bare_request("GET", "/api/v1/members", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn admin_crud_round_trip() {
    let (app, jwt, _) = test_app();
    let token = admin_token(&jwt);

    // Create
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/members",
            Some(&token),
            member_payload("Jane", "Doe", "jane@example.com"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["firstName"], "Jane");
    assert_eq!(created["email"], "jane@example.com");

    // Read it back
    let response = app
        .clone()
        .oneshot(bare_request(
            "GET",
            &format!("/api/v1/members/{id}"),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["id"], created["id"]);
    assert_eq!(fetched["lastName"], "Doe");

    // Update
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/members/{id}"),
            Some(&token),
            member_payload("Janet", "Doe", "janet@example.com"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["firstName"], "Janet");
    assert_eq!(updated["email"], "janet@example.com");

    // The update is visible on the read path
    let response = app
        .clone()
        .oneshot(bare_request(
            "GET",
            &format!("/api/v1/members/{id}"),
            Some(&token),
        ))
        .await
        .unwrap();
    let fetched = body_json(response).await;
    assert_eq!(fetched["firstName"], "Janet");

    // Delete
    let response = app
        .clone()
        .oneshot(bare_request(
            "DELETE",
            &format!("/api/v1/members/{id}"),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Gone
    let response = app
        .oneshot(bare_request(
            "GET",
            &format!("/api/v1/members/{id}"),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        format!("Member not found with id: {id}")
    );
}

#[tokio::test]
async fn create_with_duplicate_email_is_rejected() {
    let (app, jwt, _) = test_app();
    let token = admin_token(&jwt);

    let first = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/members",
            Some(&token),
            member_payload("Jane", "Doe", "jane@example.com"),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(json_request(
            "POST",
            "/api/v1/members",
            Some(&token),
            member_payload("John", "Smith", "jane@example.com"),
        ))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let body = body_json(second).await;
    assert_eq!(
        body["message"],
        "Member already exists with email: jane@example.com"
    );
}

#[tokio::test]
async fn create_with_invalid_fields_lists_every_violation() {
    let (app, jwt, _) = test_app();
    let token = admin_token(&jwt);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/members",
            Some(&token),
            json!({
                "firstName": "",
                "lastName": "Doe",
                "dateOfBirth": "2099-01-01",
                "email": "not-an-email",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["status"], 400);
    assert_eq!(body["message"], "Invalid input data");
    let errors: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e.as_str().unwrap())
        .collect();
    assert!(errors.contains(&"First name is required"));
    assert!(errors.contains(&"Date of birth must be in the past"));
    assert!(errors.contains(&"Email must be valid"));
}

#[tokio::test]
async fn get_with_malformed_uuid_is_a_bad_request() {
    let (app, jwt, _) = test_app();
    let token = admin_token(&jwt);

    let response = app
        .oneshot(bare_request(
            "GET",
            "/api/v1/members/not-a-uuid",
            Some(&token),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_reports_pagination_metadata() {
    let (app, jwt, store) = test_app();
    seed_members(&store, 25).await;
    let token = admin_token(&jwt);

    let response = app
        .clone()
        .oneshot(bare_request(
            "GET",
            "/api/v1/members?page=1&size=10",
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["content"].as_array().unwrap().len(), 10);
    assert_eq!(body["page"], 1);
    assert_eq!(body["size"], 10);
    assert_eq!(body["totalElements"], 25);
    assert_eq!(body["totalPages"], 3);
    assert_eq!(body["last"], false);

    let response = app
        .oneshot(bare_request(
            "GET",
            "/api/v1/members?page=2&size=10",
            Some(&token),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["content"].as_array().unwrap().len(), 5);
    assert_eq!(body["last"], true);
}

#[tokio::test]
async fn single_name_filter_matches_every_member() {
    let (app, jwt, store) = test_app();
    seed_members(&store, 3).await;
    let token = admin_token(&jwt);

    // Only one of the two name filters is set; the other behaves as
    // an empty-string contains and matches everything.
    let response = app
        .oneshot(bare_request(
            "GET",
            "/api/v1/members?firstName=First0",
            Some(&token),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["totalElements"], 3);
}

#[tokio::test]
async fn list_rejects_invalid_page_and_direction() {
    let (app, jwt, _) = test_app();
    let token = admin_token(&jwt);

    let response = app
        .clone()
        .oneshot(bare_request(
            "GET",
            "/api/v1/members?page=-1",
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(bare_request(
            "GET",
            "/api/v1/members?direction=SIDEWAYS",
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_endpoint_reports_database_status() {
    let (app, _, _) = test_app();

    let response = app
        .oneshot(bare_request("GET", "/health", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "ok");
}
