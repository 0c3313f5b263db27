//! HTTP API tests: envelope shape, identity middleware and status
//! mapping, driven through the full middleware stack with `oneshot`.

mod common;

use axum::body::Body;
use axum::Router;
use http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use exit_server::api;
use exit_server::{Config, ServerState};

async fn test_app() -> Router {
    let pool = common::test_pool().await;
    let state = ServerState::with_pool(Config::default(), pool);
    api::build_app().with_state(state)
}

fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-actor-id", "hr.admin")
        .header(header::CONTENT_TYPE, "application/json");
    match body {
        Some(v) => builder.body(Body::from(v.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

fn submit_body(employee_id: i64) -> Value {
    json!({
        "employee_id": employee_id,
        "department_id": 3,
        "reason": "Relocating to another city",
        "exit_discussion_held": true
    })
}

#[tokio::test]
async fn health_is_public() {
    let app = test_app().await;
    let req = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "E0000");
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["database"], "up");
}

#[tokio::test]
async fn api_requires_actor_identity() {
    let app = test_app().await;
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/resignations")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(submit_body(42).to_string()))
        .unwrap();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3001");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = test_app().await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn submit_accept_and_detail_flow() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        request(Method::POST, "/api/resignations", Some(submit_body(42))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "E0000");
    assert_eq!(body["message"], "Resignation submitted");
    assert_eq!(body["data"]["status"], "pending");
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        request(Method::POST, &format!("/api/resignations/{id}/accept"), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "accepted");

    let (status, body) = send(
        &app,
        request(Method::GET, &format!("/api/resignations/{id}"), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["employee_name"], "Asha Pillai");
    assert_eq!(body["data"]["all_clearances_completed"], false);
    assert_eq!(body["data"]["history"].as_array().unwrap().len(), 2);

    let (status, body) = send(
        &app,
        request(Method::GET, "/api/resignations/active/42", None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["exists"], true);
    assert_eq!(body["data"]["case_id"].as_i64(), Some(id));
}

#[tokio::test]
async fn duplicate_submission_returns_conflict() {
    let app = test_app().await;
    send(
        &app,
        request(Method::POST, "/api/resignations", Some(submit_body(42))),
    )
    .await;

    let (status, body) = send(
        &app,
        request(Method::POST, "/api/resignations", Some(submit_body(42))),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E0004");
}

#[tokio::test]
async fn validation_failure_returns_bad_request() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/resignations",
            Some(json!({
                "employee_id": 42,
                "department_id": 3,
                "reason": ""
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");
}

#[tokio::test]
async fn unknown_case_returns_not_found() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        request(Method::POST, "/api/resignations/123456/accept", None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E0003");
}

#[tokio::test]
async fn out_of_order_transition_returns_unprocessable() {
    let app = test_app().await;
    let (_, body) = send(
        &app,
        request(Method::POST, "/api/resignations", Some(submit_body(42))),
    )
    .await;
    let id = body["data"]["id"].as_i64().unwrap();

    // Complete straight from pending
    let (status, body) = send(
        &app,
        request(
            Method::POST,
            &format!("/api/resignations/{id}/complete"),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "E0005");
}

#[tokio::test]
async fn clearance_upsert_and_listing() {
    let app = test_app().await;
    let (_, body) = send(
        &app,
        request(Method::POST, "/api/resignations", Some(submit_body(42))),
    )
    .await;
    let id = body["data"]["id"].as_i64().unwrap();

    let payload = json!({
        "details": {
            "kind": "it",
            "access_revoked": true,
            "asset_returned": true,
            "asset_condition": "good"
        },
        "note": "All devices returned"
    });
    let (status, body) = send(
        &app,
        request(
            Method::PUT,
            &format!("/api/resignations/{id}/clearances/it"),
            Some(payload),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "E0000");
    assert_eq!(body["data"]["department"], "it");
    assert_eq!(body["data"]["details"]["kind"], "it");

    let (status, body) = send(
        &app,
        request(
            Method::GET,
            &format!("/api/resignations/{id}/clearances"),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn clearance_department_mismatch_is_rejected() {
    let app = test_app().await;
    let (_, body) = send(
        &app,
        request(Method::POST, "/api/resignations", Some(submit_body(42))),
    )
    .await;
    let id = body["data"]["id"].as_i64().unwrap();

    let payload = json!({
        "details": {
            "kind": "hr",
            "exit_interview_held": true,
            "id_card_returned": true
        }
    });
    let (status, body) = send(
        &app,
        request(
            Method::PUT,
            &format!("/api/resignations/{id}/clearances/account"),
            Some(payload),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");
}

#[tokio::test]
async fn listing_supports_status_filter() {
    let app = test_app().await;
    let (_, body) = send(
        &app,
        request(Method::POST, "/api/resignations", Some(submit_body(42))),
    )
    .await;
    let id = body["data"]["id"].as_i64().unwrap();
    send(
        &app,
        request(Method::POST, "/api/resignations", Some(submit_body(55))),
    )
    .await;

    let (status, body) = send(
        &app,
        request(Method::GET, "/api/resignations?status=pending", None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pagination"]["total"], 2);

    let (_, body) = send(
        &app,
        request(
            Method::GET,
            "/api/resignations?employee_id=42&per_page=10",
            None,
        ),
    )
    .await;
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"].as_i64(), Some(id));
}
