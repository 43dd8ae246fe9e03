/// Health endpoint tests
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use common::{failing_post_store, init_app};
use post_service::db::{memory_stores, Stores};
use serde_json::{json, Value};
use std::sync::Arc;

#[actix_web::test]
async fn liveness_always_answers() {
    let app = init_app(memory_stores()).await;

    let req = test::TestRequest::get().uri("/api/health/live").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"alive": true}));
}

#[actix_web::test]
async fn health_reports_ok_when_post_store_answers() {
    let app = init_app(memory_stores()).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "post-service");
}

#[actix_web::test]
async fn health_reports_unavailable_when_post_store_fails() {
    let stores = memory_stores();
    let app = init_app(Stores::new(
        Arc::new(failing_post_store()),
        stores.users,
        stores.tags,
    ))
    .await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "unhealthy");
}
