/// Health check endpoints
use crate::db::Stores;
use actix_web::{web, HttpResponse};

/// Readiness: the post store must answer a list query
pub async fn health_summary(stores: web::Data<Stores>) -> HttpResponse {
    match stores.posts.list().await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "post-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unhealthy",
                "error": format!("Post store unavailable: {}", e),
                "service": "post-service"
            }))
        }
    }
}

pub async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}
