/// HTTP handlers for post-service
///
/// This module contains handlers for:
/// - Posts: create, read, update, delete posts that reference a user
/// - Tags: create, read, update, delete free-form tags
/// - Health: liveness and readiness probes
pub mod health;
pub mod posts;
pub mod tags;

use actix_web::web;

// Re-export handler functions at module level
pub use health::{health_summary, liveness_check};
pub use posts::{create_post, delete_post, get_post, list_posts, update_post};
pub use tags::{create_tag, delete_tag, get_tag, list_tags, update_tag};

/// Mount every route. Expects `web::Data<Stores>` in app data.
///
/// The `/tags` scope is registered before `/{id}` so that
/// `/api/posts/tags` never resolves to a post lookup. Tag handlers decode
/// their own bodies; the `JsonConfig` applies to post bodies only.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/health")
            .route("", web::get().to(health_summary))
            .route("/live", web::get().to(liveness_check)),
    )
    .service(
        web::scope("/api/posts")
            .service(
                web::scope("/tags")
                    .service(
                        web::resource("")
                            .route(web::get().to(list_tags))
                            .route(web::post().to(create_tag)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(get_tag))
                            .route(web::put().to(update_tag))
                            .route(web::delete().to(delete_tag)),
                    ),
            )
            .app_data(web::JsonConfig::default().error_handler(posts::json_error))
            .service(
                web::resource("")
                    .route(web::get().to(list_posts))
                    .route(web::post().to(create_post)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_post))
                    .route(web::put().to(update_post))
                    .route(web::delete().to(delete_post)),
            ),
    );
}
