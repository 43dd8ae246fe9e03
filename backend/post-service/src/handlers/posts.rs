/// Post handlers - HTTP endpoints for post operations
use crate::db::{StoreResult, Stores};
use crate::error::{AppError, Result, StoreResultExt};
use crate::models::{Identifier, NewPost, Post, PostPayload};
use actix_web::{error::JsonPayloadError, web, HttpRequest, HttpResponse};

pub const MISSING_FIELDS: &str = "Please include both a userId and text";
pub const POST_NOT_FOUND: &str = "A post with that id does not exist";
pub const USER_NOT_FOUND: &str = "A user with that id does not exist";
pub const NEITHER_FOUND: &str = "Neither the userId nor the postId exist";
pub const SERVER_NOT_REACHED: &str = "The server could not be reached";
pub const UNABLE_TO_REACH: &str = "Unable to reach server";

/// Bodies that fail to parse are treated as missing fields
pub fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected post payload");
    AppError::BadRequest(MISSING_FIELDS.to_string()).into()
}

fn validate(payload: &PostPayload) -> Result<NewPost> {
    payload
        .to_new_post()
        .ok_or_else(|| AppError::BadRequest(MISSING_FIELDS.to_string()))
}

/// Get a post by ID
pub async fn get_post(
    stores: web::Data<Stores>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = Identifier::from(path.into_inner());

    match stores.posts.get(&id).await.or_server_error(SERVER_NOT_REACHED)? {
        Some(post) => Ok(HttpResponse::Found().json(post)),
        None => Err(AppError::NotFound(POST_NOT_FOUND.to_string())),
    }
}

/// List every post
pub async fn list_posts(stores: web::Data<Stores>) -> Result<HttpResponse> {
    let posts = stores.posts.list().await.or_server_error(UNABLE_TO_REACH)?;
    Ok(HttpResponse::Found().json(posts))
}

/// Create a post for an existing user
pub async fn create_post(
    stores: web::Data<Stores>,
    req: web::Json<PostPayload>,
) -> Result<HttpResponse> {
    let new_post = validate(&req)?;

    let created = insert_for_existing_user(&stores, &new_post)
        .await
        .map_err(|e| {
            tracing::error!(user_id = %new_post.user_id, error = %e, "Failed to create post");
            e
        })
        .or_server_error(UNABLE_TO_REACH)?;

    match created {
        Some(post) => Ok(HttpResponse::Created().json(post)),
        None => Err(AppError::NotFound(USER_NOT_FOUND.to_string())),
    }
}

/// `None` when the user is missing or the store declined the insert
async fn insert_for_existing_user(
    stores: &Stores,
    new_post: &NewPost,
) -> StoreResult<Option<Post>> {
    if stores.users.get(&new_post.user_id).await?.is_none() {
        return Ok(None);
    }
    stores.posts.insert(new_post).await
}

/// Replace a post's userId and text, echoing the submitted body on success
///
/// The update runs even when the user is missing; the response reports
/// whichever of the two lookups failed.
pub async fn update_post(
    stores: web::Data<Stores>,
    path: web::Path<String>,
    req: web::Json<PostPayload>,
) -> Result<HttpResponse> {
    let id = Identifier::from(path.into_inner());
    let payload = req.into_inner();
    let update = validate(&payload)?;

    let user = stores
        .users
        .get(&update.user_id)
        .await
        .or_server_error(UNABLE_TO_REACH)?;
    let updated = stores
        .posts
        .update(&id, &update)
        .await
        .or_server_error(UNABLE_TO_REACH)?;

    match (user, updated) {
        (None, None) => Err(AppError::NotFound(NEITHER_FOUND.to_string())),
        (None, Some(_)) => Err(AppError::NotFound(USER_NOT_FOUND.to_string())),
        (Some(_), None) => Err(AppError::NotFound(POST_NOT_FOUND.to_string())),
        (Some(_), Some(_)) => Ok(HttpResponse::Accepted().json(payload)),
    }
}

/// Delete a post, answering with the post as it was before removal
pub async fn delete_post(
    stores: web::Data<Stores>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = Identifier::from(path.into_inner());

    let snapshot = stores.posts.get(&id).await.or_server_error(UNABLE_TO_REACH)?;
    let removed = stores.posts.remove(&id).await.or_server_error(UNABLE_TO_REACH)?;

    if removed {
        Ok(HttpResponse::Ok().json(snapshot))
    } else {
        Err(AppError::NotFound(POST_NOT_FOUND.to_string()))
    }
}
