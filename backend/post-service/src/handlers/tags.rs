/// Tag handlers - HTTP endpoints for tag operations
use crate::db::Stores;
use crate::error::{AppError, Result, StoreResultExt};
use crate::models::{Identifier, TagPayload};
use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};

pub const TAG_NOT_FOUND: &str = "no exist";
pub const CANT_REACH: &str = "Can't reach server";
// Delete reports store failures with its own message.
pub const NO_SERVER: &str = "no server";

/// Decode a tag body.
///
/// Empty bodies and bodies without a JSON content type carry no attributes.
/// A JSON body that is not an object is rejected with the parser message.
fn tag_payload(req: &HttpRequest, body: &[u8]) -> Result<TagPayload> {
    let content_type = req.content_type();
    let is_json = content_type == "application/json" || content_type.ends_with("+json");
    if !is_json || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(TagPayload::default());
    }
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Get a tag by ID
pub async fn get_tag(stores: web::Data<Stores>, path: web::Path<String>) -> Result<HttpResponse> {
    let id = Identifier::from(path.into_inner());

    match stores.tags.get(&id).await.or_server_error(CANT_REACH)? {
        Some(tag) => Ok(HttpResponse::Ok().json(tag)),
        None => Err(AppError::NotFound(TAG_NOT_FOUND.to_string())),
    }
}

/// List every tag
pub async fn list_tags(stores: web::Data<Stores>) -> Result<HttpResponse> {
    let tags = stores.tags.list().await.or_server_error(CANT_REACH)?;
    Ok(HttpResponse::Ok().json(tags))
}

/// Create a tag; the body is stored as-is
pub async fn create_tag(
    stores: web::Data<Stores>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let payload = tag_payload(&req, &body)?;
    let created = stores
        .tags
        .insert(&payload)
        .await
        .or_server_error(CANT_REACH)?;
    Ok(HttpResponse::Created().json(created))
}

/// Replace a tag's attributes
pub async fn update_tag(
    stores: web::Data<Stores>,
    path: web::Path<String>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let id = Identifier::from(path.into_inner());
    let payload = tag_payload(&req, &body)?;

    match stores
        .tags
        .update(&id, &payload)
        .await
        .or_server_error(CANT_REACH)?
    {
        Some(tag) => Ok(HttpResponse::Created().json(tag)),
        None => Err(AppError::NotFound(TAG_NOT_FOUND.to_string())),
    }
}

/// Delete a tag
pub async fn delete_tag(
    stores: web::Data<Stores>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = Identifier::from(path.into_inner());

    if stores.tags.remove(&id).await.or_server_error(NO_SERVER)? {
        Ok(HttpResponse::Ok().json(true))
    } else {
        Err(AppError::NotFound(TAG_NOT_FOUND.to_string()))
    }
}
