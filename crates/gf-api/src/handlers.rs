//! # gf-api Handlers
//!
//! This module coordinates the flow between HTTP requests and the feed service.

use std::sync::Arc;

use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse};
use bytes::BytesMut;
use futures_util::StreamExt;
use gf_core::{FeedService, MediaFile, SessionIdentity, User};
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;

/// Identity headers set by the gateway in front of this service.
pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_NAME_HEADER: &str = "x-user-name";
pub const USER_IMAGE_HEADER: &str = "x-user-image";

/// Default cap on a single multipart field (20 MiB).
pub const MAX_UPLOAD_FIELD_BYTES: usize = 20 * 1024 * 1024;

/// State shared across all Actix-web workers.
pub struct AppState {
    pub feed: FeedService,
    /// Largest accepted multipart field, in bytes.
    pub max_field_bytes: usize,
}

impl AppState {
    pub fn new(feed: FeedService) -> Self {
        Self {
            feed,
            max_field_bytes: MAX_UPLOAD_FIELD_BYTES,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewComment {
    pub content: String,
}

/// The caller as described by the identity headers. No user id means anonymous.
fn request_identity(req: &HttpRequest) -> SessionIdentity {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    match header(USER_ID_HEADER) {
        Some(id) => SessionIdentity::signed_in(User {
            username: header(USER_NAME_HEADER).unwrap_or_else(|| id.clone()),
            profile_image: header(USER_IMAGE_HEADER).unwrap_or_default(),
            id,
        }),
        None => SessionIdentity::anonymous(),
    }
}

fn feed_for(data: &AppState, req: &HttpRequest) -> FeedService {
    data.feed.with_identity(Arc::new(request_identity(req)))
}

/// Lists the newest page of the feed.
pub async fn list_posts(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let posts = data.feed.list_posts().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// Creates a post from a multipart form: a `content` text field and any number of `media` files.
pub async fn create_post(
    data: web::Data<AppState>,
    req: HttpRequest,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let mut content = String::new();
    let mut media = Vec::new();

    while let Some(field) = payload.next().await {
        let mut field = field.map_err(|e| ApiError::Upload(e.to_string()))?;
        let name = field
            .content_disposition()
            .get_name()
            .unwrap_or_default()
            .to_string();
        let file_name = field.content_disposition().get_filename().map(str::to_string);
        let content_type = field.content_type().map(|mime| mime.to_string());

        let mut buf = BytesMut::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| ApiError::Upload(e.to_string()))?;
            if buf.len() + chunk.len() > data.max_field_bytes {
                tracing::warn!(field = %name, limit = data.max_field_bytes, "multipart field too large");
                return Err(ApiError::Upload(format!(
                    "field {name:?} exceeds {} bytes",
                    data.max_field_bytes
                )));
            }
            buf.extend_from_slice(&chunk);
        }

        match name.as_str() {
            "content" => {
                content = String::from_utf8(buf.to_vec())
                    .map_err(|_| ApiError::Upload("content is not valid UTF-8".to_string()))?;
            }
            "media" => media.push(MediaFile {
                data: buf.freeze(),
                content_type,
                file_name,
            }),
            other => tracing::debug!(field = other, "ignoring unknown multipart field"),
        }
    }

    let id = feed_for(&data, &req).create_post(&content, media).await?;
    Ok(HttpResponse::Created().json(json!({ "id": id })))
}

pub async fn like_post(
    data: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    feed_for(&data, &req).like_post(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn unlike_post(
    data: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    feed_for(&data, &req).unlike_post(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn add_comment(
    data: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<NewComment>,
) -> Result<HttpResponse, ApiError> {
    feed_for(&data, &req)
        .add_comment(&path.into_inner(), &body.content)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
