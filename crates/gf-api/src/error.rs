//! Maps feed errors onto HTTP responses.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use gf_core::FeedError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Feed(#[from] FeedError),

    /// The multipart body could not be read
    #[error("malformed upload: {0}")]
    Upload(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Feed(FeedError::AuthenticationRequired(_)) => StatusCode::UNAUTHORIZED,
            ApiError::Feed(FeedError::NotFound(..)) => StatusCode::NOT_FOUND,
            ApiError::Feed(FeedError::Persistence(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upload(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Store failures stay in the logs.
        let message = match self {
            ApiError::Feed(FeedError::Persistence(_)) => "internal service error".to_string(),
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}
