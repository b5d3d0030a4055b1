//! gamer-feed/crates/gf-api/src/middleware.rs Middleware
//!
//! Request logging and cross-origin policy for the feed API.

use actix_cors::Cors;
use actix_web::middleware::Logger;

/// Request log in the default format:
/// remote-ip "request-line" status-code response-size "referrer" "user-agent"
pub fn standard_middleware() -> Logger {
    Logger::default()
}

/// The feed views may be served from a different origin than the API.
pub fn cors_policy() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allow_any_header()
        .max_age(3600)
}
