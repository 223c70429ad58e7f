//! postsync/crates/ps-api/src/middleware.rs Middleware
//!
//! Request logging and CORS for the read API.

use actix_cors::Cors;
use actix_web::middleware::Logger;

/// Access log: remote-ip "request-line" status-code response-size "referrer" "user-agent" time
pub fn standard_middleware() -> Logger {
    Logger::default()
}

// Read-only API, so any origin may GET.
pub fn cors_policy() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET"])
        .max_age(3600)
}
