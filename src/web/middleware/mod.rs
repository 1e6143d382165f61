//! HTTP middleware for the site.

mod cors;
mod rate_limit;
mod security;

pub use cors::create_cors_layer;
pub use rate_limit::{api_rate_limit, RateLimitState};
pub use security::security_headers;
