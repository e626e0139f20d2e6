//! HTTP middleware stack for the dashboard.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. CORS (the admin frontend lives on another origin)
//! 4. Request ID (add unique ID to each request)
//! 5. Session (resolve the JWT into a `UserId` extension)

pub mod auth;
pub mod request_id;

pub use auth::{Principal, SESSION_COOKIE, TokenVerifier, session_middleware};
pub use request_id::request_id_middleware;
