//! HTTP middleware for the storefront API.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. CORS
//! 4. Request ID (correlate logs, Sentry events and responses)
//!
//! Admin routes additionally use the [`RequireAdmin`] extractor.

pub mod auth;
pub mod request_id;

pub use auth::RequireAdmin;
pub use request_id::request_id_middleware;
