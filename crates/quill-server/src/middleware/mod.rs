//! Middleware for `axum::Router` and HTTP request processing.
//!
//! Each concern is an extension trait on [`Router`]:
//!
//! - [`RouterRecoveryExt`]: timeouts, panics and service errors become 500s
//! - [`RouterObservabilityExt`]: request ids, tracing spans, redacted headers
//! - [`RouterSecurityExt`]: CORS, body limit and basic security headers
//! - [`RouterOpenApiExt`]: the OpenAPI document and the Scalar UI
//!
//! ```rust,ignore
//! use quill_server::middleware::*;
//!
//! let app = routes(CustomRoutes::new())
//!     .with_open_api(OpenApiConfig::default())
//!     .with_state(state)
//!     .with_security(&CorsConfig::default())
//!     .with_observability()
//!     .with_recovery(&RecoveryConfig::default());
//! ```
//!
//! [`Router`]: axum::Router

mod observability;
mod recovery;
mod security;
mod specification;

pub use observability::RouterObservabilityExt;
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use security::{CorsConfig, DEFAULT_MAX_BODY_SIZE, RouterSecurityExt};
pub use specification::{OpenApiConfig, RouterOpenApiExt};
