//! HTTP request extractors.
//!
//! Drop-in replacements for the axum extractors whose rejections all render
//! as `{"error": "..."}`, plus [`AuthState`] for session authentication.
//!
//! - [`Json`], [`ValidateJson`], [`Path`], [`Query`]: request data
//! - [`SessionToken`]: the raw session token, from a bearer header or cookie
//! - [`AuthState`]: the session verified against the database

pub mod auth;
pub mod reject;

pub use crate::extract::auth::{AuthClaims, AuthState, SessionToken};
pub use crate::extract::reject::{Json, Path, Query, ValidateJson};

/// Tracing target for authentication.
pub const TRACING_TARGET_AUTHENTICATION: &str = "quill_server::extract::authentication";
