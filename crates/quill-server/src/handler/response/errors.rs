use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use schemars::JsonSchema;
use serde::Serialize;

/// Error body returned by every endpoint: `{"error": "..."}`.
///
/// Name, resource and context are kept for logging and never serialized.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse<'a> {
    /// User-facing error message.
    pub error: Cow<'a, str>,

    /// The error name/type identifier.
    #[serde(skip)]
    pub name: Cow<'a, str>,
    /// The resource that the error relates to.
    #[serde(skip)]
    pub resource: Option<Cow<'a, str>>,
    /// Internal context for debugging.
    #[serde(skip)]
    pub context: Option<Cow<'a, str>>,
    /// HTTP status code.
    #[serde(skip)]
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    pub const BAD_REQUEST: Self = Self::new(
        "bad_request",
        "Invalid request data",
        StatusCode::BAD_REQUEST,
    );
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "internal_server_error",
        "Internal server error",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const NOT_FOUND: Self = Self::new("not_found", "Not found", StatusCode::NOT_FOUND);
    pub const PAYLOAD_TOO_LARGE: Self = Self::new(
        "payload_too_large",
        "Payload too large",
        StatusCode::PAYLOAD_TOO_LARGE,
    );
    pub const UNAUTHORIZED: Self =
        Self::new("unauthorized", "Unauthorized", StatusCode::UNAUTHORIZED);

    /// Creates a new error response.
    #[inline]
    pub const fn new(name: &'a str, error: &'a str, status: StatusCode) -> Self {
        Self {
            error: Cow::Borrowed(error),
            name: Cow::Borrowed(name),
            resource: None,
            context: None,
            status,
        }
    }

    /// Replaces the message sent to the client.
    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        self.error = message.into();
        self
    }

    /// Sets the resource, joining it to an existing one with `/`.
    pub fn with_resource(mut self, resource: impl Into<Cow<'a, str>>) -> Self {
        let new_resource = resource.into();
        self.resource = Some(match self.resource {
            Some(existing) => Cow::Owned(format!("{}/{}", existing, new_resource)),
            None => new_resource,
        });
        self
    }

    /// Attaches context, joining it to existing context with `; `.
    pub fn with_context(mut self, context: impl Into<Cow<'a, str>>) -> Self {
        let new_context = context.into();
        self.context = Some(match self.context {
            Some(existing) => Cow::Owned(format!("{}; {}", existing, new_context)),
            None => new_context,
        });
        self
    }
}

impl Default for ErrorResponse<'_> {
    #[inline]
    fn default() -> Self {
        Self::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ErrorResponse<'_> {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(
                status = %self.status,
                name = %self.name,
                error = %self.error,
                resource = ?self.resource,
                context = ?self.context,
                "HTTP error response"
            );
        } else {
            tracing::warn!(
                status = %self.status,
                name = %self.name,
                error = %self.error,
                resource = ?self.resource,
                context = ?self.context,
                "HTTP error response"
            );
        }

        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_replaces_default() {
        let response = ErrorResponse::NOT_FOUND.with_message("Post not found");
        assert_eq!(response.error, "Post not found");
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn merging_resource_and_context() {
        let response = ErrorResponse::INTERNAL_SERVER_ERROR
            .with_resource("post")
            .with_resource("comment")
            .with_context("connection refused")
            .with_context("pool exhausted");

        assert_eq!(response.resource.as_deref(), Some("post/comment"));
        assert_eq!(
            response.context.as_deref(),
            Some("connection refused; pool exhausted")
        );
    }

    #[test]
    fn serializes_only_the_message() {
        let response = ErrorResponse::BAD_REQUEST
            .with_message("Content is required")
            .with_resource("comment")
            .with_context("blank content");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Content is required" }));
    }

    #[test]
    fn default_is_internal_error() {
        let json = serde_json::to_value(ErrorResponse::default()).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Internal server error" }));
    }
}
