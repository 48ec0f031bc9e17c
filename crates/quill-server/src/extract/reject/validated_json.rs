//! JSON extractor that also runs `validator` rules.

use axum::extract::{FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::Json;
use crate::handler::{Error, ErrorKind};

/// [`Json`] followed by [`Validate::validate`].
///
/// The first failing rule decides the message sent to the client: its
/// custom message if it has one, otherwise a description built from the
/// field name (`"Title is required"` for a missing `title`).
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateJson<T>(pub T);

impl<T> ValidateJson<T> {
    /// Creates a new instance of [`ValidateJson`].
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Returns the inner validated value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;
        data.validate()?;
        Ok(Self::new(data))
    }
}

/// Formats a single validation failure.
fn format_validation_error(field: &str, error: &validator::ValidationError) -> String {
    if let Some(custom_message) = &error.message {
        return custom_message.to_string();
    }

    match error.code.as_ref() {
        "required" => format!("{} is required", capitalize(field)),
        "length" => format!("Field '{}' has invalid length", field),
        code => format!("Field '{}' failed validation: {}", field, code),
    }
}

/// Uppercases the first character of a field name.
fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl From<ValidationErrors> for Error<'static> {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors: Vec<_> = errors.field_errors().into_iter().collect();
        field_errors.sort_by(|(a, _), (b, _)| a.cmp(b));

        let message = field_errors
            .iter()
            .find_map(|(field, errors)| {
                errors
                    .iter()
                    .next()
                    .map(|error| format_validation_error(field, error))
            })
            .unwrap_or_else(|| "Invalid request data".to_owned());

        tracing::warn!(
            errors = ?errors.field_errors(),
            "Request validation failed"
        );

        ErrorKind::BadRequest
            .with_message(message)
            .with_resource("request")
    }
}

impl<T> aide::OperationInput for ValidateJson<T>
where
    T: schemars::JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        Json::<T>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        Json::<T>::inferred_early_responses(ctx, operation)
    }
}

#[cfg(test)]
mod tests {
    use validator::ValidationError;

    use super::*;

    #[test]
    fn custom_message_wins() {
        let mut errors = ValidationErrors::new();
        let mut error = ValidationError::new("blank");
        error.message = Some("Title is required".into());
        errors.add("title", error);

        let error = Error::from(errors);
        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.message(), Some("Title is required"));
    }

    #[test]
    fn generic_message_without_custom_one() {
        let mut errors = ValidationErrors::new();
        errors.add("content", ValidationError::new("required"));

        let error = Error::from(errors);
        assert_eq!(error.message(), Some("Content is required"));
    }

    #[tokio::test]
    async fn rejection_body_carries_field_message() -> anyhow::Result<()> {
        use axum::Router;
        use axum::http::StatusCode;
        use axum::routing::post;
        use axum_test::TestServer;

        use crate::handler::request::CreatePost;

        async fn create(ValidateJson(_): ValidateJson<CreatePost>) -> StatusCode {
            StatusCode::CREATED
        }

        let server = TestServer::new(Router::new().route("/posts", post(create)))?;

        let response = server.post("/posts").json(&serde_json::json!({})).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&serde_json::json!({ "error": "Title is required" }));

        let response = server
            .post("/posts")
            .json(&serde_json::json!({ "title": "Hello" }))
            .await;
        response.assert_status(StatusCode::CREATED);

        Ok(())
    }
}
