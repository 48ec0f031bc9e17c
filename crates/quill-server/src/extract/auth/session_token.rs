use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::extract::CookieJar;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use crate::extract::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind};
use crate::service::SessionKeys;

/// Where a [`SessionToken`] was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// `Authorization: Bearer <token>`.
    Bearer,
    /// The session cookie.
    Cookie,
}

/// The raw session token of a request, not yet checked against storage.
///
/// Requests without any usable credential are rejected here, before a
/// database connection is taken.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken {
    token: String,
    source: TokenSource,
}

impl SessionToken {
    /// Returns the token.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// Returns where the token was found.
    #[inline]
    pub fn source(&self) -> TokenSource {
        self.source
    }

    /// Reads the token from the session cookie, verifying its signature
    /// when a secret is configured.
    fn from_cookie(jar: &CookieJar, session_keys: &SessionKeys) -> Option<Self> {
        let cookie = jar.get(session_keys.cookie_name())?;

        let Some(token) = session_keys.verify_cookie(cookie.value()) else {
            tracing::warn!(
                target: TRACING_TARGET_AUTHENTICATION,
                cookie = session_keys.cookie_name(),
                "Session cookie signature mismatch"
            );
            return None;
        };

        Some(Self {
            token: token.to_owned(),
            source: TokenSource::Cookie,
        })
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionToken")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl<S> FromRequestParts<S> for SessionToken
where
    S: Sync + Send,
    SessionKeys: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        type AuthBearerHeader = TypedHeader<Authorization<Bearer>>;

        if let Ok(TypedHeader(Authorization(bearer))) =
            AuthBearerHeader::from_request_parts(parts, state).await
            && !bearer.token().is_empty()
        {
            return Ok(Self {
                token: bearer.token().to_owned(),
                source: TokenSource::Bearer,
            });
        }

        let session_keys = SessionKeys::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);
        if let Some(token) = Self::from_cookie(&jar, &session_keys) {
            return Ok(token);
        }

        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            "Request carries no session credential"
        );

        Err(ErrorKind::Unauthorized
            .with_context("no bearer token or session cookie")
            .with_resource("authentication"))
    }
}

impl aide::OperationInput for SessionToken {}

#[cfg(test)]
mod tests {
    use axum::http::{Request, header};

    use super::*;

    fn unsigned_keys() -> SessionKeys {
        SessionKeys::new("session", None).unwrap()
    }

    fn signed_keys() -> SessionKeys {
        SessionKeys::new("session", Some("secret")).unwrap()
    }

    async fn extract(
        session_keys: SessionKeys,
        request: Request<()>,
    ) -> Result<SessionToken, Error<'static>> {
        let (mut parts, _) = request.into_parts();
        SessionToken::from_request_parts(&mut parts, &session_keys).await
    }

    fn with_cookie(cookie: &str) -> Request<()> {
        Request::builder()
            .header(header::COOKIE, cookie)
            .body(())
            .unwrap()
    }

    #[tokio::test]
    async fn bearer_token() {
        let request = Request::builder()
            .header(header::AUTHORIZATION, "Bearer abc123")
            .body(())
            .unwrap();

        let token = extract(unsigned_keys(), request).await.unwrap();
        assert_eq!(token.as_str(), "abc123");
        assert_eq!(token.source(), TokenSource::Bearer);
    }

    #[tokio::test]
    async fn unsigned_cookie() {
        let request = with_cookie("other=1; session=abc123");

        let token = extract(unsigned_keys(), request).await.unwrap();
        assert_eq!(token.as_str(), "abc123");
        assert_eq!(token.source(), TokenSource::Cookie);
    }

    #[tokio::test]
    async fn signed_cookie() {
        let keys = signed_keys();
        let request = with_cookie(&format!("session={}", keys.sign("abc123")));

        let token = extract(keys, request).await.unwrap();
        assert_eq!(token.as_str(), "abc123");
    }

    #[tokio::test]
    async fn percent_encoded_signed_cookie() {
        let keys = signed_keys();
        let encoded = keys
            .sign("abc123")
            .replace('+', "%2B")
            .replace('/', "%2F")
            .replace('=', "%3D");
        assert!(encoded.contains("%3D"));

        let token = extract(keys, with_cookie(&format!("session={encoded}")))
            .await
            .unwrap();
        assert_eq!(token.as_str(), "abc123");
    }

    #[tokio::test]
    async fn tampered_cookie_is_rejected() {
        let request = with_cookie("session=abc123.bm90LWEtc2lnbmF0dXJl");

        let error = extract(signed_keys(), request).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn missing_credentials() {
        let request = Request::builder().body(()).unwrap();

        let error = extract(unsigned_keys(), request).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unauthorized);
    }
}
