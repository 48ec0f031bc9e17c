//! Session verification against the database.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use derive_more::Deref;
use jiff::Timestamp;
use quill_postgres::PgClient;
use quill_postgres::model::{Author, Session, User};
use quill_postgres::query::SessionRepository;
use uuid::Uuid;

use super::SessionToken;
use crate::extract::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind, Result};
use crate::service::SessionKeys;

/// The authenticated caller, taken from a live session.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthClaims {
    /// The signed-in user.
    pub user_id: Uuid,
    /// The session the request was made with.
    pub session_id: Uuid,
    /// Display name of the user.
    pub name: Option<String>,
    /// Public handle of the user, if they picked one.
    pub username: Option<String>,
    /// When the session stops being accepted.
    pub expires_at: Timestamp,
}

impl AuthClaims {
    fn new(session: &Session, user: &User) -> Self {
        Self {
            user_id: user.id,
            session_id: session.id,
            name: user.name.clone(),
            username: user.username.clone(),
            expires_at: session.expires_at.into(),
        }
    }

    /// Returns the public identity of the caller.
    pub fn author(&self) -> Author {
        Author {
            name: self.name.clone(),
            username: self.username.clone(),
        }
    }
}

/// Extractor for routes that require a session.
///
/// The token from [`SessionToken`] must match a `sessions` row whose expiry
/// is still in the future. Any failure is a 401 `Unauthorized`. The result
/// is cached in the request extensions.
#[derive(Debug, Clone, Deref, PartialEq, Eq)]
pub struct AuthState(pub AuthClaims);

impl AuthState {
    /// Resolves `token` to a live session.
    pub async fn from_session_token(token: &SessionToken, pg_client: &PgClient) -> Result<Self> {
        let mut conn = pg_client.get_connection().await?;

        let Some((session, user)) = conn.find_session_by_token(token.as_str()).await? else {
            tracing::warn!(
                target: TRACING_TARGET_AUTHENTICATION,
                source = ?token.source(),
                "Authentication failed: session token not found"
            );
            return Err(unauthorized("unknown session token"));
        };

        if session.is_expired() {
            tracing::warn!(
                target: TRACING_TARGET_AUTHENTICATION,
                session_id = %session.id,
                user_id = %user.id,
                expires_at = %Timestamp::from(session.expires_at),
                "Authentication failed: session expired"
            );
            return Err(unauthorized("session expired"));
        }

        let claims = AuthClaims::new(&session, &user);

        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            user_id = %claims.user_id,
            session_id = %claims.session_id,
            "Session verified"
        );

        Ok(Self(claims))
    }
}

fn unauthorized(context: &'static str) -> Error<'static> {
    ErrorKind::Unauthorized
        .with_context(context)
        .with_resource("authentication")
}

impl<S> FromRequestParts<S> for AuthState
where
    S: Sync + Send,
    PgClient: FromRef<S>,
    SessionKeys: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth_state) = parts.extensions.get::<Self>() {
            return Ok(auth_state.clone());
        }

        let token = SessionToken::from_request_parts(parts, state).await?;
        let pg_client = PgClient::from_ref(state);
        let auth_state = Self::from_session_token(&token, &pg_client).await?;

        parts.extensions.insert(auth_state.clone());
        Ok(auth_state)
    }
}

impl aide::OperationInput for AuthState {}
