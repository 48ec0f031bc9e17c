//! Session lookups.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::model::{Session, User};
use crate::{PgConnection, PgError, PgResult, TRACING_TARGET_QUERY, schema};

/// Read-only access to sessions. Rows are written by the auth provider.
pub trait SessionRepository {
    /// Finds a session by token together with its owner.
    ///
    /// Expired sessions are returned as well; callers decide what to do
    /// with them.
    fn find_session_by_token(
        &mut self,
        token: &str,
    ) -> impl Future<Output = PgResult<Option<(Session, User)>>> + Send;
}

impl SessionRepository for PgConnection {
    async fn find_session_by_token(&mut self, token: &str) -> PgResult<Option<(Session, User)>> {
        use schema::{sessions, users};

        let session = sessions::table
            .inner_join(users::table.on(users::id.eq(sessions::user_id)))
            .filter(sessions::token.eq(token))
            .select((Session::as_select(), User::as_select()))
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        tracing::trace!(
            target: TRACING_TARGET_QUERY,
            found = session.is_some(),
            "Session lookup"
        );

        Ok(session)
    }
}
