//! Sessions written by the external auth provider.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::sessions;

/// An issued session token.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Session {
    /// Unique session identifier.
    pub id: Uuid,
    /// Opaque bearer token.
    pub token: String,
    /// Owner of the session.
    pub user_id: Uuid,
    /// Instant after which the token is no longer accepted.
    pub expires_at: Timestamp,
    /// Timestamp when the session was issued.
    pub created_at: Timestamp,
}

impl Session {
    /// Returns whether the session has expired at `now`.
    pub fn is_expired_at(&self, now: jiff::Timestamp) -> bool {
        jiff::Timestamp::from(self.expires_at) <= now
    }

    /// Returns whether the session has expired.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(jiff::Timestamp::now())
    }
}

#[cfg(test)]
mod tests {
    use jiff::{Span, ToSpan};

    use super::*;

    fn session_expiring_in(span: Span) -> Session {
        let now = jiff::Timestamp::now();
        Session {
            id: Uuid::new_v4(),
            token: "token".to_owned(),
            user_id: Uuid::new_v4(),
            expires_at: now.checked_add(span).unwrap().into(),
            created_at: now.into(),
        }
    }

    #[test]
    fn future_expiry_is_valid() {
        assert!(!session_expiring_in(1.hour()).is_expired());
    }

    #[test]
    fn past_expiry_is_expired() {
        assert!(session_expiring_in((-1).hour()).is_expired());
    }

    #[test]
    fn expiry_boundary_is_exclusive() {
        let session = session_expiring_in(1.hour());
        let expires_at = jiff::Timestamp::from(session.expires_at);
        assert!(session.is_expired_at(expires_at));
    }
}
