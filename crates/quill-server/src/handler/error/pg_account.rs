//! User and session constraint violation handlers.
//!
//! Both tables are written by the auth provider, so a violation here means
//! the data is inconsistent rather than that the request was wrong.

use quill_postgres::types::{SessionConstraints, UserConstraints};

use crate::handler::{Error, ErrorKind};

impl From<UserConstraints> for Error<'static> {
    fn from(c: UserConstraints) -> Self {
        ErrorKind::InternalServerError
            .with_context(format!("users constraint violated: {c}"))
            .with_resource("user")
    }
}

impl From<SessionConstraints> for Error<'static> {
    fn from(c: SessionConstraints) -> Self {
        ErrorKind::InternalServerError
            .with_context(format!("sessions constraint violated: {c}"))
            .with_resource("session")
    }
}
