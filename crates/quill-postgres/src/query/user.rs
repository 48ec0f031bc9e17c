//! User lookups.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::model::User;
use crate::{PgConnection, PgError, PgResult, schema};

/// Read-only access to users. Rows are written by the auth provider.
pub trait UserRepository {
    /// Finds a user by exact username.
    fn find_user_by_username(
        &mut self,
        username: &str,
    ) -> impl Future<Output = PgResult<Option<User>>> + Send;
}

impl UserRepository for PgConnection {
    async fn find_user_by_username(&mut self, username: &str) -> PgResult<Option<User>> {
        use schema::users::{self, dsl};

        let user = users::table
            .filter(dsl::username.eq(username))
            .select(User::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(user)
    }
}
