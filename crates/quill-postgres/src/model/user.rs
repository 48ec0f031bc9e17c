//! Users written by the external auth provider.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::users;

/// Minimum username length accepted by the auth provider.
pub const USERNAME_MIN_LENGTH: usize = 3;

/// Maximum username length accepted by the auth provider.
pub const USERNAME_MAX_LENGTH: usize = 14;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display name.
    pub name: Option<String>,
    /// Public handle used in profile URLs.
    pub username: Option<String>,
    /// Email address, never exposed by the API.
    pub email: String,
    /// Timestamp when the user registered.
    pub created_at: Timestamp,
}

/// Public identity shown next to posts and comments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Author {
    pub name: Option<String>,
    pub username: Option<String>,
}

impl User {
    /// Returns the public part of this user.
    pub fn author(&self) -> Author {
        Author {
            name: self.name.clone(),
            username: self.username.clone(),
        }
    }

    /// Returns whether `username` could belong to any user.
    ///
    /// Mirrors the `users_username_format` check constraint: 3 to 14 ASCII
    /// letters or digits.
    pub fn is_valid_username(username: &str) -> bool {
        (USERNAME_MIN_LENGTH..=USERNAME_MAX_LENGTH).contains(&username.len())
            && username.bytes().all(|b| b.is_ascii_alphanumeric())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rules() {
        assert!(User::is_valid_username("ada"));
        assert!(User::is_valid_username("Lovelace1815"));
        assert!(User::is_valid_username("abcdefghijklmn"));

        assert!(!User::is_valid_username("ab"));
        assert!(!User::is_valid_username("abcdefghijklmno"));
        assert!(!User::is_valid_username("ada_l"));
        assert!(!User::is_valid_username("ädä"));
        assert!(!User::is_valid_username(""));
    }
}
