//! Named database constraints, grouped by table.

mod comments;
mod posts;
mod sessions;
mod users;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use self::comments::CommentConstraints;
pub use self::posts::PostConstraints;
pub use self::sessions::SessionConstraints;
pub use self::users::UserConstraints;

/// Any constraint created by the embedded migrations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ConstraintViolation {
    User(UserConstraints),
    Session(SessionConstraints),
    Post(PostConstraints),
    Comment(CommentConstraints),
}

/// Categories of constraint violations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintCategory {
    /// Data validation constraints (format, length, blank checks).
    Validation,
    /// Chronological integrity constraints (timestamp relationships).
    Chronological,
    /// Business logic constraints (domain-specific rules).
    BusinessLogic,
    /// Uniqueness constraints (unique indexes).
    Uniqueness,
    /// Foreign keys pointing at a missing row.
    Reference,
}

impl ConstraintViolation {
    /// Parses a constraint name reported by Postgres.
    ///
    /// Returns `None` for constraints this crate does not know about.
    ///
    /// ```
    /// use quill_postgres::types::{CommentConstraints, ConstraintViolation};
    ///
    /// let violation = ConstraintViolation::new("comments_content_not_blank");
    /// assert_eq!(
    ///     violation,
    ///     Some(ConstraintViolation::Comment(CommentConstraints::ContentNotBlank))
    /// );
    /// assert!(ConstraintViolation::new("unknown_constraint").is_none());
    /// ```
    pub fn new(constraint: &str) -> Option<Self> {
        let prefix = constraint.split('_').next()?;
        match prefix {
            "users" => UserConstraints::new(constraint).map(Self::User),
            "sessions" => SessionConstraints::new(constraint).map(Self::Session),
            "posts" => PostConstraints::new(constraint).map(Self::Post),
            "comments" => CommentConstraints::new(constraint).map(Self::Comment),
            _ => None,
        }
    }

    /// Returns the table the constraint belongs to.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConstraintViolation::User(_) => "users",
            ConstraintViolation::Session(_) => "sessions",
            ConstraintViolation::Post(_) => "posts",
            ConstraintViolation::Comment(_) => "comments",
        }
    }

    /// Returns the category of this constraint violation.
    pub fn constraint_category(&self) -> ConstraintCategory {
        match self {
            ConstraintViolation::User(c) => c.categorize(),
            ConstraintViolation::Session(c) => c.categorize(),
            ConstraintViolation::Post(c) => c.categorize(),
            ConstraintViolation::Comment(c) => c.categorize(),
        }
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintViolation::User(c) => write!(f, "{c}"),
            ConstraintViolation::Session(c) => write!(f, "{c}"),
            ConstraintViolation::Post(c) => write!(f, "{c}"),
            ConstraintViolation::Comment(c) => write!(f, "{c}"),
        }
    }
}

impl From<ConstraintViolation> for String {
    #[inline]
    fn from(val: ConstraintViolation) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for ConstraintViolation {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or_else(|| format!("Unknown constraint: {value}"))
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn parses_known_constraints() {
        assert_eq!(
            ConstraintViolation::new("posts_title_not_blank"),
            Some(ConstraintViolation::Post(PostConstraints::TitleNotBlank))
        );
        assert_eq!(
            ConstraintViolation::new("comments_post_id_fkey"),
            Some(ConstraintViolation::Comment(
                CommentConstraints::PostReference
            ))
        );
        assert_eq!(
            ConstraintViolation::new("users_username_unique_idx"),
            Some(ConstraintViolation::User(UserConstraints::UsernameUnique))
        );
    }

    #[test]
    fn unknown_constraints() {
        assert_eq!(ConstraintViolation::new("unknown_constraint"), None);
        assert_eq!(ConstraintViolation::new("posts_unknown"), None);
        assert_eq!(ConstraintViolation::new(""), None);
    }

    #[test]
    fn every_name_round_trips() {
        let all = UserConstraints::iter()
            .map(ConstraintViolation::User)
            .chain(SessionConstraints::iter().map(ConstraintViolation::Session))
            .chain(PostConstraints::iter().map(ConstraintViolation::Post))
            .chain(CommentConstraints::iter().map(ConstraintViolation::Comment));

        for violation in all {
            let name = violation.to_string();
            assert!(name.starts_with(violation.table_name()));
            assert_eq!(ConstraintViolation::new(&name), Some(violation));
        }
    }

    #[test]
    fn categories() {
        let violation = ConstraintViolation::Comment(CommentConstraints::ContentNotBlank);
        assert_eq!(
            violation.constraint_category(),
            ConstraintCategory::Validation
        );

        let violation = ConstraintViolation::Comment(CommentConstraints::PostReference);
        assert_eq!(
            violation.constraint_category(),
            ConstraintCategory::Reference
        );

        let violation = ConstraintViolation::User(UserConstraints::EmailUnique);
        assert_eq!(
            violation.constraint_category(),
            ConstraintCategory::Uniqueness
        );
    }
}
