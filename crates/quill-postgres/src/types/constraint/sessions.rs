//! Sessions table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Sessions table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum SessionConstraints {
    #[strum(serialize = "sessions_token_unique_idx")]
    TokenUnique,

    #[strum(serialize = "sessions_user_id_fkey")]
    UserReference,

    #[strum(serialize = "sessions_expires_after_created")]
    ExpiresAfterCreated,
}

impl SessionConstraints {
    /// Creates a new [`SessionConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            SessionConstraints::TokenUnique => ConstraintCategory::Uniqueness,
            SessionConstraints::UserReference => ConstraintCategory::Reference,
            SessionConstraints::ExpiresAfterCreated => ConstraintCategory::Chronological,
        }
    }
}

impl From<SessionConstraints> for String {
    #[inline]
    fn from(val: SessionConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for SessionConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
