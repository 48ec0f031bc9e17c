//! Posts table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Posts table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum PostConstraints {
    #[strum(serialize = "posts_title_not_blank")]
    TitleNotBlank,

    #[strum(serialize = "posts_author_id_fkey")]
    AuthorReference,
}

impl PostConstraints {
    /// Creates a new [`PostConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            PostConstraints::TitleNotBlank => ConstraintCategory::Validation,
            PostConstraints::AuthorReference => ConstraintCategory::Reference,
        }
    }
}

impl From<PostConstraints> for String {
    #[inline]
    fn from(val: PostConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for PostConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
