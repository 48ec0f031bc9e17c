//! Comments table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Comments table constraint violations.
///
/// There is deliberately no constraint on `parent_id`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum CommentConstraints {
    #[strum(serialize = "comments_content_not_blank")]
    ContentNotBlank,

    #[strum(serialize = "comments_parent_not_self")]
    ParentNotSelf,

    #[strum(serialize = "comments_post_id_fkey")]
    PostReference,
    #[strum(serialize = "comments_author_id_fkey")]
    AuthorReference,
}

impl CommentConstraints {
    /// Creates a new [`CommentConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            CommentConstraints::ContentNotBlank => ConstraintCategory::Validation,
            CommentConstraints::ParentNotSelf => ConstraintCategory::BusinessLogic,
            CommentConstraints::PostReference | CommentConstraints::AuthorReference => {
                ConstraintCategory::Reference
            }
        }
    }
}

impl From<CommentConstraints> for String {
    #[inline]
    fn from(val: CommentConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for CommentConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
