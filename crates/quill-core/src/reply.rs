//! Who may reply to a comment.
//!
//! Replies are meant as a single exchange between a post's author and the
//! people commenting on that post: the author may answer anyone else's
//! comment, nobody else gets a reply affordance.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;

/// Returns whether `viewer` may reply to a comment written by
/// `comment_author` on a post written by `post_author`.
#[inline]
#[must_use]
pub fn can_reply(viewer: Uuid, post_author: Uuid, comment_author: Uuid) -> bool {
    viewer == post_author && viewer != comment_author
}

/// How strictly the API treats replies that break [`can_reply`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumString, EnumIter)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ReplyPolicy {
    /// Any authenticated user may reply to any comment on the same post.
    /// Only the affordance shown to clients follows [`can_reply`].
    #[default]
    Permissive,
    /// The API rejects replies that [`can_reply`] does not allow.
    PostAuthor,
}

impl ReplyPolicy {
    /// Returns whether a reply by `viewer` is accepted under this policy.
    #[must_use]
    pub fn permits(self, viewer: Uuid, post_author: Uuid, comment_author: Uuid) -> bool {
        match self {
            Self::Permissive => true,
            Self::PostAuthor => can_reply(viewer, post_author, comment_author),
        }
    }

    /// Returns whether this policy rejects anything at all.
    #[inline]
    pub const fn is_enforced(self) -> bool {
        matches!(self, Self::PostAuthor)
    }
}
