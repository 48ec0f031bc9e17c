//! Comments on posts.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::comments;

/// A comment on a post, either top-level or a reply.
///
/// Comments are never edited. `parent_id` may point at a comment that no
/// longer exists.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Comment {
    /// Unique comment identifier.
    pub id: Uuid,
    /// Non-blank text.
    pub content: String,
    /// Author of the comment.
    pub author_id: Uuid,
    /// Post the comment belongs to.
    pub post_id: Uuid,
    /// Comment being replied to, `None` for top-level comments.
    pub parent_id: Option<Uuid>,
    /// Timestamp when the comment was created.
    pub created_at: Timestamp,
}

/// Data for creating a new comment.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewComment {
    pub content: String,
    pub author_id: Uuid,
    pub post_id: Uuid,
    pub parent_id: Option<Uuid>,
}

impl Comment {
    /// Returns whether this is a top-level comment.
    #[inline]
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Returns whether this comment replies to another one.
    #[inline]
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Returns whether `user_id` wrote this comment.
    #[inline]
    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.author_id == user_id
    }
}

impl NewComment {
    /// Creates a top-level comment on `post_id`.
    pub fn for_post(post_id: Uuid, author_id: Uuid, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            author_id,
            post_id,
            parent_id: None,
        }
    }

    /// Turns the comment into a reply to `parent_id`.
    pub fn with_parent(mut self, parent_id: Option<Uuid>) -> Self {
        self.parent_id = parent_id;
        self
    }
}
