//! Blog posts.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::posts;

/// A blog post.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Post {
    /// Unique post identifier.
    pub id: Uuid,
    /// Non-blank title.
    pub title: String,
    /// Optional body.
    pub content: Option<String>,
    /// Whether the post is published. New posts start as drafts.
    pub published: bool,
    /// Author of the post. Never changes after creation.
    pub author_id: Uuid,
    /// Timestamp when the post was created.
    pub created_at: Timestamp,
}

/// Identifier and title of a post, attached to comments on profile pages.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PostSummary {
    pub id: Uuid,
    pub title: String,
}

/// Data for creating a new post.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewPost {
    pub title: String,
    pub content: Option<String>,
    pub author_id: Uuid,
}

/// Replacement title and content for an existing post.
///
/// `content: None` clears the body rather than leaving it untouched.
#[derive(Debug, Default, Clone, AsChangeset)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct UpdatePost {
    pub title: String,
    pub content: Option<String>,
}

impl Post {
    /// Returns whether `user_id` wrote this post.
    #[inline]
    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.author_id == user_id
    }

    /// Returns the identifier and title of this post.
    pub fn summary(&self) -> PostSummary {
        PostSummary {
            id: self.id,
            title: self.title.clone(),
        }
    }
}

impl NewPost {
    /// Creates a draft post by `author_id`.
    pub fn new(author_id: Uuid, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author_id,
            ..Default::default()
        }
    }

    /// Sets the body of the post.
    pub fn with_content(mut self, content: Option<String>) -> Self {
        self.content = content;
        self
    }
}
