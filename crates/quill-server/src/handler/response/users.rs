//! User response types.

use jiff::Timestamp;
use quill_postgres::model;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Comment, Post};

/// Public identity shown next to posts and comments.
#[must_use]
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Display name.
    pub name: Option<String>,
    /// Public handle.
    pub username: Option<String>,
}

impl Author {
    pub fn from_model(author: model::Author) -> Self {
        Self {
            name: author.name,
            username: author.username,
        }
    }
}

/// A user as shown on their profile. The email address is never exposed.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// ID of the user.
    pub id: Uuid,
    /// Display name.
    pub name: Option<String>,
    /// Public handle.
    pub username: Option<String>,
    /// Timestamp when the user registered.
    pub created_at: Timestamp,
}

impl User {
    pub fn from_model(user: model::User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
            created_at: user.created_at.into(),
        }
    }
}

/// Identifier and title of the post a profile comment was left on.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostRef {
    pub id: Uuid,
    pub title: String,
}

/// A comment listed on its author's profile.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileComment {
    #[serde(flatten)]
    pub comment: Comment,
    /// Post the comment was left on.
    pub post: PostRef,
}

impl ProfileComment {
    pub fn from_model(
        (comment, author, post): (model::Comment, model::Author, model::PostSummary),
    ) -> Self {
        Self {
            comment: Comment::from_model(comment).with_author(author),
            post: PostRef {
                id: post.id,
                title: post.title,
            },
        }
    }
}

/// Profile page: the user, their posts and their comments, newest first.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user: User,
    pub posts: Vec<Post>,
    pub comments: Vec<ProfileComment>,
}
