//! Post response types.

use std::borrow::Cow;

use jiff::Timestamp;
use quill_postgres::model;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Author;

/// Represents a blog post.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// ID of the post.
    pub id: Uuid,
    /// Title of the post.
    pub title: String,
    /// Body of the post.
    pub content: Option<String>,
    /// Whether the post is published.
    pub published: bool,
    /// ID of the user who wrote the post.
    pub author_id: Uuid,
    /// Timestamp when the post was created.
    pub created_at: Timestamp,
    /// Author details, present on reads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
}

impl Post {
    /// Creates a Post response from a database model.
    pub fn from_model(post: model::Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            published: post.published,
            author_id: post.author_id,
            created_at: post.created_at.into(),
            author: None,
        }
    }

    /// Creates a Post response from a post joined with its author.
    pub fn from_joined((post, author): (model::Post, model::Author)) -> Self {
        Self::from_model(post).with_author(author)
    }

    /// Attaches author details.
    pub fn with_author(mut self, author: model::Author) -> Self {
        self.author = Some(Author::from_model(author));
        self
    }

    /// Creates a list of Post responses from database models.
    pub fn from_models(models: Vec<model::Post>) -> Vec<Self> {
        models.into_iter().map(Self::from_model).collect()
    }
}

/// Response carrying a single post.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostEnvelope {
    pub message: Cow<'static, str>,
    pub post: Post,
}

impl PostEnvelope {
    pub fn new(message: impl Into<Cow<'static, str>>, post: Post) -> Self {
        Self {
            message: message.into(),
            post,
        }
    }
}

/// Response for listing posts.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Posts {
    /// `"Posts fetched successfully"`, or `"No posts found"` when empty.
    pub message: Cow<'static, str>,
    pub posts: Vec<Post>,
}

impl Posts {
    pub fn new(posts: Vec<Post>) -> Self {
        let message = if posts.is_empty() {
            "No posts found"
        } else {
            "Posts fetched successfully"
        };

        Self {
            message: message.into(),
            posts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> Post {
        Post {
            id: Uuid::nil(),
            title: "Hello".to_owned(),
            content: None,
            published: false,
            author_id: Uuid::nil(),
            created_at: Timestamp::UNIX_EPOCH,
            author: None,
        }
    }

    #[test]
    fn list_message_depends_on_emptiness() {
        assert_eq!(Posts::new(vec![]).message, "No posts found");
        assert_eq!(Posts::new(vec![post()]).message, "Posts fetched successfully");
    }

    #[test]
    fn camel_case_fields() {
        let json = serde_json::to_value(post()).unwrap();
        assert!(json.get("authorId").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("author").is_none());
    }
}
