//! Comment response types.

use std::borrow::Cow;

use jiff::Timestamp;
use quill_core::{Thread, Threaded};
use quill_postgres::model;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Author;

/// Represents a comment on a post.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// ID of the comment.
    pub id: Uuid,
    /// Comment text.
    pub content: String,
    /// ID of the user who wrote the comment.
    pub author_id: Uuid,
    /// ID of the post this comment belongs to.
    pub post_id: Uuid,
    /// Comment this one replies to, `null` for top-level comments.
    pub parent_id: Option<Uuid>,
    /// Timestamp when the comment was created.
    pub created_at: Timestamp,
    /// Author details, present on reads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
}

impl Comment {
    /// Creates a Comment response from a database model.
    pub fn from_model(comment: model::Comment) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
            author_id: comment.author_id,
            post_id: comment.post_id,
            parent_id: comment.parent_id,
            created_at: comment.created_at.into(),
            author: None,
        }
    }

    /// Creates a Comment response from a comment joined with its author.
    pub fn from_joined((comment, author): (model::Comment, model::Author)) -> Self {
        Self::from_model(comment).with_author(author)
    }

    /// Attaches author details.
    pub fn with_author(mut self, author: model::Author) -> Self {
        self.author = Some(Author::from_model(author));
        self
    }
}

impl Threaded for Comment {
    #[inline]
    fn thread_id(&self) -> Uuid {
        self.id
    }

    #[inline]
    fn parent_id(&self) -> Option<Uuid> {
        self.parent_id
    }
}

/// Response carrying a newly created comment.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentEnvelope {
    pub message: Cow<'static, str>,
    pub comment: Comment,
}

impl CommentEnvelope {
    pub fn new(message: impl Into<Cow<'static, str>>, comment: Comment) -> Self {
        Self {
            message: message.into(),
            comment,
        }
    }
}

/// Response for listing the comments of a post.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comments {
    /// `"Comments fetched successfully"`, or `"No comments found"` when empty.
    pub message: Cow<'static, str>,
    pub comments: Vec<Comment>,
}

impl Comments {
    pub fn new(comments: Vec<Comment>) -> Self {
        let message = if comments.is_empty() {
            "No comments found"
        } else {
            "Comments fetched successfully"
        };

        Self {
            message: message.into(),
            comments,
        }
    }
}

/// A comment annotated with whether the viewer may reply to it.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentNode {
    #[serde(flatten)]
    pub comment: Comment,
    /// Whether the viewer is offered a reply action on this comment.
    pub can_reply: bool,
}

/// A top-level comment with its direct replies, oldest reply last.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentThread {
    #[serde(flatten)]
    pub root: CommentNode,
    pub replies: Vec<CommentNode>,
}

impl CommentThread {
    /// Annotates every comment of `thread` with `can_reply(comment)`.
    pub fn from_thread(
        thread: Thread<Comment>,
        mut can_reply: impl FnMut(&Comment) -> bool,
    ) -> Self {
        let thread = thread.map(|comment| CommentNode {
            can_reply: can_reply(&comment),
            comment,
        });

        Self {
            root: thread.root,
            replies: thread.replies,
        }
    }
}

/// Response for the reconstructed threads of a post.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreads {
    pub message: Cow<'static, str>,
    pub threads: Vec<CommentThread>,
}

impl CommentThreads {
    pub fn new(threads: Vec<CommentThread>) -> Self {
        let message = if threads.is_empty() {
            "No comments found"
        } else {
            "Comments fetched successfully"
        };

        Self {
            message: message.into(),
            threads,
        }
    }
}
