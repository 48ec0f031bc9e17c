//! Post and comment constraint violation handlers.

use quill_postgres::types::{CommentConstraints, PostConstraints};

use crate::handler::{Error, ErrorKind};

impl From<PostConstraints> for Error<'static> {
    fn from(c: PostConstraints) -> Self {
        let error = match c {
            PostConstraints::TitleNotBlank => {
                ErrorKind::BadRequest.with_message("Title is required")
            }
            PostConstraints::AuthorReference => ErrorKind::InternalServerError.into_error(),
        };

        error.with_resource("post")
    }
}

impl From<CommentConstraints> for Error<'static> {
    fn from(c: CommentConstraints) -> Self {
        let error = match c {
            CommentConstraints::ContentNotBlank => {
                ErrorKind::BadRequest.with_message("Content is required")
            }
            CommentConstraints::ParentNotSelf => {
                ErrorKind::BadRequest.with_message("Parent comment not found on this post")
            }
            // The post was deleted between the existence check and the insert.
            CommentConstraints::PostReference => {
                ErrorKind::NotFound.with_message("Post not found")
            }
            CommentConstraints::AuthorReference => ErrorKind::InternalServerError.into_error(),
        };

        error.with_resource("comment")
    }
}
