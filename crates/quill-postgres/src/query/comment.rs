//! Comment repository.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{Author, Comment, NewComment, PostSummary};
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for comment database operations.
///
/// Comments are inserted and hard-deleted, never updated. Deleting a
/// comment leaves its replies untouched.
pub trait CommentRepository {
    /// Lists every comment on a post, newest first, each with its author.
    fn list_post_comments(
        &mut self,
        post_id: Uuid,
    ) -> impl Future<Output = PgResult<Vec<(Comment, Author)>>> + Send;

    /// Lists comments written by `author_id` across all posts, newest first.
    fn list_author_comments(
        &mut self,
        author_id: Uuid,
    ) -> impl Future<Output = PgResult<Vec<(Comment, Author, PostSummary)>>> + Send;

    /// Finds a comment by identifier, but only if it belongs to `post_id`.
    fn find_post_comment(
        &mut self,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Comment>>> + Send;

    /// Creates a new comment.
    fn create_comment(
        &mut self,
        new_comment: NewComment,
    ) -> impl Future<Output = PgResult<Comment>> + Send;

    /// Deletes a comment written by `author_id`.
    ///
    /// Returns the deleted comment, or `None` when no such comment exists
    /// for that author.
    fn delete_comment(
        &mut self,
        comment_id: Uuid,
        author_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Comment>>> + Send;
}

impl CommentRepository for PgConnection {
    async fn list_post_comments(&mut self, post_id: Uuid) -> PgResult<Vec<(Comment, Author)>> {
        use schema::{comments, users};

        let comments = comments::table
            .inner_join(users::table.on(users::id.eq(comments::author_id)))
            .filter(comments::post_id.eq(post_id))
            .order((comments::created_at.desc(), comments::id.desc()))
            .select((Comment::as_select(), Author::as_select()))
            .load(self)
            .await
            .map_err(PgError::from)?;

        Ok(comments)
    }

    async fn list_author_comments(
        &mut self,
        author_id: Uuid,
    ) -> PgResult<Vec<(Comment, Author, PostSummary)>> {
        use schema::{comments, posts, users};

        let comments = comments::table
            .inner_join(users::table.on(users::id.eq(comments::author_id)))
            .inner_join(posts::table.on(posts::id.eq(comments::post_id)))
            .filter(comments::author_id.eq(author_id))
            .order((comments::created_at.desc(), comments::id.desc()))
            .select((
                Comment::as_select(),
                Author::as_select(),
                PostSummary::as_select(),
            ))
            .load(self)
            .await
            .map_err(PgError::from)?;

        Ok(comments)
    }

    async fn find_post_comment(
        &mut self,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> PgResult<Option<Comment>> {
        use schema::comments::{self, dsl};

        let comment = comments::table
            .filter(dsl::id.eq(comment_id))
            .filter(dsl::post_id.eq(post_id))
            .select(Comment::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(comment)
    }

    async fn create_comment(&mut self, new_comment: NewComment) -> PgResult<Comment> {
        use schema::comments;

        let comment = diesel::insert_into(comments::table)
            .values(&new_comment)
            .returning(Comment::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(comment)
    }

    async fn delete_comment(
        &mut self,
        comment_id: Uuid,
        author_id: Uuid,
    ) -> PgResult<Option<Comment>> {
        use schema::comments::{self, dsl};

        let comment = diesel::delete(
            comments::table
                .filter(dsl::id.eq(comment_id))
                .filter(dsl::author_id.eq(author_id)),
        )
        .returning(Comment::as_returning())
        .get_result(self)
        .await
        .optional()
        .map_err(PgError::from)?;

        Ok(comment)
    }
}
