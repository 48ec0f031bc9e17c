//! Post repository.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use super::contains_pattern;
use crate::model::{Author, NewPost, Post, UpdatePost};
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for post database operations.
///
/// Updates and deletes are scoped to the author: a post that exists but
/// belongs to someone else behaves exactly like a missing one.
pub trait PostRepository {
    /// Lists posts newest first, each with its author.
    ///
    /// A non-empty `search` keeps only posts whose title contains it,
    /// ignoring case. Wildcards in `search` match literally.
    fn list_posts(
        &mut self,
        search: Option<&str>,
    ) -> impl Future<Output = PgResult<Vec<(Post, Author)>>> + Send;

    /// Lists posts written by `author_id`, newest first.
    fn list_posts_by_author(
        &mut self,
        author_id: Uuid,
    ) -> impl Future<Output = PgResult<Vec<Post>>> + Send;

    /// Finds a post by identifier.
    fn find_post_by_id(
        &mut self,
        post_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Post>>> + Send;

    /// Finds a post by identifier together with its author.
    fn find_post_with_author(
        &mut self,
        post_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<(Post, Author)>>> + Send;

    /// Creates a new post.
    fn create_post(&mut self, new_post: NewPost) -> impl Future<Output = PgResult<Post>> + Send;

    /// Replaces title and content of a post owned by `author_id`.
    ///
    /// Returns `None` when no such post exists for that author.
    fn update_post(
        &mut self,
        post_id: Uuid,
        author_id: Uuid,
        changes: UpdatePost,
    ) -> impl Future<Output = PgResult<Option<Post>>> + Send;

    /// Deletes a post owned by `author_id`, together with its comments.
    ///
    /// Returns the deleted post, or `None` when no such post exists for
    /// that author.
    fn delete_post(
        &mut self,
        post_id: Uuid,
        author_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Post>>> + Send;
}

impl PostRepository for PgConnection {
    async fn list_posts(&mut self, search: Option<&str>) -> PgResult<Vec<(Post, Author)>> {
        use schema::{posts, users};

        let mut query = posts::table
            .inner_join(users::table.on(users::id.eq(posts::author_id)))
            .select((Post::as_select(), Author::as_select()))
            .order((posts::created_at.desc(), posts::id.desc()))
            .into_boxed();

        if let Some(term) = search
            && !term.is_empty()
        {
            query = query.filter(posts::title.ilike(contains_pattern(term)));
        }

        let posts = query.load(self).await.map_err(PgError::from)?;
        Ok(posts)
    }

    async fn list_posts_by_author(&mut self, author_id: Uuid) -> PgResult<Vec<Post>> {
        use schema::posts::{self, dsl};

        let posts = posts::table
            .filter(dsl::author_id.eq(author_id))
            .order((dsl::created_at.desc(), dsl::id.desc()))
            .select(Post::as_select())
            .load(self)
            .await
            .map_err(PgError::from)?;

        Ok(posts)
    }

    async fn find_post_by_id(&mut self, post_id: Uuid) -> PgResult<Option<Post>> {
        use schema::posts::{self, dsl};

        let post = posts::table
            .filter(dsl::id.eq(post_id))
            .select(Post::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(post)
    }

    async fn find_post_with_author(&mut self, post_id: Uuid) -> PgResult<Option<(Post, Author)>> {
        use schema::{posts, users};

        let post = posts::table
            .inner_join(users::table.on(users::id.eq(posts::author_id)))
            .filter(posts::id.eq(post_id))
            .select((Post::as_select(), Author::as_select()))
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(post)
    }

    async fn create_post(&mut self, new_post: NewPost) -> PgResult<Post> {
        use schema::posts;

        let post = diesel::insert_into(posts::table)
            .values(&new_post)
            .returning(Post::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(post)
    }

    async fn update_post(
        &mut self,
        post_id: Uuid,
        author_id: Uuid,
        changes: UpdatePost,
    ) -> PgResult<Option<Post>> {
        use schema::posts::{self, dsl};

        let post = diesel::update(
            posts::table
                .filter(dsl::id.eq(post_id))
                .filter(dsl::author_id.eq(author_id)),
        )
        .set(&changes)
        .returning(Post::as_returning())
        .get_result(self)
        .await
        .optional()
        .map_err(PgError::from)?;

        Ok(post)
    }

    async fn delete_post(&mut self, post_id: Uuid, author_id: Uuid) -> PgResult<Option<Post>> {
        use schema::posts::{self, dsl};

        let post = diesel::delete(
            posts::table
                .filter(dsl::id.eq(post_id))
                .filter(dsl::author_id.eq(author_id)),
        )
        .returning(Post::as_returning())
        .get_result(self)
        .await
        .optional()
        .map_err(PgError::from)?;

        Ok(post)
    }
}
