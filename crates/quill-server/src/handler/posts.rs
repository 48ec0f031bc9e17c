//! Post handlers: listing, search, CRUD and user profiles.
//!
//! Every route requires a session. Updating and deleting a post someone
//! else wrote answers the same 404 as a post that does not exist.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use quill_postgres::model;
use quill_postgres::query::{CommentRepository, PostRepository, UserRepository};
use quill_postgres::{PgClient, PgConn};
use uuid::Uuid;

use crate::extract::{AuthState, Json, Path, Query, ValidateJson};
use crate::handler::request::{
    CreatePost, PostPathParams, SearchPosts, UpdatePost, UsernamePathParams,
};
use crate::handler::response::{
    ErrorResponse, Post, PostEnvelope, Posts, ProfileComment, User, UserProfile,
};
use crate::handler::{Error, ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for post operations.
const TRACING_TARGET: &str = "quill_server::handler::posts";

/// Lists posts, newest first, optionally filtered by title.
#[tracing::instrument(
    skip_all,
    fields(
        user_id = %auth_claims.user_id,
        search = ?query.search,
    )
)]
async fn list_posts(
    State(pg_client): State<PgClient>,
    AuthState(auth_claims): AuthState,
    Query(query): Query<SearchPosts>,
) -> Result<(StatusCode, Json<Posts>)> {
    tracing::debug!(target: TRACING_TARGET, "Listing posts");

    let mut conn = pg_client.get_connection().await?;
    let posts = conn.list_posts(query.term()).await?;
    let posts = posts.into_iter().map(Post::from_joined).collect::<Vec<_>>();

    tracing::debug!(
        target: TRACING_TARGET,
        post_count = posts.len(),
        "Posts listed",
    );

    Ok((StatusCode::OK, Json(Posts::new(posts))))
}

fn list_posts_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List posts")
        .description(
            "Returns all posts newest first, each with its author. The optional `search` \
            parameter keeps posts whose title contains it, ignoring case.",
        )
        .response::<200, Json<Posts>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
}

/// Creates a post authored by the caller.
#[tracing::instrument(skip_all, fields(user_id = %auth_claims.user_id))]
async fn create_post(
    State(pg_client): State<PgClient>,
    AuthState(auth_claims): AuthState,
    ValidateJson(request): ValidateJson<CreatePost>,
) -> Result<(StatusCode, Json<PostEnvelope>)> {
    tracing::debug!(target: TRACING_TARGET, "Creating post");

    let mut conn = pg_client.get_connection().await?;
    let post = conn
        .create_post(request.into_model(auth_claims.user_id))
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        post_id = %post.id,
        "Post created",
    );

    let response = PostEnvelope::new("Post created successfully", Post::from_model(post));
    Ok((StatusCode::CREATED, Json(response)))
}

fn create_post_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Create post")
        .description("Creates a post. The author is always the signed-in user.")
        .response::<201, Json<PostEnvelope>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
}

/// Returns a single post with its author.
#[tracing::instrument(
    skip_all,
    fields(
        user_id = %auth_claims.user_id,
        post_id = %path_params.post_id,
    )
)]
async fn read_post(
    State(pg_client): State<PgClient>,
    AuthState(auth_claims): AuthState,
    Path(path_params): Path<PostPathParams>,
) -> Result<(StatusCode, Json<PostEnvelope>)> {
    tracing::debug!(target: TRACING_TARGET, "Reading post");

    let mut conn = pg_client.get_connection().await?;
    let post = conn
        .find_post_with_author(path_params.post_id)
        .await?
        .ok_or_else(post_not_found)?;

    let response = PostEnvelope::new("Post fetched successfully", Post::from_joined(post));
    Ok((StatusCode::OK, Json(response)))
}

fn read_post_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get post")
        .description("Returns a post by ID, with its author.")
        .response::<200, Json<PostEnvelope>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Replaces the title and content of the caller's post.
#[tracing::instrument(
    skip_all,
    fields(
        user_id = %auth_claims.user_id,
        post_id = %path_params.post_id,
    )
)]
async fn update_post(
    State(pg_client): State<PgClient>,
    AuthState(auth_claims): AuthState,
    Path(path_params): Path<PostPathParams>,
    ValidateJson(request): ValidateJson<UpdatePost>,
) -> Result<(StatusCode, Json<PostEnvelope>)> {
    tracing::debug!(target: TRACING_TARGET, "Updating post");

    let mut conn = pg_client.get_connection().await?;
    let post = conn
        .update_post(path_params.post_id, auth_claims.user_id, request.into_model())
        .await?
        .ok_or_else(post_not_found)?;

    tracing::info!(target: TRACING_TARGET, "Post updated");

    let response = PostEnvelope::new("Post updated successfully", Post::from_model(post));
    Ok((StatusCode::OK, Json(response)))
}

fn update_post_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Update post")
        .description(
            "Replaces the title and content of a post. Posts written by someone else \
            are reported as not found.",
        )
        .response::<200, Json<PostEnvelope>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Deletes the caller's post together with its comments.
#[tracing::instrument(
    skip_all,
    fields(
        user_id = %auth_claims.user_id,
        post_id = %path_params.post_id,
    )
)]
async fn delete_post(
    State(pg_client): State<PgClient>,
    AuthState(auth_claims): AuthState,
    Path(path_params): Path<PostPathParams>,
) -> Result<(StatusCode, Json<PostEnvelope>)> {
    tracing::debug!(target: TRACING_TARGET, "Deleting post");

    let mut conn = pg_client.get_connection().await?;
    let post = conn
        .delete_post(path_params.post_id, auth_claims.user_id)
        .await?
        .ok_or_else(post_not_found)?;

    tracing::info!(target: TRACING_TARGET, "Post deleted");

    let response = PostEnvelope::new("Post deleted successfully", Post::from_model(post));
    Ok((StatusCode::OK, Json(response)))
}

fn delete_post_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Delete post")
        .description(
            "Deletes a post and its comments, returning the deleted post. Posts written \
            by someone else are reported as not found.",
        )
        .response::<200, Json<PostEnvelope>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Returns a user's profile with their posts and comments.
#[tracing::instrument(
    skip_all,
    fields(
        user_id = %auth_claims.user_id,
        username = %path_params.username,
    )
)]
async fn read_profile(
    State(pg_client): State<PgClient>,
    AuthState(auth_claims): AuthState,
    Path(path_params): Path<UsernamePathParams>,
) -> Result<(StatusCode, Json<UserProfile>)> {
    tracing::debug!(target: TRACING_TARGET, "Reading user profile");

    let mut conn = pg_client.get_connection().await?;
    let user = find_user(&mut conn, &path_params.username).await?;

    let posts = conn.list_posts_by_author(user.id).await?;
    let comments = conn.list_author_comments(user.id).await?;

    let response = UserProfile {
        user: User::from_model(user),
        posts: Post::from_models(posts),
        comments: comments.into_iter().map(ProfileComment::from_model).collect(),
    };

    tracing::debug!(
        target: TRACING_TARGET,
        post_count = response.posts.len(),
        comment_count = response.comments.len(),
        "User profile read",
    );

    Ok((StatusCode::OK, Json(response)))
}

fn read_profile_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get user profile")
        .description("Returns a user with their posts and comments, newest first.")
        .response::<200, Json<UserProfile>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

fn post_not_found() -> Error<'static> {
    ErrorKind::NotFound
        .with_message("Post not found")
        .with_resource("post")
}

/// Finds a user by username or returns NotFound error.
///
/// Usernames the auth provider would never accept skip the database.
async fn find_user(conn: &mut PgConn, username: &str) -> Result<model::User> {
    let user_not_found = || {
        ErrorKind::NotFound
            .with_message("User not found")
            .with_resource("user")
    };

    if !model::User::is_valid_username(username) {
        return Err(user_not_found());
    }

    conn.find_user_by_username(username)
        .await?
        .ok_or_else(user_not_found)
}

/// Finds a post by ID or returns NotFound error.
pub(crate) async fn find_post(conn: &mut PgConn, post_id: Uuid) -> Result<model::Post> {
    conn.find_post_by_id(post_id)
        .await?
        .ok_or_else(post_not_found)
}

/// Returns a [`Router`] with all post-related routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route(
            "/posts",
            get_with(list_posts, list_posts_docs).post_with(create_post, create_post_docs),
        )
        .api_route(
            "/posts/{postId}",
            get_with(read_post, read_post_docs)
                .put_with(update_post, update_post_docs)
                .delete_with(delete_post, delete_post_docs),
        )
        .api_route(
            "/posts/user/{username}",
            get_with(read_profile, read_profile_docs),
        )
        .with_path_items(|item| item.tag("Posts"))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::handler::test::create_test_server;

    #[tokio::test]
    async fn create_post_requires_session_before_validation() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server
            .post("/api/posts")
            .json(&serde_json::json!({ "title": "   " }))
            .await;

        response.assert_status_unauthorized();
        Ok(())
    }

    #[tokio::test]
    async fn post_routes_require_session() -> anyhow::Result<()> {
        let server = create_test_server()?;
        let path = "/api/posts/6a1f3c52-4d9f-4e57-9a36-2d0e1f7c8b90";

        server.get(path).await.assert_status_unauthorized();
        server.delete(path).await.assert_status_unauthorized();
        server
            .put(path)
            .json(&serde_json::json!({ "title": "Updated" }))
            .await
            .assert_status_unauthorized();

        Ok(())
    }

    #[tokio::test]
    async fn database_failures_are_internal_errors() -> anyhow::Result<()> {
        let server = create_test_server()?;

        // Nothing listens on the test database, so the lookup itself fails.
        let response = server
            .get("/api/posts")
            .authorization_bearer("no-such-session")
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&serde_json::json!({ "error": "Internal server error" }));
        Ok(())
    }
}
