//! Comment handlers: listing, creation, deletion and threads.
//!
//! Comments nest one level deep for display. A reply must point at a
//! comment on the same post; whether the API also enforces who may reply is
//! decided by the configured [`ReplyPolicy`].

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use quill_core::{ReplyPolicy, can_reply, reconstruct};
use quill_postgres::PgClient;
use quill_postgres::query::CommentRepository;
use validator::Validate;

use super::posts::find_post;
use crate::extract::{AuthState, Json, Path};
use crate::handler::request::{CommentPathParams, CreateComment, PostPathParams};
use crate::handler::response::{
    Comment, CommentEnvelope, CommentThread, CommentThreads, Comments, ErrorResponse, Message,
};
use crate::handler::{Error, ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for comment operations.
const TRACING_TARGET: &str = "quill_server::handler::comments";

/// Lists the comments of a post, newest first.
#[tracing::instrument(
    skip_all,
    fields(
        user_id = %auth_claims.user_id,
        post_id = %path_params.post_id,
    )
)]
async fn list_comments(
    State(pg_client): State<PgClient>,
    AuthState(auth_claims): AuthState,
    Path(path_params): Path<PostPathParams>,
) -> Result<(StatusCode, Json<Comments>)> {
    tracing::debug!(target: TRACING_TARGET, "Listing comments");

    let mut conn = pg_client.get_connection().await?;
    let comments = conn.list_post_comments(path_params.post_id).await?;
    let comments = comments
        .into_iter()
        .map(Comment::from_joined)
        .collect::<Vec<_>>();

    tracing::debug!(
        target: TRACING_TARGET,
        comment_count = comments.len(),
        "Comments listed",
    );

    Ok((StatusCode::OK, Json(Comments::new(comments))))
}

fn list_comments_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List comments")
        .description("Returns the comments of a post newest first, each with its author.")
        .response::<200, Json<Comments>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
}

/// Creates a comment, or a reply when `parentId` is set.
#[tracing::instrument(
    skip_all,
    fields(
        user_id = %auth_claims.user_id,
        post_id = %path_params.post_id,
    )
)]
async fn create_comment(
    State(pg_client): State<PgClient>,
    State(reply_policy): State<ReplyPolicy>,
    AuthState(auth_claims): AuthState,
    Path(path_params): Path<PostPathParams>,
    body: Result<Json<CreateComment>>,
) -> Result<(StatusCode, Json<CommentEnvelope>)> {
    tracing::debug!(target: TRACING_TARGET, "Creating comment");

    let mut conn = pg_client.get_connection().await?;

    // A missing post wins over anything wrong with the body.
    let post = find_post(&mut conn, path_params.post_id).await?;
    let request = match body {
        Ok(Json(request)) => request,
        Err(error) if error.kind() == ErrorKind::PayloadTooLarge => return Err(error),
        Err(error) => {
            tracing::debug!(
                target: TRACING_TARGET,
                context = ?error.context(),
                "Comment body could not be read",
            );
            return Err(content_required());
        }
    };
    request.validate()?;

    if let Some(parent_id) = request.parent_id {
        let parent = conn
            .find_post_comment(post.id, parent_id)
            .await?
            .ok_or_else(|| {
                ErrorKind::BadRequest
                    .with_message("Parent comment not found on this post")
                    .with_resource("comment")
            })?;

        if !reply_policy.permits(auth_claims.user_id, post.author_id, parent.author_id) {
            tracing::warn!(
                target: TRACING_TARGET,
                parent_id = %parent.id,
                reply_policy = %reply_policy,
                "Reply rejected by reply policy",
            );

            return Err(ErrorKind::BadRequest
                .with_message("You cannot reply to this comment")
                .with_resource("comment"));
        }
    }

    let comment = conn
        .create_comment(request.into_model(post.id, auth_claims.user_id))
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        comment_id = %comment.id,
        parent_id = ?comment.parent_id,
        "Comment created",
    );

    let comment = Comment::from_model(comment).with_author(auth_claims.author());
    let response = CommentEnvelope::new("Comment created successfully", comment);
    Ok((StatusCode::CREATED, Json(response)))
}

fn content_required() -> Error<'static> {
    ErrorKind::BadRequest
        .with_message("Content is required")
        .with_resource("comment")
}

fn create_comment_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Create comment")
        .description(
            "Creates a comment on a post. With `parentId` the comment is a reply to \
            another comment on the same post.",
        )
        .response::<201, Json<CommentEnvelope>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Deletes one of the caller's comments. Replies are kept.
#[tracing::instrument(
    skip_all,
    fields(
        user_id = %auth_claims.user_id,
        comment_id = %path_params.comment_id,
    )
)]
async fn delete_comment(
    State(pg_client): State<PgClient>,
    AuthState(auth_claims): AuthState,
    Path(path_params): Path<CommentPathParams>,
) -> Result<(StatusCode, Json<Message>)> {
    tracing::debug!(target: TRACING_TARGET, "Deleting comment");

    let mut conn = pg_client.get_connection().await?;
    conn.delete_comment(path_params.comment_id, auth_claims.user_id)
        .await?
        .ok_or_else(|| {
            ErrorKind::NotFound
                .with_message("Comment not found")
                .with_resource("comment")
        })?;

    tracing::info!(target: TRACING_TARGET, "Comment deleted");

    Ok((
        StatusCode::OK,
        Json(Message::new("Comment deleted successfully")),
    ))
}

fn delete_comment_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Delete comment")
        .description(
            "Deletes a comment. Comments written by someone else are reported as not \
            found. Replies to the comment are left in place.",
        )
        .response::<200, Json<Message>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Returns the comments of a post as two-level threads.
#[tracing::instrument(
    skip_all,
    fields(
        user_id = %auth_claims.user_id,
        post_id = %path_params.post_id,
    )
)]
async fn read_thread(
    State(pg_client): State<PgClient>,
    AuthState(auth_claims): AuthState,
    Path(path_params): Path<PostPathParams>,
) -> Result<(StatusCode, Json<CommentThreads>)> {
    tracing::debug!(target: TRACING_TARGET, "Reading comment threads");

    let mut conn = pg_client.get_connection().await?;
    let post = find_post(&mut conn, path_params.post_id).await?;

    let comments = conn.list_post_comments(post.id).await?;
    let comment_count = comments.len();

    let viewer = auth_claims.user_id;
    let threads = reconstruct(comments.into_iter().map(Comment::from_joined))
        .into_iter()
        .map(|thread| {
            CommentThread::from_thread(thread, |comment| {
                can_reply(viewer, post.author_id, comment.author_id)
            })
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        target: TRACING_TARGET,
        comment_count,
        thread_count = threads.len(),
        "Comment threads read",
    );

    Ok((StatusCode::OK, Json(CommentThreads::new(threads))))
}

fn read_thread_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get comment threads")
        .description(
            "Returns the top-level comments of a post newest first, each with its direct \
            replies. Every comment carries `canReply` for the signed-in user. Replies \
            whose parent is gone are left out.",
        )
        .response::<200, Json<CommentThreads>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Returns a [`Router`] with all comment-related routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route(
            "/comments/post/{postId}",
            get_with(list_comments, list_comments_docs)
                .post_with(create_comment, create_comment_docs),
        )
        .api_route(
            "/comments/post/{postId}/thread",
            get_with(read_thread, read_thread_docs),
        )
        .api_route(
            "/comments/{commentId}",
            delete_with(delete_comment, delete_comment_docs),
        )
        .with_path_items(|item| item.tag("Comments"))
}

#[cfg(test)]
mod tests {
    use crate::handler::test::create_test_server;

    const POST_PATH: &str = "/api/comments/post/6a1f3c52-4d9f-4e57-9a36-2d0e1f7c8b90";

    #[tokio::test]
    async fn comment_routes_require_session() -> anyhow::Result<()> {
        let server = create_test_server()?;

        server.get(POST_PATH).await.assert_status_unauthorized();
        server
            .get(&format!("{POST_PATH}/thread"))
            .await
            .assert_status_unauthorized();
        server
            .post(POST_PATH)
            .json(&serde_json::json!({ "content": "Nice post" }))
            .await
            .assert_status_unauthorized();
        server
            .delete("/api/comments/6a1f3c52-4d9f-4e57-9a36-2d0e1f7c8b90")
            .await
            .assert_status_unauthorized();

        Ok(())
    }

    #[tokio::test]
    async fn invalid_cookie_signature_is_unauthorized() -> anyhow::Result<()> {
        use axum::http::{HeaderValue, header};

        use crate::handler::test::create_test_server_with_state;
        use crate::handler::{CustomRoutes, routes};
        use crate::service::SessionKeys;

        let mut state = crate::handler::test::create_test_state()?;
        state.session_keys = SessionKeys::new("session", Some("secret"))?;
        let server = create_test_server_with_state(routes(CustomRoutes::new()), state)?;

        let response = server
            .get(POST_PATH)
            .add_header(header::COOKIE, HeaderValue::from_static("session=token.c2lnbmF0dXJl"))
            .await;

        response.assert_status_unauthorized();
        response.assert_json(&serde_json::json!({ "error": "Unauthorized" }));
        Ok(())
    }

    /// Tests against a real database; run with `POSTGRES_URL` set and `--ignored`.
    mod stored {
        use axum::http::StatusCode;
        use axum_test::TestServer;
        use quill_core::ReplyPolicy;
        use serde_json::json;
        use uuid::Uuid;

        use crate::handler::response::{CommentEnvelope, CommentThreads, Comments, PostEnvelope};
        use crate::handler::test::TestDatabase;

        async fn create_post(server: &TestServer, token: &str) -> Uuid {
            let response = server
                .post("/api/posts")
                .authorization_bearer(token)
                .json(&json!({ "title": "Threads" }))
                .await;
            response.assert_status(StatusCode::CREATED);
            response.json::<PostEnvelope>().post.id
        }

        async fn create_comment(
            server: &TestServer,
            token: &str,
            post_id: Uuid,
            parent_id: Option<Uuid>,
        ) -> Uuid {
            let response = server
                .post(&format!("/api/comments/post/{post_id}"))
                .authorization_bearer(token)
                .json(&json!({ "content": "Nice post", "parentId": parent_id }))
                .await;
            response.assert_status(StatusCode::CREATED);
            response.json::<CommentEnvelope>().comment.id
        }

        #[tokio::test]
        #[ignore = "requires POSTGRES_URL"]
        async fn missing_post_wins_over_invalid_body() -> anyhow::Result<()> {
            let db = TestDatabase::connect(ReplyPolicy::default()).await?;
            let server = db.server()?;
            let (_, token) = db.create_user().await?;

            let path = format!("/api/comments/post/{}", Uuid::new_v4());
            for request in [
                server.post(&path).authorization_bearer(&token),
                server.post(&path).authorization_bearer(&token).text("not json"),
                server
                    .post(&path)
                    .authorization_bearer(&token)
                    .json(&json!({ "content": 42 })),
                server.post(&path).authorization_bearer(&token).json(&json!({})),
            ] {
                let response = request.await;
                response.assert_status_not_found();
                response.assert_json(&json!({ "error": "Post not found" }));
            }

            let post_id = create_post(&server, &token).await;
            let path = format!("/api/comments/post/{post_id}");
            for request in [
                server.post(&path).authorization_bearer(&token),
                server.post(&path).authorization_bearer(&token).json(&json!({})),
                server
                    .post(&path)
                    .authorization_bearer(&token)
                    .json(&json!({ "content": " \n " })),
            ] {
                let response = request.await;
                response.assert_status(StatusCode::BAD_REQUEST);
                response.assert_json(&json!({ "error": "Content is required" }));
            }

            Ok(())
        }

        #[tokio::test]
        #[ignore = "requires POSTGRES_URL"]
        async fn parent_must_be_on_the_same_post() -> anyhow::Result<()> {
            let db = TestDatabase::connect(ReplyPolicy::default()).await?;
            let server = db.server()?;
            let (_, token) = db.create_user().await?;

            let first_post = create_post(&server, &token).await;
            let second_post = create_post(&server, &token).await;
            let parent_id = create_comment(&server, &token, first_post, None).await;

            for parent_id in [parent_id, Uuid::new_v4()] {
                let response = server
                    .post(&format!("/api/comments/post/{second_post}"))
                    .authorization_bearer(&token)
                    .json(&json!({ "content": "Reply", "parentId": parent_id }))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                response.assert_json(&json!({ "error": "Parent comment not found on this post" }));
            }

            create_comment(&server, &token, first_post, Some(parent_id)).await;
            Ok(())
        }

        #[tokio::test]
        #[ignore = "requires POSTGRES_URL"]
        async fn post_author_policy_limits_replies() -> anyhow::Result<()> {
            let db = TestDatabase::connect(ReplyPolicy::PostAuthor).await?;
            let server = db.server()?;
            let (_, author) = db.create_user().await?;
            let (_, commenter) = db.create_user().await?;

            let post_id = create_post(&server, &author).await;
            let theirs = create_comment(&server, &commenter, post_id, None).await;
            let own = create_comment(&server, &author, post_id, None).await;

            for (token, parent_id) in [(&commenter, theirs), (&author, own)] {
                let response = server
                    .post(&format!("/api/comments/post/{post_id}"))
                    .authorization_bearer(token)
                    .json(&json!({ "content": "Reply", "parentId": parent_id }))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                response.assert_json(&json!({ "error": "You cannot reply to this comment" }));
            }

            create_comment(&server, &author, post_id, Some(theirs)).await;
            Ok(())
        }

        #[tokio::test]
        #[ignore = "requires POSTGRES_URL"]
        async fn foreign_comments_look_missing() -> anyhow::Result<()> {
            let db = TestDatabase::connect(ReplyPolicy::default()).await?;
            let server = db.server()?;
            let (_, author) = db.create_user().await?;
            let (_, commenter) = db.create_user().await?;

            let post_id = create_post(&server, &author).await;
            let comment_id = create_comment(&server, &commenter, post_id, None).await;

            let foreign = server
                .delete(&format!("/api/comments/{comment_id}"))
                .authorization_bearer(&author)
                .await;
            let missing = server
                .delete(&format!("/api/comments/{}", Uuid::new_v4()))
                .authorization_bearer(&author)
                .await;

            foreign.assert_status_not_found();
            missing.assert_status_not_found();
            assert_eq!(foreign.as_bytes(), missing.as_bytes());
            foreign.assert_json(&json!({ "error": "Comment not found" }));

            let response = server
                .delete(&format!("/api/comments/{comment_id}"))
                .authorization_bearer(&commenter)
                .await;
            response.assert_status_ok();
            response.assert_json(&json!({ "message": "Comment deleted successfully" }));

            Ok(())
        }

        #[tokio::test]
        #[ignore = "requires POSTGRES_URL"]
        async fn deleting_a_comment_keeps_its_replies() -> anyhow::Result<()> {
            let db = TestDatabase::connect(ReplyPolicy::default()).await?;
            let server = db.server()?;
            let (_, author) = db.create_user().await?;
            let (_, commenter) = db.create_user().await?;

            let post_id = create_post(&server, &author).await;
            let parent_id = create_comment(&server, &commenter, post_id, None).await;
            let reply_id = create_comment(&server, &author, post_id, Some(parent_id)).await;

            let threads = server
                .get(&format!("/api/comments/post/{post_id}/thread"))
                .authorization_bearer(&author)
                .await
                .json::<CommentThreads>();
            assert_eq!(threads.threads.len(), 1);
            assert!(threads.threads[0].root.can_reply);
            assert_eq!(threads.threads[0].replies[0].comment.id, reply_id);

            server
                .delete(&format!("/api/comments/{parent_id}"))
                .authorization_bearer(&commenter)
                .await
                .assert_status_ok();

            let comments = server
                .get(&format!("/api/comments/post/{post_id}"))
                .authorization_bearer(&author)
                .await
                .json::<Comments>();
            assert_eq!(comments.comments.len(), 1);
            assert_eq!(comments.comments[0].id, reply_id);
            assert_eq!(comments.comments[0].parent_id, Some(parent_id));

            let threads = server
                .get(&format!("/api/comments/post/{post_id}/thread"))
                .authorization_bearer(&author)
                .await
                .json::<CommentThreads>();
            assert!(threads.threads.is_empty());

            Ok(())
        }
    }
}
