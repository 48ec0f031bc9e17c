//! Comment request types.

use quill_postgres::model::NewComment;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::validations::is_not_blank;

/// Request payload for creating a new comment.
///
/// Validated by the handler after the post is known to exist.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateComment {
    /// Comment text, must not be blank.
    #[serde(default)]
    #[validate(required, custom(function = "is_not_blank", message = "Content is required"))]
    pub content: Option<String>,
    /// Comment being replied to. Must belong to the same post.
    #[serde(default)]
    pub parent_id: Option<Uuid>,
}

impl CreateComment {
    /// Converts to database model. The author always comes from the session.
    pub fn into_model(self, post_id: Uuid, author_id: Uuid) -> NewComment {
        NewComment::for_post(post_id, author_id, self.content.unwrap_or_default())
            .with_parent(self.parent_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_is_required() {
        let request: CreateComment = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(request.validate().is_err());

        let request: CreateComment =
            serde_json::from_value(serde_json::json!({ "content": "\t " })).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn missing_content_message() {
        for body in [serde_json::json!({}), serde_json::json!({ "content": "" })] {
            let request: CreateComment = serde_json::from_value(body).unwrap();
            let error = crate::handler::Error::from(request.validate().unwrap_err());
            assert_eq!(error.message(), Some("Content is required"));
        }
    }

    #[test]
    fn reply_keeps_parent() {
        let parent_id = Uuid::new_v4();
        let request: CreateComment = serde_json::from_value(serde_json::json!({
            "content": "thanks!",
            "parentId": parent_id,
        }))
        .unwrap();
        assert!(request.validate().is_ok());

        let post_id = Uuid::new_v4();
        let author_id = Uuid::new_v4();
        let model = request.into_model(post_id, author_id);
        assert_eq!(model.post_id, post_id);
        assert_eq!(model.author_id, author_id);
        assert_eq!(model.parent_id, Some(parent_id));
        assert_eq!(model.content, "thanks!");
    }
}
