//! Post request types.

use quill_postgres::model::{NewPost, UpdatePost as UpdatePostModel};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::validations::is_not_blank;

/// Request payload for creating a new post.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePost {
    /// Title of the post, must not be blank.
    #[serde(default)]
    #[validate(required, custom(function = "is_not_blank", message = "Title is required"))]
    pub title: Option<String>,
    /// Optional body.
    #[serde(default)]
    pub content: Option<String>,
}

impl CreatePost {
    /// Converts to database model. The author always comes from the session.
    pub fn into_model(self, author_id: Uuid) -> NewPost {
        NewPost::new(author_id, self.title.unwrap_or_default()).with_content(self.content)
    }
}

/// Request payload to replace the title and content of a post.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePost {
    /// New title, must not be blank.
    #[serde(default)]
    #[validate(required, custom(function = "is_not_blank", message = "Title is required"))]
    pub title: Option<String>,
    /// New body. Omitting it clears the body.
    #[serde(default)]
    pub content: Option<String>,
}

impl UpdatePost {
    /// Converts to database model.
    pub fn into_model(self) -> UpdatePostModel {
        UpdatePostModel {
            title: self.title.unwrap_or_default(),
            content: self.content,
        }
    }
}

/// Query parameters for listing posts.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchPosts {
    /// Case-insensitive substring the title must contain.
    #[serde(default)]
    pub search: Option<String>,
}

impl SearchPosts {
    /// Returns the search term, ignoring blank ones.
    pub fn term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .filter(|term| !term.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(json: serde_json::Value) -> CreatePost {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn title_is_required() {
        assert!(create(serde_json::json!({})).validate().is_err());
        assert!(create(serde_json::json!({ "title": null })).validate().is_err());
        assert!(create(serde_json::json!({ "title": "   " })).validate().is_err());
        assert!(create(serde_json::json!({ "title": "Hello" })).validate().is_ok());
    }

    #[test]
    fn missing_title_message() {
        for body in [serde_json::json!({}), serde_json::json!({ "title": " " })] {
            let errors = create(body).validate().unwrap_err();
            let error = crate::handler::Error::from(errors);
            assert_eq!(error.message(), Some("Title is required"));
        }

        let update: UpdatePost = serde_json::from_value(serde_json::json!({})).unwrap();
        let error = crate::handler::Error::from(update.validate().unwrap_err());
        assert_eq!(error.message(), Some("Title is required"));
    }

    #[test]
    fn into_model_keeps_author_and_content() {
        let author_id = Uuid::new_v4();
        let request = create(serde_json::json!({ "title": "Hello", "content": "World" }));

        let model = request.into_model(author_id);
        assert_eq!(model.author_id, author_id);
        assert_eq!(model.title, "Hello");
        assert_eq!(model.content.as_deref(), Some("World"));
    }

    #[test]
    fn blank_search_is_ignored() {
        let query = SearchPosts {
            search: Some("  ".to_owned()),
        };
        assert_eq!(query.term(), None);

        let query = SearchPosts {
            search: Some("Rust".to_owned()),
        };
        assert_eq!(query.term(), Some("Rust"));
    }
}
