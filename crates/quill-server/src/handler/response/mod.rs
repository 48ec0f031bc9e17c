//! Response types for HTTP handlers.

use std::borrow::Cow;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

mod comments;
mod errors;
mod monitors;
mod posts;
mod users;

pub use comments::*;
pub use errors::*;
pub use monitors::*;
pub use posts::*;
pub use users::*;

/// Body of responses that only carry a status message.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Human-readable outcome of the request.
    pub message: Cow<'static, str>,
}

impl Message {
    /// Creates a new [`Message`].
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
