//! Row types for every table, plus the insert and update payloads.

mod comment;
mod post;
mod session;
mod user;

pub use comment::{Comment, NewComment};
pub use post::{NewPost, Post, PostSummary, UpdatePost};
pub use session::Session;
pub use user::{Author, User};
