//! Request types for HTTP handlers.

mod comments;
mod paths;
mod posts;
mod validations;

pub use comments::*;
pub use paths::*;
pub use posts::*;
