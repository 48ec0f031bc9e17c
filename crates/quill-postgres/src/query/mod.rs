//! Repositories for every table.
//!
//! Each repository is a trait implemented for [`PgConnection`], so a pooled
//! [`PgConn`] exposes all of them:
//!
//! ```ignore
//! let mut conn = pg_client.get_connection().await?;
//! let comments = conn.list_post_comments(post_id).await?;
//! ```
//!
//! [`PgConnection`]: crate::PgConnection
//! [`PgConn`]: crate::PgConn

mod comment;
mod post;
mod session;
mod user;

pub use comment::CommentRepository;
pub use post::PostRepository;
pub use session::SessionRepository;
pub use user::UserRepository;

/// Escapes `LIKE` wildcards so `term` only matches literally.
///
/// Postgres uses `\` as the default escape character.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Builds a case-insensitive substring pattern for `ILIKE`.
pub fn contains_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_terms_are_unchanged() {
        assert_eq!(escape_like("rust"), "rust");
        assert_eq!(contains_pattern("rust"), "%rust%");
    }

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("snake_case"), "snake\\_case");
        assert_eq!(escape_like("C:\\path"), "C:\\\\path");
        assert_eq!(contains_pattern("_%"), "%\\_\\%%");
    }
}
