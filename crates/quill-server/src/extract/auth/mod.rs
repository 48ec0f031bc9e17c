//! Session authentication.
//!
//! Sessions are issued by an external auth provider, which writes the
//! `sessions` rows and hands the token to the client. This module only
//! resolves a token back to a user:
//!
//! - [`SessionToken`] reads the token from `Authorization: Bearer` or from
//!   the session cookie, checking the cookie signature when a secret is set.
//! - [`AuthState`] looks the token up and rejects missing or expired
//!   sessions.

mod auth_state;
mod session_token;

pub use self::auth_state::{AuthClaims, AuthState};
pub use self::session_token::SessionToken;
