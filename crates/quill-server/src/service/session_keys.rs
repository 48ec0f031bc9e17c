//! Session cookie settings and signature checks.
//!
//! The auth provider may sign its session cookie as `<token>.<signature>`,
//! where the signature is the base64 HMAC-SHA256 of the token.

use std::fmt;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
#[cfg(feature = "config")]
use clap::Args;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::{Error, Result};

type HmacSha256 = Hmac<Sha256>;

/// Default name of the session cookie written by the auth provider.
pub const DEFAULT_SESSION_COOKIE_NAME: &str = "better-auth.session_token";

/// Session cookie configuration.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct SessionKeysConfig {
    /// Name of the session cookie.
    #[cfg_attr(
        feature = "config",
        arg(
            long,
            env = "SESSION_COOKIE_NAME",
            default_value = DEFAULT_SESSION_COOKIE_NAME
        )
    )]
    #[serde(default = "SessionKeysConfig::default_cookie_name")]
    pub session_cookie_name: String,

    /// Secret the auth provider signs session cookies with.
    ///
    /// When unset, cookie values are used as tokens verbatim.
    #[cfg_attr(feature = "config", arg(long, env = "SESSION_COOKIE_SECRET"))]
    #[serde(default, skip_serializing)]
    pub session_cookie_secret: Option<String>,
}

impl SessionKeysConfig {
    fn default_cookie_name() -> String {
        DEFAULT_SESSION_COOKIE_NAME.to_owned()
    }
}

impl Default for SessionKeysConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: Self::default_cookie_name(),
            session_cookie_secret: None,
        }
    }
}

impl fmt::Debug for SessionKeysConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKeysConfig")
            .field("session_cookie_name", &self.session_cookie_name)
            .field(
                "session_cookie_secret",
                &self.session_cookie_secret.as_ref().map(|_| "***"),
            )
            .finish()
    }
}

/// Verifies session cookies.
#[derive(Clone)]
pub struct SessionKeys {
    inner: Arc<SessionKeysInner>,
}

struct SessionKeysInner {
    cookie_name: String,
    signer: Option<HmacSha256>,
}

impl SessionKeys {
    /// Creates session keys for `cookie_name`, signed with `secret` if given.
    pub fn new(cookie_name: impl Into<String>, secret: Option<&str>) -> Result<Self> {
        let cookie_name = cookie_name.into();
        Self::validate_cookie_name(&cookie_name)?;

        let signer = secret
            .map(|secret| {
                if secret.is_empty() {
                    return Err(Error::config("session cookie secret cannot be empty"));
                }

                HmacSha256::new_from_slice(secret.as_bytes()).map_err(|e| {
                    Error::config("invalid session cookie secret").with_source(e)
                })
            })
            .transpose()?;

        Ok(Self {
            inner: Arc::new(SessionKeysInner {
                cookie_name,
                signer,
            }),
        })
    }

    /// Creates session keys from configuration.
    pub fn from_config(config: &SessionKeysConfig) -> Result<Self> {
        Self::new(
            config.session_cookie_name.clone(),
            config.session_cookie_secret.as_deref(),
        )
    }

    fn validate_cookie_name(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::config("session cookie name cannot be empty"));
        }

        let is_token_char = |c: char| c.is_ascii_graphic() && !"()<>@,;:\\\"/[]?={}".contains(c);
        if !name.chars().all(is_token_char) {
            return Err(Error::config(format!(
                "session cookie name '{name}' contains invalid characters"
            )));
        }

        Ok(())
    }

    /// Returns the name of the session cookie.
    #[inline]
    pub fn cookie_name(&self) -> &str {
        &self.inner.cookie_name
    }

    /// Returns whether cookie values carry a signature.
    #[inline]
    pub fn is_signed(&self) -> bool {
        self.inner.signer.is_some()
    }

    /// Produces the cookie value the auth provider would write for `token`.
    pub fn sign(&self, token: &str) -> String {
        let Some(signer) = &self.inner.signer else {
            return token.to_owned();
        };

        let mut mac = signer.clone();
        mac.update(token.as_bytes());
        let signature = STANDARD.encode(mac.finalize().into_bytes());
        format!("{token}.{signature}")
    }

    /// Returns the token inside a cookie value, or `None` when the
    /// signature is missing or wrong.
    ///
    /// `value` must already be percent-decoded, as cookies read through
    /// `axum_extra::extract::CookieJar` are.
    pub fn verify_cookie<'a>(&self, value: &'a str) -> Option<&'a str> {
        let Some(signer) = &self.inner.signer else {
            return Some(value).filter(|token| !token.is_empty());
        };

        let (token, signature) = value.rsplit_once('.')?;
        let signature = STANDARD.decode(signature).ok()?;

        let mut mac = signer.clone();
        mac.update(token.as_bytes());
        mac.verify_slice(&signature).ok()?;

        Some(token).filter(|token| !token.is_empty())
    }
}

impl fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKeys")
            .field("cookie_name", &self.inner.cookie_name)
            .field("is_signed", &self.is_signed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsigned_cookies_pass_through() {
        let keys = SessionKeys::new("session", None).unwrap();
        assert!(!keys.is_signed());
        assert_eq!(keys.sign("abc"), "abc");
        assert_eq!(keys.verify_cookie("abc"), Some("abc"));
        assert_eq!(keys.verify_cookie(""), None);
    }

    #[test]
    fn signed_cookie_round_trip() {
        let keys = SessionKeys::new("session", Some("secret")).unwrap();
        let value = keys.sign("abc.def");

        assert!(value.starts_with("abc.def."));
        assert_eq!(keys.verify_cookie(&value), Some("abc.def"));
    }

    #[test]
    fn wrong_signatures_are_rejected() {
        let keys = SessionKeys::new("session", Some("secret")).unwrap();
        let other = SessionKeys::new("session", Some("another")).unwrap();

        assert_eq!(keys.verify_cookie(&other.sign("abc")), None);
        assert_eq!(keys.verify_cookie("abc"), None);
        assert_eq!(keys.verify_cookie("abc.!!!"), None);
    }

    #[test]
    fn invalid_configuration() {
        assert!(SessionKeys::new("", None).is_err());
        assert!(SessionKeys::new("bad name", None).is_err());
        assert!(SessionKeys::new("session", Some("")).is_err());
        assert!(SessionKeys::new(DEFAULT_SESSION_COOKIE_NAME, None).is_ok());
    }

    #[test]
    fn secret_is_not_debug_printed() {
        let config = SessionKeysConfig {
            session_cookie_secret: Some("hunter2".to_owned()),
            ..Default::default()
        };
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
