//! Application state and dependency injection.

mod config;
mod session_keys;

use quill_core::ReplyPolicy;
use quill_postgres::PgClient;

pub use crate::service::config::{ServiceConfig, ServiceConfigBuilder};
pub use crate::service::session_keys::{
    DEFAULT_SESSION_COOKIE_NAME, SessionKeys, SessionKeysConfig,
};
pub use crate::{Error, Result};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    // External services:
    pub postgres: PgClient,

    // Internal services:
    pub session_keys: SessionKeys,
    pub reply_policy: ReplyPolicy,
}

impl ServiceState {
    /// Assembles state from already constructed parts.
    pub fn new(postgres: PgClient, session_keys: SessionKeys, reply_policy: ReplyPolicy) -> Self {
        Self {
            postgres,
            session_keys,
            reply_policy,
        }
    }

    /// Initializes application state from configuration.
    ///
    /// Connects to Postgres and applies pending migrations.
    pub async fn from_config(service_config: &ServiceConfig) -> Result<Self> {
        let service_state = Self {
            postgres: service_config.connect_postgres().await?,
            session_keys: service_config.load_session_keys()?,
            reply_policy: service_config.reply_policy,
        };

        Ok(service_state)
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

// External services:
impl_di!(postgres: PgClient);

// Internal services:
impl_di!(session_keys: SessionKeys);
impl_di!(reply_policy: ReplyPolicy);
