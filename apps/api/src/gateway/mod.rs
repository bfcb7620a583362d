//! Remote Data Gateway — the single seam through which all persistence and
//! identity operations pass. The rest of the system never branches on
//! whether a live backend is configured: `from_config` picks one of two
//! interchangeable implementations at startup and callers only ever see
//! `Arc<dyn Gateway>`.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::models::entry::{Entry, NewEntry};
use crate::models::leaderboard::LeaderboardRow;
use crate::models::profile::{Profile, ProfilePatch};
use crate::models::session::Session;

pub mod demo;
pub mod remote;

/// Failure of a read or write against the hosted backend. A missing profile
/// is not an error — `get_profile` returns `Ok(None)` for that.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Expected authentication failure (bad credentials and friends), returned
/// as a value rather than propagated as an unhandled error.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AuthError {
    pub message: String,
    pub status: u16,
}

impl AuthError {
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        Self {
            message: err.to_string(),
            status: 0,
        }
    }
}

/// Persistence and identity operations against the hosted backend.
///
/// Held in `AppState` as `Arc<dyn Gateway>`; the demo implementation is
/// swapped in at construction time when no credentials are configured.
/// No operation retries — retry/backoff, if ever desired, belongs to
/// callers (deliberately absent today).
#[async_trait]
pub trait Gateway: Send + Sync {
    /// True when running against the fixed demo dataset instead of a backend.
    fn offline(&self) -> bool;

    /// The session currently known to the backend, if any.
    async fn current_session(&self) -> Result<Option<Session>, GatewayError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Creates an account. The optional nickname seeds the profile the
    /// backend creates implicitly alongside the account.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        nickname: Option<&str>,
    ) -> Result<Session, AuthError>;

    async fn sign_out(&self) -> Result<(), GatewayError>;

    /// All entries belonging to `owner`, newest first.
    async fn list_entries(&self, owner: Uuid) -> Result<Vec<Entry>, GatewayError>;

    /// Inserts an entry; the backend assigns the id and echoes the row back.
    async fn create_entry(&self, entry: NewEntry) -> Result<Entry, GatewayError>;

    /// Deletes an entry. Scoped to `owner` so nobody deletes foreign rows.
    async fn delete_entry(&self, id: Uuid, owner: Uuid) -> Result<(), GatewayError>;

    /// `Ok(None)` when the profile does not exist.
    async fn get_profile(&self, owner: Uuid) -> Result<Option<Profile>, GatewayError>;

    async fn update_profile(&self, owner: Uuid, patch: ProfilePatch)
        -> Result<Profile, GatewayError>;

    /// Pre-ranked top-10 projection, rank ascending. No client-side re-sort.
    async fn list_leaderboard(&self) -> Result<Vec<LeaderboardRow>, GatewayError>;
}

/// Selects the operational mode once at startup: live when backend
/// credentials are configured, demo otherwise.
pub fn from_config(config: &Config) -> Arc<dyn Gateway> {
    match &config.backend {
        Some(backend) => {
            info!("Backend configured, using live gateway ({})", backend.url);
            Arc::new(remote::RemoteGateway::new(
                backend.url.clone(),
                backend.anon_key.clone(),
            ))
        }
        None => {
            info!("No backend credentials configured — running in demo mode");
            Arc::new(demo::DemoGateway::new())
        }
    }
}
