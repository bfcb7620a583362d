use std::sync::Arc;

use crate::config::Config;
use crate::entries::store::EntryStore;
use crate::gateway::Gateway;
use crate::leaderboard::LeaderboardCache;
use crate::session::SessionManager;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Single seam to the hosted backend; demo stand-in when unconfigured.
    pub gateway: Arc<dyn Gateway>,
    pub sessions: Arc<SessionManager>,
    pub entries: Arc<EntryStore>,
    pub leaderboard: Arc<LeaderboardCache>,
    pub config: Config,
}
