use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated identity attached to a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
}

/// Transient identity + token pair. Held only by the session manager; never
/// persisted by application code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user: SessionUser,
}
