use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One logged consumption event. Rows are immutable once created; the only
/// mutation the owner may perform afterwards is deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub count: u32,
    #[serde(default)]
    pub sauces: Vec<String>,
    pub location: Option<String>,
    pub mood: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new entry. The backend assigns the id and echoes the
/// submitted fields back; `created_at` is client-supplied at submission time.
#[derive(Debug, Clone, Serialize)]
pub struct NewEntry {
    pub user_id: Uuid,
    pub count: u32,
    pub sauces: Vec<String>,
    pub location: Option<String>,
    pub mood: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
