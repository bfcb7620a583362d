use serde::{Deserialize, Serialize};

/// One row of the server-ranked leaderboard view. Computed and ranked by the
/// backend; fetched verbatim, rank ascending, capped at 10 rows. Only
/// nicknames are exposed, never account ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub rank: u32,
    pub nickname: String,
    pub avatar_color: Option<String>,
    pub total_nuggets: u64,
    pub avg_per_day: f64,
    pub nuggets_last_14_days: u64,
}
