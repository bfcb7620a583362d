//! Anonymized cross-user leaderboard. The ranking is computed and capped
//! server-side; this module only fetches it and keeps a short-lived slot so
//! repeated reads within the staleness tolerance skip the backend.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};

use crate::errors::AppError;
use crate::gateway::{Gateway, GatewayError};
use crate::models::leaderboard::LeaderboardRow;
use crate::state::AppState;

/// Callers tolerate roughly a minute of staleness.
const STALE_AFTER_SECS: i64 = 60;

struct Slot {
    rows: Vec<LeaderboardRow>,
    fetched_at: DateTime<Utc>,
}

pub struct LeaderboardCache {
    gateway: Arc<dyn Gateway>,
    slot: Mutex<Option<Slot>>,
}

impl LeaderboardCache {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            gateway,
            slot: Mutex::new(None),
        }
    }

    pub async fn rows(&self) -> Result<Vec<LeaderboardRow>, GatewayError> {
        if let Some(rows) = self.fresh_rows() {
            return Ok(rows);
        }

        let rows = self.gateway.list_leaderboard().await?;
        *self.lock_slot() = Some(Slot {
            rows: rows.clone(),
            fetched_at: Utc::now(),
        });
        Ok(rows)
    }

    fn fresh_rows(&self) -> Option<Vec<LeaderboardRow>> {
        let slot = self.lock_slot();
        let slot = slot.as_ref()?;
        let age = Utc::now() - slot.fetched_at;
        (age.num_seconds() < STALE_AFTER_SECS).then(|| slot.rows.clone())
    }

    fn lock_slot(&self) -> std::sync::MutexGuard<'_, Option<Slot>> {
        match self.slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// GET /api/v1/leaderboard — readable without a session.
pub async fn handle_leaderboard(
    State(state): State<AppState>,
) -> Result<Json<Vec<LeaderboardRow>>, AppError> {
    let rows = state.leaderboard.rows().await?;
    Ok(Json(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{AuthError, Gateway};
    use crate::models::entry::{Entry, NewEntry};
    use crate::models::profile::{Profile, ProfilePatch};
    use crate::models::session::Session;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    #[derive(Default)]
    struct CountingGateway {
        fetches: AtomicUsize,
    }

    #[async_trait]
    impl Gateway for CountingGateway {
        fn offline(&self) -> bool {
            true
        }

        async fn current_session(&self) -> Result<Option<Session>, GatewayError> {
            Ok(None)
        }

        async fn sign_in(&self, _: &str, _: &str) -> Result<Session, AuthError> {
            unimplemented!("not exercised by leaderboard tests")
        }

        async fn sign_up(&self, _: &str, _: &str, _: Option<&str>) -> Result<Session, AuthError> {
            unimplemented!("not exercised by leaderboard tests")
        }

        async fn sign_out(&self) -> Result<(), GatewayError> {
            Ok(())
        }

        async fn list_entries(&self, _: Uuid) -> Result<Vec<Entry>, GatewayError> {
            Ok(vec![])
        }

        async fn create_entry(&self, _: NewEntry) -> Result<Entry, GatewayError> {
            unimplemented!("not exercised by leaderboard tests")
        }

        async fn delete_entry(&self, _: Uuid, _: Uuid) -> Result<(), GatewayError> {
            Ok(())
        }

        async fn get_profile(&self, _: Uuid) -> Result<Option<Profile>, GatewayError> {
            Ok(None)
        }

        async fn update_profile(&self, _: Uuid, _: ProfilePatch) -> Result<Profile, GatewayError> {
            unimplemented!("not exercised by leaderboard tests")
        }

        async fn list_leaderboard(&self) -> Result<Vec<LeaderboardRow>, GatewayError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(vec![LeaderboardRow {
                rank: 1,
                nickname: "Nugget-King".to_string(),
                avatar_color: None,
                total_nuggets: 127,
                avg_per_day: 12.7,
                nuggets_last_14_days: 45,
            }])
        }
    }

    #[tokio::test]
    async fn reads_within_staleness_window_hit_the_slot() {
        let gateway = Arc::new(CountingGateway::default());
        let cache = LeaderboardCache::new(gateway.clone());

        let first = cache.rows().await.unwrap();
        let second = cache.rows().await.unwrap();
        assert_eq!(first.len(), second.len());
        assert_eq!(gateway.fetches.load(Ordering::SeqCst), 1);
    }
}
