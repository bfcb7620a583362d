//! Offline/demo gateway: the stand-in used when no backend credentials are
//! configured. Reads return a small fixed dataset scoped to whatever owner
//! id the caller asks about; writes return synthesized success values and
//! persist nothing, not even in memory. No operation ever fails for missing
//! credentials.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::gateway::{AuthError, Gateway, GatewayError};
use crate::models::entry::{Entry, NewEntry};
use crate::models::leaderboard::LeaderboardRow;
use crate::models::profile::{Profile, ProfilePatch};
use crate::models::session::{Session, SessionUser};

/// Synthetic identity used when demo sign-in does not supply one.
pub fn demo_user_id() -> Uuid {
    Uuid::from_u128(0xd3a0_0000_0000_4000_8000_000000000001)
}

pub struct DemoGateway;

impl DemoGateway {
    pub fn new() -> Self {
        Self
    }

    fn demo_session(email: &str) -> Session {
        Session {
            access_token: "demo-token".to_string(),
            refresh_token: "demo-refresh".to_string(),
            user: SessionUser {
                id: demo_user_id(),
                email: email.to_string(),
            },
        }
    }
}

/// The fixed entry dataset, scoped to the requesting owner.
fn demo_entries(owner: Uuid) -> Vec<Entry> {
    let now = Utc::now();
    vec![
        Entry {
            id: Uuid::from_u128(0xd3a0_0000_0000_4000_8000_0000000000e1),
            user_id: owner,
            count: 20,
            sauces: vec!["BBQ".to_string()],
            location: Some("McDonald's".to_string()),
            mood: Some("😋".to_string()),
            notes: None,
            created_at: now - Duration::hours(2),
        },
        Entry {
            id: Uuid::from_u128(0xd3a0_0000_0000_4000_8000_0000000000e2),
            user_id: owner,
            count: 10,
            sauces: vec!["Curry".to_string()],
            location: Some("Zuhause".to_string()),
            mood: Some("🤤".to_string()),
            notes: None,
            created_at: now - Duration::hours(24),
        },
    ]
}

#[async_trait]
impl Gateway for DemoGateway {
    fn offline(&self) -> bool {
        true
    }

    async fn current_session(&self) -> Result<Option<Session>, GatewayError> {
        // No stored session: demo mode never signs anyone in automatically.
        Ok(None)
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<Session, AuthError> {
        if email.contains('@') {
            Ok(Self::demo_session(email))
        } else {
            Err(AuthError {
                message: "Ungültige E-Mail-Adresse".to_string(),
                status: 400,
            })
        }
    }

    async fn sign_up(
        &self,
        email: &str,
        _password: &str,
        _nickname: Option<&str>,
    ) -> Result<Session, AuthError> {
        Ok(Self::demo_session(email))
    }

    async fn sign_out(&self) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn list_entries(&self, owner: Uuid) -> Result<Vec<Entry>, GatewayError> {
        Ok(demo_entries(owner))
    }

    async fn create_entry(&self, entry: NewEntry) -> Result<Entry, GatewayError> {
        Ok(Entry {
            id: Uuid::new_v4(),
            user_id: entry.user_id,
            count: entry.count,
            sauces: entry.sauces,
            location: entry.location,
            mood: entry.mood,
            notes: entry.notes,
            created_at: entry.created_at,
        })
    }

    async fn delete_entry(&self, _id: Uuid, _owner: Uuid) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn get_profile(&self, owner: Uuid) -> Result<Option<Profile>, GatewayError> {
        let now = Utc::now();
        Ok(Some(Profile {
            id: owner,
            nickname: Some("Demo Schredder".to_string()),
            avatar_color: Some("orange".to_string()),
            created_at: now,
            updated_at: now,
        }))
    }

    async fn update_profile(
        &self,
        owner: Uuid,
        patch: ProfilePatch,
    ) -> Result<Profile, GatewayError> {
        let now = Utc::now();
        Ok(Profile {
            id: owner,
            nickname: patch.nickname.or_else(|| Some("Demo Schredder".to_string())),
            avatar_color: patch.avatar_color.or_else(|| Some("orange".to_string())),
            created_at: now,
            updated_at: now,
        })
    }

    async fn list_leaderboard(&self) -> Result<Vec<LeaderboardRow>, GatewayError> {
        Ok(vec![
            LeaderboardRow {
                rank: 1,
                nickname: "Nugget-King".to_string(),
                avatar_color: Some("orange".to_string()),
                total_nuggets: 127,
                avg_per_day: 12.7,
                nuggets_last_14_days: 45,
            },
            LeaderboardRow {
                rank: 2,
                nickname: "Sauce-Boss".to_string(),
                avatar_color: Some("blue".to_string()),
                total_nuggets: 89,
                avg_per_day: 8.1,
                nuggets_last_14_days: 22,
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn list_entries_returns_fixed_dataset_for_any_owner() {
        let gateway = DemoGateway::new();
        let owner = Uuid::new_v4();
        let entries = gateway.list_entries(owner).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.user_id == owner));
        assert_eq!(entries[0].count, 20);
        assert_eq!(entries[1].count, 10);
    }

    #[tokio::test]
    async fn create_entry_synthesizes_fresh_id_without_persisting() {
        let gateway = DemoGateway::new();
        let owner = Uuid::new_v4();
        let entry = gateway
            .create_entry(NewEntry {
                user_id: owner,
                count: 6,
                sauces: vec!["Süß-Sauer".to_string()],
                location: None,
                mood: None,
                notes: None,
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        assert_eq!(entry.count, 6);

        let second = gateway
            .create_entry(NewEntry {
                user_id: owner,
                count: 6,
                sauces: vec![],
                location: None,
                mood: None,
                notes: None,
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        assert_ne!(entry.id, second.id);

        // The fixed dataset is unaffected by writes.
        assert_eq!(gateway.list_entries(owner).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn sign_in_rejects_address_without_at_sign() {
        let gateway = DemoGateway::new();
        let err = gateway.sign_in("kein-email", "secret").await.unwrap_err();
        assert_eq!(err.status, 400);
        assert_eq!(err.message, "Ungültige E-Mail-Adresse");

        let session = gateway.sign_in("demo@example.com", "secret").await.unwrap();
        assert_eq!(session.user.email, "demo@example.com");
    }

    #[tokio::test]
    async fn leaderboard_is_rank_ascending_and_capped() {
        let gateway = DemoGateway::new();
        let rows = gateway.list_leaderboard().await.unwrap();
        assert!(rows.len() <= 10);
        assert!(rows.windows(2).all(|w| w[0].rank < w[1].rank));
    }
}
