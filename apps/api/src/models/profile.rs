use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-account display metadata. Created by the backend at account creation;
/// the client only ever reads or patches it, never deletes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub nickname: Option<String>,
    pub avatar_color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Leaderboards and headers show the nickname; accounts without one fall
    /// back to a placeholder derived from the account id prefix.
    pub fn display_name(&self) -> String {
        match &self.nickname {
            Some(nickname) if !nickname.trim().is_empty() => nickname.clone(),
            _ => {
                let id = self.id.to_string();
                format!("Schredder-{}", &id[..8])
            }
        }
    }
}

/// Partial update for a profile. `None` fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(nickname: Option<&str>) -> Profile {
        Profile {
            id: Uuid::from_u128(0xabcdef12_3456_7890_abcd_ef1234567890),
            nickname: nickname.map(str::to_string),
            avatar_color: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn display_name_prefers_nickname() {
        assert_eq!(profile(Some("Nugget-King")).display_name(), "Nugget-King");
    }

    #[test]
    fn display_name_falls_back_to_id_prefix() {
        assert_eq!(profile(None).display_name(), "Schredder-abcdef12");
        assert_eq!(profile(Some("   ")).display_name(), "Schredder-abcdef12");
    }
}
