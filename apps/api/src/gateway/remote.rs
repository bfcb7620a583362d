//! Live gateway against the hosted backend's REST surface: row operations
//! via PostgREST (`/rest/v1`), identity via GoTrue (`/auth/v1`).
//!
//! Deliberately retry-free: a failed call surfaces immediately and the user
//! retries the action manually. This mirrors current behavior; see DESIGN.md
//! before adding backoff here.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::gateway::{AuthError, Gateway, GatewayError};
use crate::models::entry::{Entry, NewEntry};
use crate::models::leaderboard::LeaderboardRow;
use crate::models::profile::{Profile, ProfilePatch};
use crate::models::session::{Session, SessionUser};

const REQUEST_TIMEOUT_SECS: u64 = 30;
const LEADERBOARD_COLUMNS: &str =
    "rank,nickname,avatar_color,total_nuggets,avg_per_day,nuggets_last_14_days";

pub struct RemoteGateway {
    client: Client,
    base_url: String,
    anon_key: String,
    /// Session of the signed-in identity. Row operations carry its bearer
    /// token so the backend's row-level rules apply; before sign-in the
    /// publishable key is used.
    session: RwLock<Option<Session>>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    user: SessionUser,
}

#[derive(Debug, Deserialize)]
struct AuthErrorBody {
    #[serde(alias = "error_description", alias = "msg", alias = "message")]
    message: String,
}

impl RemoteGateway {
    pub fn new(base_url: String, anon_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
            anon_key,
            session: RwLock::new(None),
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    async fn bearer(&self) -> String {
        let session = self.session.read().await;
        session
            .as_ref()
            .map(|s| s.access_token.clone())
            .unwrap_or_else(|| self.anon_key.clone())
    }

    /// Builds a row-endpoint request with the standard auth headers.
    async fn rest_request(&self, method: reqwest::Method, table: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.rest_url(table))
            .header("apikey", &self.anon_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.bearer().await))
    }

    async fn token_grant(&self, url: String, body: serde_json::Value) -> Result<Session, AuthError> {
        let response = self
            .client
            .post(url)
            .header("apikey", &self.anon_key)
            .json(&body)
            .send()
            .await
            .map_err(AuthError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<AuthErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(AuthError {
                message,
                status: status.as_u16(),
            });
        }

        let token: TokenResponse = response.json().await.map_err(AuthError::transport)?;
        let session = Session {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            user: token.user,
        };

        *self.session.write().await = Some(session.clone());
        Ok(session)
    }
}

/// Maps a non-success row-endpoint response to a typed error.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(GatewayError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl Gateway for RemoteGateway {
    fn offline(&self) -> bool {
        false
    }

    async fn current_session(&self) -> Result<Option<Session>, GatewayError> {
        Ok(self.session.read().await.clone())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.token_grant(
            self.auth_url("token?grant_type=password"),
            json!({ "email": email, "password": password }),
        )
        .await
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        nickname: Option<&str>,
    ) -> Result<Session, AuthError> {
        let mut body = json!({ "email": email, "password": password });
        if let Some(nickname) = nickname {
            // Seeds the profile row the backend creates alongside the account.
            body["data"] = json!({ "nickname": nickname });
        }
        self.token_grant(self.auth_url("signup"), body).await
    }

    async fn sign_out(&self) -> Result<(), GatewayError> {
        let session = self.session.write().await.take();
        let Some(session) = session else {
            return Ok(());
        };

        let response = self
            .client
            .post(self.auth_url("logout"))
            .header("apikey", &self.anon_key)
            .header(AUTHORIZATION, format!("Bearer {}", session.access_token))
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn list_entries(&self, owner: Uuid) -> Result<Vec<Entry>, GatewayError> {
        let response = self
            .rest_request(reqwest::Method::GET, "nugget_entries")
            .await
            .query(&[
                ("select", "*".to_string()),
                ("user_id", format!("eq.{owner}")),
                ("order", "created_at.desc".to_string()),
            ])
            .send()
            .await?;
        let entries = ensure_success(response).await?.json::<Vec<Entry>>().await?;
        Ok(entries)
    }

    async fn create_entry(&self, entry: NewEntry) -> Result<Entry, GatewayError> {
        let response = self
            .rest_request(reqwest::Method::POST, "nugget_entries")
            .await
            .header("Prefer", "return=representation")
            .json(&entry)
            .send()
            .await?;
        let mut rows = ensure_success(response).await?.json::<Vec<Entry>>().await?;
        rows.pop().ok_or(GatewayError::Api {
            status: 500,
            message: "Insert hat keine Zeile zurückgegeben".to_string(),
        })
    }

    async fn delete_entry(&self, id: Uuid, owner: Uuid) -> Result<(), GatewayError> {
        let response = self
            .rest_request(reqwest::Method::DELETE, "nugget_entries")
            .await
            .query(&[
                ("id", format!("eq.{id}")),
                ("user_id", format!("eq.{owner}")),
            ])
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn get_profile(&self, owner: Uuid) -> Result<Option<Profile>, GatewayError> {
        let response = self
            .rest_request(reqwest::Method::GET, "profiles")
            .await
            .query(&[("select", "*".to_string()), ("id", format!("eq.{owner}"))])
            .send()
            .await?;
        let mut rows = ensure_success(response).await?.json::<Vec<Profile>>().await?;
        Ok(rows.pop())
    }

    async fn update_profile(
        &self,
        owner: Uuid,
        patch: ProfilePatch,
    ) -> Result<Profile, GatewayError> {
        let response = self
            .rest_request(reqwest::Method::PATCH, "profiles")
            .await
            .query(&[("id", format!("eq.{owner}"))])
            .header("Prefer", "return=representation")
            .json(&patch)
            .send()
            .await?;
        let mut rows = ensure_success(response).await?.json::<Vec<Profile>>().await?;
        rows.pop().ok_or(GatewayError::Api {
            status: 404,
            message: "Profil nicht gefunden".to_string(),
        })
    }

    async fn list_leaderboard(&self) -> Result<Vec<LeaderboardRow>, GatewayError> {
        let response = self
            .rest_request(reqwest::Method::GET, "nugget_leaderboard")
            .await
            .query(&[
                ("select", LEADERBOARD_COLUMNS.to_string()),
                ("order", "rank.asc".to_string()),
                ("limit", "10".to_string()),
            ])
            .send()
            .await?;
        let rows = ensure_success(response)
            .await?
            .json::<Vec<LeaderboardRow>>()
            .await?;
        Ok(rows)
    }
}
