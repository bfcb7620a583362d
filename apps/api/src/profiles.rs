//! Profile read/patch endpoints. A missing profile is a valid `null`
//! result, never an error.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::profile::{Profile, ProfilePatch};
use crate::state::AppState;
use crate::validation::{ensure_valid, validate_profile, ProfileForm};

#[derive(Serialize)]
pub struct ProfileResponse {
    pub profile: Option<Profile>,
    /// Nickname, or the id-derived placeholder for accounts without one.
    pub display_name: Option<String>,
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = state.sessions.require_user()?;
    let profile = state.gateway.get_profile(user.id).await?;
    let display_name = profile.as_ref().map(Profile::display_name);
    Ok(Json(ProfileResponse {
        profile,
        display_name,
    }))
}

/// PATCH /api/v1/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Json(form): Json<ProfileForm>,
) -> Result<Json<Profile>, AppError> {
    let user = state.sessions.require_user()?;
    ensure_valid(validate_profile(&form))?;

    let profile = state
        .gateway
        .update_profile(
            user.id,
            ProfilePatch {
                nickname: form.nickname,
                avatar_color: form.avatar_color,
            },
        )
        .await?;
    Ok(Json(profile))
}
