use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::session::SessionUser;
use crate::state::AppState;
use crate::validation::{ensure_valid, validate_login, validate_register, LoginForm, RegisterForm};

#[derive(Serialize)]
pub struct SessionStatus {
    pub state: String,
    pub user: Option<SessionUser>,
    pub demo_mode: bool,
}

impl SessionStatus {
    fn current(state: &AppState) -> Self {
        let phase = state.sessions.phase();
        Self {
            state: phase.to_string(),
            user: state.sessions.current_user(),
            demo_mode: state.gateway.offline(),
        }
    }
}

/// GET /api/v1/auth/session
pub async fn handle_session(State(state): State<AppState>) -> Json<SessionStatus> {
    Json(SessionStatus::current(&state))
}

/// POST /api/v1/auth/signin
pub async fn handle_sign_in(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> Result<Json<SessionStatus>, AppError> {
    ensure_valid(validate_login(&form))?;

    state
        .sessions
        .sign_in(&form.email, &form.password)
        .await
        .map_err(AppError::Auth)?;

    Ok(Json(SessionStatus::current(&state)))
}

/// POST /api/v1/auth/signup
pub async fn handle_sign_up(
    State(state): State<AppState>,
    Json(form): Json<RegisterForm>,
) -> Result<(StatusCode, Json<SessionStatus>), AppError> {
    ensure_valid(validate_register(&form))?;

    state
        .sessions
        .sign_up(&form.email, &form.password, Some(&form.nickname))
        .await
        .map_err(AppError::Auth)?;

    Ok((StatusCode::CREATED, Json(SessionStatus::current(&state))))
}

/// POST /api/v1/auth/signout
pub async fn handle_sign_out(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.sessions.sign_out().await?;
    Ok(StatusCode::NO_CONTENT)
}
