use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entries::stats::{compute_stats, unique_sauces, DashboardStats};
use crate::entries::view::{filtered_entries, SortKey, SortOrder};
use crate::errors::AppError;
use crate::models::entry::{Entry, NewEntry};
use crate::state::AppState;
use crate::validation::{ensure_valid, validate_entry, EntryForm, FieldErrors};

/// Exact string the owner must type before a delete is dispatched.
const DELETE_CONFIRM_TEXT: &str = "LÖSCHEN";

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub sort_by: Option<SortKey>,
    pub order: Option<SortOrder>,
    pub sauce: Option<String>,
}

#[derive(Serialize)]
pub struct EntriesResponse {
    pub entries: Vec<Entry>,
    /// Distinct sauces across the unfiltered list, for the filter dropdown.
    pub sauces: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub confirm: String,
}

/// GET /api/v1/entries
pub async fn handle_list_entries(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<EntriesResponse>, AppError> {
    let user = state.sessions.require_user()?;
    let entries = state.entries.list(user.id).await?;

    let sauces = unique_sauces(&entries);
    let entries = filtered_entries(
        &entries,
        query.sort_by.unwrap_or(SortKey::Date),
        query.order.unwrap_or(SortOrder::Desc),
        query.sauce.as_deref(),
    );

    Ok(Json(EntriesResponse { entries, sauces }))
}

/// POST /api/v1/entries
pub async fn handle_create_entry(
    State(state): State<AppState>,
    Json(form): Json<EntryForm>,
) -> Result<(StatusCode, Json<Entry>), AppError> {
    let user = state.sessions.require_user()?;
    ensure_valid(validate_entry(&form))?;

    let entry = state
        .entries
        .create(NewEntry {
            user_id: user.id,
            count: form.count as u32,
            sauces: form.sauces,
            location: form.location.filter(|s| !s.is_empty()),
            mood: form.mood.filter(|s| !s.is_empty()),
            notes: form.notes.filter(|s| !s.is_empty()),
            created_at: form.created_at.unwrap_or_else(Utc::now),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// DELETE /api/v1/entries/:id
///
/// Deletion is gated on the typed confirmation string; anything else is a
/// field-level validation error and no gateway call is made.
pub async fn handle_delete_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<DeleteRequest>,
) -> Result<StatusCode, AppError> {
    let user = state.sessions.require_user()?;

    if !confirmation_matches(&request.confirm) {
        let mut errors = FieldErrors::new();
        errors.insert(
            "confirm",
            format!("Zum Löschen bitte {DELETE_CONFIRM_TEXT} eintippen"),
        );
        return Err(AppError::Validation(errors));
    }

    state.entries.delete(id, user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/stats
pub async fn handle_stats(
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, AppError> {
    let user = state.sessions.require_user()?;
    let entries = state.entries.list(user.id).await?;
    Ok(Json(compute_stats(
        &entries,
        Utc::now(),
        state.config.nugget_weight_grams,
    )))
}

// Case-insensitive, surrounding whitespace ignored — matches the original
// confirmation dialog's behavior.
fn confirmation_matches(input: &str) -> bool {
    input.trim().to_uppercase() == DELETE_CONFIRM_TEXT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_requires_the_exact_word() {
        assert!(confirmation_matches("LÖSCHEN"));
        assert!(confirmation_matches("löschen"));
        assert!(confirmation_matches("  Löschen  "));
        assert!(!confirmation_matches("LOESCHEN"));
        assert!(!confirmation_matches("ja"));
        assert!(!confirmation_matches(""));
    }
}
