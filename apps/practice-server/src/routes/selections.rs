//! Card selection endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use practice_core::CardSet;

use crate::error::Result;
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// POST /api/selections
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<(StatusCode, Json<SelectionResponse>)> {
    let cards = CardSet::new(state.api.fetch_flashcards(&auth.token).await?);
    let selection = state.sessions.create_selection(&auth.token, cards).await;
    Ok((StatusCode::CREATED, Json(selection)))
}

/// GET /api/selections/{id}
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<SelectionResponse>> {
    Ok(Json(state.sessions.selection(&auth.token, id).await?))
}

/// POST /api/selections/{id}/toggle
pub async fn toggle(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ToggleCardRequest>,
) -> Result<Json<SelectionResponse>> {
    let selection = state
        .sessions
        .toggle_card(&auth.token, id, &payload.card_id)
        .await?;
    Ok(Json(selection))
}

/// POST /api/selections/{id}/toggle-group
pub async fn toggle_group(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ToggleGroupRequest>,
) -> Result<Json<SelectionResponse>> {
    let selection = state
        .sessions
        .toggle_group(&auth.token, id, &payload.group)
        .await?;
    Ok(Json(selection))
}

/// POST /api/selections/{id}/clear
pub async fn clear(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<SelectionResponse>> {
    Ok(Json(state.sessions.clear_selection(&auth.token, id).await?))
}

/// DELETE /api/selections/{id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.sessions.remove_selection(&auth.token, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
