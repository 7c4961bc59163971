//! Practice session endpoints

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
use crate::services::sessions::SessionAction;
use crate::AppState;

/// POST /api/sessions
///
/// With a `selectionId` the session practices that selection's chosen cards;
/// without one it practices every card of the caller.
pub async fn start(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<StartSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>)> {
    let (cards, selected) = match payload.selection_id {
        Some(selection_id) => {
            let (cards, selected) = state.sessions.hand_off(&auth.token, selection_id).await?;
            (cards, Some(selected))
        }
        None => (
            CardSet::new(state.api.fetch_flashcards(&auth.token).await?),
            None,
        ),
    };

    let session = state
        .sessions
        .start(&auth.token, payload.mode, &cards, selected)
        .await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /api/sessions/{id}
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>> {
    Ok(Json(state.sessions.view(&auth.token, id).await?))
}

/// DELETE /api/sessions/{id}
pub async fn end(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<EndSessionResponse>> {
    Ok(Json(state.sessions.end(&auth.token, id).await?))
}

/// POST /api/sessions/{id}/submit
pub async fn submit(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>> {
    Ok(Json(state.sessions.submit(&auth.token, id, &payload.input).await?))
}

async fn act(
    state: AppState,
    auth: AuthenticatedUser,
    id: Uuid,
    action: SessionAction,
) -> Result<Json<SessionResponse>> {
    Ok(Json(state.sessions.apply(&auth.token, id, action).await?))
}

/// POST /api/sessions/{id}/flip
pub async fn flip(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>> {
    act(state, auth, id, SessionAction::Flip).await
}

/// POST /api/sessions/{id}/next
pub async fn next(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>> {
    act(state, auth, id, SessionAction::Next).await
}

/// POST /api/sessions/{id}/previous
pub async fn previous(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>> {
    act(state, auth, id, SessionAction::Previous).await
}

/// POST /api/sessions/{id}/shuffle
pub async fn shuffle(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>> {
    act(state, auth, id, SessionAction::Shuffle).await
}

/// POST /api/sessions/{id}/skip
pub async fn skip(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>> {
    act(state, auth, id, SessionAction::Skip).await
}
