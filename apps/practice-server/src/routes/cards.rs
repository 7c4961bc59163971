//! Flashcard listing endpoints

use axum::{
    extract::{Query, State},
    Extension, Json,
};

use practice_core::{sort_cards, CardSet, GroupIndex};

use crate::error::Result;
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// GET /api/cards
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(query): Query<SortQuery>,
) -> Result<Json<CardListResponse>> {
    let sort = query.option();
    let cards = CardSet::new(state.api.fetch_flashcards(&auth.token).await?);

    Ok(Json(CardListResponse {
        sort,
        cards: sort_cards(cards.cards(), sort),
    }))
}

/// GET /api/groups
pub async fn groups(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(query): Query<SortQuery>,
) -> Result<Json<GroupListResponse>> {
    let sort = query.option();
    let cards = CardSet::new(state.api.fetch_flashcards(&auth.token).await?);

    Ok(Json(GroupListResponse {
        sort,
        groups: GroupIndex::build(cards.cards()).sorted(sort),
    }))
}
