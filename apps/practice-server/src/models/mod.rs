//! API request and response types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export shared types from practice-core
pub use practice_core::{
    CardGroup, Flashcard, HistoricalRollup, ModeView, PracticeMode, SessionSummary, SortOption,
    SubmitOutcome,
};

// === Listing Types ===

/// Query parameter for list ordering
#[derive(Debug, Default, Deserialize)]
pub struct SortQuery {
    pub sort: Option<String>,
}

impl SortQuery {
    /// Unknown or missing values fall back to the default ordering.
    pub fn option(&self) -> SortOption {
        self.sort
            .as_deref()
            .and_then(SortOption::from_str)
            .unwrap_or_default()
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardListResponse {
    pub sort: SortOption,
    pub cards: Vec<Flashcard>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupListResponse {
    pub sort: SortOption,
    pub groups: Vec<CardGroup>,
}

// === Group Rename Types ===

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameGroupRequest {
    pub new_name: String,
}

/// A card whose group could not be updated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameFailure {
    pub card_id: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameGroupResponse {
    pub from: String,
    pub to: String,
    pub renamed: Vec<String>,
    pub failed: Vec<RenameFailure>,
}

// === Selection Types ===

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleCardRequest {
    pub card_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleGroupRequest {
    pub group: String,
}

/// One group as shown on the selection screen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionGroup {
    pub name: String,
    pub card_ids: Vec<String>,
    pub fully_selected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResponse {
    pub id: Uuid,
    pub count: usize,
    pub selected_ids: Vec<String>,
    pub groups: Vec<SelectionGroup>,
}

// === Session Types ===

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    pub mode: PracticeMode,
    pub selection_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub input: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: Uuid,
    pub view: ModeView,
    pub summary: SessionSummary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub outcome: SubmitOutcome,
    pub view: ModeView,
    pub summary: SessionSummary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndSessionResponse {
    pub id: Uuid,
    pub summary: SessionSummary,
}

// === Stats Types ===

pub type StatsResponse = HistoricalRollup;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetStatsResponse {
    pub reset: bool,
    /// Live sessions of the caller whose local bookkeeping was cleared.
    pub sessions_cleared: usize,
}
