//! Test fixtures and factory functions for creating test data.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;
use uuid::Uuid;

use practice_core::{Attempt, Flashcard};

fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, d, 9, 0, 0).unwrap()
}

/// Four cards over three groups, created on consecutive days.
///
/// | id | word   | group     | created    |
/// |----|--------|-----------|------------|
/// | c1 | apple  | Fruit     | 2024-01-01 |
/// | c2 | Éclair | Desserts  | 2024-01-03 |
/// | c3 | banana | Fruit     | 2024-01-02 |
/// | c4 | zebra  | Ungrouped | 2024-01-04 |
pub fn sample_cards() -> Vec<Flashcard> {
    vec![
        Flashcard::new("c1", "apple", "manzana", "a fruit", day(1)).in_group("Fruit"),
        Flashcard::new("c2", "Éclair", "pastel", "a pastry", day(3)).in_group("Desserts"),
        Flashcard::new("c3", "banana", "plátano", "", day(2)).in_group("Fruit"),
        Flashcard::new("c4", "zebra", "cebra", "an animal", day(4)),
    ]
}

/// A recorded attempt as stored in remote history.
pub fn attempt(card_id: &str, group: &str, correct: bool) -> Attempt {
    Attempt {
        card_id: card_id.to_string(),
        group: group.to_string(),
        correct,
        timestamp: day(5),
    }
}

/// Create a start session request body.
pub fn start_session_request(mode: &str, selection_id: Option<Uuid>) -> serde_json::Value {
    match selection_id {
        Some(id) => json!({ "mode": mode, "selectionId": id }),
        None => json!({ "mode": mode }),
    }
}

/// Create a submit request body.
pub fn submit_request(input: &str) -> serde_json::Value {
    json!({ "input": input })
}

/// Create a toggle card request body.
pub fn toggle_card_request(card_id: &str) -> serde_json::Value {
    json!({ "cardId": card_id })
}

/// Create a toggle group request body.
pub fn toggle_group_request(group: &str) -> serde_json::Value {
    json!({ "group": group })
}

/// Create a rename group request body.
pub fn rename_group_request(new_name: &str) -> serde_json::Value {
    json!({ "newName": new_name })
}
