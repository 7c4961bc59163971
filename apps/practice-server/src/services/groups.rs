//! Group renaming through the vocabulary API

use practice_core::{CardSet, GroupIndex};

use crate::error::Result;
use crate::models::{RenameFailure, RenameGroupResponse};
use crate::remote::VocabularyApi;

/// Move every card of group `from` to `to`, one remote update per card.
///
/// The rename is validated against freshly fetched cards before anything is
/// sent. Cards that fail to update keep their old group and are reported;
/// successful updates are not rolled back.
pub async fn rename_group(
    api: &dyn VocabularyApi,
    token: &str,
    from: &str,
    to: &str,
) -> Result<RenameGroupResponse> {
    let cards = CardSet::new(api.fetch_flashcards(token).await?);
    let plan = GroupIndex::build(cards.cards()).plan_rename(from, to)?;

    let mut renamed = Vec::with_capacity(plan.card_ids.len());
    let mut failed = Vec::new();
    for card_id in plan.card_ids {
        match api.update_card_group(token, &card_id, &plan.to).await {
            Ok(()) => renamed.push(card_id),
            Err(e) => {
                tracing::warn!("Failed to move card {} to group {}: {}", card_id, plan.to, e);
                failed.push(RenameFailure {
                    card_id,
                    error: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        "Renamed group {} to {}: {} moved, {} failed",
        plan.from,
        plan.to,
        renamed.len(),
        failed.len()
    );

    Ok(RenameGroupResponse {
        from: plan.from,
        to: plan.to,
        renamed,
        failed,
    })
}
