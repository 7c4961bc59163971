//! Live practice sessions and card selections.
//!
//! Every session and selection belongs to the bearer token that created it
//! and is invisible to any other token. Each session runs a one-second timer
//! task that feeds its ledger and periodically pushes unsent stats. Pushes
//! are fire-and-forget: a failed push is logged and never touches local
//! state.
//!
//! Sessions and selections left untouched for the idle timeout are dropped.
//! An idle session's timer pushes what is left before removing it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use uuid::Uuid;

use practice_core::{
    CardSet, Flashcard, GroupIndex, PracticeMode, PracticeSession, RandomSource, SeededRandom,
    SelectionSet, SortOption, StatsSubmission, SubmitOutcome,
};

use crate::error::{ApiError, Result};
use crate::models::{
    EndSessionResponse, SelectionGroup, SelectionResponse, SessionResponse, SubmitResponse,
};
use crate::remote::VocabularyApi;

/// Navigation-style actions that carry no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Flip,
    Next,
    Previous,
    Shuffle,
    Skip,
}

type SessionMap = Arc<Mutex<HashMap<Uuid, SessionSlot>>>;

struct LiveSession {
    owner: String,
    state: Mutex<PracticeSession>,
    last_active: Mutex<Instant>,
    /// Bumped with `state` locked each time the ledger is reset.
    ledger_generation: AtomicU64,
    /// Pushes hold it shared; a history reset holds it exclusively.
    flush_gate: Arc<RwLock<()>>,
}

impl LiveSession {
    async fn touch(&self) {
        *self.last_active.lock().await = Instant::now();
    }

    async fn idle_for(&self) -> Duration {
        self.last_active.lock().await.elapsed()
    }

    fn generation(&self) -> u64 {
        self.ledger_generation.load(Ordering::SeqCst)
    }

    /// Drain the outbox. Call with `state` locked.
    fn drain(&self, session: &mut PracticeSession) -> Option<PendingFlush> {
        session.take_submission().map(|submission| PendingFlush {
            submission,
            generation: self.generation(),
        })
    }
}

/// A drained submission and the ledger generation it was drained under.
struct PendingFlush {
    submission: StatsSubmission,
    generation: u64,
}

struct SessionSlot {
    live: Arc<LiveSession>,
    timer: JoinHandle<()>,
}

impl Drop for SessionSlot {
    fn drop(&mut self) {
        self.timer.abort();
    }
}

struct SelectionEntry {
    owner: String,
    cards: CardSet,
    groups: GroupIndex,
    selection: SelectionSet,
    last_active: Instant,
}

impl SelectionEntry {
    fn response(&self, id: Uuid) -> SelectionResponse {
        let groups = self
            .groups
            .sorted(SortOption::default())
            .into_iter()
            .map(|group| {
                let card_ids: Vec<String> = group.cards.into_iter().map(|card| card.id).collect();
                let fully_selected = self
                    .selection
                    .is_group_fully_selected(card_ids.iter().map(String::as_str));
                SelectionGroup {
                    name: group.name,
                    card_ids,
                    fully_selected,
                }
            })
            .collect();

        SelectionResponse {
            id,
            count: self.selection.count(),
            selected_ids: self.selection.ids().map(str::to_string).collect(),
            groups,
        }
    }
}

/// Owner of all live sessions and selections.
pub struct SessionRegistry {
    api: Arc<dyn VocabularyApi>,
    flush_every: u64,
    idle_timeout: Duration,
    seed: Option<u64>,
    flush_gate: Arc<RwLock<()>>,
    sessions: SessionMap,
    selections: Mutex<HashMap<Uuid, SelectionEntry>>,
}

impl SessionRegistry {
    pub fn new(
        api: Arc<dyn VocabularyApi>,
        flush_interval: Duration,
        idle_timeout: Duration,
        seed: Option<u64>,
    ) -> Self {
        Self {
            api,
            flush_every: flush_interval.as_secs().max(1),
            idle_timeout,
            seed,
            flush_gate: Arc::new(RwLock::new(())),
            sessions: Arc::new(Mutex::new(HashMap::new())),
            selections: Mutex::new(HashMap::new()),
        }
    }

    fn random_source(&self) -> Box<dyn RandomSource> {
        match self.seed {
            Some(seed) => Box::new(SeededRandom::from_seed(seed)),
            None => Box::new(SeededRandom::from_entropy()),
        }
    }

    // === Selections ===

    pub async fn create_selection(&self, token: &str, cards: CardSet) -> SelectionResponse {
        let id = Uuid::new_v4();
        let entry = SelectionEntry {
            owner: token.to_string(),
            groups: GroupIndex::build(cards.cards()),
            selection: SelectionSet::for_cards(&cards),
            cards,
            last_active: Instant::now(),
        };
        let response = entry.response(id);
        let mut selections = self.selections.lock().await;
        self.evict_idle_selections(&mut selections);
        selections.insert(id, entry);
        tracing::debug!("Created selection {}", id);
        response
    }

    fn evict_idle_selections(&self, selections: &mut HashMap<Uuid, SelectionEntry>) {
        let before = selections.len();
        selections.retain(|_, entry| entry.last_active.elapsed() < self.idle_timeout);
        let evicted = before - selections.len();
        if evicted > 0 {
            tracing::debug!("Evicted {} idle selections", evicted);
        }
    }

    async fn with_selection<T>(
        &self,
        token: &str,
        id: Uuid,
        f: impl FnOnce(&mut SelectionEntry) -> T,
    ) -> Result<T> {
        let mut selections = self.selections.lock().await;
        self.evict_idle_selections(&mut selections);
        let entry = selections
            .get_mut(&id)
            .filter(|entry| entry.owner == token)
            .ok_or_else(|| ApiError::NotFound(format!("Selection {}", id)))?;
        entry.last_active = Instant::now();
        Ok(f(entry))
    }

    pub async fn selection(&self, token: &str, id: Uuid) -> Result<SelectionResponse> {
        self.with_selection(token, id, |entry| entry.response(id)).await
    }

    pub async fn toggle_card(
        &self,
        token: &str,
        id: Uuid,
        card_id: &str,
    ) -> Result<SelectionResponse> {
        self.with_selection(token, id, |entry| {
            entry.selection.toggle(card_id);
            entry.response(id)
        })
        .await
    }

    pub async fn toggle_group(
        &self,
        token: &str,
        id: Uuid,
        group: &str,
    ) -> Result<SelectionResponse> {
        self.with_selection(token, id, |entry| {
            let members = entry.cards.group_member_ids(group);
            entry.selection.toggle_group(members);
            entry.response(id)
        })
        .await
    }

    pub async fn clear_selection(&self, token: &str, id: Uuid) -> Result<SelectionResponse> {
        self.with_selection(token, id, |entry| {
            entry.selection.clear();
            entry.response(id)
        })
        .await
    }

    pub async fn remove_selection(&self, token: &str, id: Uuid) -> Result<()> {
        let mut selections = self.selections.lock().await;
        self.evict_idle_selections(&mut selections);
        let owned = selections.get(&id).is_some_and(|entry| entry.owner == token);
        if !owned {
            return Err(ApiError::NotFound(format!("Selection {}", id)));
        }
        selections.remove(&id);
        Ok(())
    }

    /// The selection's card set and its chosen cards in card set order.
    pub async fn hand_off(&self, token: &str, id: Uuid) -> Result<(CardSet, Vec<Flashcard>)> {
        self.with_selection(token, id, |entry| {
            (entry.cards.clone(), entry.cards.selected(&entry.selection))
        })
        .await
    }

    // === Sessions ===

    /// Start a session and its timer.
    pub async fn start(
        &self,
        token: &str,
        mode: PracticeMode,
        cards: &CardSet,
        selected: Option<Vec<Flashcard>>,
    ) -> Result<SessionResponse> {
        let session =
            PracticeSession::start(mode, cards, selected, self.random_source(), Utc::now())?;
        let id = Uuid::new_v4();
        let response = SessionResponse {
            id,
            view: session.view(),
            summary: session.summary(),
        };

        let live = Arc::new(LiveSession {
            owner: token.to_string(),
            state: Mutex::new(session),
            last_active: Mutex::new(Instant::now()),
            ledger_generation: AtomicU64::new(0),
            flush_gate: self.flush_gate.clone(),
        });
        let timer = spawn_timer(
            self.api.clone(),
            self.sessions.clone(),
            id,
            live.clone(),
            TimerSettings {
                flush_every: self.flush_every,
                idle_timeout: self.idle_timeout,
            },
        );
        self.sessions
            .lock()
            .await
            .insert(id, SessionSlot { live, timer });

        tracing::info!("Started {} session {}", mode.as_str(), id);
        Ok(response)
    }

    /// Look up an owned session and mark it active.
    async fn live(&self, token: &str, id: Uuid) -> Result<Arc<LiveSession>> {
        let live = self
            .sessions
            .lock()
            .await
            .get(&id)
            .filter(|slot| slot.live.owner == token)
            .map(|slot| slot.live.clone())
            .ok_or_else(|| ApiError::NotFound(format!("Session {}", id)))?;
        live.touch().await;
        Ok(live)
    }

    pub async fn view(&self, token: &str, id: Uuid) -> Result<SessionResponse> {
        let live = self.live(token, id).await?;
        let session = live.state.lock().await;
        Ok(SessionResponse {
            id,
            view: session.view(),
            summary: session.summary(),
        })
    }

    pub async fn apply(
        &self,
        token: &str,
        id: Uuid,
        action: SessionAction,
    ) -> Result<SessionResponse> {
        let live = self.live(token, id).await?;
        let mut session = live.state.lock().await;
        match action {
            SessionAction::Flip => session.flip()?,
            SessionAction::Next => session.next()?,
            SessionAction::Previous => session.previous()?,
            SessionAction::Shuffle => session.shuffle()?,
            SessionAction::Skip => session.skip()?,
        }
        tracing::debug!("Session {}: {:?}", id, action);
        Ok(SessionResponse {
            id,
            view: session.view(),
            summary: session.summary(),
        })
    }

    /// Submit an answer. A newly recorded spelling attempt is pushed right away.
    pub async fn submit(&self, token: &str, id: Uuid, input: &str) -> Result<SubmitResponse> {
        let live = self.live(token, id).await?;
        let (response, pending) = {
            let mut session = live.state.lock().await;
            let outcome = session.submit(input, Utc::now())?;
            let pending = match outcome {
                SubmitOutcome::Spelling { recorded: true, .. } => live.drain(&mut session),
                _ => None,
            };
            let response = SubmitResponse {
                outcome,
                view: session.view(),
                summary: session.summary(),
            };
            (response, pending)
        };

        if let Some(pending) = pending {
            spawn_flush(self.api.clone(), live, pending);
        }
        Ok(response)
    }

    /// End a session: stop its timer, push what is left and drop it.
    pub async fn end(&self, token: &str, id: Uuid) -> Result<EndSessionResponse> {
        let slot = {
            let mut sessions = self.sessions.lock().await;
            let owned = sessions.get(&id).is_some_and(|slot| slot.live.owner == token);
            if !owned {
                return Err(ApiError::NotFound(format!("Session {}", id)));
            }
            sessions.remove(&id)
        };
        let Some(slot) = slot else {
            return Err(ApiError::NotFound(format!("Session {}", id)));
        };
        slot.timer.abort();

        let (summary, remaining) = {
            let mut session = slot.live.state.lock().await;
            (session.summary(), slot.live.drain(&mut session))
        };
        if let Some(pending) = remaining {
            spawn_flush(self.api.clone(), slot.live.clone(), pending);
        }

        tracing::info!(
            "Ended session {} after {}s ({} attempts)",
            id,
            summary.elapsed_seconds,
            summary.rollup.total
        );
        Ok(EndSessionResponse { id, summary })
    }

    /// Unsent work of the caller's live sessions, without draining it.
    pub async fn pending_for(&self, token: &str) -> Vec<StatsSubmission> {
        let mut pending = Vec::new();
        for live in self.owned_by(token).await {
            let submission = live.state.lock().await.pending_submission();
            if !submission.is_empty() {
                pending.push(submission);
            }
        }
        pending
    }

    /// Clear the caller's remote history, then the local ledgers of their
    /// live sessions. Returns how many sessions were cleared.
    ///
    /// Pushes already under way finish first. Pushes drained before the
    /// reset but not yet sent are discarded.
    pub async fn reset_history(&self, token: &str) -> Result<usize> {
        let _exclusive = self.flush_gate.write().await;
        self.api.reset_stats(token).await?;
        Ok(self.reset_ledgers(token).await)
    }

    async fn reset_ledgers(&self, token: &str) -> usize {
        let owned = self.owned_by(token).await;
        for live in &owned {
            let mut session = live.state.lock().await;
            session.reset_ledger();
            live.ledger_generation.fetch_add(1, Ordering::SeqCst);
        }
        owned.len()
    }

    async fn owned_by(&self, token: &str) -> Vec<Arc<LiveSession>> {
        self.sessions
            .lock()
            .await
            .values()
            .filter(|slot| slot.live.owner == token)
            .map(|slot| slot.live.clone())
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
struct TimerSettings {
    flush_every: u64,
    idle_timeout: Duration,
}

fn spawn_timer(
    api: Arc<dyn VocabularyApi>,
    sessions: SessionMap,
    id: Uuid,
    live: Arc<LiveSession>,
    settings: TimerSettings,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let period = Duration::from_secs(1);
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut since_flush = 0;

        loop {
            ticker.tick().await;

            if live.idle_for().await >= settings.idle_timeout {
                let remaining = {
                    let mut session = live.state.lock().await;
                    live.drain(&mut session)
                };
                if let Some(pending) = remaining {
                    spawn_flush(api.clone(), live.clone(), pending);
                }
                tracing::info!(
                    "Session {} expired after {}s idle",
                    id,
                    settings.idle_timeout.as_secs()
                );
                // Dropping the slot aborts this task; nothing may await after it.
                sessions.lock().await.remove(&id);
                return;
            }

            since_flush += 1;
            let due = {
                let mut session = live.state.lock().await;
                session.tick();
                if since_flush >= settings.flush_every {
                    since_flush = 0;
                    live.drain(&mut session)
                } else {
                    None
                }
            };
            if let Some(pending) = due {
                spawn_flush(api.clone(), live.clone(), pending);
            }
        }
    })
}

/// Push a submission in the background. Failures are only logged.
fn spawn_flush(
    api: Arc<dyn VocabularyApi>,
    live: Arc<LiveSession>,
    pending: PendingFlush,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let _shared = live.flush_gate.read().await;
        if live.generation() != pending.generation {
            tracing::debug!("Dropped stats drained before a history reset");
            return;
        }

        let submission = pending.submission;
        let words = submission.words_practiced.len();
        match api.submit_stats(&live.owner, &submission).await {
            Ok(()) => tracing::debug!(
                "Pushed {}s and {} attempts",
                submission.time_spent,
                words
            ),
            Err(e) => tracing::warn!(
                time_spent = submission.time_spent,
                words,
                "Failed to push practice stats: {}",
                e
            ),
        }
    })
}
