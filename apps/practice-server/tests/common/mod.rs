//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext for driving the router against an in-memory vocabulary API
//! - FakeVocabularyApi, which records pushes and can simulate failures
//! - Authentication helpers

#![allow(dead_code)]

pub mod fixtures;

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;

use practice_core::{Flashcard, HistoricalStats, StatsSubmission};
use vocab_practice_server::config::Config;
use vocab_practice_server::remote::{RemoteError, RemoteResult, VocabularyApi};
use vocab_practice_server::{build_router, AppState};

/// Token accepted by the fake API.
pub const TOKEN: &str = "learner-token";

/// Second valid token, for ownership checks.
pub const OTHER_TOKEN: &str = "other-learner-token";

#[derive(Default)]
struct FakeState {
    cards: Vec<Flashcard>,
    history: HistoricalStats,
    submissions: Vec<StatsSubmission>,
    failing_updates: HashSet<String>,
    offline: bool,
    resets: usize,
}

/// In-memory stand-in for the remote vocabulary API.
///
/// Pushed submissions are appended to the stored history, like the real
/// service does.
#[derive(Default)]
pub struct FakeVocabularyApi {
    state: Mutex<FakeState>,
}

impl FakeVocabularyApi {
    pub fn with_cards(cards: Vec<Flashcard>) -> Self {
        let api = Self::default();
        api.state.lock().unwrap().cards = cards;
        api
    }

    pub fn set_history(&self, history: HistoricalStats) {
        self.state.lock().unwrap().history = history;
    }

    pub fn set_offline(&self, offline: bool) {
        self.state.lock().unwrap().offline = offline;
    }

    /// Make group updates of `card_id` fail.
    pub fn fail_updates_for(&self, card_id: &str) {
        self.state
            .lock()
            .unwrap()
            .failing_updates
            .insert(card_id.to_string());
    }

    pub fn cards(&self) -> Vec<Flashcard> {
        self.state.lock().unwrap().cards.clone()
    }

    pub fn submissions(&self) -> Vec<StatsSubmission> {
        self.state.lock().unwrap().submissions.clone()
    }

    pub fn resets(&self) -> usize {
        self.state.lock().unwrap().resets
    }

    fn check(&self, token: &str) -> RemoteResult<()> {
        if self.state.lock().unwrap().offline {
            return Err(RemoteError::Network("connection refused".to_string()));
        }
        if token != TOKEN && token != OTHER_TOKEN {
            return Err(RemoteError::Backend {
                status: 401,
                message: "Invalid token".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl VocabularyApi for FakeVocabularyApi {
    async fn fetch_flashcards(&self, token: &str) -> RemoteResult<Vec<Flashcard>> {
        self.check(token)?;
        Ok(self.cards())
    }

    async fn submit_stats(&self, token: &str, submission: &StatsSubmission) -> RemoteResult<()> {
        self.check(token)?;
        let mut state = self.state.lock().unwrap();
        state.history.total_time += submission.time_spent;
        state
            .history
            .words_practiced
            .extend(submission.words_practiced.iter().cloned());
        state.submissions.push(submission.clone());
        Ok(())
    }

    async fn fetch_stats(&self, token: &str) -> RemoteResult<HistoricalStats> {
        self.check(token)?;
        Ok(self.state.lock().unwrap().history.clone())
    }

    async fn reset_stats(&self, token: &str) -> RemoteResult<()> {
        self.check(token)?;
        let mut state = self.state.lock().unwrap();
        state.history = HistoricalStats::default();
        state.resets += 1;
        Ok(())
    }

    async fn update_card_group(&self, token: &str, card_id: &str, group: &str) -> RemoteResult<()> {
        self.check(token)?;
        let mut state = self.state.lock().unwrap();
        if state.failing_updates.contains(card_id) {
            return Err(RemoteError::Backend {
                status: 500,
                message: "update failed".to_string(),
            });
        }
        let card = state
            .cards
            .iter_mut()
            .find(|card| card.id == card_id)
            .ok_or_else(|| RemoteError::Backend {
                status: 404,
                message: "Flashcard not found".to_string(),
            })?;
        card.group = group.to_string();
        Ok(())
    }
}

/// Test context containing the fake API and the router under test.
pub struct TestContext {
    pub api: Arc<FakeVocabularyApi>,
    app: Router,
}

impl TestContext {
    /// Context over the sample deck from [`fixtures::sample_cards`].
    pub fn new() -> Self {
        Self::with_cards(fixtures::sample_cards())
    }

    pub fn with_cards(cards: Vec<Flashcard>) -> Self {
        let api = Arc::new(FakeVocabularyApi::with_cards(cards));
        let state = AppState::new(api.clone(), &test_config());
        Self {
            api,
            app: build_router(state),
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Format authorization header value.
    pub fn auth_header_value(token: &str) -> String {
        format!("Bearer {}", token)
    }

    /// Wait for background pushes to reach the fake API.
    pub async fn wait_for_submissions(&self, count: usize) -> Vec<StatsSubmission> {
        for _ in 0..100 {
            let submissions = self.api.submissions();
            if submissions.len() >= count {
                return submissions;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.api.submissions()
    }
}

fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        vocab_api_url: "http://vocab.test".to_string(),
        stats_flush_interval: Duration::from_secs(30),
        session_idle_timeout: Duration::from_secs(900),
        session_seed: Some(42),
    }
}
