//! Client for the remote vocabulary API.
//!
//! The remote service owns flashcards, users and practice history. This
//! server only reads cards, pushes practice results and asks for group
//! renames, always on behalf of the caller's bearer token.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};

use practice_core::{Flashcard, HistoricalStats, StatsSubmission};

/// Remote call errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RemoteError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend error: {status} - {message}")]
    Backend { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl RemoteError {
    /// True when the remote rejected the caller's credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Backend { status: 401 | 403, .. })
    }
}

pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

/// Operations the practice server needs from the vocabulary API.
#[async_trait]
pub trait VocabularyApi: Send + Sync {
    async fn fetch_flashcards(&self, token: &str) -> RemoteResult<Vec<Flashcard>>;

    async fn submit_stats(&self, token: &str, submission: &StatsSubmission) -> RemoteResult<()>;

    async fn fetch_stats(&self, token: &str) -> RemoteResult<HistoricalStats>;

    async fn reset_stats(&self, token: &str) -> RemoteResult<()>;

    async fn update_card_group(&self, token: &str, card_id: &str, group: &str) -> RemoteResult<()>;
}

#[derive(Debug, Serialize)]
struct GroupUpdate<'a> {
    group: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// reqwest-backed [`VocabularyApi`].
#[derive(Clone)]
pub struct HttpVocabularyApi {
    client: Client,
    base_url: String,
}

impl HttpVocabularyApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> RemoteResult<Response> {
        let resp = request
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let text = resp.text().await.unwrap_or_default();
            return Err(RemoteError::Backend {
                status,
                message: backend_message(&text),
            });
        }

        Ok(resp)
    }
}

/// Prefer the `error` or `message` field of a JSON error body.
fn backend_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.or(b.message))
        .unwrap_or_else(|| body.to_string())
}

/// Decode the card list. Anything other than a JSON array reads as no cards.
fn parse_flashcards(value: serde_json::Value) -> RemoteResult<Vec<Flashcard>> {
    if !value.is_array() {
        return Ok(Vec::new());
    }
    serde_json::from_value(value).map_err(|e| RemoteError::Parse(e.to_string()))
}

#[async_trait]
impl VocabularyApi for HttpVocabularyApi {
    async fn fetch_flashcards(&self, token: &str) -> RemoteResult<Vec<Flashcard>> {
        let request = self.client.get(self.url("/api/flashcards")).bearer_auth(token);
        let body: serde_json::Value = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(|e| RemoteError::Parse(e.to_string()))?;
        parse_flashcards(body)
    }

    async fn submit_stats(&self, token: &str, submission: &StatsSubmission) -> RemoteResult<()> {
        let request = self
            .client
            .post(self.url("/api/user/stats"))
            .bearer_auth(token)
            .json(submission);
        self.send(request).await?;
        Ok(())
    }

    async fn fetch_stats(&self, token: &str) -> RemoteResult<HistoricalStats> {
        let request = self.client.get(self.url("/api/user/stats")).bearer_auth(token);
        self.send(request)
            .await?
            .json()
            .await
            .map_err(|e| RemoteError::Parse(e.to_string()))
    }

    async fn reset_stats(&self, token: &str) -> RemoteResult<()> {
        let request = self
            .client
            .delete(self.url("/api/user/stats/reset"))
            .bearer_auth(token);
        self.send(request).await?;
        Ok(())
    }

    async fn update_card_group(&self, token: &str, card_id: &str, group: &str) -> RemoteResult<()> {
        let request = self
            .client
            .put(self.url(&format!("/api/flashcards/{card_id}")))
            .bearer_auth(token)
            .json(&GroupUpdate { group });
        self.send(request).await?;
        Ok(())
    }
}
