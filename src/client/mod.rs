//! HTTP client for the support backend (chat, approvals, history,
//! feedback). Failures are returned to the caller untouched; there
//! are no retries or timeouts.

pub mod public;

#[cfg(test)]
pub(crate) mod fake;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::chat::{ChatReply, Turn};
use crate::history::{Feedback, HistoryItem};
use crate::i18n::Locale;
pub use public::ApprovalResult;
use public::{ApproveRequest, ChatRequest, ChatResponse, FeedbackRequest};

/// Everything the chat and history views need from the backend
#[async_trait]
pub trait SupportBackend: Send + Sync {
    async fn send_message(
        &self,
        query: &str,
        user_id: &str,
        conversation_history: &[Turn],
    ) -> Result<ChatReply>;

    async fn approve_transaction(
        &self,
        transaction_id: &str,
        approved: bool,
    ) -> Result<ApprovalResult>;

    async fn get_history(&self, user_id: &str) -> Result<Vec<HistoryItem>>;

    async fn send_feedback(&self, interaction_id: &str, feedback: Feedback) -> Result<()>;
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    api_base_url: String,
    locale: Locale,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(api_base_url: &str, locale: Locale) -> Self {
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            locale,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.api_base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new("http://127.0.0.1:8000", Locale::default())
    }
}

#[async_trait]
impl SupportBackend for ApiClient {
    async fn send_message(
        &self,
        query: &str,
        user_id: &str,
        conversation_history: &[Turn],
    ) -> Result<ChatReply> {
        tracing::debug!(
            "POST /chat user_id={} history_len={}",
            user_id,
            conversation_history.len()
        );
        let resp: ChatResponse = self
            .client
            .post(self.url("/chat"))
            .json(&ChatRequest {
                query,
                user_id,
                conversation_history,
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .with_context(|| "Attempted to parse chat response from json")?;

        Ok(resp.into_reply(self.locale))
    }

    async fn approve_transaction(
        &self,
        transaction_id: &str,
        approved: bool,
    ) -> Result<ApprovalResult> {
        tracing::debug!("POST /approve {} approved={}", transaction_id, approved);
        let result = self
            .client
            .post(self.url("/approve"))
            .json(&ApproveRequest {
                transaction_id,
                approved,
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .with_context(|| "Attempted to parse approval result from json")?;

        Ok(result)
    }

    async fn get_history(&self, user_id: &str) -> Result<Vec<HistoryItem>> {
        let path = format!("/history/{}", urlencoding::encode(user_id));
        tracing::debug!("GET {}", path);
        let items = self
            .client
            .get(self.url(&path))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .with_context(|| "Attempted to parse history items from json")?;

        Ok(items)
    }

    async fn send_feedback(&self, interaction_id: &str, feedback: Feedback) -> Result<()> {
        tracing::debug!("POST /feedback {} {}", interaction_id, feedback);
        self.client
            .post(self.url("/feedback"))
            .json(&FeedbackRequest {
                interaction_id,
                feedback,
            })
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
