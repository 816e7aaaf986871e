//! Scripted backend for unit tests
use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::{Result, anyhow};
use async_trait::async_trait;

use super::{ApprovalResult, SupportBackend};
use crate::chat::{ChatReply, Turn};
use crate::history::{Feedback, HistoryItem};

#[derive(Default)]
pub struct FakeBackend {
    chat_replies: Mutex<VecDeque<Result<ChatReply>>>,
    approval_results: Mutex<VecDeque<Result<ApprovalResult>>>,
    history: Mutex<Option<Result<Vec<HistoryItem>>>>,
    fail_feedback: bool,
    sent: Mutex<Vec<(String, String, Vec<Turn>)>>,
    approvals: Mutex<Vec<(String, bool)>>,
    history_requests: Mutex<Vec<String>>,
    feedback: Mutex<Vec<(String, Feedback)>>,
}

impl FakeBackend {
    pub fn with_reply(self, reply: Result<ChatReply>) -> Self {
        self.chat_replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn with_approval_result(self, result: Result<ApprovalResult>) -> Self {
        self.approval_results.lock().unwrap().push_back(result);
        self
    }

    pub fn with_history(self, history: Result<Vec<HistoryItem>>) -> Self {
        *self.history.lock().unwrap() = Some(history);
        self
    }

    pub fn failing_feedback(mut self) -> Self {
        self.fail_feedback = true;
        self
    }

    /// (query, user_id, conversation_history) for every chat call
    pub fn sent(&self) -> Vec<(String, String, Vec<Turn>)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn approvals(&self) -> Vec<(String, bool)> {
        self.approvals.lock().unwrap().clone()
    }

    pub fn history_requests(&self) -> Vec<String> {
        self.history_requests.lock().unwrap().clone()
    }

    pub fn feedback_sent(&self) -> Vec<(String, Feedback)> {
        self.feedback.lock().unwrap().clone()
    }
}

#[async_trait]
impl SupportBackend for FakeBackend {
    async fn send_message(
        &self,
        query: &str,
        user_id: &str,
        conversation_history: &[Turn],
    ) -> Result<ChatReply> {
        self.sent.lock().unwrap().push((
            query.to_string(),
            user_id.to_string(),
            conversation_history.to_vec(),
        ));
        self.chat_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow!("no scripted chat reply")))
    }

    async fn approve_transaction(
        &self,
        transaction_id: &str,
        approved: bool,
    ) -> Result<ApprovalResult> {
        self.approvals
            .lock()
            .unwrap()
            .push((transaction_id.to_string(), approved));
        self.approval_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow!("no scripted approval result")))
    }

    async fn get_history(&self, user_id: &str) -> Result<Vec<HistoryItem>> {
        self.history_requests
            .lock()
            .unwrap()
            .push(user_id.to_string());
        self.history
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn send_feedback(&self, interaction_id: &str, feedback: Feedback) -> Result<()> {
        if self.fail_feedback {
            return Err(anyhow!("feedback endpoint unavailable"));
        }
        self.feedback
            .lock()
            .unwrap()
            .push((interaction_id.to_string(), feedback));
        Ok(())
    }
}
