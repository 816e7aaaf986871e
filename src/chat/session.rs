//! The message thread for one logged in session. Messages only live
//! in memory and are appended strictly in the order they are sent or
//! received.

use std::sync::Arc;

use chrono::Utc;

use super::models::{ChatReply, Message, MessageMetadata, PendingApproval, Role, Turn};
use crate::approval::Decision;
use crate::auth::User;
use crate::client::SupportBackend;
use crate::i18n::{Locale, Text};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatState {
    Idle,
    Sending,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input, nothing happened
    Ignored,
    /// An approval is still open and has to be resolved first
    AwaitingApproval,
    Replied { requires_approval: bool },
    /// The request failed and a system message was appended
    Failed,
}

pub struct ChatSession {
    backend: Arc<dyn SupportBackend>,
    user: User,
    locale: Locale,
    messages: Vec<Message>,
    state: ChatState,
    pending_approval: Option<PendingApproval>,
    next_id: u64,
}

impl ChatSession {
    pub fn new(backend: Arc<dyn SupportBackend>, user: User, locale: Locale) -> Self {
        Self {
            backend,
            user,
            locale,
            messages: Vec::new(),
            state: ChatState::Idle,
            pending_approval: None,
            next_id: 1,
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn pending_approval(&self) -> Option<&PendingApproval> {
        self.pending_approval.as_ref()
    }

    pub async fn send(&mut self, input: &str) -> SendOutcome {
        if input.trim().is_empty() || self.state == ChatState::Sending {
            return SendOutcome::Ignored;
        }
        if self.pending_approval.is_some() {
            return SendOutcome::AwaitingApproval;
        }

        // Everything said so far, not including this message
        let conversation_history: Vec<Turn> = self.messages.iter().map(Turn::from).collect();
        self.push(Role::User, input.to_string(), None);

        self.state = ChatState::Sending;
        let result = self
            .backend
            .send_message(input, &self.user.id, &conversation_history)
            .await;
        self.state = ChatState::Idle;

        match result {
            Ok(reply) => self.receive(reply),
            Err(err) => {
                tracing::error!("Chat API error: {:#}", err);
                let content = self.locale.text(Text::NetworkError).to_string();
                self.push(Role::System, content, None);
                SendOutcome::Failed
            }
        }
    }

    fn receive(&mut self, reply: ChatReply) -> SendOutcome {
        let ChatReply {
            message,
            metadata,
            approval,
        } = reply;
        let content = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| self.locale.text(Text::ReplyUnavailable).to_string());
        self.push(Role::Assistant, content, Some(metadata));

        let requires_approval = approval.is_some();
        self.pending_approval = approval;
        SendOutcome::Replied { requires_approval }
    }

    /// Send the user's decision on the open approval. Always closes the
    /// approval and appends exactly one system message describing the
    /// result. Returns `None` when there was nothing to resolve.
    pub async fn resolve_approval(&mut self, decision: Decision) -> Option<&Message> {
        let approval = self.pending_approval.take()?;

        let content = match self
            .backend
            .approve_transaction(&approval.transaction_id, decision.approved())
            .await
        {
            Ok(result) => result
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| self.locale.text(Text::ApprovalProcessed).to_string()),
            Err(err) => {
                tracing::error!("Approval error: {:#}", err);
                self.locale.text(Text::ApprovalFailed).to_string()
            }
        };

        Some(self.push(Role::System, content, None))
    }

    fn push(&mut self, role: Role, content: String, metadata: Option<MessageMetadata>) -> &Message {
        let message = Message {
            id: self.next_id,
            role,
            content,
            timestamp: Utc::now(),
            metadata,
        };
        self.next_id += 1;
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApprovalResult;
    use crate::client::fake::FakeBackend;
    use anyhow::anyhow;
    use serde_json::{Map, json};

    fn user() -> User {
        User {
            id: String::from("user_001"),
            username: String::from("admin"),
            name: String::from("관리자"),
            role: String::from("admin"),
        }
    }

    fn answer(text: &str) -> ChatReply {
        ChatReply {
            message: Some(text.to_string()),
            ..ChatReply::default()
        }
    }

    fn refund() -> ChatReply {
        let mut data = Map::new();
        data.insert(String::from("주문번호"), json!("ORD_2026_001"));
        ChatReply {
            message: Some(String::from("환불 요청을 확인했습니다.")),
            metadata: MessageMetadata {
                agent_type: Some(String::from("refund")),
                confidence: 0.95,
                ..MessageMetadata::default()
            },
            approval: Some(PendingApproval {
                transaction_id: String::from("refund_1"),
                description: String::from("환불 처리를 승인하시겠습니까?"),
                data,
            }),
        }
    }

    fn session(backend: &Arc<FakeBackend>) -> ChatSession {
        let backend: Arc<dyn SupportBackend> = backend.clone();
        ChatSession::new(backend, user(), Locale::Ko)
    }

    #[tokio::test]
    async fn it_ignores_blank_input() {
        let backend = Arc::new(FakeBackend::default());
        let mut chat = session(&backend);

        assert_eq!(chat.send("").await, SendOutcome::Ignored);
        assert_eq!(chat.send("   \n\t").await, SendOutcome::Ignored);
        assert!(chat.messages().is_empty());
        assert!(backend.sent().is_empty());
    }

    #[tokio::test]
    async fn it_appends_the_question_and_the_answer_in_order() {
        let backend = Arc::new(
            FakeBackend::default()
                .with_reply(Ok(answer("안녕하세요! 무엇을 도와드릴까요?")))
                .with_reply(Ok(answer("주문 정보를 조회했습니다."))),
        );
        let mut chat = session(&backend);

        let outcome = chat.send("안녕").await;
        assert_eq!(
            outcome,
            SendOutcome::Replied {
                requires_approval: false
            }
        );
        chat.send("배송 조회").await;

        let roles: Vec<Role> = chat.messages().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::User, Role::Assistant, Role::User, Role::Assistant]
        );
        let ids: Vec<u64> = chat.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(chat.state(), ChatState::Idle);

        // The history sent along excludes the message being sent
        let sent = backend.sent();
        assert_eq!(sent[0].1, "user_001");
        assert!(sent[0].2.is_empty());
        assert_eq!(sent[1].0, "배송 조회");
        assert_eq!(sent[1].2.len(), 2);
        assert_eq!(sent[1].2[1].content, "안녕하세요! 무엇을 도와드릴까요?");
    }

    #[tokio::test]
    async fn it_appends_one_system_message_on_failure() {
        let backend = Arc::new(
            FakeBackend::default()
                .with_reply(Ok(answer("첫 번째 답변")))
                .with_reply(Err(anyhow!("connection refused"))),
        );
        let mut chat = session(&backend);

        chat.send("첫 번째").await;
        let before = chat.messages().to_vec();

        assert_eq!(chat.send("두 번째").await, SendOutcome::Failed);

        let messages = chat.messages();
        assert_eq!(messages.len(), before.len() + 2);
        assert_eq!(&messages[..before.len()], &before[..]);
        assert_eq!(messages[2].role, Role::User);
        assert_eq!(messages[3].role, Role::System);
        assert_eq!(
            messages[3].content,
            "네트워크 오류가 발생했습니다. 백엔드 서버를 확인해주세요."
        );
        assert_eq!(
            messages.iter().filter(|m| m.role == Role::System).count(),
            1
        );
        assert!(chat.pending_approval().is_none());
    }

    #[tokio::test]
    async fn it_falls_back_when_the_reply_is_empty() {
        let backend = Arc::new(FakeBackend::default().with_reply(Ok(ChatReply::default())));
        let mut chat = session(&backend);

        chat.send("hello").await;
        assert_eq!(
            chat.messages()[1].content,
            "응답을 생성하는 중 문제가 발생했습니다."
        );
    }

    #[tokio::test]
    async fn it_opens_and_resolves_one_approval() {
        let backend = Arc::new(
            FakeBackend::default()
                .with_reply(Ok(refund()))
                .with_approval_result(Ok(ApprovalResult {
                    status: String::from("success"),
                    message: Some(String::from("Transaction committed to DB.")),
                })),
        );
        let mut chat = session(&backend);

        let outcome = chat.send("환불해 주세요").await;
        assert_eq!(
            outcome,
            SendOutcome::Replied {
                requires_approval: true
            }
        );
        assert_eq!(
            chat.pending_approval().map(|a| a.transaction_id.as_str()),
            Some("refund_1")
        );
        let metadata = chat.messages()[1].metadata.clone().unwrap();
        assert_eq!(metadata.agent_type.as_deref(), Some("refund"));

        // Further input waits until the approval is resolved
        assert_eq!(chat.send("또 질문").await, SendOutcome::AwaitingApproval);
        assert_eq!(chat.messages().len(), 2);

        let message = chat.resolve_approval(Decision::Approve).await.cloned();
        let message = message.unwrap();
        assert_eq!(message.role, Role::System);
        assert_eq!(message.content, "Transaction committed to DB.");
        assert!(chat.pending_approval().is_none());
        assert_eq!(chat.messages().len(), 3);
        assert_eq!(
            backend.approvals(),
            vec![(String::from("refund_1"), true)]
        );

        // Nothing left to resolve
        assert!(chat.resolve_approval(Decision::Reject).await.is_none());
        assert_eq!(chat.messages().len(), 3);
    }

    #[tokio::test]
    async fn it_closes_the_approval_even_when_the_call_fails() {
        let backend = Arc::new(
            FakeBackend::default()
                .with_reply(Ok(refund()))
                .with_approval_result(Err(anyhow!("timeout"))),
        );
        let mut chat = session(&backend);

        chat.send("환불해 주세요").await;
        let message = chat.resolve_approval(Decision::Reject).await.cloned();

        assert_eq!(
            message.map(|m| m.content),
            Some(String::from("승인 요청 처리 중 오류가 발생했습니다."))
        );
        assert!(chat.pending_approval().is_none());
        assert_eq!(chat.messages().len(), 3);
        assert_eq!(
            backend.approvals(),
            vec![(String::from("refund_1"), false)]
        );
    }
}
