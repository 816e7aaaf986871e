//! Wire types for the support backend
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::chat::{ChatReply, MessageMetadata, PendingApproval, Turn};
use crate::history::Feedback;
use crate::i18n::{Locale, Text};

/// Status the backend puts on a transaction that waits for the user
pub const PENDING_APPROVAL: &str = "pending_approval";

#[derive(Serialize)]
pub struct ChatRequest<'a> {
    pub query: &'a str,
    pub user_id: &'a str,
    pub conversation_history: &'a [Turn],
}

// Object {
//     "query": String("주문 취소해줘"),
//     "intent": String("transaction"),
//     "type": String("transaction"),
//     "message": String("처리되었습니다."),
//     "classification_details": Object { "intent": String("transaction") },
//     "data": Object {
//         "transaction_id": String("TXN-1737770000"),
//         "action_type": String("cancel_order"),
//         "target_entity": String("주문 취소해줘"),
//         "status": String("pending_approval"),
//         ...
//     }
// }
#[derive(Deserialize, Debug, Default)]
pub struct ChatResponse {
    pub answer: Option<String>,
    pub message: Option<String>,
    pub r#type: Option<String>,
    pub requires_approval: Option<bool>,
    pub transaction_id: Option<String>,
    pub approval_message: Option<String>,
    pub transaction_data: Option<Map<String, Value>>,
    pub data: Option<TransactionData>,
    pub classification_details: Option<ClassificationDetails>,
    pub metadata: Option<ResponseMetadata>,
    #[serde(default)]
    pub blocked: bool,
    #[serde(default)]
    pub validation_issues: Vec<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct TransactionData {
    pub transaction_id: Option<String>,
    pub action_type: Option<String>,
    pub target_entity: Option<String>,
    pub status: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ClassificationDetails {
    pub intent: Option<String>,
    pub confidence: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ResponseMetadata {
    pub agent_type: Option<String>,
    pub confidence: Option<f64>,
}

impl ChatResponse {
    fn requires_approval(&self) -> bool {
        self.requires_approval.unwrap_or(false)
            || self
                .data
                .as_ref()
                .and_then(|d| d.status.as_deref())
                .is_some_and(|status| status == PENDING_APPROVAL)
    }

    /// Collapse the response variants the backend has used into one
    /// reply shape.
    pub fn into_reply(self, locale: Locale) -> ChatReply {
        let approval = if self.requires_approval() {
            Some(self.pending_approval(locale))
        } else {
            None
        };

        let agent_type = self
            .r#type
            .clone()
            .or_else(|| self.metadata.as_ref().and_then(|m| m.agent_type.clone()));
        let confidence = self
            .classification_details
            .as_ref()
            .and_then(|c| c.confidence)
            .or_else(|| self.metadata.as_ref().and_then(|m| m.confidence))
            .unwrap_or(1.0);

        ChatReply {
            message: self.answer.or(self.message),
            metadata: MessageMetadata {
                agent_type,
                confidence,
                blocked: self.blocked,
                validation_issues: self.validation_issues,
            },
            approval,
        }
    }

    fn pending_approval(&self, locale: Locale) -> PendingApproval {
        let data = self.data.as_ref();
        let transaction_id = self
            .transaction_id
            .clone()
            .or_else(|| data.and_then(|d| d.transaction_id.clone()))
            .unwrap_or_else(|| {
                tracing::warn!("Approval requested without a transaction id");
                String::new()
            });

        let description = self
            .approval_message
            .clone()
            .filter(|m| !m.is_empty())
            .or_else(|| {
                data.and_then(|d| d.action_type.as_deref())
                    .map(|action| locale.approval_question(action))
            })
            .unwrap_or_else(|| locale.text(Text::GenericApprovalQuestion).to_string());

        let payload = match (&self.transaction_data, data) {
            (Some(transaction_data), _) => transaction_data.clone(),
            (None, Some(d)) => {
                let mut payload = Map::new();
                let fields = [
                    (Text::FieldItem, &d.target_entity),
                    (Text::FieldStatus, &d.status),
                    (Text::FieldRequest, &d.action_type),
                ];
                for (label, value) in fields {
                    let value = value.clone().map(Value::String).unwrap_or(Value::Null);
                    payload.insert(locale.text(label).to_string(), value);
                }
                payload
            }
            (None, None) => Map::new(),
        };

        PendingApproval {
            transaction_id,
            description,
            data: payload,
        }
    }
}

#[derive(Serialize)]
pub struct ApproveRequest<'a> {
    pub transaction_id: &'a str,
    pub approved: bool,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct ApprovalResult {
    #[serde(default)]
    pub status: String,
    pub message: Option<String>,
}

#[derive(Serialize)]
pub struct FeedbackRequest<'a> {
    pub interaction_id: &'a str,
    pub feedback: Feedback,
}
