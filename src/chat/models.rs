use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "system")]
    System,
}

/// Classification details attached to an assistant reply
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct MessageMetadata {
    pub agent_type: Option<String>,
    pub confidence: f64,
    #[serde(default)]
    pub blocked: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation_issues: Vec<String>,
}

impl Default for MessageMetadata {
    fn default() -> Self {
        Self {
            agent_type: None,
            confidence: 1.0,
            blocked: false,
            validation_issues: Vec::new(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Message {
    pub id: u64,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageMetadata>,
}

/// A message as sent back to the backend in `conversation_history`
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl From<&Message> for Turn {
    fn from(message: &Message) -> Self {
        Turn {
            role: message.role,
            content: message.content.clone(),
        }
    }
}

/// A sensitive action waiting on the user's decision
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct PendingApproval {
    pub transaction_id: String,
    pub description: String,
    pub data: Map<String, Value>,
}

/// A chat reply after normalizing the backend's response shapes
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ChatReply {
    pub message: Option<String>,
    pub metadata: MessageMetadata,
    pub approval: Option<PendingApproval>,
}
