//! Approval prompt for sensitive transactions. This only renders the
//! request and turns user input into a decision; the chat session
//! sends the decision to the backend.

use anyhow::Result;
use serde::Serialize;
use serde_json::{Map, Value};
use serde_json::json;

use crate::chat::PendingApproval;
use crate::i18n::{Locale, Text};
use crate::render::{self, View};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn approved(self) -> bool {
        matches!(self, Decision::Approve)
    }

    /// Parse a yes/no style answer in either locale.
    pub fn parse(input: &str) -> Option<Decision> {
        match input.trim().to_lowercase().as_str() {
            "y" | "yes" | "approve" | "승인" | "예" | "네" => Some(Decision::Approve),
            "n" | "no" | "reject" | "cancel" | "취소" | "아니오" | "아니요" => {
                Some(Decision::Reject)
            }
            _ => None,
        }
    }
}

#[derive(Serialize, Debug, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: String,
}

/// A top level entry of the payload. Object values are flattened one
/// level into `nested`.
#[derive(Serialize, Debug, PartialEq)]
pub struct Row {
    pub key: String,
    pub value: String,
    pub nested: Vec<Field>,
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::from("null"),
        other => other.to_string(),
    }
}

pub fn rows(data: &Map<String, Value>) -> Vec<Row> {
    data.iter()
        .map(|(key, value)| match value {
            Value::Object(inner) => Row {
                key: key.clone(),
                value: String::new(),
                nested: inner
                    .iter()
                    .map(|(k, v)| Field {
                        key: k.clone(),
                        value: display_value(v),
                    })
                    .collect(),
            },
            other => Row {
                key: key.clone(),
                value: display_value(other),
                nested: Vec::new(),
            },
        })
        .collect()
}

pub fn render(approval: &PendingApproval, locale: Locale) -> Result<String> {
    let templates = render::templates();
    let content = templates.render(
        &View::ApprovalDialog.to_string(),
        &json!({
            "title": locale.text(Text::ApprovalTitle),
            "description": approval.description,
            "details_label": locale.text(Text::ApprovalDetails),
            "rows": rows(&approval.data),
            "choices": locale.text(Text::ApprovalChoices),
        }),
    )?;

    Ok(content.trim().to_string())
}
