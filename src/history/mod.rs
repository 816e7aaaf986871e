//! Past interactions for the logged in user, paginated client-side.

use std::fmt;
use std::str::FromStr;

use anyhow::{Error, Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::SupportBackend;
use crate::core::de::{empty_as_none, string_or_number};
use crate::i18n::{Locale, Text};
use crate::render::{self, View};

pub const PAGE_SIZE: usize = 15;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Feedback {
    #[serde(rename = "good")]
    Good,
    #[serde(rename = "bad")]
    Bad,
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Feedback::Good => write!(f, "good"),
            Feedback::Bad => write!(f, "bad"),
        }
    }
}

impl FromStr for Feedback {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "good" => Ok(Feedback::Good),
            "bad" => Ok(Feedback::Bad),
            other => Err(anyhow!("Unknown feedback: {}", other)),
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct HistoryItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub response: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub intent: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub feedback: Option<Feedback>,
}

#[derive(Debug)]
pub struct HistoryView {
    items: Vec<HistoryItem>,
    current_page: usize,
    load_failed: bool,
}

impl HistoryView {
    pub fn new(items: Vec<HistoryItem>) -> Self {
        Self {
            items,
            current_page: 1,
            load_failed: false,
        }
    }

    /// Fetch the user's history once. A failed fetch leaves the view
    /// empty rather than erroring.
    pub async fn load(backend: &dyn SupportBackend, user_id: &str) -> Self {
        match backend.get_history(user_id).await {
            Ok(items) => Self::new(items),
            Err(err) => {
                tracing::error!("Failed to load history: {:#}", err);
                Self {
                    load_failed: true,
                    ..Self::new(Vec::new())
                }
            }
        }
    }

    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(PAGE_SIZE)
    }

    /// Pagination controls only make sense past a single page
    pub fn has_pagination(&self) -> bool {
        self.items.len() > PAGE_SIZE
    }

    pub fn current_items(&self) -> &[HistoryItem] {
        let start = (self.current_page - 1) * PAGE_SIZE;
        let end = (start + PAGE_SIZE).min(self.items.len());
        self.items.get(start..end).unwrap_or(&[])
    }

    pub fn go_to(&mut self, page: usize) -> usize {
        self.current_page = page.clamp(1, self.total_pages().max(1));
        self.current_page
    }

    pub fn next_page(&mut self) -> usize {
        self.go_to(self.current_page + 1)
    }

    pub fn prev_page(&mut self) -> usize {
        self.go_to(self.current_page.saturating_sub(1))
    }

    /// Record feedback locally right away and send it to the
    /// backend. If the backend call fails the previous value is put
    /// back and the error is returned for the caller to report.
    pub async fn submit_feedback(
        &mut self,
        backend: &dyn SupportBackend,
        id: &str,
        feedback: Feedback,
    ) -> Result<()> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| anyhow!("No history item with id {}", id))?;
        let previous = item.feedback.replace(feedback);

        if let Err(err) = backend.send_feedback(id, feedback).await {
            if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
                item.feedback = previous;
            }
            return Err(err);
        }

        Ok(())
    }

    /// Render the current page
    pub fn render(&self, locale: Locale) -> Result<String> {
        let offset = (self.current_page - 1) * PAGE_SIZE;
        let marked = |label: Text, active: bool| {
            let label = locale.text(label);
            if active {
                format!("[{}]", label)
            } else {
                label.to_string()
            }
        };
        let items: Vec<_> = self
            .current_items()
            .iter()
            .enumerate()
            .map(|(i, item)| {
                json!({
                    "number": offset + i + 1,
                    "id": item.id,
                    "timestamp": item.timestamp,
                    "intent": item.intent.as_deref().unwrap_or(locale.text(Text::IntentGeneral)),
                    "query": item.query,
                    "response": item.response,
                    "good": marked(Text::Good, item.feedback == Some(Feedback::Good)),
                    "bad": marked(Text::Bad, item.feedback == Some(Feedback::Bad)),
                })
            })
            .collect();
        let empty_text = if self.load_failed {
            locale.text(Text::HistoryLoadFailed)
        } else {
            locale.text(Text::HistoryEmpty)
        };

        let templates = render::templates();
        let content = templates.render(
            &View::HistoryPage.to_string(),
            &json!({
                "title": locale.text(Text::HistoryTitle),
                "items": items,
                "query_label": locale.text(Text::QueryLabel),
                "result_label": locale.text(Text::ResultLabel),
                "rating_label": locale.text(Text::RatingLabel),
                "empty_text": empty_text,
                "pagination": self.has_pagination(),
                "prev": locale.text(Text::PrevPage),
                "next": locale.text(Text::NextPage),
                "page_info": locale.page_info(self.current_page, self.total_pages()),
            }),
        )?;

        Ok(content)
    }
}
