//! Terminal views rendered with Handlebars. Block tags are kept on
//! the same line as other content so whitespace in the output is
//! exactly what the template spells out.

use std::fmt;

use chrono::Local;
use handlebars::Handlebars;

use crate::chat::{Message, Role};
use crate::i18n::{Locale, Text};

#[derive(Debug)]
pub enum View {
    ApprovalDialog,
    HistoryPage,
    Sidebar,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

const APPROVAL_DIALOG: &str = "=== {{title}} ===\n{{description}}{{#if rows}}\n\n{{details_label}}{{#each rows}}\n  {{key}}:{{#if nested}}{{#each nested}}\n    {{key}}: {{value}}{{/each}}{{else}} {{value}}{{/if}}{{/each}}{{/if}}\n\n{{choices}}";

const HISTORY_PAGE: &str = "=== {{title}} ==={{#if items}}{{#each items}}\n\n{{number}}. [{{timestamp}}] {{intent}} (id: {{id}})\n   {{@root.query_label}} {{query}}\n   {{@root.result_label}} {{response}}\n   {{@root.rating_label}} {{good}}  {{bad}}{{/each}}{{else}}\n\n{{empty_text}}{{/if}}{{#if pagination}}\n\n{{prev}}  {{page_info}}  {{next}}{{/if}}";

const SIDEBAR: &str = "=== {{app}} ===\n[{{initial}}] {{name}} ({{role}}){{#each menu}}\n {{marker}} {{label}}{{note}}{{/each}}\n\n/logout  {{logout}}";

pub fn templates<'a>() -> Handlebars<'a> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    // Output goes to a terminal, not a browser
    registry.register_escape_fn(handlebars::no_escape);
    registry
        .register_template_string(&View::ApprovalDialog.to_string(), APPROVAL_DIALOG)
        .expect("Failed to register template");
    registry
        .register_template_string(&View::HistoryPage.to_string(), HISTORY_PAGE)
        .expect("Failed to register template");
    registry
        .register_template_string(&View::Sidebar.to_string(), SIDEBAR)
        .expect("Failed to register template");
    registry
}

fn speaker(role: Role, locale: Locale) -> &'static str {
    match role {
        Role::User => locale.text(Text::SpeakerUser),
        Role::Assistant => locale.text(Text::SpeakerAssistant),
        Role::System => locale.text(Text::SpeakerSystem),
    }
}

/// One chat message as printed in the thread, with the intent and
/// confidence underneath assistant replies.
pub fn message(message: &Message, locale: Locale) -> String {
    let time = message.timestamp.with_timezone(&Local).format("%H:%M");
    let mut out = format!(
        "[{}] {}: {}",
        time,
        speaker(message.role, locale),
        message.content
    );

    if let Some(metadata) = &message.metadata {
        let agent = metadata
            .agent_type
            .as_deref()
            .unwrap_or(locale.text(Text::IntentGeneral));
        out.push_str(&format!(
            "\n    ({} · {} {:.0}%)",
            agent,
            locale.text(Text::Confidence),
            metadata.confidence * 100.0
        ));
        if metadata.blocked {
            out.push_str(&format!(" [{}]", locale.text(Text::Blocked)));
        }
    }

    out
}
