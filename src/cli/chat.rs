use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rustyline::DefaultEditor;

use super::{PROMPT, backend, logged_in_user, read_line};
use crate::approval::{self, Decision};
use crate::chat::{ChatSession, Role, SendOutcome};
use crate::core::AppConfig;
use crate::i18n::{Locale, Text};
use crate::render;
use crate::shell::Command;

pub async fn run(config: &AppConfig) -> Result<()> {
    let Some(user) = logged_in_user(config) else {
        return Ok(());
    };
    let locale = config.locale;
    let mut rl = DefaultEditor::new()?;
    let mut session = ChatSession::new(backend(config), user, locale);

    while let Some(line) = read_line(&mut rl, PROMPT)? {
        if Command::parse(&line) == Some(Command::Quit) {
            break;
        }
        send(&mut rl, &mut session, &line, locale).await?;
    }

    Ok(())
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Send one line, print the reply, then walk the user through the
/// approval if the reply opened one. Nothing is read from the prompt
/// while the request is in flight.
pub async fn send(
    rl: &mut DefaultEditor,
    session: &mut ChatSession,
    line: &str,
    locale: Locale,
) -> Result<()> {
    let before = session.messages().len();

    let pb = spinner(locale.text(Text::Sending));
    let outcome = session.send(line).await;
    pb.finish_and_clear();

    if outcome == SendOutcome::Ignored {
        return Ok(());
    }

    // The user's own line is already on screen
    for message in &session.messages()[before..] {
        if message.role != Role::User {
            println!("{}", render::message(message, locale));
        }
    }

    if session.pending_approval().is_some() {
        approve(rl, session, locale).await?;
    }

    Ok(())
}

async fn approve(rl: &mut DefaultEditor, session: &mut ChatSession, locale: Locale) -> Result<()> {
    let Some(pending) = session.pending_approval() else {
        return Ok(());
    };
    println!("\n{}\n", approval::render(pending, locale)?);

    let decision = loop {
        match read_line(rl, PROMPT)? {
            Some(input) => match Decision::parse(&input) {
                Some(decision) => break decision,
                None => println!("{}", locale.text(Text::ApprovalChoices)),
            },
            // Walking away from the dialog cancels the request
            None => break Decision::Reject,
        }
    };

    if let Some(message) = session.resolve_approval(decision).await {
        println!("{}", render::message(message, locale));
    }

    Ok(())
}
