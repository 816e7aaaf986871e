use anyhow::{Context, Result};
use rustyline::DefaultEditor;

use super::{backend, logged_in_user, read_line};
use crate::client::SupportBackend;
use crate::core::AppConfig;
use crate::history::{Feedback, HistoryView};
use crate::i18n::{Locale, Text};

pub async fn run(config: &AppConfig, page: usize) -> Result<()> {
    let Some(user) = logged_in_user(config) else {
        return Ok(());
    };
    let backend = backend(config);

    let mut view = load(backend.as_ref(), &user.id, config.locale).await;
    view.go_to(page);
    println!("{}", view.render(config.locale)?);

    Ok(())
}

pub async fn feedback(config: &AppConfig, id: &str, value: Feedback) -> Result<()> {
    let Some(user) = logged_in_user(config) else {
        return Ok(());
    };
    let backend = backend(config);
    let locale = config.locale;

    let mut view = HistoryView::load(backend.as_ref(), &user.id).await;
    view.submit_feedback(backend.as_ref(), id, value)
        .await
        .with_context(|| locale.text(Text::FeedbackFailed))?;
    println!("{}", locale.text(Text::FeedbackSaved));

    Ok(())
}

pub async fn load(backend: &dyn SupportBackend, user_id: &str, locale: Locale) -> HistoryView {
    println!("{}", locale.text(Text::HistoryLoading));
    HistoryView::load(backend, user_id).await
}

/// Rate an item from the interactive shell. A failure is shown as an
/// alert that has to be acknowledged before going on.
pub async fn rate(
    rl: &mut DefaultEditor,
    view: &mut HistoryView,
    backend: &dyn SupportBackend,
    id: &str,
    feedback: Feedback,
    locale: Locale,
) -> Result<()> {
    match view.submit_feedback(backend, id, feedback).await {
        Ok(()) => println!("{}", view.render(locale)?),
        Err(err) => {
            tracing::error!("Feedback error: {:#}", err);
            println!("\n! {}", locale.text(Text::FeedbackFailed));
            read_line(rl, locale.text(Text::PressEnter))?;
        }
    }

    Ok(())
}
