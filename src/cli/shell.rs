use anyhow::Result;
use rustyline::DefaultEditor;

use super::{PROMPT, auth_service, backend, chat, history, login, read_line};
use crate::chat::ChatSession;
use crate::core::AppConfig;
use crate::history::HistoryView;
use crate::i18n::{Locale, Text};
use crate::shell::{AppShell, Command, View};

fn print_sidebar(shell: &AppShell, locale: Locale) -> Result<()> {
    if let Some(sidebar) = shell.sidebar(locale)? {
        println!("{}\n", sidebar);
    }
    Ok(())
}

/// The full interactive client: log in if needed, then chat and
/// browse history until the user quits.
pub async fn run(config: &AppConfig) -> Result<()> {
    let locale = config.locale;
    let backend = backend(config);
    let mut shell = AppShell::restore(auth_service(config));
    let mut rl = DefaultEditor::new()?;

    'app: loop {
        if !shell.is_logged_in() && !login::prompt(&mut rl, &mut shell, locale).await? {
            break;
        }
        let Some(user) = shell.user().cloned() else {
            continue;
        };
        print_sidebar(&shell, locale)?;

        let mut session = ChatSession::new(backend.clone(), user.clone(), locale);
        let mut history_view: Option<HistoryView> = None;

        while let Some(line) = read_line(&mut rl, PROMPT)? {
            match Command::parse(&line) {
                None => {
                    shell.navigate(View::Chat);
                    chat::send(&mut rl, &mut session, &line, locale).await?;
                }
                Some(Command::Chat) => {
                    shell.navigate(View::Chat);
                    for message in session.messages() {
                        println!("{}", crate::render::message(message, locale));
                    }
                }
                Some(Command::History) => {
                    shell.navigate(View::History);
                    let view = history::load(backend.as_ref(), &user.id, locale).await;
                    println!("{}", view.render(locale)?);
                    history_view = Some(view);
                }
                Some(cmd @ (Command::Next | Command::Prev)) => {
                    if let Some(view) = history_view
                        .as_mut()
                        .filter(|_| shell.view() == View::History)
                    {
                        if cmd == Command::Next {
                            view.next_page();
                        } else {
                            view.prev_page();
                        }
                        println!("{}", view.render(locale)?);
                    }
                }
                Some(Command::Rate { id, feedback }) => {
                    if let Some(view) = history_view
                        .as_mut()
                        .filter(|_| shell.view() == View::History)
                    {
                        history::rate(&mut rl, view, backend.as_ref(), &id, feedback, locale)
                            .await?;
                    }
                }
                Some(Command::Sidebar) => {
                    shell.toggle_sidebar();
                    print_sidebar(&shell, locale)?;
                }
                Some(Command::Logout) => {
                    shell.logout()?;
                    println!("{}\n", locale.text(Text::LoggedOut));
                    continue 'app;
                }
                Some(Command::Help) => println!("{}", locale.text(Text::Help)),
                Some(Command::Quit) => break 'app,
                Some(Command::Unknown(_)) => println!("{}", locale.text(Text::UnknownCommand)),
            }
        }

        break;
    }

    Ok(())
}
