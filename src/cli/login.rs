use anyhow::{Result, bail};
use rustyline::DefaultEditor;

use super::{auth_service, read_line};
use crate::auth::LoginResult;
use crate::core::AppConfig;
use crate::i18n::{Locale, Text};
use crate::shell::AppShell;

pub async fn run(config: &AppConfig, username: &str, password: Option<String>) -> Result<()> {
    let locale = config.locale;
    let password = match password {
        Some(password) => password,
        None => {
            let mut rl = DefaultEditor::new()?;
            match read_line(&mut rl, locale.text(Text::PasswordPrompt))? {
                Some(password) => password,
                None => return Ok(()),
            }
        }
    };

    println!("{}", locale.text(Text::LoggingIn));
    match auth_service(config).login(username, &password).await {
        LoginResult::Success(user) => {
            println!(
                "{} {} ({})",
                locale.text(Text::LoginSucceeded),
                user.name,
                user.username
            );
            Ok(())
        }
        LoginResult::Failure { message } => bail!(message),
    }
}

pub fn logout(config: &AppConfig) -> Result<()> {
    auth_service(config).logout()?;
    println!("{}", config.locale.text(Text::LoggedOut));
    Ok(())
}

pub fn whoami(config: &AppConfig) {
    if let Some(user) = super::logged_in_user(config) {
        println!("{} ({}, {}) id={}", user.name, user.username, user.role, user.id);
    }
}

/// Ask for credentials until a login succeeds. Returns `false` if the
/// user gave up with Ctrl-C or Ctrl-D.
pub async fn prompt(rl: &mut DefaultEditor, shell: &mut AppShell, locale: Locale) -> Result<bool> {
    println!("{}", locale.text(Text::AppTitle));
    println!("{}", locale.text(Text::AppSubtitle));
    println!("{}\n", locale.text(Text::TestAccountHint));

    loop {
        let Some(username) = read_line(rl, locale.text(Text::UsernamePrompt))? else {
            return Ok(false);
        };
        let Some(password) = read_line(rl, locale.text(Text::PasswordPrompt))? else {
            return Ok(false);
        };

        println!("{}", locale.text(Text::LoggingIn));
        match shell.login(username.trim(), &password).await {
            LoginResult::Success(user) => {
                println!("{} {}\n", locale.text(Text::LoginSucceeded), user.name);
                return Ok(true);
            }
            LoginResult::Failure { message } => println!("{}\n", message),
        }
    }
}
