use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

pub mod chat;
pub mod history;
pub mod login;
pub mod shell;

use crate::auth::{AuthService, SessionStore, User, UserDirectory};
use crate::client::{ApiClient, SupportBackend};
use crate::core::{AppConfig, logging};
use crate::history::Feedback;
use crate::i18n::{Locale, Text};

pub const PROMPT: &str = ">>> ";

#[derive(Subcommand)]
enum Command {
    /// Log in with an account from the users file
    Login {
        #[arg(long)]
        username: String,

        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout {},
    /// Show who is logged in
    Whoami {},
    /// Start a chat session
    Chat {},
    /// Show a page of past conversations
    History {
        #[arg(long, default_value = "1")]
        page: usize,
    },
    /// Rate a past answer
    Feedback {
        #[arg(long)]
        id: String,
        #[arg(long, value_enum)]
        value: Feedback,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Backend base URL, overrides SMARTCS_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Language for messages, overrides SMARTCS_LOCALE
    #[arg(long, global = true, value_enum)]
    locale: Option<Locale>,

    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();
    logging::init();

    let mut config = AppConfig::default();
    if let Some(api_url) = args.api_url {
        config.api_base_url = api_url;
    }
    if let Some(locale) = args.locale {
        config.locale = locale;
    }

    // Handle each sub command
    match args.command {
        Some(Command::Login { username, password }) => {
            login::run(&config, &username, password).await?;
        }
        Some(Command::Logout {}) => {
            login::logout(&config)?;
        }
        Some(Command::Whoami {}) => {
            login::whoami(&config);
        }
        Some(Command::Chat {}) => {
            chat::run(&config).await?;
        }
        Some(Command::History { page }) => {
            history::run(&config, page).await?;
        }
        Some(Command::Feedback { id, value }) => {
            history::feedback(&config, &id, value).await?;
        }
        None => {
            shell::run(&config).await?;
        }
    }

    Ok(())
}

pub fn auth_service(config: &AppConfig) -> AuthService {
    AuthService::new(
        UserDirectory::from_source(&config.users_source),
        SessionStore::new(config.session_path()),
        config.locale,
    )
}

pub fn backend(config: &AppConfig) -> Arc<dyn SupportBackend> {
    Arc::new(ApiClient::new(&config.api_base_url, config.locale))
}

/// The stored user, or a hint to log in first
fn logged_in_user(config: &AppConfig) -> Option<User> {
    let user = auth_service(config).current_user();
    if user.is_none() {
        println!("{}", config.locale.text(Text::NotLoggedIn));
    }
    user
}

/// Read a line, treating Ctrl-C and Ctrl-D as the end of input
pub(crate) fn read_line(rl: &mut DefaultEditor, prompt: &str) -> Result<Option<String>> {
    match rl.readline(prompt) {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(err) => Err(err.into()),
    }
}
