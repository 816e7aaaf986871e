//! Login against the static user list and the stored session.
//!
//! There is no real security here: passwords are compared in
//! plaintext against `users.json`. What gets stored after a login is
//! the user record with the password removed.

pub mod directory;
pub mod store;

use serde::{Deserialize, Serialize};

use crate::core::de::string_or_number;
use crate::i18n::{Locale, Text};
pub use directory::UserDirectory;
pub use store::SessionStore;

/// A logged in user. Never carries the password.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct User {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub username: String,
    pub name: String,
    pub role: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }

    /// First character of the display name, used as an avatar
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .or_else(|| self.username.chars().next())
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default()
    }
}

/// An entry in the users file
#[derive(Clone, Deserialize, Debug)]
pub struct UserRecord {
    pub username: String,
    pub password: String,
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    String::from("user")
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        User {
            id: record.id,
            username: record.username,
            name: record.name,
            role: record.role,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct UsersFile {
    pub users: Vec<UserRecord>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LoginResult {
    Success(User),
    Failure { message: String },
}

impl LoginResult {
    pub fn is_success(&self) -> bool {
        matches!(self, LoginResult::Success(_))
    }
}

pub struct AuthService {
    directory: UserDirectory,
    store: SessionStore,
    locale: Locale,
}

impl AuthService {
    pub fn new(directory: UserDirectory, store: SessionStore, locale: Locale) -> Self {
        Self {
            directory,
            store,
            locale,
        }
    }

    /// Check the credentials and store the session on a match. Any
    /// problem is reported as a `Failure` with a message that can be
    /// shown to the user as-is.
    pub async fn login(&self, username: &str, password: &str) -> LoginResult {
        let found = match self.directory.find(username, password).await {
            Ok(found) => found,
            Err(err) => {
                tracing::error!("Login error: {:#}", err);
                return self.failure(Text::LoginError);
            }
        };

        let Some(user) = found else {
            tracing::debug!("Credential mismatch for {}", username);
            return self.failure(Text::InvalidCredentials);
        };

        if let Err(err) = self.store.save(&user) {
            tracing::error!("Failed to store session: {:#}", err);
            return self.failure(Text::LoginError);
        }

        LoginResult::Success(user)
    }

    pub fn current_user(&self) -> Option<User> {
        self.store.load()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    pub fn logout(&self) -> anyhow::Result<()> {
        self.store.clear()
    }

    fn failure(&self, key: Text) -> LoginResult {
        LoginResult::Failure {
            message: self.locale.text(key).to_string(),
        }
    }
}
