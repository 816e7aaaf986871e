use std::path::PathBuf;

use anyhow::{Context, Result};

use super::{User, UserRecord, UsersFile};

/// Where the static user list lives: a local file or a URL serving
/// the same JSON document.
#[derive(Clone, Debug, PartialEq)]
pub enum UserDirectory {
    File(PathBuf),
    Remote(String),
}

impl UserDirectory {
    pub fn from_source(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            UserDirectory::Remote(source.to_string())
        } else {
            UserDirectory::File(PathBuf::from(source))
        }
    }

    pub async fn load(&self) -> Result<Vec<UserRecord>> {
        let body = match self {
            UserDirectory::File(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read users from {}", path.display()))?,
            UserDirectory::Remote(url) => reqwest::Client::new()
                .get(url)
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?,
        };

        let users: UsersFile =
            serde_json::from_str(&body).with_context(|| "Attempted to parse users from json")?;

        Ok(users.users)
    }

    /// Look up a user by exact username and password match.
    pub async fn find(&self, username: &str, password: &str) -> Result<Option<User>> {
        let user = self
            .load()
            .await?
            .into_iter()
            .find(|u| u.username == username && u.password == password)
            .map(User::from);

        Ok(user)
    }
}
