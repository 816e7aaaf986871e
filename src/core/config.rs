use std::env;
use std::path::{Path, PathBuf};

use crate::auth::store::SESSION_FILE_NAME;
use crate::i18n::Locale;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub users_source: String,
    pub storage_path: String,
    pub locale: Locale,
}

impl AppConfig {
    /// Location of the stored login session
    pub fn session_path(&self) -> PathBuf {
        Path::new(&self.storage_path).join(SESSION_FILE_NAME)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let host = "127.0.0.1";
        let port = "8000";
        let api_base_url =
            env::var("SMARTCS_API_URL").unwrap_or_else(|_| format!("http://{}:{}", host, port));
        let users_source =
            env::var("SMARTCS_USERS_SOURCE").unwrap_or_else(|_| "./users.json".to_string());
        let storage_path = env::var("SMARTCS_STORAGE_PATH").unwrap_or("./".to_string());
        let locale = match env::var("SMARTCS_LOCALE") {
            Ok(value) => value.parse().unwrap_or_else(|err| {
                tracing::warn!("Ignoring SMARTCS_LOCALE: {}", err);
                Locale::default()
            }),
            Err(_) => Locale::default(),
        };

        Self {
            api_base_url,
            users_source,
            storage_path,
            locale,
        }
    }
}
