//! Test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::sync::Arc;

use tempfile::TempDir;

use smartcs::auth::User;
use smartcs::client::{ApiClient, SupportBackend};
use smartcs::core::AppConfig;
use smartcs::i18n::Locale;

pub const USERS_JSON: &str = r#"{
  "users": [
    {"username": "admin", "password": "admin123", "id": "user_001", "name": "관리자", "role": "admin"},
    {"username": "kim", "password": "kim123", "id": "user_002", "name": "김철수", "role": "user"}
  ]
}"#;

/// Config pointing at a mock backend with a users file and session
/// storage in a fresh temporary directory. Keep the `TempDir` alive
/// for as long as the config is used.
pub fn test_config(api_base_url: &str) -> (TempDir, AppConfig) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let users_path = dir.path().join("users.json");
    fs::write(&users_path, USERS_JSON).expect("Failed to write users file");

    let config = AppConfig {
        api_base_url: api_base_url.to_string(),
        users_source: users_path.display().to_string(),
        storage_path: dir.path().join("storage").display().to_string(),
        locale: Locale::Ko,
    };
    (dir, config)
}

pub fn test_backend(config: &AppConfig) -> Arc<dyn SupportBackend> {
    Arc::new(ApiClient::new(&config.api_base_url, config.locale))
}

pub fn test_user() -> User {
    User {
        id: String::from("user_001"),
        username: String::from("admin"),
        name: String::from("관리자"),
        role: String::from("admin"),
    }
}
