//! App shell state: who is logged in, which view is showing and
//! whether the sidebar is open. Also parses the slash commands typed
//! at the prompt.

use anyhow::Result;
use serde_json::json;

use crate::auth::{AuthService, LoginResult, User};
use crate::history::Feedback;
use crate::i18n::{Locale, Text};
use crate::render::{self, View as Template};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Chat,
    History,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Chat,
    History,
    Next,
    Prev,
    Rate { id: String, feedback: Feedback },
    Sidebar,
    Logout,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    /// Returns `None` for anything that isn't a slash command, i.e.
    /// text meant for the chat.
    pub fn parse(line: &str) -> Option<Command> {
        let line = line.trim();
        let rest = line.strip_prefix('/')?;
        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();

        let command = match (name, arg) {
            ("chat", _) => Command::Chat,
            ("history", _) => Command::History,
            ("next", _) => Command::Next,
            ("prev", _) => Command::Prev,
            ("good", Some(id)) => Command::Rate {
                id: id.to_string(),
                feedback: Feedback::Good,
            },
            ("bad", Some(id)) => Command::Rate {
                id: id.to_string(),
                feedback: Feedback::Bad,
            },
            ("sidebar", _) => Command::Sidebar,
            ("logout", _) => Command::Logout,
            ("help", _) => Command::Help,
            ("quit" | "exit", _) => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        };

        Some(command)
    }
}

pub struct AppShell {
    auth: AuthService,
    user: Option<User>,
    view: View,
    sidebar_open: bool,
}

impl AppShell {
    /// Start from whatever session is already stored
    pub fn restore(auth: AuthService) -> Self {
        let user = auth.current_user();
        Self {
            auth,
            user,
            view: View::Chat,
            sidebar_open: true,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub async fn login(&mut self, username: &str, password: &str) -> LoginResult {
        let result = self.auth.login(username, password).await;
        if let LoginResult::Success(user) = &result {
            tracing::debug!("Logged in as {}", user.username);
            self.user = Some(user.clone());
            self.view = View::Chat;
        }
        result
    }

    pub fn logout(&mut self) -> Result<()> {
        self.user = None;
        self.view = View::Chat;
        self.auth.logout()
    }

    /// Switch views. Nothing is reachable while logged out.
    pub fn navigate(&mut self, view: View) -> bool {
        if !self.is_logged_in() {
            return false;
        }
        self.view = view;
        true
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_open = !self.sidebar_open;
        self.sidebar_open
    }

    /// The sidebar for the current user, or `None` when it's hidden
    /// or nobody is logged in.
    pub fn sidebar(&self, locale: Locale) -> Result<Option<String>> {
        let Some(user) = self.user.as_ref().filter(|_| self.sidebar_open) else {
            return Ok(None);
        };

        let role = if user.is_admin() {
            locale.text(Text::RoleAdmin)
        } else {
            locale.text(Text::RoleUser)
        };
        let in_development = format!(" ({})", locale.text(Text::InDevelopment));
        let marker = |active: bool| if active { "*" } else { " " };
        let menu = json!([
            {"marker": marker(self.view == View::Chat), "label": format!("/chat {}", locale.text(Text::MenuChat)), "note": ""},
            {"marker": marker(self.view == View::History), "label": format!("/history {}", locale.text(Text::MenuHistory)), "note": ""},
            {"marker": marker(false), "label": locale.text(Text::MenuSettings), "note": in_development},
        ]);

        let templates = render::templates();
        let content = templates.render(
            &Template::Sidebar.to_string(),
            &json!({
                "app": locale.text(Text::AppTitle),
                "initial": user.initial(),
                "name": user.name,
                "role": role,
                "menu": menu,
                "logout": locale.text(Text::Logout),
            }),
        )?;

        Ok(Some(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{SessionStore, UserDirectory, store::SESSION_FILE_NAME};
    use std::fs;
    use tempfile::TempDir;

    fn shell_in(dir: &TempDir) -> AppShell {
        let users_path = dir.path().join("users.json");
        fs::write(
            &users_path,
            r#"{"users": [{"username": "admin", "password": "admin123", "id": "user_001", "name": "관리자", "role": "admin"}]}"#,
        )
        .unwrap();
        let auth = AuthService::new(
            UserDirectory::File(users_path),
            SessionStore::new(dir.path().join(SESSION_FILE_NAME)),
            Locale::Ko,
        );
        AppShell::restore(auth)
    }

    #[test]
    fn it_parses_commands() {
        assert_eq!(Command::parse("환불해 주세요"), None);
        assert_eq!(Command::parse(" /history "), Some(Command::History));
        assert_eq!(
            Command::parse("/good 1737770000000"),
            Some(Command::Rate {
                id: String::from("1737770000000"),
                feedback: Feedback::Good
            })
        );
        assert_eq!(
            Command::parse("/bad"),
            Some(Command::Unknown(String::from("/bad")))
        );
        assert_eq!(Command::parse("/exit"), Some(Command::Quit));
        assert_eq!(
            Command::parse("/dance"),
            Some(Command::Unknown(String::from("/dance")))
        );
    }

    #[tokio::test]
    async fn it_routes_only_when_logged_in() {
        let dir = TempDir::new().unwrap();
        let mut shell = shell_in(&dir);

        assert!(!shell.is_logged_in());
        assert!(!shell.navigate(View::History));
        assert_eq!(shell.view(), View::Chat);
        assert_eq!(shell.sidebar(Locale::Ko).unwrap(), None);

        assert!(shell.login("admin", "admin123").await.is_success());
        assert!(shell.navigate(View::History));
        assert_eq!(shell.view(), View::History);

        shell.logout().unwrap();
        assert!(!shell.is_logged_in());
        assert_eq!(shell.view(), View::Chat);
    }

    #[tokio::test]
    async fn it_restores_a_stored_session() {
        let dir = TempDir::new().unwrap();
        let mut shell = shell_in(&dir);
        assert!(shell.login("admin", "admin123").await.is_success());

        let restored = shell_in(&dir);
        assert_eq!(restored.user().map(|u| u.id.as_str()), Some("user_001"));

        shell.logout().unwrap();
        assert!(shell_in(&dir).user().is_none());
    }

    #[tokio::test]
    async fn it_renders_and_toggles_the_sidebar() {
        let dir = TempDir::new().unwrap();
        let mut shell = shell_in(&dir);
        shell.login("admin", "admin123").await;
        shell.navigate(View::History);

        let expected = "=== Smart CS Agent ===\n[관] 관리자 (관리자)\n   /chat 채팅\n * /history 대화 기록\n   설정 (개발 중)\n\n/logout  로그아웃";
        assert_eq!(shell.sidebar(Locale::Ko).unwrap().unwrap(), expected);

        assert!(!shell.toggle_sidebar());
        assert_eq!(shell.sidebar(Locale::Ko).unwrap(), None);
        assert!(shell.toggle_sidebar());
    }
}
