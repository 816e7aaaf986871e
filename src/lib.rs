pub mod approval;
pub mod auth;
pub mod chat;
pub mod cli;
pub mod client;
pub mod core;
pub mod history;
pub mod i18n;
pub mod render;
pub mod shell;
