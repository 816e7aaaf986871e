pub mod config;
pub mod de;
pub mod logging;

pub use config::AppConfig;
