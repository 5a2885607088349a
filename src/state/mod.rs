mod app_state;
mod config;
mod types;

pub use app_state::AppState;
pub use config::{AppConfig, DEFAULT_PANEL_MARGIN};
pub use types::{ActiveTab, ChatMessage, ChatRole, PendingChat};
