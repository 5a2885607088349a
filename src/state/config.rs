use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::model::NavigatorConfig;

/// Default margin for panel content (in virtual units, scaled by ui_scale)
pub const DEFAULT_PANEL_MARGIN: f32 = 8.0;

fn default_frame_folder() -> String {
    "assets/frames/".to_string()
}
fn default_frame_extension() -> String {
    "png".to_string()
}
fn default_frame_count() -> usize {
    93
}
fn default_settle_ms() -> u64 {
    100
}
fn default_repeat_ms() -> u64 {
    150
}
fn default_zoom_step() -> f32 {
    0.2
}
fn default_min_selection() -> f32 {
    5.0
}
fn default_endpoint() -> String {
    "http://localhost:8000".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_manual_path() -> String {
    "assets/manual/owner_manual.pdf".to_string()
}
fn default_manual_pages() -> u32 {
    400
}
pub fn default_ui_scale() -> f32 {
    1.0
}

/// App configuration stored on disk. Frame layout, navigator timings and the
/// assistant endpoint all vary per deployment, so none of them are hardcoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Frame assets live at `<folder><prefix><n>.<ext>` for n in 1..=count
    #[serde(default = "default_frame_folder")]
    pub frame_folder: String,
    #[serde(default)]
    pub frame_prefix: String,
    #[serde(default = "default_frame_extension")]
    pub frame_extension: String,
    #[serde(default = "default_frame_count")]
    pub frame_count: usize,

    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
    #[serde(default = "default_repeat_ms")]
    pub repeat_interval_ms: u64,
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f32,
    /// Zoom ceiling; None keeps zoom unbounded
    #[serde(default)]
    pub max_zoom: Option<f32>,

    #[serde(default = "default_min_selection")]
    pub min_selection_px: f32,

    /// Base URL of the explanation/chat backend
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_manual_path")]
    pub manual_path: String,
    #[serde(default = "default_manual_pages")]
    pub manual_pages: u32,

    #[serde(default = "default_ui_scale")]
    pub ui_scale: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            frame_folder: default_frame_folder(),
            frame_prefix: String::new(),
            frame_extension: default_frame_extension(),
            frame_count: default_frame_count(),
            settle_ms: default_settle_ms(),
            repeat_interval_ms: default_repeat_ms(),
            zoom_step: default_zoom_step(),
            max_zoom: None,
            min_selection_px: default_min_selection(),
            endpoint: default_endpoint(),
            request_timeout_secs: default_timeout_secs(),
            manual_path: default_manual_path(),
            manual_pages: default_manual_pages(),
            ui_scale: default_ui_scale(),
        }
    }
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("APPDATA").ok().map(|appdata| {
                PathBuf::from(appdata)
                    .join("ShowroomStudio")
                    .join("config.json")
            })
        }
        #[cfg(not(target_os = "windows"))]
        {
            std::env::var("HOME").ok().map(|home| {
                PathBuf::from(home)
                    .join(".config")
                    .join("showroom-studio")
                    .join("config.json")
            })
        }
    }

    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| fs::read_to_string(&path).ok())
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }

    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            if let Ok(json) = serde_json::to_string_pretty(self) {
                let _ = fs::write(&path, json);
            }
        }
    }

    pub fn navigator_config(&self) -> NavigatorConfig {
        NavigatorConfig {
            settle: Duration::from_millis(self.settle_ms),
            repeat_interval: Duration::from_millis(self.repeat_interval_ms),
            zoom_step: self.zoom_step,
            max_zoom: self.max_zoom,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
