use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub tasks: TaskConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Where the auth endpoints live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Connect/read timeout for each auth request, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskConfig {
    /// Tasks shown per page on the Tasks screen
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for TaskConfig {
    fn default() -> Self {
        TaskConfig {
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// tracing filter directive; `PMS_LOG` overrides it
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Palette overrides, e.g. `primary = "#646cff"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Drop the key hint line from the status row
    #[serde(default)]
    pub hide_key_hints: bool,
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_page_size() -> usize {
    9
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:3000/api");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.tasks.page_size, 9);
        assert_eq!(config.log.level, "warn");
        assert!(config.ui.colors.is_empty());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: AppConfig = toml::from_str(
            r##"[api]
timeout_secs = 3

[ui.colors]
primary = "#112233"
"##,
        )
        .unwrap();
        assert_eq!(config.api.timeout_secs, 3);
        assert_eq!(config.api.base_url, "http://localhost:3000/api");
        assert_eq!(config.ui.colors.get("primary").map(String::as_str), Some("#112233"));
    }
}
