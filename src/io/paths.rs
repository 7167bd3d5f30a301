use std::path::{Path, PathBuf};

/// Environment variable that points pms at a home directory
pub const HOME_ENV: &str = "PMS_HOME";

/// Resolved locations of the files pms reads and writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PmsPaths {
    pub home: PathBuf,
}

impl PmsPaths {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        PmsPaths { home: home.into() }
    }

    /// Pick the home directory: explicit override, then `PMS_HOME`, then
    /// `$XDG_CONFIG_HOME/pms`, then `$HOME/.config/pms`
    pub fn resolve(override_dir: Option<&Path>) -> Self {
        if let Some(dir) = override_dir {
            return PmsPaths::new(dir);
        }
        if let Ok(dir) = std::env::var(HOME_ENV)
            && !dir.is_empty()
        {
            return PmsPaths::new(dir);
        }
        let config_dir = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| dirs_home().join(".config"));
        PmsPaths::new(config_dir.join("pms"))
    }

    pub fn config_file(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Key/value store standing in for browser local storage
    pub fn storage_file(&self) -> PathBuf {
        self.home.join("storage.json")
    }

    pub fn log_file_name(&self) -> &'static str {
        "pms.log"
    }
}

/// Get the user's home directory
fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}
