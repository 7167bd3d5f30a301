use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::AppConfig;

use super::storage::atomic_write;

/// Error type for config I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("could not parse config.toml: {0}")]
    DocumentError(#[from] toml_edit::TomlError),
    #[error("invalid config key: {0} (expected section.key, e.g. api.base_url)")]
    InvalidKey(String),
}

/// Read config.toml, falling back to defaults when the file does not exist
pub fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

/// Read config.toml as a toml_edit document for format-preserving edits.
/// A missing file gives an empty document.
pub fn read_config_doc(path: &Path) -> Result<toml_edit::DocumentMut, ConfigError> {
    if !path.exists() {
        return Ok(toml_edit::DocumentMut::new());
    }
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(text.parse()?)
}

/// Write the config document back to disk, preserving formatting.
pub fn write_config(path: &Path, doc: &toml_edit::DocumentMut) -> Result<(), ConfigError> {
    let write_err = |e: std::io::Error| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    atomic_write(path, doc.to_string().as_bytes()).map_err(write_err)
}

/// Set a dotted key such as `api.base_url` or `ui.colors.primary`.
///
/// Integers and booleans are stored as such, everything else as a string.
/// The result is re-parsed so a bad value never reaches disk.
pub fn set_value(doc: &mut toml_edit::DocumentMut, key: &str, raw: &str) -> Result<(), ConfigError> {
    let parts: Vec<&str> = key.split('.').collect();
    if parts.len() < 2 || parts.iter().any(|p| p.trim().is_empty()) {
        return Err(ConfigError::InvalidKey(key.to_string()));
    }

    let value = if let Ok(n) = raw.parse::<i64>() {
        toml_edit::value(n)
    } else if let Ok(b) = raw.parse::<bool>() {
        toml_edit::value(b)
    } else {
        toml_edit::value(raw)
    };

    let (leaf, tables) = parts.split_last().ok_or_else(|| ConfigError::InvalidKey(key.to_string()))?;
    let mut table = doc.as_table_mut();
    for name in tables {
        if !table.contains_key(name) {
            table.insert(name, toml_edit::Item::Table(toml_edit::Table::new()));
        }
        table = table[*name]
            .as_table_mut()
            .ok_or_else(|| ConfigError::InvalidKey(key.to_string()))?;
    }
    table[*leaf] = value;

    toml::from_str::<AppConfig>(&doc.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_config() -> &'static str {
        r##"# pms settings
[api]
base_url = "http://localhost:3000/api" # local dev server

[tasks]
page_size = 9
"##
    }

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = read_config(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config.tasks.page_size, 9);
    }

    #[test]
    fn test_round_trip_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, sample_config()).unwrap();

        let doc = read_config_doc(&path).unwrap();
        write_config(&path, &doc).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), sample_config());
    }

    #[test]
    fn set_value_keeps_comments() {
        let mut doc: toml_edit::DocumentMut = sample_config().parse().unwrap();
        set_value(&mut doc, "tasks.page_size", "12").unwrap();
        let result = doc.to_string();
        assert!(result.contains("page_size = 12"));
        assert!(result.contains("# local dev server"));
        let config: AppConfig = toml::from_str(&result).unwrap();
        assert_eq!(config.tasks.page_size, 12);
    }

    #[test]
    fn set_value_creates_nested_tables() {
        let mut doc = toml_edit::DocumentMut::new();
        set_value(&mut doc, "ui.colors.primary", "#112233").unwrap();
        set_value(&mut doc, "api.base_url", "https://pms.example.com/api").unwrap();
        let config: AppConfig = toml::from_str(&doc.to_string()).unwrap();
        assert_eq!(config.ui.colors.get("primary").map(String::as_str), Some("#112233"));
        assert_eq!(config.api.base_url, "https://pms.example.com/api");
    }

    #[test]
    fn set_value_rejects_wrong_type() {
        let mut doc: toml_edit::DocumentMut = sample_config().parse().unwrap();
        assert!(matches!(
            set_value(&mut doc, "tasks.page_size", "lots"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn set_value_rejects_bare_key() {
        let mut doc = toml_edit::DocumentMut::new();
        assert!(matches!(
            set_value(&mut doc, "page_size", "3"),
            Err(ConfigError::InvalidKey(_))
        ));
    }
}
