use crate::error::{Result, ThesisError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "thesis.json";
const DEFAULT_DOCUMENT: &str = "data/students/teachers.json";
const DEFAULT_MAX_EDITS: usize = 1;

/// Tracker configuration, stored as `thesis.json` in the base directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Root document, relative to the base directory
    #[serde(default = "default_document")]
    pub document: PathBuf,

    /// Edits tolerated when removing a student by a misspelled name
    #[serde(default = "default_max_edits")]
    pub max_edits: usize,
}

fn default_document() -> PathBuf {
    PathBuf::from(DEFAULT_DOCUMENT)
}

fn default_max_edits() -> usize {
    DEFAULT_MAX_EDITS
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            document: default_document(),
            max_edits: DEFAULT_MAX_EDITS,
        }
    }
}

impl TrackerConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(ThesisError::Io)?;
        let config: TrackerConfig =
            serde_json::from_str(&content).map_err(ThesisError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, base_dir: P) -> Result<()> {
        let base_dir = base_dir.as_ref();
        if !base_dir.exists() {
            fs::create_dir_all(base_dir).map_err(ThesisError::Io)?;
        }

        let content = serde_json::to_string_pretty(self).map_err(ThesisError::Serialization)?;
        fs::write(base_dir.join(CONFIG_FILENAME), content).map_err(ThesisError::Io)?;
        Ok(())
    }

    /// Absolute location of the root document.
    pub fn document_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.document)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "document" => Some(self.document.display().to_string()),
            "max-edits" => Some(self.max_edits.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "document" => {
                if value.trim().is_empty() {
                    return Err("document path cannot be empty".to_string());
                }
                self.document = PathBuf::from(value);
                Ok(())
            }
            "max-edits" => {
                self.max_edits = value
                    .parse()
                    .map_err(|_| format!("max-edits must be a non-negative number: {}", value))?;
                Ok(())
            }
            other => Err(format!("Unknown config key: {}", other)),
        }
    }

    pub fn keys() -> &'static [&'static str] {
        &["document", "max-edits"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrackerConfig::default();
        assert_eq!(config.document, PathBuf::from("data/students/teachers.json"));
        assert_eq!(config.max_edits, 1);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = TrackerConfig::load(dir.path()).unwrap();
        assert_eq!(config, TrackerConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();

        let mut config = TrackerConfig::default();
        config.set("max-edits", "2").unwrap();
        config.set("document", "db/roster.json").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = TrackerConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.max_edits, 2);
        assert_eq!(
            loaded.document_path(dir.path()),
            dir.path().join("db/roster.json")
        );
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"max_edits": 3}"#).unwrap();

        let loaded = TrackerConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.max_edits, 3);
        assert_eq!(loaded.document, PathBuf::from(DEFAULT_DOCUMENT));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = TrackerConfig::default();
        assert!(config.set("max-edits", "-1").is_err());
        assert!(config.set("document", "  ").is_err());
        assert!(config.set("colour", "red").is_err());
        assert_eq!(config.get("max-edits"), Some("1".to_string()));
        assert_eq!(config.get("colour"), None);
    }
}
