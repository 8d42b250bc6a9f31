// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Application configuration
//!
//! Defaults, optionally overridden by a JSON file, optionally overridden by
//! command-line flags (applied by the binary).

use crate::analyzer::Schedule;
use crate::wordfreq::DEFAULT_TOP_WORDS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_category_model() -> PathBuf {
    PathBuf::from("models/category.json")
}

fn default_authenticity_model() -> PathBuf {
    PathBuf::from("models/authenticity.json")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Category model artifact
    pub category_model: PathBuf,
    /// Fake/real model artifact
    pub authenticity_model: PathBuf,
    pub schedule: Schedule,
    /// Words shown in the frequency view (0 disables it)
    pub top_words: usize,
    /// Colorize terminal output
    pub color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            category_model: default_category_model(),
            authenticity_model: default_authenticity_model(),
            schedule: Schedule::default(),
            top_words: DEFAULT_TOP_WORDS,
            color: true,
        }
    }
}

/// On-disk form; absent fields fall back to `AppConfig::default()`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ConfigFile {
    category_model: Option<PathBuf>,
    authenticity_model: Option<PathBuf>,
    schedule: Option<Schedule>,
    top_words: Option<usize>,
    color: Option<bool>,
}

impl ConfigFile {
    /// Relative model paths written in the file are taken from `base`
    fn into_config(self, base: &Path) -> AppConfig {
        let rebase = |path: PathBuf| {
            if path.is_relative() && !path.as_os_str().is_empty() {
                base.join(path)
            } else {
                path
            }
        };
        let defaults = AppConfig::default();

        AppConfig {
            category_model: self.category_model.map(rebase).unwrap_or(defaults.category_model),
            authenticity_model: self.authenticity_model.map(rebase).unwrap_or(defaults.authenticity_model),
            schedule: self.schedule.unwrap_or(defaults.schedule),
            top_words: self.top_words.unwrap_or(defaults.top_words),
            color: self.color.unwrap_or(defaults.color),
        }
    }
}

impl AppConfig {
    /// Load from a JSON file; missing fields take their defaults.
    ///
    /// Model paths given in the file are relative to the file's directory,
    /// defaults stay relative to the working directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: ConfigFile = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let config = file.into_config(path.parent().unwrap_or_else(|| Path::new("")));
        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.category_model.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("categoryModel path is empty".to_string()));
        }
        if self.authenticity_model.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("authenticityModel path is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::load_or_default(None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.schedule, Schedule::CategoryFirst);
        assert_eq!(config.top_words, DEFAULT_TOP_WORDS);
        assert!(config.color);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("falsify.json");
        std::fs::write(&path, r#"{ "schedule": "concurrent", "topWords": 5 }"#).unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.schedule, Schedule::Concurrent);
        assert_eq!(config.top_words, 5);
        assert_eq!(config.category_model, PathBuf::from("models/category.json"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("falsify.json");
        std::fs::write(&path, r#"{ "modelPath": "x.pkl" }"#).unwrap();

        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_empty_model_path_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("falsify.json");
        std::fs::write(&path, r#"{ "categoryModel": "" }"#).unwrap();

        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_file_model_paths_relative_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("falsify.json");
        std::fs::write(
            &path,
            r#"{ "categoryModel": "m/c.json", "authenticityModel": "/opt/models/fake.json" }"#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.category_model, dir.path().join("m/c.json"));
        assert_eq!(config.authenticity_model, PathBuf::from("/opt/models/fake.json"));
    }

    #[test]
    fn test_default_model_paths_not_rebased() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("falsify.json");
        std::fs::write(&path, r#"{ "topWords": 5 }"#).unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.category_model, PathBuf::from("models/category.json"));
        assert_eq!(config.authenticity_model, PathBuf::from("models/authenticity.json"));
    }
}
