#![forbid(unsafe_code)]

//! Planner and grid configuration as data.
//!
//! [`PlannerConfig`] groups the full-width threshold, cache size, and grid
//! presentation settings so they can be loaded from TOML or JSON at startup.
//!
//! ```toml
//! # shelf.toml
//! threshold = 7
//! cache_capacity = 64
//!
//! [grid]
//! gap = 1
//! card_height = 5
//! wide_min_width = 80
//! ```
//!
//! Every field has a default, so an empty file yields
//! `PlannerConfig::default()`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cache::PlanCache;
use crate::grid::{CardGrid, GridConfig};
use crate::planner::{FULL_WIDTH_THRESHOLD, LayoutPlanner};

/// Top-level configuration for planning and grid presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Item count at which a theme is naturally full width. Default: 7.
    pub threshold: i64,
    /// Maximum memoized plans. Default: 64.
    pub cache_capacity: usize,
    /// Grid presentation.
    pub grid: GridConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            threshold: FULL_WIDTH_THRESHOLD,
            cache_capacity: 64,
            grid: GridConfig::default(),
        }
    }
}

impl PlannerConfig {
    /// Load from a TOML string and validate.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str::<Self>(s)?.validated()
    }

    /// Load from a TOML file on disk and validate.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string and validate.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str::<Self>(s)?.validated()
    }

    /// Load from a JSON file on disk and validate.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Load from a file, picking the format by extension (`.json` or TOML).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every parameter. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.threshold <= 0 {
            errors.push(format!("threshold must be > 0, got {}", self.threshold));
        }
        if self.cache_capacity == 0 {
            errors.push("cache_capacity must be > 0".to_string());
        }
        if self.grid.card_height == 0 {
            errors.push("grid.card_height must be > 0".to_string());
        }
        if self.grid.wide_min_width == 0 {
            errors.push("grid.wide_min_width must be > 0".to_string());
        }
        errors
    }

    fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Planner for the configured threshold.
    pub fn planner(&self) -> crate::Result<LayoutPlanner> {
        LayoutPlanner::new(self.threshold)
    }

    #[must_use]
    pub fn cache(&self) -> PlanCache {
        PlanCache::new(self.cache_capacity)
    }

    #[must_use]
    pub fn card_grid(&self) -> CardGrid {
        CardGrid::new(self.grid)
    }
}

/// Errors that can occur when loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        let config = PlannerConfig::from_toml_str("").unwrap();
        assert_eq!(config, PlannerConfig::default());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = PlannerConfig::from_toml_str(
            r#"
threshold = 4

[grid]
wide_min_width = 100
"#,
        )
        .unwrap();
        assert_eq!(config.threshold, 4);
        assert_eq!(config.cache_capacity, 64);
        assert_eq!(config.grid.wide_min_width, 100);
        assert_eq!(config.grid.card_height, 5);
    }

    #[test]
    fn json_round_trips_through_toml() {
        let config = PlannerConfig::from_json_str(r#"{"threshold": 9, "grid": {"gap": 3}}"#).unwrap();
        let toml = config.to_toml_string().unwrap();
        assert_eq!(PlannerConfig::from_toml_str(&toml).unwrap(), config);
    }

    #[test]
    fn validation_collects_every_problem() {
        let err = PlannerConfig::from_toml_str(
            r#"
threshold = 0
cache_capacity = 0

[grid]
card_height = 0
"#,
        )
        .unwrap_err();
        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let err = PlannerConfig::from_toml_str("threshold = \"seven\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
        assert!(err.to_string().starts_with("TOML parse error"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = PlannerConfig::from_file("/nonexistent/shelf.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn builds_planner_and_grid() {
        let config = PlannerConfig {
            threshold: 3,
            ..PlannerConfig::default()
        };
        assert_eq!(config.planner().unwrap().threshold(), 3);
        assert_eq!(config.cache().capacity(), 64);
        assert_eq!(config.card_grid().config().wide_min_width, 80);
    }
}
