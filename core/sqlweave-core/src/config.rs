//! Persistence configuration
//!
//! Defaults, overridden by environment variables or a JSON file:
//!
//! | field      | env                 | default |
//! |------------|---------------------|---------|
//! | `first_id` | `SQLWEAVE_FIRST_ID` | `1`     |
//! | `on_error` | `SQLWEAVE_ON_ERROR` | `abort` |

use crate::error::{WeaveError, WeaveResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

pub const ENV_FIRST_ID: &str = "SQLWEAVE_FIRST_ID";
pub const ENV_ON_ERROR: &str = "SQLWEAVE_ON_ERROR";

/// What the persister does when a child subtree fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Abort the whole traversal.
    #[default]
    Abort,
    /// Record the failed subtree and continue with its next sibling.
    SkipSubtree,
}

impl ErrorPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorPolicy::Abort => "abort",
            ErrorPolicy::SkipSubtree => "skip_subtree",
        }
    }

    pub fn parse_policy(s: &str) -> Option<Self> {
        match s {
            "abort" => Some(ErrorPolicy::Abort),
            "skip_subtree" => Some(ErrorPolicy::SkipSubtree),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistConfig {
    /// First identifier handed out by the recording executor.
    pub first_id: i64,
    pub on_error: ErrorPolicy,
}

impl Default for PersistConfig {
    fn default() -> Self {
        Self {
            first_id: 1,
            on_error: ErrorPolicy::Abort,
        }
    }
}

impl PersistConfig {
    /// Defaults overridden by `SQLWEAVE_*` environment variables.
    pub fn from_env() -> WeaveResult<Self> {
        Self::default().apply_env()
    }

    /// Overrides fields whose environment variable is set.
    pub fn apply_env(mut self) -> WeaveResult<Self> {
        if let Ok(raw) = env::var(ENV_FIRST_ID) {
            self.first_id = raw.trim().parse().map_err(|_| {
                WeaveError::InvalidConfig(format!("{ENV_FIRST_ID}={raw} is not an integer"))
            })?;
        }
        if let Ok(raw) = env::var(ENV_ON_ERROR) {
            self.on_error = ErrorPolicy::parse_policy(raw.trim()).ok_or_else(|| {
                WeaveError::InvalidConfig(format!(
                    "{ENV_ON_ERROR}={raw}, expected 'abort' or 'skip_subtree'"
                ))
            })?;
        }
        Ok(self)
    }

    pub fn from_json(json: &str) -> WeaveResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> WeaveResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> WeaveResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn with_first_id(mut self, first_id: i64) -> Self {
        self.first_id = first_id;
        self
    }

    pub fn with_error_policy(mut self, on_error: ErrorPolicy) -> Self {
        self.on_error = on_error;
        self
    }
}
