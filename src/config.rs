//! Configuration for the session controller.
//!
//! One tunable: how long a suspended session survives in the background
//! before it expires. Hosts either build the config in code or load it
//! from a TOML file with [`SessionConfig::load_or_default`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Session tracking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Grace period in milliseconds a suspended session stays resumable
    #[serde(default = "default_suspension_timeout_ms")]
    pub suspension_timeout_ms: i64,
}

fn default_suspension_timeout_ms() -> i64 {
    // One minute
    60 * 1000
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            suspension_timeout_ms: default_suspension_timeout_ms(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from a TOML file, falling back to defaults
    /// when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}
