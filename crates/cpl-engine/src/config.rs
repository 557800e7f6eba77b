use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Configuration for the in-memory reference engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// High half of every identifier this engine mints. Must be non-zero.
    pub node_id: u64,
    /// Maximum length, in bytes, of originator, name, and type strings.
    pub max_string_len: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            node_id: 1,
            max_string_len: 255,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from TOML. Missing fields take their defaults.
    pub fn from_toml_str(contents: &str) -> EngineResult<Self> {
        let config: EngineConfig = toml::from_str(contents)
            .map_err(|e| EngineError::invalid_argument(format!("engine config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values the engine cannot run with.
    pub fn validate(&self) -> EngineResult<()> {
        if self.node_id == 0 {
            return Err(EngineError::invalid_argument(
                "engine config: node_id must be non-zero",
            ));
        }
        if self.max_string_len == 0 {
            return Err(EngineError::invalid_argument(
                "engine config: max_string_len must be non-zero",
            ));
        }
        Ok(())
    }
}
