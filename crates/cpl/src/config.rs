use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CplError, CplResult};

/// Client configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CplConfig {
    /// Whether handles returned by a natural-key lookup cache the key they
    /// were found with.
    ///
    /// The cached key is the caller's search input, not the engine's stored
    /// value. With this off, lookup handles start bare and fetch their
    /// attributes from the engine on first access.
    pub cache_lookup_key: bool,
}

impl Default for CplConfig {
    fn default() -> Self {
        Self {
            cache_lookup_key: true,
        }
    }
}

impl CplConfig {
    /// Parse a configuration from TOML. Missing fields take their defaults.
    pub fn from_toml_str(contents: &str) -> CplResult<Self> {
        toml::from_str(contents).map_err(|e| CplError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file. A missing file yields defaults.
    pub fn load(path: impl AsRef<Path>) -> CplResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CplError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }
}
