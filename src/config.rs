//! Where the Q&A service lives.
//!
//! The base URL is injected explicitly into [`crate::gateway::HttpGateway`];
//! nothing in this crate reads it from ambient globals.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Service base URL (default: <http://localhost:8000>)
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:8000".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl GatewayConfig {
    /// Load from a TOML file, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let mut config: Self =
            toml::from_str(&text).map_err(|e| ConfigError::Load(e.to_string()))?;
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("QNA_SYNC_BASE_URL")
            && !url.is_empty()
        {
            self.base_url = url;
        }
    }
}
