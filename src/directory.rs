//! User and channel directories loaded from disk.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Id-to-name maps for mention resolution.
///
/// ```json
/// { "users": { "U123": "alice" }, "channels": { "C9": "general" } }
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Directory {
    pub users: HashMap<String, String>,
    pub channels: HashMap<String, String>,
}

impl Directory {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid directory")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read directory {}", path.display()))?;
        let directory =
            Self::from_json(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::debug!(
            users = directory.users.len(),
            channels = directory.channels.len(),
            "loaded directory"
        );
        Ok(directory)
    }
}
