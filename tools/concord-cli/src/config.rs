use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use concord_lexicon::DuplicatePolicy;
use concord_window::WindowConfig;
use serde::{Deserialize, Serialize};

/// Run settings. Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotateConfig {
    /// Tokens kept on a side where the marker was seen.
    pub half_width: usize,
    /// Tokens kept on a side without the marker.
    pub narrow_radius: usize,
    /// Characters of raw text kept around each match.
    pub context_radius: usize,
    pub marker: String,
    /// Reuse `<document>.cache` tokenizations.
    pub cache: bool,
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for AnnotateConfig {
    fn default() -> Self {
        let window = WindowConfig::default();
        Self {
            half_width: window.half_width,
            narrow_radius: window.narrow_radius,
            context_radius: 80,
            marker: window.marker,
            cache: true,
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl AnnotateConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config '{}'", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config '{}'", path.display()))
    }

    pub fn window(&self) -> WindowConfig {
        WindowConfig {
            half_width: self.half_width,
            narrow_radius: self.narrow_radius,
            marker: self.marker.clone(),
        }
    }
}
