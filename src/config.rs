//! Session settings: simulation rules plus how they are drawn.
//!
//! Loaded once at startup from an optional JSON file; missing fields fall
//! back to defaults.

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::game::GameConfig;
use crate::render::RenderStyle;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub game: GameConfig,
    pub render: RenderStyle,
}

impl Settings {
    /// Read settings from a JSON file and validate them
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        let settings: Settings = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse settings in {:?}", path))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.game
            .validate()
            .map_err(|e| anyhow!("invalid game settings: {}", e))?;
        self.render
            .validate()
            .map_err(|e| anyhow!("invalid render settings: {}", e))?;
        Ok(())
    }
}
