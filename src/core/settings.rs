//! Pipeline settings file
//!
//! Optional JSON settings loaded from an explicit path. Built-in
//! defaults are overridden by the file, which is overridden by CLI
//! arguments.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::effects::EffectOptions;
use crate::font_source::FontNaming;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Operator parameters; missing fields keep their defaults
    pub effects: EffectOptions,
    pub parallel: Option<bool>,
    pub workers: Option<usize>,
    pub chunk_size: Option<usize>,
    pub round_coordinates: Option<bool>,
    /// Naming fields applied before saving
    pub naming: FontNaming,
}

impl Settings {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("invalid settings file {}", path.display()))
    }
}
