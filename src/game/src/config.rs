use std::{collections::HashMap, fs, path::Path};

use audio::{ClipName, ClipSource, ClipSources};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Clips left out of the map never play.
    pub clips: HashMap<ClipName, ClipSource>,
    pub master_volume: f32,
    /// Play the opponent's move clip on reveal.
    pub move_sounds: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            clips: ClipName::ALL
                .into_iter()
                .map(|name| {
                    (
                        name,
                        ClipSource::path(format!("sounds/{}.wav", name.as_str())),
                    )
                })
                .collect(),
            master_volume: 1.0,
            move_sounds: false,
        }
    }
}

impl GameConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn clip_sources(&self) -> ClipSources {
        self.clips
            .iter()
            .map(|(name, source)| (*name, source.clone()))
            .collect()
    }
}
