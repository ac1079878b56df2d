//! RON configuration for the world and the meteor. Every field has a
//! default, so a partial or missing file still produces a runnable setup.

use std::path::{Path, PathBuf};

use glam::IVec3;
use procgen::TerrainParams;
use serde::{Deserialize, Serialize};

use crate::meteor::MeteorParams;

pub const CONFIG_FILE: &str = "starfall.ron";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config at {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub meteor: MeteorParams,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Horizontal extent in blocks, centered on the origin.
    #[serde(default = "default_world_size")]
    pub size: u32,
    #[serde(default = "default_world_height")]
    pub height: u32,
    #[serde(default = "default_world_seed")]
    pub seed: u32,
    /// Creatures scattered across the surface at startup.
    #[serde(default = "default_creatures")]
    pub creatures: u32,
}

fn default_world_size() -> u32 {
    192
}

fn default_world_height() -> u32 {
    160
}

fn default_world_seed() -> u32 {
    42
}

fn default_creatures() -> u32 {
    12
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            size: default_world_size(),
            height: default_world_height(),
            seed: default_world_seed(),
            creatures: default_creatures(),
        }
    }
}

impl WorldConfig {
    /// Expand into full terrain parameters with the grid centered on the
    /// origin.
    pub fn terrain_params(&self) -> TerrainParams {
        let half = self.size as i32 / 2;
        TerrainParams {
            nx: self.size as usize,
            ny: self.height as usize,
            nz: self.size as usize,
            min: IVec3::new(-half, 0, -half),
            seed: self.seed,
            ..TerrainParams::default()
        }
    }
}

impl SimConfig {
    /// Load from `starfall.ron` in the working directory. A missing file is
    /// normal; a malformed one is reported and replaced with defaults.
    pub fn load() -> Self {
        let path = PathBuf::from(CONFIG_FILE);
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(ConfigError::Io { .. }) => Self::default(),
            Err(e) => {
                log::warn!("{e}, using defaults");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Best-effort write of the current config.
    pub fn save(&self, path: &Path) {
        match ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            Ok(text) => {
                if let Err(e) = std::fs::write(path, text) {
                    log::warn!("could not write config to {path:?}: {e}");
                }
            }
            Err(e) => log::warn!("could not serialize config: {e}"),
        }
    }
}
