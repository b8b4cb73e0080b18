//! Load-once table of game tunables.
//!
//! Defaults reproduce the shipped game. A RON file can override any subset of
//! fields; unknown or missing fields fall back to the defaults below.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::shared::*;
use super::items::{default_farm_types, default_items};

/// Environment variable naming a RON config file.
pub const CONFIG_ENV_VAR: &str = "CACTUS_FARM_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: u32,
    /// Extra farmland drawn past the right edge of the world.
    pub farmland_overhang: u32,
    pub block_size: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            farmland_overhang: FARMLAND_OVERHANG,
            block_size: BLOCK_SIZE,
        }
    }
}

impl WorldConfig {
    pub fn block_count(&self) -> u32 {
        self.width.saturating_add(self.farmland_overhang) / self.block_size.max(1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    pub hotbar_size: usize,
    pub capacity: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            hotbar_size: HOTBAR_SLOTS,
            capacity: INVENTORY_SLOTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub starting_source: u64,
    pub base_per_cactus: u64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_source: 10_000,
            base_per_cactus: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FarmingConfig {
    /// Growth percent added per point of wand growth power.
    pub growth_unit: u32,
}

impl Default for FarmingConfig {
    fn default() -> Self {
        Self { growth_unit: 15 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductionConfig {
    pub interval_secs: f32,
}

impl Default for ProductionConfig {
    fn default() -> Self {
        Self { interval_secs: 2.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub max_visible: usize,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { max_visible: 5 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartingSlot {
    pub slot: usize,
    pub item_id: ItemId,
    pub quantity: u32,
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldConfig,
    pub inventory: InventoryConfig,
    pub economy: EconomyConfig,
    pub farming: FarmingConfig,
    pub production: ProductionConfig,
    pub notifications: NotificationConfig,
    /// Hotbar contents at the start of a new game.
    pub starting_kit: Vec<StartingSlot>,
    pub items: Vec<ItemDef>,
    pub farm_types: Vec<FarmTypeDef>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            inventory: InventoryConfig::default(),
            economy: EconomyConfig::default(),
            farming: FarmingConfig::default(),
            production: ProductionConfig::default(),
            notifications: NotificationConfig::default(),
            starting_kit: vec![
                StartingSlot { slot: 0, item_id: "cactus_seed".into(), quantity: 10 },
                StartingSlot { slot: 1, item_id: "growth_wand_basic".into(), quantity: 1 },
                StartingSlot { slot: 2, item_id: "hoe_bronze".into(), quantity: 1 },
            ],
            items: default_items(),
            farm_types: default_farm_types(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

impl GameConfig {
    pub fn from_ron(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str::<GameConfig>(text).map(GameConfig::sanitized)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the config for this run: explicit path, then the environment
    /// variable, then built-in defaults. A broken file is reported and
    /// ignored rather than aborting startup.
    pub fn load(explicit: Option<PathBuf>) -> Self {
        let path = explicit.or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));
        let Some(path) = path else {
            info!("[Data] No config file given, using built-in defaults.");
            return Self::default();
        };
        match Self::from_path(&path) {
            Ok(config) => {
                info!("[Data] Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                warn!("[Data] {}. Falling back to defaults.", err);
                Self::default()
            }
        }
    }

    /// Clamp values the rest of the game divides by or relies on being
    /// positive.
    pub fn sanitized(mut self) -> Self {
        if self.world.block_size == 0 {
            warn!("[Data] world.block_size must be positive; using {}", BLOCK_SIZE);
            self.world.block_size = BLOCK_SIZE;
        }
        if self.inventory.hotbar_size == 0 {
            warn!("[Data] inventory.hotbar_size must be positive; using {}", HOTBAR_SLOTS);
            self.inventory.hotbar_size = HOTBAR_SLOTS;
        }
        if !(self.production.interval_secs.is_finite() && self.production.interval_secs > 0.0) {
            warn!("[Data] production.interval_secs must be positive; using 2.0");
            self.production.interval_secs = 2.0;
        }
        for item in &mut self.items {
            if item.grant_quantity == 0 {
                warn!("[Data] item '{}' grants 0 units; using 1", item.id);
                item.grant_quantity = 1;
            }
        }
        for farm_type in &mut self.farm_types {
            farm_type.footprint = farm_type.footprint.max(1);
        }
        self
    }
}
