//! Data layer: builds a fresh game from the loaded config.
//!
//! This plugin runs in OnEnter(GameState::Loading), fills the catalog, the
//! ledger, both slot containers and the farm grid, then transitions the game
//! into GameState::Playing.
//!
//! No other domain needs to seed these resources. All domain plugins can
//! safely read them once GameState has advanced past Loading.

pub mod config;
pub mod items;

use bevy::prelude::*;
use crate::shared::*;

pub use config::{GameConfig, CONFIG_ENV_VAR};

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Loading), load_all_data);
    }
}

/// Everything a new game starts with.
#[derive(Debug, Clone)]
pub struct NewGame {
    pub catalog: ItemCatalog,
    pub ledger: SourceLedger,
    pub inventory: Inventory,
    pub hotbar: Hotbar,
    pub grid: FarmGrid,
    pub rules: FarmRules,
}

/// Build the starting world. The config is sanitized first, whichever way it
/// was supplied. Starting-kit entries that name an unknown item or a slot
/// past the hotbar end are skipped with a warning.
pub fn populate_world(config: &GameConfig) -> NewGame {
    let config = config.clone().sanitized();
    let mut catalog = ItemCatalog::default();
    items::populate_catalog(&mut catalog, &config.items, &config.farm_types);

    let mut hotbar = Hotbar::with_size(config.inventory.hotbar_size);
    for entry in &config.starting_kit {
        if catalog.get(&entry.item_id).is_none() {
            warn!("[Data] Starting kit names unknown item '{}'; skipped", entry.item_id);
            continue;
        }
        if entry.quantity == 0 {
            continue;
        }
        let stack = ItemStack::new(entry.item_id.clone(), entry.quantity);
        if let Err(err) = hotbar.replace(entry.slot, Some(stack)) {
            warn!("[Data] Starting kit entry for '{}': {}; skipped", entry.item_id, err);
        }
    }

    NewGame {
        catalog,
        ledger: SourceLedger::with_balance(config.economy.starting_source),
        inventory: Inventory::with_capacity(config.inventory.capacity),
        hotbar,
        grid: FarmGrid::with_blocks(config.world.block_count()),
        rules: FarmRules {
            block_size: config.world.block_size,
            growth_unit: config.farming.growth_unit,
            base_per_cactus: config.economy.base_per_cactus,
            production_interval_secs: config.production.interval_secs,
            max_visible_notifications: config.notifications.max_visible,
        },
    }
}

/// Single system that seeds every game resource and then transitions to
/// Playing. Without a `GameConfig` resource the built-in defaults are used.
fn load_all_data(
    mut commands: Commands,
    config: Option<Res<GameConfig>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    info!("[Data] Populating game state…");

    let fallback;
    let config = match config.as_deref() {
        Some(config) => config,
        None => {
            fallback = GameConfig::default();
            &fallback
        }
    };

    let game = populate_world(config);
    info!(
        "[Data] Items: {}, farm types: {}, blocks: {}, starting source: {}",
        game.catalog.items.len(),
        game.catalog.farm_types.len(),
        game.grid.blocks().len(),
        game.ledger.balance()
    );

    commands.insert_resource(game.catalog);
    commands.insert_resource(game.ledger);
    commands.insert_resource(game.inventory);
    commands.insert_resource(game.hotbar);
    commands.insert_resource(game.grid);
    commands.insert_resource(game.rules);

    next_state.set(GameState::Playing);
}
