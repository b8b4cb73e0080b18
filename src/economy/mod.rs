//! Economy domain: shop purchases, ledger bookkeeping, auto-farm production.
//!
//! All cross-domain communication goes through `crate::shared::*` events and resources.
//! No other domain module is imported here.

use bevy::prelude::*;
use crate::shared::*;

pub mod ledger;
pub mod production;
pub mod shop;

use ledger::log_source_changes;
use production::{configure_production_timer, run_production_tick, ProductionTimer};
use shop::handle_buy;

// ─────────────────────────────────────────────────────────────────────────────
// Plugin
// ─────────────────────────────────────────────────────────────────────────────

pub struct EconomyPlugin;

impl Plugin for EconomyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ProductionTimer>();

        app.add_systems(OnEnter(GameState::Playing), configure_production_timer);

        app.add_systems(
            Update,
            (
                handle_buy,
                // Production runs on its own clock, independent of input.
                run_production_tick,
                log_source_changes,
            )
                .chain()
                .run_if(in_state(GameState::Playing)),
        );
    }
}
