//! Inventory domain: hotbar selection and drag-transfer between containers.
//!
//! Stacking rules live on `SlotStore` in shared; this plugin only turns
//! request events into calls on them.

use bevy::prelude::*;
use crate::shared::*;

pub mod hotbar;
pub mod transfer;

use hotbar::handle_select_hotbar;
use transfer::handle_drag_transfer;

pub struct InventoryPlugin;

impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (handle_select_hotbar, handle_drag_transfer)
                .chain()
                .run_if(in_state(GameState::Playing)),
        );
    }
}
