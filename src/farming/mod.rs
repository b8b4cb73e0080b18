//! Farming domain: planting, wand growth, harvest, and item-use dispatch.
//!
//! Communicates with other domains exclusively through crate::shared events/resources.
//! The one outside reference is an ordering edge: hotbar selection is applied
//! before any use in the same frame.

use bevy::prelude::*;
use crate::inventory::hotbar::handle_select_hotbar;
use crate::shared::*;

pub mod crops;
pub mod harvest;
pub mod item_use;

use item_use::handle_use_item;

pub struct FarmingPlugin;

impl Plugin for FarmingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            handle_use_item
                .after(handle_select_hotbar)
                .run_if(in_state(GameState::Playing)),
        );
    }
}

/// Block under a world-space x coordinate. Anything left of the first block,
/// past the last one, or not a number is outside the farmland.
pub fn block_at_world_x(world_x: f32, block_size: u32, grid: &FarmGrid) -> Result<u32, FarmError> {
    if !world_x.is_finite() || world_x < 0.0 || block_size == 0 {
        return Err(FarmError::OutsideFarmland);
    }
    let block = (world_x / block_size as f32).floor();
    if block >= grid.blocks().len() as f32 {
        return Err(FarmError::OutsideFarmland);
    }
    Ok(block as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_at_world_x() {
        let grid = FarmGrid::with_blocks(35);
        assert_eq!(block_at_world_x(0.0, 100, &grid), Ok(0));
        assert_eq!(block_at_world_x(99.9, 100, &grid), Ok(0));
        assert_eq!(block_at_world_x(350.0, 100, &grid), Ok(3));
        assert_eq!(block_at_world_x(3499.0, 100, &grid), Ok(34));
        assert_eq!(block_at_world_x(3500.0, 100, &grid), Err(FarmError::OutsideFarmland));
        assert_eq!(block_at_world_x(-1.0, 100, &grid), Err(FarmError::OutsideFarmland));
        assert_eq!(block_at_world_x(f32::NAN, 100, &grid), Err(FarmError::OutsideFarmland));
    }
}
