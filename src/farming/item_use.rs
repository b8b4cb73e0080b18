//! Item-use dispatch: what a click on a block does depends on the item in
//! the source slot.

use bevy::prelude::*;
use crate::shared::*;

use super::crops::{grow, plant, GrowthReport};
use super::harvest::harvest;

/// What a successful use did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UseOutcome {
    Planted { block_x: u32, crop_type: String },
    Grown { block_x: u32, report: GrowthReport },
    Harvested { block_x: u32, payout: u64 },
    /// A farm kit was used; the placement gate takes it from here.
    PlacementRequested { block_x: u32, source: SlotRef },
}

/// Mutable game state an item use may touch.
pub struct UseContext<'a> {
    pub catalog: &'a ItemCatalog,
    pub rules: &'a FarmRules,
    pub grid: &'a mut FarmGrid,
    pub ledger: &'a mut SourceLedger,
    pub inventory: &'a mut Inventory,
    pub hotbar: &'a mut Hotbar,
}

pub fn use_item_on_block(
    block_x: u32,
    source: SlotRef,
    ctx: &mut UseContext,
) -> Result<UseOutcome, FarmError> {
    ctx.grid.block(block_x)?;

    let item_id = store(source.container, ctx.inventory, ctx.hotbar)
        .get(source.index)?
        .map(|stack| stack.item_id.clone())
        .ok_or(FarmError::NothingSelected)?;
    let def = ctx
        .catalog
        .get(&item_id)
        .ok_or_else(|| FarmError::UnknownItem(item_id.clone()))?;

    match &def.kind {
        ItemKind::Seed { crop } => {
            let slots = store_mut(source.container, ctx.inventory, ctx.hotbar);
            plant(ctx.grid, slots, source.index, crop, block_x)?;
            Ok(UseOutcome::Planted {
                block_x,
                crop_type: crop.clone(),
            })
        }
        ItemKind::Wand { growth_power } => {
            let report = grow(ctx.grid, block_x, *growth_power, ctx.rules.growth_unit)?;
            Ok(UseOutcome::Grown { block_x, report })
        }
        ItemKind::Hoe { harvest_power } => {
            let payout = harvest(
                ctx.grid,
                ctx.ledger,
                block_x,
                *harvest_power,
                ctx.rules.base_per_cactus,
            )?;
            Ok(UseOutcome::Harvested { block_x, payout })
        }
        ItemKind::FarmKit { .. } => Ok(UseOutcome::PlacementRequested { block_x, source }),
    }
}

/// Processes UseItemEvents. Clicks carry no source and use the selected
/// hotbar slot; drops onto a block name their slot.
pub fn handle_use_item(
    mut use_events: EventReader<UseItemEvent>,
    catalog: Res<ItemCatalog>,
    rules: Res<FarmRules>,
    mut grid: ResMut<FarmGrid>,
    mut ledger: ResMut<SourceLedger>,
    mut inventory: ResMut<Inventory>,
    mut hotbar: ResMut<Hotbar>,
    mut planted_writer: EventWriter<CropPlantedEvent>,
    mut grown_writer: EventWriter<CropGrownEvent>,
    mut harvested_writer: EventWriter<CropHarvestedEvent>,
    mut source_writer: EventWriter<SourceChangeEvent>,
    mut placement_writer: EventWriter<PlacementRequestEvent>,
    mut failed_writer: EventWriter<ActionFailedEvent>,
) {
    for ev in use_events.read() {
        let source = ev.source.unwrap_or_else(|| hotbar.selected_slot());
        let mut ctx = UseContext {
            catalog: &catalog,
            rules: &rules,
            grid: &mut grid,
            ledger: &mut ledger,
            inventory: &mut inventory,
            hotbar: &mut hotbar,
        };

        match use_item_on_block(ev.block_x, source, &mut ctx) {
            Ok(UseOutcome::Planted { block_x, crop_type }) => {
                info!("[Farming] Planted {} on block {}", crop_type, block_x);
                planted_writer.send(CropPlantedEvent { block_x, crop_type });
            }
            Ok(UseOutcome::Grown { block_x, report }) => {
                info!("[Farming] Crop on block {} grew to {}%", block_x, report.growth);
                grown_writer.send(CropGrownEvent {
                    block_x,
                    gained: report.gained,
                    growth: report.growth,
                });
            }
            Ok(UseOutcome::Harvested { block_x, payout }) => {
                info!("[Farming] Harvested block {} for {}", block_x, payout);
                source_writer.send(SourceChangeEvent {
                    amount: i64::try_from(payout).unwrap_or(i64::MAX),
                    reason: format!("Harvest on block {}", block_x),
                });
                harvested_writer.send(CropHarvestedEvent { block_x, payout });
            }
            Ok(UseOutcome::PlacementRequested { block_x, source }) => {
                placement_writer.send(PlacementRequestEvent { block_x, source });
            }
            Err(error) => {
                info!("[Farming] Use on block {} refused: {}", ev.block_x, error);
                failed_writer.send(ActionFailedEvent { error });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{populate_world, GameConfig};

    struct Sandbox {
        catalog: ItemCatalog,
        rules: FarmRules,
        grid: FarmGrid,
        ledger: SourceLedger,
        inventory: Inventory,
        hotbar: Hotbar,
    }

    impl Sandbox {
        fn new() -> Self {
            let game = populate_world(&GameConfig::default());
            Self {
                catalog: game.catalog,
                rules: game.rules,
                grid: game.grid,
                ledger: game.ledger,
                inventory: game.inventory,
                hotbar: game.hotbar,
            }
        }

        fn use_on(&mut self, block_x: u32, source: SlotRef) -> Result<UseOutcome, FarmError> {
            let mut ctx = UseContext {
                catalog: &self.catalog,
                rules: &self.rules,
                grid: &mut self.grid,
                ledger: &mut self.ledger,
                inventory: &mut self.inventory,
                hotbar: &mut self.hotbar,
            };
            use_item_on_block(block_x, source, &mut ctx)
        }
    }

    #[test]
    fn test_starting_kit_plays_a_full_crop_cycle() {
        let mut world = Sandbox::new();

        let planted = world.use_on(4, SlotRef::hotbar(0)).unwrap();
        assert_eq!(planted, UseOutcome::Planted { block_x: 4, crop_type: "cactus".into() });
        assert_eq!(world.hotbar.count("cactus_seed"), 9);

        // Basic wand: 15% per use, seven uses to mature.
        for _ in 0..7 {
            world.use_on(4, SlotRef::hotbar(1)).unwrap();
        }
        assert!(world.grid.crop_at(4).unwrap().is_mature());
        assert_eq!(
            world.use_on(4, SlotRef::hotbar(1)),
            Err(FarmError::AlreadyMature(4))
        );

        let harvested = world.use_on(4, SlotRef::hotbar(2)).unwrap();
        assert_eq!(harvested, UseOutcome::Harvested { block_x: 4, payout: 10 });
        assert_eq!(world.ledger.balance(), 10_010);
        assert!(!world.grid.block(4).unwrap().is_occupied());
    }

    #[test]
    fn test_empty_source_is_nothing_selected() {
        let mut world = Sandbox::new();
        assert_eq!(world.use_on(0, SlotRef::hotbar(5)), Err(FarmError::NothingSelected));
        assert_eq!(
            world.use_on(0, SlotRef::hotbar(99)),
            Err(FarmError::InvalidSlotIndex { container: Container::Hotbar, index: 99 })
        );
    }

    #[test]
    fn test_unknown_block_checked_first() {
        let mut world = Sandbox::new();
        assert_eq!(world.use_on(35, SlotRef::hotbar(0)), Err(FarmError::InvalidBlock(35)));
        assert_eq!(world.hotbar.count("cactus_seed"), 10);
    }

    #[test]
    fn test_hoe_on_growing_crop_is_not_mature() {
        let mut world = Sandbox::new();
        world.use_on(2, SlotRef::hotbar(0)).unwrap();
        world.use_on(2, SlotRef::hotbar(1)).unwrap();
        assert_eq!(
            world.use_on(2, SlotRef::hotbar(2)),
            Err(FarmError::NotMature { block_x: 2, growth: 15 })
        );
    }

    #[test]
    fn test_inventory_items_can_be_used_directly() {
        let mut world = Sandbox::new();
        world.inventory.add_stack("cactus_seed", 2).unwrap();
        world.use_on(7, SlotRef::inventory(0)).unwrap();
        assert_eq!(world.inventory.count("cactus_seed"), 1);
        assert_eq!(world.hotbar.count("cactus_seed"), 10);
    }

    #[test]
    fn test_farm_kit_defers_to_placement() {
        let mut world = Sandbox::new();
        world.hotbar.add_stack("auto_farm_basic", 1).unwrap();
        let outcome = world.use_on(9, SlotRef::hotbar(3)).unwrap();
        assert_eq!(
            outcome,
            UseOutcome::PlacementRequested { block_x: 9, source: SlotRef::hotbar(3) }
        );
        assert!(world.grid.farms().is_empty(), "Nothing is placed before the minigame");
        assert_eq!(world.hotbar.count("auto_farm_basic"), 1);
    }
}
