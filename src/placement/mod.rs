//! Placement gate: a farm kit becomes a placed auto-farm only after its
//! minigame reports success.
//!
//! The gate holds at most one pending placement. Nothing in the world
//! changes until `resolve(true)`, and the commit re-checks the world because
//! other input stays live while the minigame runs.

use bevy::prelude::*;
use crate::shared::*;

pub struct PlacementPlugin;

impl Plugin for PlacementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlacementGate>();

        app.add_systems(
            Update,
            (
                handle_placement_request,
                handle_minigame_result,
                handle_cancel_placement,
            )
                .chain()
                .run_if(in_state(GameState::Playing)),
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Gate operations
// ─────────────────────────────────────────────────────────────────────────────

/// Validate a placement and park it in the gate.
pub fn request_placement(
    gate: &mut PlacementGate,
    block_x: u32,
    source: SlotRef,
    catalog: &ItemCatalog,
    grid: &FarmGrid,
    inventory: &Inventory,
    hotbar: &Hotbar,
) -> Result<PendingPlacement, FarmError> {
    if !gate.is_idle() {
        return Err(FarmError::PlacementAlreadyInProgress);
    }

    let stack = store(source.container, inventory, hotbar)
        .get(source.index)?
        .ok_or(FarmError::EmptySlot {
            container: source.container,
            index: source.index,
        })?;
    let def = catalog
        .get(&stack.item_id)
        .ok_or_else(|| FarmError::UnknownItem(stack.item_id.clone()))?;
    let ItemKind::FarmKit { farm_type } = &def.kind else {
        return Err(FarmError::NotAFarmKit(def.id.clone()));
    };
    let farm = catalog
        .farm_type(farm_type)
        .ok_or_else(|| FarmError::UnknownFarmType(farm_type.clone()))?;

    grid.ensure_free(block_x, farm.footprint)?;

    let pending = PendingPlacement {
        farm_item: def.id.clone(),
        farm_type: farm.id.clone(),
        block_x,
        footprint: farm.footprint.max(1),
        source,
        minigame: farm.minigame,
    };
    *gate = PlacementGate::AwaitingMinigameResult(pending.clone());
    Ok(pending)
}

/// Apply the minigame result. The gate is Idle afterwards whatever happens.
pub fn resolve(
    gate: &mut PlacementGate,
    success: bool,
    grid: &mut FarmGrid,
    inventory: &mut Inventory,
    hotbar: &mut Hotbar,
) -> Result<PlacementOutcome, FarmError> {
    let PlacementGate::AwaitingMinigameResult(pending) = std::mem::take(gate) else {
        return Err(FarmError::NoPlacementPending);
    };
    if !success {
        return Ok(PlacementOutcome::Failed);
    }
    Ok(commit(&pending, grid, inventory, hotbar))
}

/// Escape out of the minigame: same as a failed result, reported separately.
pub fn cancel(gate: &mut PlacementGate) -> Result<PlacementOutcome, FarmError> {
    match std::mem::take(gate) {
        PlacementGate::Idle => Err(FarmError::NoPlacementPending),
        PlacementGate::AwaitingMinigameResult(_) => Ok(PlacementOutcome::Cancelled),
    }
}

fn commit(
    pending: &PendingPlacement,
    grid: &mut FarmGrid,
    inventory: &mut Inventory,
    hotbar: &mut Hotbar,
) -> PlacementOutcome {
    let source = pending.source;
    let kit_present = store(source.container, inventory, hotbar)
        .get(source.index)
        .ok()
        .flatten()
        .is_some_and(|stack| stack.item_id == pending.farm_item);
    if !kit_present {
        return PlacementOutcome::Invalidated(FarmError::KitMoved {
            container: source.container,
            index: source.index,
        });
    }

    if let Err(error) = grid.insert_farm(&pending.farm_type, pending.block_x, pending.footprint) {
        return PlacementOutcome::Invalidated(error);
    }
    if let Err(error) = store_mut(source.container, inventory, hotbar).remove_one(source.index) {
        // The slot was checked above; a failure here means the farm is free.
        warn!("[Placement] Kit could not be consumed after placing: {}", error);
    }

    PlacementOutcome::Placed {
        farm_type: pending.farm_type.clone(),
        block_x: pending.block_x,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Systems
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_placement_request(
    mut request_events: EventReader<PlacementRequestEvent>,
    mut gate: ResMut<PlacementGate>,
    catalog: Res<ItemCatalog>,
    grid: Res<FarmGrid>,
    inventory: Res<Inventory>,
    hotbar: Res<Hotbar>,
    mut start_writer: EventWriter<MinigameStartEvent>,
    mut failed_writer: EventWriter<ActionFailedEvent>,
) {
    for ev in request_events.read() {
        match request_placement(&mut gate, ev.block_x, ev.source, &catalog, &grid, &inventory, &hotbar) {
            Ok(pending) => {
                info!(
                    "[Placement] {} on block {} waiting on minigame '{}'",
                    pending.farm_type,
                    pending.block_x,
                    pending.minigame.id()
                );
                start_writer.send(MinigameStartEvent {
                    farm_type: pending.farm_type,
                    minigame: pending.minigame,
                    block_x: pending.block_x,
                });
            }
            Err(error) => {
                info!("[Placement] Request on block {} refused: {}", ev.block_x, error);
                failed_writer.send(ActionFailedEvent { error });
            }
        }
    }
}

pub fn handle_minigame_result(
    mut result_events: EventReader<MinigameResultEvent>,
    mut gate: ResMut<PlacementGate>,
    mut grid: ResMut<FarmGrid>,
    mut inventory: ResMut<Inventory>,
    mut hotbar: ResMut<Hotbar>,
    mut resolved_writer: EventWriter<PlacementResolvedEvent>,
) {
    for ev in result_events.read() {
        let outcome = resolve(&mut gate, ev.success, &mut grid, &mut inventory, &mut hotbar)
            .unwrap_or(PlacementOutcome::Unattached { success: ev.success });
        match &outcome {
            PlacementOutcome::Placed { farm_type, block_x } => {
                info!("[Placement] {} placed on block {}", farm_type, block_x);
            }
            PlacementOutcome::Invalidated(error) => {
                warn!("[Placement] Discarded at commit: {}", error);
            }
            other => info!("[Placement] Minigame result: {:?}", other),
        }
        resolved_writer.send(PlacementResolvedEvent { outcome });
    }
}

pub fn handle_cancel_placement(
    mut cancel_events: EventReader<CancelPlacementEvent>,
    mut gate: ResMut<PlacementGate>,
    mut resolved_writer: EventWriter<PlacementResolvedEvent>,
) {
    for _ in cancel_events.read() {
        match cancel(&mut gate) {
            Ok(outcome) => {
                info!("[Placement] Placement cancelled");
                resolved_writer.send(PlacementResolvedEvent { outcome });
            }
            // Escape with nothing pending just closes whatever overlay is open.
            Err(_) => debug!("[Placement] Cancel with nothing pending"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{populate_world, GameConfig};

    struct Fixture {
        gate: PlacementGate,
        catalog: ItemCatalog,
        grid: FarmGrid,
        inventory: Inventory,
        hotbar: Hotbar,
    }

    impl Fixture {
        fn with_kit(item_id: &str) -> Self {
            let game = populate_world(&GameConfig::default());
            let mut hotbar = game.hotbar;
            hotbar.replace(4, Some(ItemStack::new(item_id, 1))).unwrap();
            Self {
                gate: PlacementGate::default(),
                catalog: game.catalog,
                grid: game.grid,
                inventory: game.inventory,
                hotbar,
            }
        }

        fn request(&mut self, block_x: u32, source: SlotRef) -> Result<PendingPlacement, FarmError> {
            request_placement(
                &mut self.gate,
                block_x,
                source,
                &self.catalog,
                &self.grid,
                &self.inventory,
                &self.hotbar,
            )
        }

        fn resolve(&mut self, success: bool) -> Result<PlacementOutcome, FarmError> {
            resolve(&mut self.gate, success, &mut self.grid, &mut self.inventory, &mut self.hotbar)
        }
    }

    #[test]
    fn test_success_places_farm_and_consumes_kit() {
        let mut fx = Fixture::with_kit("tech_farm");
        let pending = fx.request(10, SlotRef::hotbar(4)).unwrap();
        assert_eq!(pending.minigame, MinigameKind::TechCalibration);
        assert!(fx.grid.farms().is_empty());

        let outcome = fx.resolve(true).unwrap();
        assert_eq!(outcome, PlacementOutcome::Placed { farm_type: "tech_farm".into(), block_x: 10 });
        assert_eq!(fx.grid.farms().len(), 1);
        assert_eq!(fx.grid.farms()[0].production_multiplier, 1);
        assert!(fx.grid.block(10).unwrap().farm_id().is_some());
        assert_eq!(fx.hotbar.get(4), Ok(None));
        assert!(fx.gate.is_idle());
    }

    #[test]
    fn test_failure_discards_without_change() {
        let mut fx = Fixture::with_kit("auto_farm_basic");
        fx.request(10, SlotRef::hotbar(4)).unwrap();
        assert_eq!(fx.resolve(false), Ok(PlacementOutcome::Failed));
        assert!(fx.grid.farms().is_empty());
        assert_eq!(fx.hotbar.count("auto_farm_basic"), 1);
        assert!(fx.gate.is_idle());
    }

    #[test]
    fn test_second_request_rejected_until_resolved() {
        let mut fx = Fixture::with_kit("auto_farm_basic");
        fx.request(10, SlotRef::hotbar(4)).unwrap();
        assert_eq!(
            fx.request(11, SlotRef::hotbar(4)),
            Err(FarmError::PlacementAlreadyInProgress)
        );
        fx.resolve(false).unwrap();
        assert!(fx.request(11, SlotRef::hotbar(4)).is_ok());
    }

    #[test]
    fn test_request_validation() {
        let mut fx = Fixture::with_kit("auto_farm_basic");
        fx.grid.insert_crop(3, "cactus").unwrap();
        assert_eq!(fx.request(3, SlotRef::hotbar(4)), Err(FarmError::BlockOccupied(3)));
        assert_eq!(
            fx.request(4, SlotRef::hotbar(0)),
            Err(FarmError::NotAFarmKit("cactus_seed".into()))
        );
        assert_eq!(
            fx.request(4, SlotRef::hotbar(6)),
            Err(FarmError::EmptySlot { container: Container::Hotbar, index: 6 })
        );
        assert_eq!(fx.request(99, SlotRef::hotbar(4)), Err(FarmError::InvalidBlock(99)));
        assert!(fx.gate.is_idle(), "Rejected requests leave the gate idle");
    }

    #[test]
    fn test_commit_revalidates_block_and_kit() {
        let mut fx = Fixture::with_kit("auto_farm_basic");
        fx.request(5, SlotRef::hotbar(4)).unwrap();
        fx.grid.insert_crop(5, "cactus").unwrap();
        assert_eq!(
            fx.resolve(true),
            Ok(PlacementOutcome::Invalidated(FarmError::BlockOccupied(5)))
        );
        assert_eq!(fx.hotbar.count("auto_farm_basic"), 1, "Kit is kept when nothing is placed");

        fx.request(6, SlotRef::hotbar(4)).unwrap();
        fx.hotbar.swap(4, 5).unwrap();
        assert_eq!(
            fx.resolve(true),
            Ok(PlacementOutcome::Invalidated(FarmError::KitMoved {
                container: Container::Hotbar,
                index: 4
            }))
        );
        assert!(fx.grid.farms().is_empty());
        assert!(fx.gate.is_idle());
    }

    #[test]
    fn test_cancel_and_unattached_results() {
        let mut fx = Fixture::with_kit("lottery_farm");
        assert_eq!(cancel(&mut fx.gate), Err(FarmError::NoPlacementPending));
        assert_eq!(fx.resolve(true), Err(FarmError::NoPlacementPending));

        fx.request(2, SlotRef::hotbar(4)).unwrap();
        assert_eq!(cancel(&mut fx.gate), Ok(PlacementOutcome::Cancelled));
        assert!(fx.gate.is_idle());
        assert_eq!(fx.hotbar.count("lottery_farm"), 1);
    }

    #[test]
    fn test_wide_footprint_needs_every_block() {
        let mut config = GameConfig::default();
        for farm_type in &mut config.farm_types {
            farm_type.footprint = 3;
        }
        let game = populate_world(&config);
        let mut gate = PlacementGate::default();
        let mut grid = game.grid;
        let mut hotbar = game.hotbar;
        let mut inventory = game.inventory;
        hotbar.replace(4, Some(ItemStack::new("sprinkler_farm", 1))).unwrap();
        grid.insert_crop(12, "cactus").unwrap();

        let err = request_placement(&mut gate, 10, SlotRef::hotbar(4), &game.catalog, &grid, &inventory, &hotbar)
            .unwrap_err();
        assert_eq!(err, FarmError::BlockOccupied(12));

        request_placement(&mut gate, 20, SlotRef::hotbar(4), &game.catalog, &grid, &inventory, &hotbar).unwrap();
        resolve(&mut gate, true, &mut grid, &mut inventory, &mut hotbar).unwrap();
        for x in 20..23 {
            assert!(grid.block(x).unwrap().farm_id().is_some());
        }
        assert_eq!(grid.farms().len(), 1);
    }
}
