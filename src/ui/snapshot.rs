//! Read-only view of the whole game, enough to redraw a frame.

use serde::Serialize;
use crate::economy::ledger::format_source;
use crate::shared::*;

use super::notifications::NotificationLog;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CropView {
    pub id: FarmEntityId,
    pub block_x: u32,
    pub crop_type: String,
    pub growth: u8,
    pub stage: CropStage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationView {
    pub message: String,
    pub kind: NotificationKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub balance: u64,
    pub balance_display: String,
    pub total_harvested: u64,
    pub auto_farm_count: usize,
    pub hotbar: Vec<Option<ItemStack>>,
    pub selected_slot: usize,
    pub inventory: Vec<Option<ItemStack>>,
    pub blocks: Vec<FarmBlock>,
    pub crops: Vec<CropView>,
    pub farms: Vec<AutoFarm>,
    pub pending_placement: Option<PendingPlacement>,
    pub notifications: Vec<NotificationView>,
}

impl GameSnapshot {
    pub fn capture(
        ledger: &SourceLedger,
        inventory: &Inventory,
        hotbar: &Hotbar,
        grid: &FarmGrid,
        gate: &PlacementGate,
        log: &NotificationLog,
    ) -> Self {
        Self {
            balance: ledger.balance(),
            balance_display: format_source(ledger.balance()),
            total_harvested: ledger.total_harvested(),
            auto_farm_count: grid.farms().len(),
            hotbar: hotbar.slots().to_vec(),
            selected_slot: hotbar.selected(),
            inventory: inventory.slots().to_vec(),
            blocks: grid.blocks().to_vec(),
            crops: grid
                .crops()
                .iter()
                .map(|crop| CropView {
                    id: crop.id,
                    block_x: crop.block_x,
                    crop_type: crop.crop_type.clone(),
                    growth: crop.growth,
                    stage: crop.stage(),
                })
                .collect(),
            farms: grid.farms().to_vec(),
            pending_placement: gate.pending().cloned(),
            notifications: log
                .entries()
                .map(|n| NotificationView {
                    message: n.message.clone(),
                    kind: n.kind,
                })
                .collect(),
        }
    }

    /// Occupied blocks as (x, occupant) pairs, for compact display.
    pub fn occupied_blocks(&self) -> impl Iterator<Item = (u32, BlockOccupant)> + '_ {
        self.blocks
            .iter()
            .filter_map(|block| block.occupant.map(|occupant| (block.x, occupant)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_reflects_state() {
        let ledger = SourceLedger::with_balance(12_345);
        let inventory = Inventory::with_capacity(4);
        let mut hotbar = Hotbar::with_size(3);
        hotbar.add_stack("cactus_seed", 3).unwrap();
        hotbar.select(2).unwrap();
        let mut grid = FarmGrid::with_blocks(5);
        grid.insert_crop(1, "cactus").unwrap();
        grid.insert_farm("auto_farm_basic", 3, 1).unwrap();

        let snapshot = GameSnapshot::capture(
            &ledger,
            &inventory,
            &hotbar,
            &grid,
            &PlacementGate::Idle,
            &NotificationLog::default(),
        );

        assert_eq!(snapshot.balance_display, "12,345 Source");
        assert_eq!(snapshot.selected_slot, 2);
        assert_eq!(snapshot.hotbar[0], Some(ItemStack::new("cactus_seed", 3)));
        assert_eq!(snapshot.inventory.len(), 4);
        assert_eq!(snapshot.auto_farm_count, 1);
        assert_eq!(snapshot.crops[0].stage, CropStage::Sprout);
        let occupied: Vec<u32> = snapshot.occupied_blocks().map(|(x, _)| x).collect();
        assert_eq!(occupied, vec![1, 3]);
        assert!(snapshot.pending_placement.is_none());
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let snapshot = GameSnapshot::capture(
            &SourceLedger::with_balance(5),
            &Inventory::with_capacity(1),
            &Hotbar::with_size(1),
            &FarmGrid::with_blocks(1),
            &PlacementGate::Idle,
            &NotificationLog::default(),
        );
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["balance"], 5);
        assert_eq!(json["blocks"][0]["occupant"], serde_json::Value::Null);
    }
}
