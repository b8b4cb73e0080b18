//! Shared components, resources, events, and states for Cactus Farm.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.
//!
//! State objects enforce their own invariants: slot stores merge on insert,
//! the farm grid keeps block occupancy in sync with its crop and farm lists,
//! and the ledger refuses debits it cannot cover. Domain modules compose these
//! primitives into the game operations.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE: top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Playing,
}

// ═══════════════════════════════════════════════════════════════════════
// ITEM CATALOG
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for every item type in the game.
/// Using string IDs for data-driven flexibility.
pub type ItemId = String;
pub type FarmTypeId = String;

/// What an item does when used on a farm block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Seed { crop: String },
    Wand { growth_power: u32 },
    Hoe { harvest_power: u32 },
    FarmKit { farm_type: FarmTypeId },
}

impl ItemKind {
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Seed { .. } => "seed",
            ItemKind::Wand { .. } => "wand",
            ItemKind::Hoe { .. } => "hoe",
            ItemKind::FarmKit { .. } => "farm",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub cost: u64,
    /// Units added to the inventory per purchase (seeds come in packs).
    #[serde(default = "default_grant_quantity")]
    pub grant_quantity: u32,
    pub kind: ItemKind,
}

fn default_grant_quantity() -> u32 {
    1
}

/// The external minigame a farm type must pass before it is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MinigameKind {
    ModApproval,
    SprinklerPuzzle,
    TechCalibration,
    CactusLottery,
}

impl MinigameKind {
    pub fn id(&self) -> &'static str {
        match self {
            MinigameKind::ModApproval => "mod_approval",
            MinigameKind::SprinklerPuzzle => "sprinkler_puzzle",
            MinigameKind::TechCalibration => "tech_calibration",
            MinigameKind::CactusLottery => "cactus_lottery",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmTypeDef {
    pub id: FarmTypeId,
    pub name: String,
    /// Source credited per production tick, before the farm's multiplier.
    pub production: u64,
    pub minigame: MinigameKind,
    /// Number of consecutive blocks the farm occupies.
    #[serde(default = "default_footprint")]
    pub footprint: u32,
}

fn default_footprint() -> u32 {
    1
}

/// Read-only registry of item and farm definitions. Populated once in
/// `GameState::Loading` by the data plugin.
#[derive(Resource, Debug, Clone, Default)]
pub struct ItemCatalog {
    pub items: HashMap<ItemId, ItemDef>,
    pub farm_types: HashMap<FarmTypeId, FarmTypeDef>,
    /// Insertion order, used for stable shop listings.
    pub shop_order: Vec<ItemId>,
}

impl ItemCatalog {
    pub fn insert_item(&mut self, def: ItemDef) {
        if !self.items.contains_key(&def.id) {
            self.shop_order.push(def.id.clone());
        }
        self.items.insert(def.id.clone(), def);
    }

    pub fn insert_farm_type(&mut self, def: FarmTypeDef) {
        self.farm_types.insert(def.id.clone(), def);
    }

    pub fn get(&self, id: &str) -> Option<&ItemDef> {
        self.items.get(id)
    }

    pub fn farm_type(&self, id: &str) -> Option<&FarmTypeDef> {
        self.farm_types.get(id)
    }

    /// Items in shop order.
    pub fn listed(&self) -> impl Iterator<Item = &ItemDef> {
        self.shop_order.iter().filter_map(|id| self.items.get(id))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INVENTORY & HOTBAR
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item_id: ItemId,
    pub quantity: u32,
}

impl ItemStack {
    pub fn new(item_id: impl Into<ItemId>, quantity: u32) -> Self {
        Self {
            item_id: item_id.into(),
            quantity,
        }
    }

    pub fn stacks_with(&self, other: &ItemStack) -> bool {
        self.item_id == other.item_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Container {
    Inventory,
    Hotbar,
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Container::Inventory => f.write_str("inventory"),
            Container::Hotbar => f.write_str("hotbar"),
        }
    }
}

/// Address of a single slot in either container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotRef {
    pub container: Container,
    pub index: usize,
}

impl SlotRef {
    pub fn inventory(index: usize) -> Self {
        Self {
            container: Container::Inventory,
            index,
        }
    }

    pub fn hotbar(index: usize) -> Self {
        Self {
            container: Container::Hotbar,
            index,
        }
    }
}

/// Where a dragged stack is dropped: onto a specific slot, or onto a
/// container as a whole (the stack then goes wherever the container's
/// insert policy puts it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropTarget {
    Slot(SlotRef),
    Container(Container),
}

/// Fixed-length array of optional stacks with merge-on-insert semantics.
/// Backs both the inventory and the hotbar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotStore {
    container: Container,
    slots: Vec<Option<ItemStack>>,
}

impl SlotStore {
    pub fn new(container: Container, len: usize) -> Self {
        Self {
            container,
            slots: vec![None; len],
        }
    }

    pub fn container(&self) -> Container {
        self.container
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Option<ItemStack>] {
        &self.slots
    }

    fn check_index(&self, index: usize) -> Result<(), FarmError> {
        if index < self.slots.len() {
            Ok(())
        } else {
            Err(FarmError::InvalidSlotIndex {
                container: self.container,
                index,
            })
        }
    }

    pub fn get(&self, index: usize) -> Result<Option<&ItemStack>, FarmError> {
        self.check_index(index)?;
        Ok(self.slots[index].as_ref())
    }

    /// Number of non-empty slots.
    pub fn slots_used(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn count(&self, item_id: &str) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|s| s.item_id == item_id)
            .map(|s| s.quantity)
            .sum()
    }

    /// Slot an `add_stack` of `item_id` would land in, if any.
    pub fn insert_position(&self, item_id: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.as_ref().is_some_and(|s| s.item_id == item_id))
            .or_else(|| self.slots.iter().position(Option::is_none))
    }

    /// Merge into the first stack with a matching id, otherwise fill the first
    /// empty slot. Stack size is unbounded. Returns the slot used. Adding zero
    /// units changes nothing and never occupies an empty slot.
    pub fn add_stack(&mut self, item_id: &str, quantity: u32) -> Result<usize, FarmError> {
        let index = self
            .insert_position(item_id)
            .ok_or(FarmError::CapacityExceeded(self.container))?;
        if quantity == 0 {
            return Ok(index);
        }
        match &mut self.slots[index] {
            Some(stack) => stack.quantity = stack.quantity.saturating_add(quantity),
            empty => *empty = Some(ItemStack::new(item_id, quantity)),
        }
        Ok(index)
    }

    /// Decrement the stack in `index` by one, emptying the slot at zero.
    /// Returns the quantity left behind.
    pub fn remove_one(&mut self, index: usize) -> Result<u32, FarmError> {
        self.check_index(index)?;
        let container = self.container;
        let slot = &mut self.slots[index];
        let Some(stack) = slot.as_mut() else {
            return Err(FarmError::EmptySlot { container, index });
        };
        stack.quantity = stack.quantity.saturating_sub(1);
        let left = stack.quantity;
        if left == 0 {
            *slot = None;
        }
        Ok(left)
    }

    pub fn remove_all(&mut self, index: usize) -> Result<ItemStack, FarmError> {
        self.check_index(index)?;
        self.slots[index].take().ok_or(FarmError::EmptySlot {
            container: self.container,
            index,
        })
    }

    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), FarmError> {
        self.check_index(a)?;
        self.check_index(b)?;
        self.slots.swap(a, b);
        Ok(())
    }

    /// Overwrite a slot, returning its former contents. Only the transfer
    /// protocol writes slots wholesale.
    pub(crate) fn replace(
        &mut self,
        index: usize,
        content: Option<ItemStack>,
    ) -> Result<Option<ItemStack>, FarmError> {
        self.check_index(index)?;
        Ok(std::mem::replace(&mut self.slots[index], content))
    }
}

/// The backpack: an ordered, bounded list of slots.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Deref, DerefMut)]
pub struct Inventory(SlotStore);

impl Inventory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self(SlotStore::new(Container::Inventory, capacity))
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::with_capacity(INVENTORY_SLOTS)
    }
}

/// Quick-access slots usable directly on the world. Exactly one slot is
/// selected at all times.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Deref, DerefMut)]
pub struct Hotbar {
    #[deref]
    store: SlotStore,
    selected: usize,
}

impl Hotbar {
    pub fn with_size(size: usize) -> Self {
        Self {
            store: SlotStore::new(Container::Hotbar, size.max(1)),
            selected: 0,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_slot(&self) -> SlotRef {
        SlotRef::hotbar(self.selected)
    }

    pub fn selected_stack(&self) -> Option<&ItemStack> {
        self.store.slots[self.selected].as_ref()
    }

    /// Out-of-range indices are rejected and leave the selection unchanged.
    pub fn select(&mut self, index: usize) -> Result<(), FarmError> {
        self.store.check_index(index)?;
        self.selected = index;
        Ok(())
    }
}

impl Default for Hotbar {
    fn default() -> Self {
        Self::with_size(HOTBAR_SLOTS)
    }
}

/// Borrow the store a slot reference points into.
pub fn store<'a>(
    container: Container,
    inventory: &'a Inventory,
    hotbar: &'a Hotbar,
) -> &'a SlotStore {
    match container {
        Container::Inventory => &inventory.0,
        Container::Hotbar => &hotbar.store,
    }
}

pub fn store_mut<'a>(
    container: Container,
    inventory: &'a mut Inventory,
    hotbar: &'a mut Hotbar,
) -> &'a mut SlotStore {
    match container {
        Container::Inventory => &mut inventory.0,
        Container::Hotbar => &mut hotbar.store,
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ECONOMY
// ═══════════════════════════════════════════════════════════════════════

/// The single in-game currency ("source") plus lifetime counters.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceLedger {
    balance: u64,
    total_harvested: u64,
    total_earned: u64,
    total_spent: u64,
    transactions: u64,
}

impl SourceLedger {
    pub fn with_balance(balance: u64) -> Self {
        Self {
            balance,
            ..default()
        }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn total_harvested(&self) -> u64 {
        self.total_harvested
    }

    pub fn total_earned(&self) -> u64 {
        self.total_earned
    }

    pub fn total_spent(&self) -> u64 {
        self.total_spent
    }

    pub fn transactions(&self) -> u64 {
        self.transactions
    }

    pub fn can_afford(&self, cost: u64) -> bool {
        self.balance >= cost
    }

    pub fn debit(&mut self, cost: u64) -> Result<(), FarmError> {
        if !self.can_afford(cost) {
            return Err(FarmError::InsufficientFunds {
                cost,
                balance: self.balance,
            });
        }
        self.balance -= cost;
        self.total_spent = self.total_spent.saturating_add(cost);
        self.transactions += 1;
        Ok(())
    }

    pub fn credit(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
        self.total_earned = self.total_earned.saturating_add(amount);
        self.transactions += 1;
    }

    pub fn record_harvested(&mut self, count: u64) {
        self.total_harvested = self.total_harvested.saturating_add(count);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// FARMING GRID
// ═══════════════════════════════════════════════════════════════════════

/// Identifier handed out to crops and auto-farms.
pub type FarmEntityId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum BlockOccupant {
    Crop(FarmEntityId),
    Farm(FarmEntityId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FarmBlock {
    pub x: u32,
    pub occupant: Option<BlockOccupant>,
}

impl FarmBlock {
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn crop_id(&self) -> Option<FarmEntityId> {
        match self.occupant {
            Some(BlockOccupant::Crop(id)) => Some(id),
            _ => None,
        }
    }

    pub fn farm_id(&self) -> Option<FarmEntityId> {
        match self.occupant {
            Some(BlockOccupant::Farm(id)) => Some(id),
            _ => None,
        }
    }
}

/// Display stage of a crop, picks the sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CropStage {
    Sprout,
    Growing,
    Mature,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crop {
    pub id: FarmEntityId,
    pub block_x: u32,
    /// Percent, 0..=MAX_GROWTH.
    pub growth: u8,
    pub crop_type: String,
}

impl Crop {
    pub fn is_mature(&self) -> bool {
        self.growth >= MAX_GROWTH
    }

    pub fn stage(&self) -> CropStage {
        match self.growth {
            g if g >= MAX_GROWTH => CropStage::Mature,
            g if g >= 50 => CropStage::Growing,
            _ => CropStage::Sprout,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutoFarm {
    pub id: FarmEntityId,
    pub farm_type: FarmTypeId,
    /// Leftmost block of the footprint.
    pub block_x: u32,
    pub footprint: u32,
    pub production_multiplier: u64,
}

/// Ordered blocks plus the crops and farms that occupy them. Block occupancy
/// is only ever changed together with the crop/farm lists.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct FarmGrid {
    blocks: Vec<FarmBlock>,
    crops: Vec<Crop>,
    farms: Vec<AutoFarm>,
    next_id: FarmEntityId,
}

impl FarmGrid {
    pub fn with_blocks(count: u32) -> Self {
        Self {
            blocks: (0..count).map(|x| FarmBlock { x, occupant: None }).collect(),
            crops: Vec::new(),
            farms: Vec::new(),
            next_id: 1,
        }
    }

    pub fn blocks(&self) -> &[FarmBlock] {
        &self.blocks
    }

    pub fn crops(&self) -> &[Crop] {
        &self.crops
    }

    pub fn farms(&self) -> &[AutoFarm] {
        &self.farms
    }

    pub fn block(&self, x: u32) -> Result<&FarmBlock, FarmError> {
        self.blocks.get(x as usize).ok_or(FarmError::InvalidBlock(x))
    }

    pub fn crop_at(&self, x: u32) -> Option<&Crop> {
        self.crops.iter().find(|c| c.block_x == x)
    }

    pub(crate) fn crop_at_mut(&mut self, x: u32) -> Option<&mut Crop> {
        self.crops.iter_mut().find(|c| c.block_x == x)
    }

    /// Fails on the first block of `x..x + width` that is missing or occupied.
    pub fn ensure_free(&self, x: u32, width: u32) -> Result<(), FarmError> {
        for bx in x..x.saturating_add(width.max(1)) {
            if self.block(bx)?.is_occupied() {
                return Err(FarmError::BlockOccupied(bx));
            }
        }
        Ok(())
    }

    fn allocate_id(&mut self) -> FarmEntityId {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }

    pub(crate) fn insert_crop(
        &mut self,
        x: u32,
        crop_type: &str,
    ) -> Result<FarmEntityId, FarmError> {
        self.ensure_free(x, 1)?;
        let id = self.allocate_id();
        self.blocks[x as usize].occupant = Some(BlockOccupant::Crop(id));
        self.crops.push(Crop {
            id,
            block_x: x,
            growth: 0,
            crop_type: crop_type.to_string(),
        });
        Ok(id)
    }

    /// Destroy the crop on block `x` and free the block.
    pub(crate) fn remove_crop(&mut self, x: u32) -> Option<Crop> {
        let pos = self.crops.iter().position(|c| c.block_x == x)?;
        let crop = self.crops.remove(pos);
        if let Some(block) = self.blocks.get_mut(x as usize) {
            block.occupant = None;
        }
        Some(crop)
    }

    pub(crate) fn insert_farm(
        &mut self,
        farm_type: &str,
        x: u32,
        footprint: u32,
    ) -> Result<FarmEntityId, FarmError> {
        let footprint = footprint.max(1);
        self.ensure_free(x, footprint)?;
        let id = self.allocate_id();
        for bx in x..x + footprint {
            self.blocks[bx as usize].occupant = Some(BlockOccupant::Farm(id));
        }
        self.farms.push(AutoFarm {
            id,
            farm_type: farm_type.to_string(),
            block_x: x,
            footprint,
            production_multiplier: 1,
        });
        Ok(id)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLACEMENT GATE
// ═══════════════════════════════════════════════════════════════════════

/// Everything needed to commit a farm once its minigame passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingPlacement {
    pub farm_item: ItemId,
    pub farm_type: FarmTypeId,
    pub block_x: u32,
    pub footprint: u32,
    pub source: SlotRef,
    pub minigame: MinigameKind,
}

/// Single-slot state machine: at most one placement waits on a minigame.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub enum PlacementGate {
    #[default]
    Idle,
    AwaitingMinigameResult(PendingPlacement),
}

impl PlacementGate {
    pub fn pending(&self) -> Option<&PendingPlacement> {
        match self {
            PlacementGate::Idle => None,
            PlacementGate::AwaitingMinigameResult(p) => Some(p),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, PlacementGate::Idle)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// RULES: tunables copied out of the loaded config
// ═══════════════════════════════════════════════════════════════════════

/// Numbers the domain plugins need at runtime. Inserted by the data plugin
/// so that no domain has to read the config file format.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct FarmRules {
    /// World units per farm block.
    pub block_size: u32,
    /// Growth percent per point of wand power.
    pub growth_unit: u32,
    /// Payout per point of hoe power.
    pub base_per_cactus: u64,
    pub production_interval_secs: f32,
    pub max_visible_notifications: usize,
}

impl Default for FarmRules {
    fn default() -> Self {
        Self {
            block_size: BLOCK_SIZE,
            growth_unit: 15,
            base_per_cactus: 10,
            production_interval_secs: 2.0,
            max_visible_notifications: 5,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ERRORS
// ═══════════════════════════════════════════════════════════════════════

/// Every failure a core operation can report. All are local to the action
/// that produced them; none are fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FarmError {
    #[error("not enough source: need {cost}, have {balance}")]
    InsufficientFunds { cost: u64, balance: u64 },

    #[error("block {0} is already occupied")]
    BlockOccupied(u32),

    #[error("no crop on block {0}")]
    NoCropPresent(u32),

    #[error("crop on block {block_x} is only {growth}% grown")]
    NotMature { block_x: u32, growth: u8 },

    #[error("crop on block {0} is already fully grown")]
    AlreadyMature(u32),

    #[error("{0} is full")]
    CapacityExceeded(Container),

    #[error("a farm placement is already waiting on its minigame")]
    PlacementAlreadyInProgress,

    #[error("no farm placement is pending")]
    NoPlacementPending,

    #[error("{container} slot {index} does not exist")]
    InvalidSlotIndex { container: Container, index: usize },

    #[error("{container} slot {index} is empty")]
    EmptySlot { container: Container, index: usize },

    #[error("block {0} does not exist")]
    InvalidBlock(u32),

    #[error("position is outside the farmland")]
    OutsideFarmland,

    #[error("no item selected")]
    NothingSelected,

    #[error("unknown item '{0}'")]
    UnknownItem(ItemId),

    #[error("unknown farm type '{0}'")]
    UnknownFarmType(FarmTypeId),

    #[error("'{0}' is not a farm kit")]
    NotAFarmKit(ItemId),

    #[error("{container} slot {index} no longer holds the farm kit")]
    KitMoved { container: Container, index: usize },
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS: UI → core requests
// ═══════════════════════════════════════════════════════════════════════

#[derive(Event, Debug, Clone)]
pub struct BuyRequestEvent {
    pub item_id: ItemId,
}

/// Use an item on a block. `source: None` means the selected hotbar slot.
#[derive(Event, Debug, Clone)]
pub struct UseItemEvent {
    pub block_x: u32,
    pub source: Option<SlotRef>,
}

#[derive(Event, Debug, Clone)]
pub struct DragTransferEvent {
    pub from: SlotRef,
    pub to: DropTarget,
}

#[derive(Event, Debug, Clone)]
pub struct SelectHotbarEvent {
    pub index: usize,
}

/// Farm kit used on a block. Sent by farming, consumed by the placement gate.
#[derive(Event, Debug, Clone)]
pub struct PlacementRequestEvent {
    pub block_x: u32,
    pub source: SlotRef,
}

/// The single callback from the minigame collaborator.
#[derive(Event, Debug, Clone)]
pub struct MinigameResultEvent {
    pub success: bool,
}

/// Escape out of an active placement minigame.
#[derive(Event, Debug, Clone)]
pub struct CancelPlacementEvent;

// ═══════════════════════════════════════════════════════════════════════
// EVENTS: core → UI / collaborators
// ═══════════════════════════════════════════════════════════════════════

/// Informational: the ledger already changed when this is sent.
#[derive(Event, Debug, Clone)]
pub struct SourceChangeEvent {
    pub amount: i64,
    pub reason: String,
}

#[derive(Event, Debug, Clone)]
pub struct PurchaseEvent {
    pub item_id: ItemId,
    pub quantity: u32,
    pub cost: u64,
}

#[derive(Event, Debug, Clone)]
pub struct CropPlantedEvent {
    pub block_x: u32,
    pub crop_type: String,
}

#[derive(Event, Debug, Clone)]
pub struct CropGrownEvent {
    pub block_x: u32,
    pub gained: u8,
    pub growth: u8,
}

#[derive(Event, Debug, Clone)]
pub struct CropHarvestedEvent {
    pub block_x: u32,
    pub payout: u64,
}

/// Tells the minigame collaborator to start.
#[derive(Event, Debug, Clone)]
pub struct MinigameStartEvent {
    pub farm_type: FarmTypeId,
    pub minigame: MinigameKind,
    pub block_x: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementOutcome {
    Placed { farm_type: FarmTypeId, block_x: u32 },
    Failed,
    Cancelled,
    /// The world changed while the minigame ran; nothing was placed.
    Invalidated(FarmError),
    /// A minigame result arrived with no placement attached.
    Unattached { success: bool },
}

#[derive(Event, Debug, Clone)]
pub struct PlacementResolvedEvent {
    pub outcome: PlacementOutcome,
}

#[derive(Event, Debug, Clone)]
pub struct ActionFailedEvent {
    pub error: FarmError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Warning,
    Source,
    Growth,
    Farm,
    Purchase,
    Plant,
}

/// Toast notification for player feedback. Fire-and-forget.
#[derive(Event, Debug, Clone)]
pub struct ToastEvent {
    pub message: String,
    pub kind: NotificationKind,
    pub duration_secs: f32,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const MAX_GROWTH: u8 = 100;

pub const HOTBAR_SLOTS: usize = 7;
pub const INVENTORY_SLOTS: usize = 48;

pub const WORLD_WIDTH: u32 = 3000;
pub const FARMLAND_OVERHANG: u32 = 500;
pub const BLOCK_SIZE: u32 = 100;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_stack_merges_then_fills_empty() {
        let mut inv = Inventory::with_capacity(3);
        assert_eq!(inv.add_stack("cactus_seed", 5), Ok(0));
        assert_eq!(inv.add_stack("hoe_bronze", 1), Ok(1));
        assert_eq!(inv.add_stack("cactus_seed", 5), Ok(0));
        assert_eq!(inv.count("cactus_seed"), 10);
        assert_eq!(inv.slots_used(), 2);
    }

    #[test]
    fn test_add_stack_capacity_exceeded_leaves_store_unchanged() {
        let mut inv = Inventory::with_capacity(2);
        inv.add_stack("a", 1).unwrap();
        inv.add_stack("b", 1).unwrap();
        let before = inv.clone();

        let err = inv.add_stack("c", 1).unwrap_err();
        assert_eq!(err, FarmError::CapacityExceeded(Container::Inventory));
        assert_eq!(inv, before, "Failed insert must not touch the inventory");

        // A mergeable id still fits when every slot is used.
        assert_eq!(inv.add_stack("b", 4), Ok(1));
        assert_eq!(inv.count("b"), 5);
    }

    #[test]
    fn test_add_zero_units_occupies_nothing() {
        let mut inv = Inventory::with_capacity(2);
        assert_eq!(inv.add_stack("hoe_gold", 0), Ok(0));
        assert_eq!(inv.get(0), Ok(None));
        assert_eq!(inv.slots_used(), 0);

        inv.add_stack("cactus_seed", 3).unwrap();
        assert_eq!(inv.add_stack("cactus_seed", 0), Ok(0));
        assert_eq!(inv.count("cactus_seed"), 3);
    }

    #[test]
    fn test_remove_one_empties_slot_at_zero() {
        let mut inv = Inventory::with_capacity(2);
        inv.add_stack("cactus_seed", 2).unwrap();
        assert_eq!(inv.remove_one(0), Ok(1));
        assert_eq!(inv.remove_one(0), Ok(0));
        assert_eq!(inv.get(0), Ok(None));
        assert_eq!(
            inv.remove_one(0),
            Err(FarmError::EmptySlot { container: Container::Inventory, index: 0 })
        );
    }

    #[test]
    fn test_remove_all_and_swap() {
        let mut hotbar = Hotbar::with_size(3);
        hotbar.add_stack("hoe_gold", 1).unwrap();
        hotbar.swap(0, 2).unwrap();
        assert_eq!(hotbar.get(0), Ok(None));
        assert_eq!(hotbar.remove_all(2), Ok(ItemStack::new("hoe_gold", 1)));
        assert!(hotbar.remove_all(2).is_err(), "Second remove_all hits an empty slot");
        assert_eq!(
            hotbar.swap(0, 3),
            Err(FarmError::InvalidSlotIndex { container: Container::Hotbar, index: 3 })
        );
    }

    #[test]
    fn test_hotbar_select_rejects_out_of_range() {
        let mut hotbar = Hotbar::with_size(7);
        hotbar.select(6).unwrap();
        assert_eq!(hotbar.selected(), 6);
        assert!(hotbar.select(7).is_err());
        assert_eq!(hotbar.selected(), 6, "Rejected select keeps the old index");
    }

    #[test]
    fn test_ledger_debit_guarded() {
        let mut ledger = SourceLedger::with_balance(100);
        assert!(ledger.can_afford(100));
        ledger.debit(40).unwrap();
        assert_eq!(ledger.balance(), 60);
        assert_eq!(
            ledger.debit(61),
            Err(FarmError::InsufficientFunds { cost: 61, balance: 60 })
        );
        assert_eq!(ledger.balance(), 60);
        ledger.credit(15);
        assert_eq!(ledger.balance(), 75);
        assert_eq!(ledger.total_spent(), 40);
        assert_eq!(ledger.total_earned(), 15);
        assert_eq!(ledger.transactions(), 2);
    }

    #[test]
    fn test_grid_occupancy_tracks_crops_and_farms() {
        let mut grid = FarmGrid::with_blocks(6);
        let crop = grid.insert_crop(1, "cactus").unwrap();
        assert_eq!(grid.block(1).unwrap().crop_id(), Some(crop));
        assert_eq!(grid.insert_crop(1, "cactus"), Err(FarmError::BlockOccupied(1)));

        let farm = grid.insert_farm("tech_farm", 2, 2).unwrap();
        assert_eq!(grid.block(2).unwrap().farm_id(), Some(farm));
        assert_eq!(grid.block(3).unwrap().farm_id(), Some(farm));
        assert_eq!(grid.insert_farm("tech_farm", 3, 1), Err(FarmError::BlockOccupied(3)));
        assert_eq!(grid.insert_farm("tech_farm", 5, 2), Err(FarmError::InvalidBlock(6)));

        let removed = grid.remove_crop(1).unwrap();
        assert_eq!(removed.id, crop);
        assert!(!grid.block(1).unwrap().is_occupied());
        assert!(grid.crops().is_empty());
    }

    #[test]
    fn test_crop_stage_thresholds() {
        let mut crop = Crop { id: 1, block_x: 0, growth: 0, crop_type: "cactus".into() };
        assert_eq!(crop.stage(), CropStage::Sprout);
        crop.growth = 49;
        assert_eq!(crop.stage(), CropStage::Sprout);
        crop.growth = 50;
        assert_eq!(crop.stage(), CropStage::Growing);
        crop.growth = 100;
        assert_eq!(crop.stage(), CropStage::Mature);
        assert!(crop.is_mature());
    }
}
