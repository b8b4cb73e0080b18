use bevy::prelude::*;
use crate::shared::*;

use super::ledger::signed;

// ─────────────────────────────────────────────────────────────────────────────
// Listings
// ─────────────────────────────────────────────────────────────────────────────

/// A single shop entry, enriched with item info for the UI.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ShopListing {
    pub item_id: ItemId,
    pub name: String,
    pub description: String,
    pub category: &'static str,
    pub cost: u64,
    pub grant_quantity: u32,
    /// Cached against the current balance; unaffordable entries are greyed out.
    pub can_afford: bool,
}

/// Every catalog item in shop order.
pub fn build_listings(catalog: &ItemCatalog, ledger: &SourceLedger) -> Vec<ShopListing> {
    catalog
        .listed()
        .map(|def| ShopListing {
            item_id: def.id.clone(),
            name: def.name.clone(),
            description: def.description.clone(),
            category: def.kind.label(),
            cost: def.cost,
            grant_quantity: def.grant_quantity,
            can_afford: ledger.can_afford(def.cost),
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Purchase
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub item_id: ItemId,
    pub quantity: u32,
    pub cost: u64,
    /// Inventory slot the units landed in.
    pub slot: usize,
}

/// Buy one catalog entry. Either the balance drops by exactly `cost` and the
/// inventory gains exactly `grant_quantity`, or nothing changes.
pub fn purchase(
    item_id: &str,
    catalog: &ItemCatalog,
    ledger: &mut SourceLedger,
    inventory: &mut Inventory,
) -> Result<PurchaseReceipt, FarmError> {
    let def = catalog
        .get(item_id)
        .ok_or_else(|| FarmError::UnknownItem(item_id.to_string()))?;

    if !ledger.can_afford(def.cost) {
        return Err(FarmError::InsufficientFunds {
            cost: def.cost,
            balance: ledger.balance(),
        });
    }

    // add_stack leaves the inventory untouched on failure, and the debit
    // cannot fail once affordability was checked.
    let slot = inventory.add_stack(&def.id, def.grant_quantity)?;
    ledger.debit(def.cost)?;

    Ok(PurchaseReceipt {
        item_id: def.id.clone(),
        quantity: def.grant_quantity,
        cost: def.cost,
        slot,
    })
}

/// Processes BuyRequestEvents: the core purchase flow.
pub fn handle_buy(
    mut buy_events: EventReader<BuyRequestEvent>,
    catalog: Res<ItemCatalog>,
    mut ledger: ResMut<SourceLedger>,
    mut inventory: ResMut<Inventory>,
    mut purchase_writer: EventWriter<PurchaseEvent>,
    mut source_writer: EventWriter<SourceChangeEvent>,
    mut failed_writer: EventWriter<ActionFailedEvent>,
) {
    for ev in buy_events.read() {
        match purchase(&ev.item_id, &catalog, &mut ledger, &mut inventory) {
            Ok(receipt) => {
                info!(
                    "[Economy] Bought {} × '{}' for {} into inventory slot {}",
                    receipt.quantity, receipt.item_id, receipt.cost, receipt.slot
                );
                source_writer.send(SourceChangeEvent {
                    amount: signed(receipt.cost, true),
                    reason: format!("Bought {}", receipt.item_id),
                });
                purchase_writer.send(PurchaseEvent {
                    item_id: receipt.item_id,
                    quantity: receipt.quantity,
                    cost: receipt.cost,
                });
            }
            Err(error) => {
                info!("[Economy] Buy of '{}' refused: {}", ev.item_id, error);
                failed_writer.send(ActionFailedEvent { error });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ItemCatalog {
        let mut catalog = ItemCatalog::default();
        catalog.insert_item(ItemDef {
            id: "cactus_seed".into(),
            name: "Cactus Seed".into(),
            description: String::new(),
            cost: 5,
            grant_quantity: 5,
            kind: ItemKind::Seed { crop: "cactus".into() },
        });
        catalog.insert_item(ItemDef {
            id: "hoe_gold".into(),
            name: "Gold Hoe".into(),
            description: String::new(),
            cost: 150,
            grant_quantity: 1,
            kind: ItemKind::Hoe { harvest_power: 3 },
        });
        catalog
    }

    #[test]
    fn test_purchase_debits_and_grants() {
        let catalog = catalog();
        let mut ledger = SourceLedger::with_balance(100);
        let mut inventory = Inventory::with_capacity(4);

        let receipt = purchase("cactus_seed", &catalog, &mut ledger, &mut inventory).unwrap();
        assert_eq!(receipt.quantity, 5);
        assert_eq!(ledger.balance(), 95);
        assert_eq!(inventory.count("cactus_seed"), 5);

        purchase("cactus_seed", &catalog, &mut ledger, &mut inventory).unwrap();
        assert_eq!(inventory.count("cactus_seed"), 10);
        assert_eq!(inventory.slots_used(), 1, "Second pack merges into the first");
    }

    #[test]
    fn test_purchase_insufficient_funds_changes_nothing() {
        let catalog = catalog();
        let mut ledger = SourceLedger::with_balance(100);
        let mut inventory = Inventory::with_capacity(4);

        let err = purchase("hoe_gold", &catalog, &mut ledger, &mut inventory).unwrap_err();
        assert_eq!(err, FarmError::InsufficientFunds { cost: 150, balance: 100 });
        assert_eq!(ledger, SourceLedger::with_balance(100));
        assert_eq!(inventory.slots_used(), 0);
    }

    #[test]
    fn test_purchase_full_inventory_changes_nothing() {
        let catalog = catalog();
        let mut ledger = SourceLedger::with_balance(1000);
        let mut inventory = Inventory::with_capacity(1);
        inventory.add_stack("cactus_seed", 1).unwrap();
        let before = inventory.clone();

        let err = purchase("hoe_gold", &catalog, &mut ledger, &mut inventory).unwrap_err();
        assert_eq!(err, FarmError::CapacityExceeded(Container::Inventory));
        assert_eq!(ledger.balance(), 1000, "Balance must not move on a failed purchase");
        assert_eq!(inventory, before);

        // Seeds still merge into the one used slot.
        purchase("cactus_seed", &catalog, &mut ledger, &mut inventory).unwrap();
        assert_eq!(inventory.count("cactus_seed"), 6);
    }

    #[test]
    fn test_purchase_unknown_item() {
        let mut ledger = SourceLedger::with_balance(1000);
        let mut inventory = Inventory::with_capacity(1);
        assert_eq!(
            purchase("golden_cactus", &catalog(), &mut ledger, &mut inventory),
            Err(FarmError::UnknownItem("golden_cactus".into()))
        );
    }

    #[test]
    fn test_build_listings_marks_affordability() {
        let listings = build_listings(&catalog(), &SourceLedger::with_balance(100));
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].item_id, "cactus_seed");
        assert!(listings[0].can_afford);
        assert_eq!(listings[1].category, "hoe");
        assert!(!listings[1].can_afford);
    }
}
