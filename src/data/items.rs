use crate::shared::*;

/// Default item table: one seed, two wands, four hoes, four farm kits.
///
/// Seeds are sold in packs of 5; everything else is sold singly. A farm kit's
/// id doubles as its farm type id.
pub fn default_items() -> Vec<ItemDef> {
    vec![
        // ── Seeds ───────────────────────────────────────────────────────────────
        ItemDef {
            id: "cactus_seed".into(),
            name: "Cactus Seed".into(),
            description: "Plant to grow cacti".into(),
            cost: 5,
            grant_quantity: 5,
            kind: ItemKind::Seed { crop: "cactus".into() },
        },
        // ── Wands ───────────────────────────────────────────────────────────────
        ItemDef {
            id: "growth_wand_basic".into(),
            name: "Basic Growth Wand".into(),
            description: "Accelerates plant growth".into(),
            cost: 50,
            grant_quantity: 1,
            kind: ItemKind::Wand { growth_power: 1 },
        },
        ItemDef {
            id: "growth_wand_advanced".into(),
            name: "Advanced Growth Wand".into(),
            description: "Rapidly accelerates plant growth".into(),
            cost: 200,
            grant_quantity: 1,
            kind: ItemKind::Wand { growth_power: 3 },
        },
        // ── Hoes ────────────────────────────────────────────────────────────────
        ItemDef {
            id: "hoe_bronze".into(),
            name: "Bronze Hoe".into(),
            description: "Harvest mature cacti".into(),
            cost: 25,
            grant_quantity: 1,
            kind: ItemKind::Hoe { harvest_power: 1 },
        },
        ItemDef {
            id: "hoe_silver".into(),
            name: "Silver Hoe".into(),
            description: "Harvest cacti efficiently".into(),
            cost: 75,
            grant_quantity: 1,
            kind: ItemKind::Hoe { harvest_power: 2 },
        },
        ItemDef {
            id: "hoe_gold".into(),
            name: "Gold Hoe".into(),
            description: "Harvest cacti very efficiently".into(),
            cost: 150,
            grant_quantity: 1,
            kind: ItemKind::Hoe { harvest_power: 3 },
        },
        ItemDef {
            id: "hoe_diamond".into(),
            name: "Diamond Hoe".into(),
            description: "Maximum harvest efficiency".into(),
            cost: 300,
            grant_quantity: 1,
            kind: ItemKind::Hoe { harvest_power: 5 },
        },
        // ── Farm kits ───────────────────────────────────────────────────────────
        ItemDef {
            id: "auto_farm_basic".into(),
            name: "Basic Auto Farm".into(),
            description: "Automatically produces cacti".into(),
            cost: 1000,
            grant_quantity: 1,
            kind: ItemKind::FarmKit { farm_type: "auto_farm_basic".into() },
        },
        ItemDef {
            id: "sprinkler_farm".into(),
            name: "Sprinkler Farm".into(),
            description: "Advanced irrigation system".into(),
            cost: 2500,
            grant_quantity: 1,
            kind: ItemKind::FarmKit { farm_type: "sprinkler_farm".into() },
        },
        ItemDef {
            id: "tech_farm".into(),
            name: "Tech Farm".into(),
            description: "High-tech automated farming".into(),
            cost: 5000,
            grant_quantity: 1,
            kind: ItemKind::FarmKit { farm_type: "tech_farm".into() },
        },
        ItemDef {
            id: "lottery_farm".into(),
            name: "Lottery Farm".into(),
            description: "Luck-based cactus production".into(),
            cost: 3500,
            grant_quantity: 1,
            kind: ItemKind::FarmKit { farm_type: "lottery_farm".into() },
        },
    ]
}

/// Production per tick and the gating minigame for each farm type.
pub fn default_farm_types() -> Vec<FarmTypeDef> {
    vec![
        FarmTypeDef {
            id: "auto_farm_basic".into(),
            name: "Basic Auto Farm".into(),
            production: 5,
            minigame: MinigameKind::ModApproval,
            footprint: 1,
        },
        FarmTypeDef {
            id: "sprinkler_farm".into(),
            name: "Sprinkler Farm".into(),
            production: 15,
            minigame: MinigameKind::SprinklerPuzzle,
            footprint: 1,
        },
        FarmTypeDef {
            id: "tech_farm".into(),
            name: "Tech Farm".into(),
            production: 25,
            minigame: MinigameKind::TechCalibration,
            footprint: 1,
        },
        FarmTypeDef {
            id: "lottery_farm".into(),
            name: "Lottery Farm".into(),
            production: 20,
            minigame: MinigameKind::CactusLottery,
            footprint: 1,
        },
    ]
}

/// Fill a catalog from item and farm-type tables.
pub fn populate_catalog(catalog: &mut ItemCatalog, items: &[ItemDef], farm_types: &[FarmTypeDef]) {
    for item in items {
        catalog.insert_item(item.clone());
    }
    for farm_type in farm_types {
        catalog.insert_farm_type(farm_type.clone());
    }
}
