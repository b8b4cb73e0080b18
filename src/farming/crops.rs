use crate::shared::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthReport {
    /// Percent actually added after capping.
    pub gained: u8,
    pub growth: u8,
}

/// Plant one unit of the seed in `source[slot]` on block `block_x`.
///
/// The block must exist and be empty, and the slot must hold something.
/// The crop is created at 0% and exactly one seed is consumed.
pub fn plant(
    grid: &mut FarmGrid,
    source: &mut SlotStore,
    slot: usize,
    crop_type: &str,
    block_x: u32,
) -> Result<FarmEntityId, FarmError> {
    grid.ensure_free(block_x, 1)?;
    if source.get(slot)?.is_none() {
        return Err(FarmError::EmptySlot {
            container: source.container(),
            index: slot,
        });
    }
    let id = grid.insert_crop(block_x, crop_type)?;
    source.remove_one(slot)?;
    Ok(id)
}

/// Advance a crop by `growth_power * growth_unit` percent, capped at 100.
pub fn grow(
    grid: &mut FarmGrid,
    block_x: u32,
    growth_power: u32,
    growth_unit: u32,
) -> Result<GrowthReport, FarmError> {
    grid.block(block_x)?;
    let crop = grid
        .crop_at_mut(block_x)
        .ok_or(FarmError::NoCropPresent(block_x))?;
    if crop.is_mature() {
        return Err(FarmError::AlreadyMature(block_x));
    }
    let before = crop.growth;
    crop.growth = advance_growth(before, growth_power, growth_unit);
    Ok(GrowthReport {
        gained: crop.growth - before,
        growth: crop.growth,
    })
}

/// Pure growth step: `min(MAX_GROWTH, growth + power * unit)`.
pub fn advance_growth(growth: u8, growth_power: u32, growth_unit: u32) -> u8 {
    let step = growth_power.saturating_mul(growth_unit);
    let next = u32::from(growth).saturating_add(step).min(u32::from(MAX_GROWTH));
    next as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_hotbar(quantity: u32) -> Hotbar {
        let mut hotbar = Hotbar::with_size(7);
        hotbar.add_stack("cactus_seed", quantity).unwrap();
        hotbar
    }

    #[test]
    fn test_plant_consumes_one_seed() {
        let mut grid = FarmGrid::with_blocks(10);
        let mut hotbar = seeded_hotbar(5);

        plant(&mut grid, &mut hotbar, 0, "cactus", 3).unwrap();

        let crop = grid.crop_at(3).unwrap();
        assert_eq!(crop.growth, 0);
        assert_eq!(crop.crop_type, "cactus");
        assert!(grid.block(3).unwrap().is_occupied());
        assert_eq!(hotbar.count("cactus_seed"), 4);
    }

    #[test]
    fn test_plant_on_occupied_block_keeps_seed() {
        let mut grid = FarmGrid::with_blocks(10);
        let mut hotbar = seeded_hotbar(2);
        plant(&mut grid, &mut hotbar, 0, "cactus", 3).unwrap();

        assert_eq!(
            plant(&mut grid, &mut hotbar, 0, "cactus", 3),
            Err(FarmError::BlockOccupied(3))
        );
        assert_eq!(hotbar.count("cactus_seed"), 1);
        assert_eq!(grid.crops().len(), 1);
    }

    #[test]
    fn test_last_seed_empties_slot() {
        let mut grid = FarmGrid::with_blocks(10);
        let mut hotbar = seeded_hotbar(1);
        plant(&mut grid, &mut hotbar, 0, "cactus", 0).unwrap();
        assert_eq!(hotbar.get(0), Ok(None));
        assert_eq!(
            plant(&mut grid, &mut hotbar, 0, "cactus", 1),
            Err(FarmError::EmptySlot { container: Container::Hotbar, index: 0 })
        );
        assert!(!grid.block(1).unwrap().is_occupied());
    }

    #[test]
    fn test_grow_caps_at_max() {
        let mut grid = FarmGrid::with_blocks(10);
        let mut hotbar = seeded_hotbar(1);
        plant(&mut grid, &mut hotbar, 0, "cactus", 3).unwrap();

        for expected in [30, 60, 90] {
            let report = grow(&mut grid, 3, 2, 15).unwrap();
            assert_eq!(report, GrowthReport { gained: 30, growth: expected });
        }
        let report = grow(&mut grid, 3, 2, 15).unwrap();
        assert_eq!(report, GrowthReport { gained: 10, growth: 100 });
        assert!(grid.crop_at(3).unwrap().is_mature());

        assert_eq!(grow(&mut grid, 3, 2, 15), Err(FarmError::AlreadyMature(3)));
        assert_eq!(grid.crop_at(3).unwrap().growth, 100);
    }

    #[test]
    fn test_grow_without_crop() {
        let mut grid = FarmGrid::with_blocks(4);
        assert_eq!(grow(&mut grid, 1, 1, 15), Err(FarmError::NoCropPresent(1)));
        assert_eq!(grow(&mut grid, 9, 1, 15), Err(FarmError::InvalidBlock(9)));
    }

    #[test]
    fn test_growth_is_monotonic_and_capped() {
        let mut growth = 0u8;
        for power in [0, 1, 3, 7, 50, u32::MAX] {
            let next = advance_growth(growth, power, 15);
            assert!(next >= growth, "Growth must never decrease");
            assert!(next <= MAX_GROWTH, "Growth must never pass the cap");
            growth = next;
        }
        assert_eq!(growth, MAX_GROWTH);
    }
}
