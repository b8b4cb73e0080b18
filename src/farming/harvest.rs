use crate::shared::*;

/// Harvest the mature crop on `block_x`: credit `base_per_cactus *
/// harvest_power`, count one harvested cactus, destroy the crop and free the
/// block. Returns the payout.
pub fn harvest(
    grid: &mut FarmGrid,
    ledger: &mut SourceLedger,
    block_x: u32,
    harvest_power: u32,
    base_per_cactus: u64,
) -> Result<u64, FarmError> {
    grid.block(block_x)?;
    let crop = grid
        .crop_at(block_x)
        .ok_or(FarmError::NoCropPresent(block_x))?;
    if !crop.is_mature() {
        return Err(FarmError::NotMature {
            block_x,
            growth: crop.growth,
        });
    }

    let payout = base_per_cactus.saturating_mul(u64::from(harvest_power));
    grid.remove_crop(block_x);
    ledger.credit(payout);
    ledger.record_harvested(1);
    Ok(payout)
}
