//! Auto-farm production loop.
//!
//! Every `interval_secs` of game time each placed auto-farm credits the
//! ledger with `production * production_multiplier`. The timer is a plain
//! Bevy `Timer`, so tests can drive `advance_production` with any `Duration`.

use bevy::prelude::*;
use std::time::Duration;
use crate::shared::*;

use super::ledger::signed;

#[derive(Resource, Debug, Clone, Deref, DerefMut)]
pub struct ProductionTimer(pub Timer);

impl ProductionTimer {
    /// Non-finite or non-positive intervals fall back to the default.
    pub fn from_interval(secs: f32) -> Self {
        let secs = if secs.is_finite() && secs > 0.0 {
            secs
        } else {
            warn!("[Economy] Production interval {} is invalid; using default", secs);
            FarmRules::default().production_interval_secs
        };
        Self(Timer::from_seconds(secs, TimerMode::Repeating))
    }
}

impl Default for ProductionTimer {
    fn default() -> Self {
        Self::from_interval(FarmRules::default().production_interval_secs)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductionReport {
    pub ticks: u32,
    pub credited: u64,
}

/// One production tick over the farms placed right now.
pub fn tick_auto_farms(grid: &FarmGrid, catalog: &ItemCatalog, ledger: &mut SourceLedger) -> u64 {
    let mut credited = 0u64;
    for farm in grid.farms() {
        let Some(def) = catalog.farm_type(&farm.farm_type) else {
            warn!("[Economy] Auto-farm {} has unknown type '{}'", farm.id, farm.farm_type);
            continue;
        };
        let amount = def.production.saturating_mul(farm.production_multiplier);
        if amount == 0 {
            continue;
        }
        ledger.credit(amount);
        ledger.record_harvested(amount);
        credited = credited.saturating_add(amount);
    }
    credited
}

/// Advance the production clock by `delta` and run every tick that elapsed.
pub fn advance_production(
    timer: &mut Timer,
    delta: Duration,
    grid: &FarmGrid,
    catalog: &ItemCatalog,
    ledger: &mut SourceLedger,
) -> ProductionReport {
    timer.tick(delta);
    let ticks = timer.times_finished_this_tick();
    let mut report = ProductionReport { ticks, credited: 0 };
    for _ in 0..ticks {
        report.credited = report
            .credited
            .saturating_add(tick_auto_farms(grid, catalog, ledger));
    }
    report
}

/// Rebuild the timer from the loaded rules when play starts.
pub fn configure_production_timer(rules: Res<FarmRules>, mut timer: ResMut<ProductionTimer>) {
    *timer = ProductionTimer::from_interval(rules.production_interval_secs);
    debug!("[Economy] Production interval: {}s", rules.production_interval_secs);
}

pub fn run_production_tick(
    time: Res<Time>,
    mut timer: ResMut<ProductionTimer>,
    grid: Res<FarmGrid>,
    catalog: Res<ItemCatalog>,
    mut ledger: ResMut<SourceLedger>,
    mut source_writer: EventWriter<SourceChangeEvent>,
) {
    let report = advance_production(&mut timer, time.delta(), &grid, &catalog, &mut ledger);
    if report.credited > 0 {
        source_writer.send(SourceChangeEvent {
            amount: signed(report.credited, false),
            reason: format!("Auto-farm production ({} farms)", grid.farms().len()),
        });
    }
}
