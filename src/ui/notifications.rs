use bevy::prelude::*;
use std::collections::VecDeque;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// RESOURCES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub timer: Timer,
}

/// Toasts currently on screen, oldest first.
#[derive(Resource, Debug, Clone, Default)]
pub struct NotificationLog {
    entries: VecDeque<Notification>,
}

impl NotificationLog {
    pub fn entries(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a toast, dropping the oldest ones past `max_visible`.
    pub fn push(&mut self, event: &ToastEvent, max_visible: usize) {
        self.entries.push_back(Notification {
            message: event.message.clone(),
            kind: event.kind,
            timer: Timer::from_seconds(event.duration_secs.max(0.0), TimerMode::Once),
        });
        while self.entries.len() > max_visible.max(1) {
            self.entries.pop_front();
        }
    }

    pub fn tick(&mut self, delta: std::time::Duration) {
        for entry in self.entries.iter_mut() {
            entry.timer.tick(delta);
        }
        self.entries.retain(|entry| !entry.timer.finished());
    }
}

// ═══════════════════════════════════════════════════════════════════════
// TOAST LIFECYCLE
// ═══════════════════════════════════════════════════════════════════════

pub fn handle_toast_events(
    mut events: EventReader<ToastEvent>,
    rules: Res<FarmRules>,
    mut log: ResMut<NotificationLog>,
) {
    for event in events.read() {
        debug!("[Ui] Toast ({:?}): {}", event.kind, event.message);
        log.push(event, rules.max_visible_notifications);
    }
}

pub fn update_notifications(time: Res<Time>, mut log: ResMut<NotificationLog>) {
    log.tick(time.delta());
}

fn toast(message: impl Into<String>, kind: NotificationKind, duration_secs: f32) -> ToastEvent {
    ToastEvent {
        message: message.into(),
        kind,
        duration_secs,
    }
}

/// User-facing text for a refused action.
pub fn failure_toast(error: &FarmError) -> ToastEvent {
    use NotificationKind::Warning;
    match error {
        FarmError::BlockOccupied(_) => toast("⚠️ This block is already occupied!", Warning, 1.5),
        FarmError::NotMature { .. } => {
            toast("🌱 This cactus isn't ready to harvest yet!", Warning, 1.5)
        }
        FarmError::AlreadyMature(_) => toast("🌵 Use a hoe to harvest this cactus!", Warning, 1.5),
        FarmError::NoCropPresent(_) => toast("🌱 Plant a seed here first!", Warning, 1.5),
        FarmError::OutsideFarmland => {
            toast("⚠️ You can only farm in designated areas!", Warning, 2.0)
        }
        FarmError::NothingSelected => toast("⚠️ Select a tool or seed first!", Warning, 1.5),
        FarmError::InsufficientFunds { cost, balance } => toast(
            format!("⚠️ Not enough Source! Need {}, have {}.", cost, balance),
            Warning,
            2.0,
        ),
        FarmError::CapacityExceeded(container) => {
            toast(format!("⚠️ Your {} is full!", container), Warning, 2.0)
        }
        FarmError::PlacementAlreadyInProgress => {
            toast("🎮 Finish the current minigame first!", Warning, 2.0)
        }
        other => toast(format!("⚠️ {}", other), Warning, 1.5),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENT-TO-TOAST WIRING SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

pub fn wire_purchase_toasts(
    mut purchase_events: EventReader<PurchaseEvent>,
    mut toast_writer: EventWriter<ToastEvent>,
    catalog: Res<ItemCatalog>,
) {
    for event in purchase_events.read() {
        let def = catalog.get(&event.item_id);
        let name = def
            .map(|def| def.name.clone())
            .unwrap_or_else(|| event.item_id.clone());
        let message = if event.quantity > 1 {
            format!("Purchased {}x {}!", event.quantity, name)
        } else {
            format!("Purchased {}!", name)
        };
        toast_writer.send(toast(message, NotificationKind::Purchase, 2.0));

        if def.is_some_and(|def| matches!(def.kind, ItemKind::FarmKit { .. })) {
            toast_writer.send(toast(
                "Drag farm to hotbar and place it in the world!",
                NotificationKind::Info,
                3.0,
            ));
        }
    }
}

pub fn wire_crop_toasts(
    mut planted_events: EventReader<CropPlantedEvent>,
    mut grown_events: EventReader<CropGrownEvent>,
    mut harvested_events: EventReader<CropHarvestedEvent>,
    mut toast_writer: EventWriter<ToastEvent>,
) {
    for _ in planted_events.read() {
        toast_writer.send(toast("🌱 Cactus planted!", NotificationKind::Plant, 1.5));
    }
    for event in grown_events.read() {
        toast_writer.send(toast(
            format!("+{}% growth", event.gained),
            NotificationKind::Growth,
            1.0,
        ));
    }
    for event in harvested_events.read() {
        toast_writer.send(toast(
            format!("+{} Source", event.payout),
            NotificationKind::Source,
            1.5,
        ));
    }
}

pub fn wire_placement_toasts(
    mut start_events: EventReader<MinigameStartEvent>,
    mut resolved_events: EventReader<PlacementResolvedEvent>,
    mut toast_writer: EventWriter<ToastEvent>,
    catalog: Res<ItemCatalog>,
) {
    for _ in start_events.read() {
        toast_writer.send(toast(
            "🎮 Complete the minigame to place your farm!",
            NotificationKind::Info,
            2.0,
        ));
    }
    for event in resolved_events.read() {
        let message = match &event.outcome {
            PlacementOutcome::Placed { farm_type, .. } => {
                let name = catalog
                    .farm_type(farm_type)
                    .map(|def| def.name.as_str())
                    .unwrap_or(farm_type.as_str());
                toast(
                    format!("🏭 {} placed successfully!", name),
                    NotificationKind::Farm,
                    3.0,
                )
            }
            PlacementOutcome::Unattached { success: true } => toast(
                "✅ Minigame completed successfully!",
                NotificationKind::Farm,
                2.0,
            ),
            PlacementOutcome::Failed | PlacementOutcome::Unattached { success: false } => toast(
                "❌ Minigame failed! Farm not placed.",
                NotificationKind::Warning,
                2.0,
            ),
            PlacementOutcome::Cancelled => {
                toast("Farm placement cancelled.", NotificationKind::Info, 1.5)
            }
            PlacementOutcome::Invalidated(error) => failure_toast(error),
        };
        toast_writer.send(message);
    }
}

pub fn wire_failure_toasts(
    mut failed_events: EventReader<ActionFailedEvent>,
    mut toast_writer: EventWriter<ToastEvent>,
) {
    for event in failed_events.read() {
        toast_writer.send(failure_toast(&event.error));
    }
}
