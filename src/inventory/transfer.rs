//! Drag-transfer between inventory and hotbar slots.
//!
//! One rule covers every drop: if the target holds the same item the stacks
//! merge, otherwise the two slots exchange contents. Both ends are validated
//! before either is written, so a failed transfer leaves both containers as
//! they were.

use bevy::prelude::*;
use crate::shared::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    /// Source and target are the same slot.
    NoOp,
    /// Source stack was added onto a matching stack in `into`.
    Merged { into: SlotRef },
    /// Target was empty; the source slot is now empty.
    Moved { into: SlotRef },
    /// Target held a different item, which now sits in the source slot.
    Swapped { into: SlotRef },
}

pub fn transfer(
    from: SlotRef,
    to: DropTarget,
    inventory: &mut Inventory,
    hotbar: &mut Hotbar,
) -> Result<TransferOutcome, FarmError> {
    let to = match to {
        DropTarget::Slot(slot) => slot,
        DropTarget::Container(container) => {
            let source = source_stack(from, inventory, hotbar)?;
            let index = store(container, inventory, hotbar)
                .insert_position(&source.item_id)
                .ok_or(FarmError::CapacityExceeded(container))?;
            SlotRef { container, index }
        }
    };
    transfer_to_slot(from, to, inventory, hotbar)
}

fn source_stack(
    from: SlotRef,
    inventory: &Inventory,
    hotbar: &Hotbar,
) -> Result<ItemStack, FarmError> {
    store(from.container, inventory, hotbar)
        .get(from.index)?
        .cloned()
        .ok_or(FarmError::EmptySlot {
            container: from.container,
            index: from.index,
        })
}

fn transfer_to_slot(
    from: SlotRef,
    to: SlotRef,
    inventory: &mut Inventory,
    hotbar: &mut Hotbar,
) -> Result<TransferOutcome, FarmError> {
    if from == to {
        return Ok(TransferOutcome::NoOp);
    }

    let source = source_stack(from, inventory, hotbar)?;
    let target = store(to.container, inventory, hotbar).get(to.index)?.cloned();

    let (new_target, new_source, outcome) = match target {
        Some(existing) if existing.stacks_with(&source) => {
            let merged = ItemStack::new(
                existing.item_id,
                existing.quantity.saturating_add(source.quantity),
            );
            (merged, None, TransferOutcome::Merged { into: to })
        }
        Some(existing) => (source, Some(existing), TransferOutcome::Swapped { into: to }),
        None => (source, None, TransferOutcome::Moved { into: to }),
    };

    // Both indices were checked above, so neither write can fail.
    store_mut(to.container, inventory, hotbar).replace(to.index, Some(new_target))?;
    store_mut(from.container, inventory, hotbar).replace(from.index, new_source)?;
    Ok(outcome)
}

pub fn handle_drag_transfer(
    mut drag_events: EventReader<DragTransferEvent>,
    mut inventory: ResMut<Inventory>,
    mut hotbar: ResMut<Hotbar>,
    mut failed_writer: EventWriter<ActionFailedEvent>,
) {
    for ev in drag_events.read() {
        match transfer(ev.from, ev.to, &mut inventory, &mut hotbar) {
            Ok(outcome) => {
                debug!("[Inventory] {:?} -> {:?}: {:?}", ev.from, ev.to, outcome);
            }
            Err(error) => {
                info!("[Inventory] Transfer {:?} -> {:?} refused: {}", ev.from, ev.to, error);
                failed_writer.send(ActionFailedEvent { error });
            }
        }
    }
}
