use bevy::prelude::*;
use crate::shared::*;

/// Map a number key to a hotbar index: '1' is slot 0, '9' is slot 8.
/// Keys past the end of the hotbar map to nothing.
pub fn slot_for_number_key(key: char, hotbar_len: usize) -> Option<usize> {
    let digit = key.to_digit(10)? as usize;
    if digit == 0 || digit > hotbar_len {
        return None;
    }
    Some(digit - 1)
}

pub fn handle_select_hotbar(
    mut select_events: EventReader<SelectHotbarEvent>,
    mut hotbar: ResMut<Hotbar>,
    mut failed_writer: EventWriter<ActionFailedEvent>,
) {
    for ev in select_events.read() {
        match hotbar.select(ev.index) {
            Ok(()) => debug!("[Inventory] Hotbar slot {} selected", ev.index),
            Err(error) => {
                warn!("[Inventory] Hotbar select rejected: {}", error);
                failed_writer.send(ActionFailedEvent { error });
            }
        }
    }
}
