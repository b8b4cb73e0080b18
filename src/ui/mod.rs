//! UI domain: turns outcome events into notifications and exposes a
//! read-only snapshot of the game. The console host lives here too.

use bevy::prelude::*;
use crate::shared::*;

pub mod console;
pub mod notifications;
pub mod snapshot;

use notifications::{
    handle_toast_events, update_notifications, wire_crop_toasts, wire_failure_toasts,
    wire_placement_toasts, wire_purchase_toasts, NotificationLog,
};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NotificationLog>();

        // Feedback runs after every domain has handled this frame's requests.
        app.add_systems(
            PostUpdate,
            (
                (
                    wire_purchase_toasts,
                    wire_crop_toasts,
                    wire_placement_toasts,
                    wire_failure_toasts,
                ),
                update_notifications,
                handle_toast_events,
            )
                .chain()
                .run_if(in_state(GameState::Playing)),
        );
    }
}
