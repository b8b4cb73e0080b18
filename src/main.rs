use std::path::PathBuf;
use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use cactus_farm::data::{DataPlugin, GameConfig};
use cactus_farm::economy::EconomyPlugin;
use cactus_farm::farming::FarmingPlugin;
use cactus_farm::inventory::InventoryPlugin;
use cactus_farm::placement::PlacementPlugin;
use cactus_farm::shared::*;
use cactus_farm::ui::console::{ConsoleInput, ConsolePlugin, HELP};
use cactus_farm::ui::UiPlugin;

fn main() {
    let mut app = App::new();
    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / 60.0,
        ))),
    )
    .add_plugins(LogPlugin::default())
    .add_plugins(StatesPlugin);

    // Logging is up, so config problems are reported.
    let config = GameConfig::load(std::env::args_os().nth(1).map(PathBuf::from));

    app
        // Game state
        .init_state::<GameState>()
        .insert_resource(config)
        // Shared resources (replaced with configured ones during Loading)
        .init_resource::<ItemCatalog>()
        .init_resource::<SourceLedger>()
        .init_resource::<Inventory>()
        .init_resource::<Hotbar>()
        .init_resource::<FarmGrid>()
        .init_resource::<FarmRules>()
        // Requests
        .add_event::<BuyRequestEvent>()
        .add_event::<UseItemEvent>()
        .add_event::<DragTransferEvent>()
        .add_event::<SelectHotbarEvent>()
        .add_event::<PlacementRequestEvent>()
        .add_event::<MinigameResultEvent>()
        .add_event::<CancelPlacementEvent>()
        // Outcomes
        .add_event::<SourceChangeEvent>()
        .add_event::<PurchaseEvent>()
        .add_event::<CropPlantedEvent>()
        .add_event::<CropGrownEvent>()
        .add_event::<CropHarvestedEvent>()
        .add_event::<MinigameStartEvent>()
        .add_event::<PlacementResolvedEvent>()
        .add_event::<ActionFailedEvent>()
        .add_event::<ToastEvent>()
        // Domain plugins
        .add_plugins(DataPlugin)
        .add_plugins(EconomyPlugin)
        .add_plugins(InventoryPlugin)
        .add_plugins(FarmingPlugin)
        .add_plugins(PlacementPlugin)
        .add_plugins(UiPlugin)
        .add_plugins(ConsolePlugin)
        .insert_resource(ConsoleInput::spawn_stdin());

    println!("Cactus Farm. Type `help` for commands.");
    println!("{}", HELP);
    app.run();
}
