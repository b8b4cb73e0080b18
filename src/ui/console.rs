//! Line-oriented console standing in for the mouse-and-keyboard UI.
//!
//! A helper thread forwards stdin lines over a channel. Each frame at most
//! one line is parsed and turned into the same request events a graphical
//! front end would send. The dispatcher runs ahead of the domain handlers,
//! so every command takes effect in the frame it was read.

use bevy::app::AppExit;
use bevy::prelude::*;
use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Mutex;

use crate::economy::shop::{build_listings, handle_buy};
use crate::farming::block_at_world_x;
use crate::farming::item_use::handle_use_item;
use crate::inventory::hotbar::{handle_select_hotbar, slot_for_number_key};
use crate::inventory::transfer::handle_drag_transfer;
use crate::shared::*;

use super::notifications::{handle_toast_events, NotificationLog};
use super::snapshot::GameSnapshot;

pub struct ConsolePlugin;

impl Plugin for ConsolePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ConsoleCommandEvent>();

        app.add_systems(
            PreUpdate,
            read_console_input.run_if(in_state(GameState::Playing)),
        );
        // Requests dispatched this frame are handled this frame.
        app.add_systems(
            Update,
            (
                dispatch_console_commands
                    .before(handle_buy)
                    .before(handle_select_hotbar)
                    .before(handle_drag_transfer)
                    .before(handle_use_item),
                print_console_reports,
            )
                .run_if(in_state(GameState::Playing)),
        );
        app.add_systems(
            PostUpdate,
            print_toasts
                .after(handle_toast_events)
                .run_if(in_state(GameState::Playing)),
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Buy(ItemId),
    Shop,
    Use { block_x: u32, source: Option<SlotRef> },
    Click { world_x: f32 },
    Move { from: SlotRef, to: DropTarget },
    Select(usize),
    Pass,
    Fail,
    Escape,
    Status,
    Help,
    Quit,
}

#[derive(Event, Debug, Clone)]
pub struct ConsoleCommandEvent(pub ConsoleCommand);

pub const HELP: &str = "\
commands:
  buy <item>                         purchase one catalog entry
  shop                               list the catalog with prices
  use <block> [inv|hot <slot>]       use the selected (or given) item on a block
  click <world_x>                    use the selected item at a world position
  move <inv|hot> <slot> <inv|hot> [slot]
                                     drag a stack onto a slot or a container
  select <index> | 1..9              select a hotbar slot (index is 0-based, keys 1-based)
  pass | fail                        report the minigame result
  esc                                cancel a pending farm placement
  status                             print the game snapshot as JSON
  quit";

fn parse_container(word: &str) -> Result<Container, String> {
    match word {
        "inv" | "inventory" => Ok(Container::Inventory),
        "hot" | "hotbar" => Ok(Container::Hotbar),
        other => Err(format!("unknown container '{}' (use inv or hot)", other)),
    }
}

fn parse_number<T: std::str::FromStr>(word: Option<&str>, what: &str) -> Result<T, String> {
    let word = word.ok_or_else(|| format!("missing {}", what))?;
    word.parse()
        .map_err(|_| format!("'{}' is not a valid {}", word, what))
}

fn parse_slot(container: Option<&str>, index: Option<&str>) -> Result<SlotRef, String> {
    let container = parse_container(container.ok_or("missing container")?)?;
    let index = parse_number(index, "slot index")?;
    Ok(SlotRef { container, index })
}

/// Parse one console line. `hotbar_len` bounds the bare number keys.
pub fn parse_command(line: &str, hotbar_len: usize) -> Result<ConsoleCommand, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err("empty command".to_string());
    };

    let command = match head {
        "buy" => ConsoleCommand::Buy(words.next().ok_or("missing item id")?.to_string()),
        "shop" => ConsoleCommand::Shop,
        "use" => {
            let block_x = parse_number(words.next(), "block")?;
            let source = match words.next() {
                None => None,
                Some(container) => Some(parse_slot(Some(container), words.next())?),
            };
            ConsoleCommand::Use { block_x, source }
        }
        "click" => ConsoleCommand::Click {
            world_x: parse_number(words.next(), "world x")?,
        },
        "move" => {
            let from = parse_slot(words.next(), words.next())?;
            let container = parse_container(words.next().ok_or("missing target container")?)?;
            let to = match words.next() {
                None => DropTarget::Container(container),
                Some(index) => DropTarget::Slot(SlotRef {
                    container,
                    index: parse_number(Some(index), "slot index")?,
                }),
            };
            ConsoleCommand::Move { from, to }
        }
        "select" => ConsoleCommand::Select(parse_number(words.next(), "hotbar index")?),
        "pass" => ConsoleCommand::Pass,
        "fail" => ConsoleCommand::Fail,
        "esc" | "escape" => ConsoleCommand::Escape,
        "status" => ConsoleCommand::Status,
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        key if key.chars().count() == 1 && key.chars().all(|c| c.is_ascii_digit()) => {
            let c = key.chars().next().unwrap_or('0');
            let index = slot_for_number_key(c, hotbar_len)
                .ok_or_else(|| format!("no hotbar slot on key {}", c))?;
            ConsoleCommand::Select(index)
        }
        other => return Err(format!("unknown command '{}' (try help)", other)),
    };

    if let Some(extra) = words.next() {
        return Err(format!("unexpected '{}' after command", extra));
    }
    Ok(command)
}

// ─────────────────────────────────────────────────────────────────────────────
// Input
// ─────────────────────────────────────────────────────────────────────────────

/// Receiving end of the stdin reader thread.
#[derive(Resource)]
pub struct ConsoleInput(pub Mutex<Receiver<String>>);

impl ConsoleInput {
    pub fn from_receiver(receiver: Receiver<String>) -> Self {
        Self(Mutex::new(receiver))
    }

    /// Spawn a thread that forwards stdin lines until EOF.
    pub fn spawn_stdin() -> Self {
        let (sender, receiver) = mpsc::channel();
        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if sender.send(line).is_err() {
                    break;
                }
            }
        });
        Self::from_receiver(receiver)
    }
}

pub fn read_console_input(
    input: Option<Res<ConsoleInput>>,
    hotbar: Res<Hotbar>,
    mut command_writer: EventWriter<ConsoleCommandEvent>,
) {
    let Some(input) = input else {
        return;
    };
    let Ok(receiver) = input.0.lock() else {
        return;
    };
    let line = match receiver.try_recv() {
        Ok(line) => line,
        Err(TryRecvError::Empty) => return,
        Err(TryRecvError::Disconnected) => {
            // stdin closed; leave the game running so auto-farms keep ticking.
            return;
        }
    };
    if line.trim().is_empty() {
        return;
    }
    match parse_command(&line, hotbar.len()) {
        Ok(command) => {
            debug!("[Console] {:?}", command);
            command_writer.send(ConsoleCommandEvent(command));
        }
        Err(message) => println!("{}", message),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatch
// ─────────────────────────────────────────────────────────────────────────────

pub fn dispatch_console_commands(
    mut command_events: EventReader<ConsoleCommandEvent>,
    rules: Res<FarmRules>,
    grid: Res<FarmGrid>,
    mut buy_writer: EventWriter<BuyRequestEvent>,
    mut use_writer: EventWriter<UseItemEvent>,
    mut drag_writer: EventWriter<DragTransferEvent>,
    mut select_writer: EventWriter<SelectHotbarEvent>,
    mut result_writer: EventWriter<MinigameResultEvent>,
    mut cancel_writer: EventWriter<CancelPlacementEvent>,
    mut failed_writer: EventWriter<ActionFailedEvent>,
    mut exit_writer: EventWriter<AppExit>,
) {
    for ConsoleCommandEvent(command) in command_events.read() {
        match command {
            ConsoleCommand::Buy(item_id) => {
                buy_writer.send(BuyRequestEvent { item_id: item_id.clone() });
            }
            ConsoleCommand::Use { block_x, source } => {
                use_writer.send(UseItemEvent { block_x: *block_x, source: *source });
            }
            ConsoleCommand::Click { world_x } => {
                match block_at_world_x(*world_x, rules.block_size, &grid) {
                    Ok(block_x) => {
                        use_writer.send(UseItemEvent { block_x, source: None });
                    }
                    Err(error) => {
                        failed_writer.send(ActionFailedEvent { error });
                    }
                }
            }
            ConsoleCommand::Move { from, to } => {
                drag_writer.send(DragTransferEvent { from: *from, to: *to });
            }
            ConsoleCommand::Select(index) => {
                select_writer.send(SelectHotbarEvent { index: *index });
            }
            ConsoleCommand::Pass => {
                result_writer.send(MinigameResultEvent { success: true });
            }
            ConsoleCommand::Fail => {
                result_writer.send(MinigameResultEvent { success: false });
            }
            ConsoleCommand::Escape => {
                cancel_writer.send(CancelPlacementEvent);
            }
            ConsoleCommand::Quit => {
                info!("[Console] Quit requested");
                exit_writer.send(AppExit::Success);
            }
            ConsoleCommand::Shop | ConsoleCommand::Status | ConsoleCommand::Help => {}
        }
    }
}

/// Read-only commands: print the shop, the snapshot, or the help text.
pub fn print_console_reports(
    mut command_events: EventReader<ConsoleCommandEvent>,
    catalog: Res<ItemCatalog>,
    ledger: Res<SourceLedger>,
    inventory: Res<Inventory>,
    hotbar: Res<Hotbar>,
    grid: Res<FarmGrid>,
    gate: Res<PlacementGate>,
    log: Res<NotificationLog>,
) {
    for ConsoleCommandEvent(command) in command_events.read() {
        match command {
            ConsoleCommand::Shop => {
                for listing in build_listings(&catalog, &ledger) {
                    println!(
                        "{:<22} {:>6}  x{:<2} {:<5} {}{}",
                        listing.item_id,
                        listing.cost,
                        listing.grant_quantity,
                        listing.category,
                        listing.name,
                        if listing.can_afford { "" } else { "  (can't afford)" }
                    );
                }
            }
            ConsoleCommand::Status => {
                let snapshot = GameSnapshot::capture(&ledger, &inventory, &hotbar, &grid, &gate, &log);
                match serde_json::to_string_pretty(&snapshot) {
                    Ok(json) => println!("{}", json),
                    Err(err) => warn!("[Console] Could not serialize snapshot: {}", err),
                }
            }
            ConsoleCommand::Help => println!("{}", HELP),
            _ => {}
        }
    }
}

pub fn print_toasts(mut toast_events: EventReader<ToastEvent>) {
    for event in toast_events.read() {
        println!("[{:?}] {}", event.kind, event.message);
    }
}
