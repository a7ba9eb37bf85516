//! Pointer-to-command translation for defender placement.
//!
//! Turns raw pointer events into `PlaceDefender` / `RotateDefender` commands
//! using the latest snapshot for hit-testing. It never touches the engine,
//! which still decides whether input is currently locked.

use serde::{Deserialize, Serialize};

use astrodefense_core::commands::PlayerCommand;
use astrodefense_core::constants::DEFENDER_RADIUS;
use astrodefense_core::state::GameStateSnapshot;
use astrodefense_core::types::Position;

/// Raw pointer input in field coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PointerEvent {
    Down { x: f64, y: f64 },
    /// `shift` held: rotate instead of move.
    Move { x: f64, y: f64, shift: bool },
    Up,
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    id: u32,
    /// Pointer minus defender position at pointer-down.
    offset: Position,
    /// Defender position at pointer-down, used as the pivot if it vanishes
    /// from later snapshots.
    anchor: Position,
}

/// Tracks the defender being dragged between pointer events.
#[derive(Debug, Default)]
pub struct DragTranslator {
    drag: Option<Drag>,
}

impl DragTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the defender currently grabbed, if any.
    pub fn dragging(&self) -> Option<u32> {
        self.drag.map(|d| d.id)
    }

    /// Translate one pointer event. Returns the command to queue, if any.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        snapshot: &GameStateSnapshot,
    ) -> Option<PlayerCommand> {
        match event {
            PointerEvent::Down { x, y } => {
                let pointer = Position::new(x, y);
                self.drag = hit_test(snapshot, &pointer).map(|(id, position)| Drag {
                    id,
                    offset: Position::new(x - position.x, y - position.y),
                    anchor: position,
                });
                None
            }
            PointerEvent::Move { x, y, shift } => {
                let drag = self.drag?;
                if shift {
                    let pivot = snapshot
                        .defenders
                        .iter()
                        .find(|d| d.id == drag.id)
                        .map(|d| d.position)
                        .unwrap_or(drag.anchor);
                    Some(PlayerCommand::RotateDefender {
                        id: drag.id,
                        angle: pivot.bearing_to(&Position::new(x, y)),
                    })
                } else {
                    Some(PlayerCommand::PlaceDefender {
                        id: drag.id,
                        position: Position::new(x - drag.offset.x, y - drag.offset.y),
                    })
                }
            }
            PointerEvent::Up => {
                self.drag = None;
                None
            }
        }
    }
}

/// Nearest defender whose body contains `pointer`.
fn hit_test(snapshot: &GameStateSnapshot, pointer: &Position) -> Option<(u32, Position)> {
    snapshot
        .defenders
        .iter()
        .map(|d| (d.id, d.position, d.position.range_to(pointer)))
        .filter(|&(_, _, distance)| distance <= DEFENDER_RADIUS)
        .min_by(|a, b| a.2.total_cmp(&b.2))
        .map(|(id, position, _)| (id, position))
}
