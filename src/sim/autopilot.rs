//! Demo mode: keeps firing and chases the lowest meteor

use std::cmp::Ordering;

use super::input::{InputAction, KeyEvent};
use super::state::GameState;

/// Key events that line the ship's laser up under the most dangerous meteor
pub fn steer(state: &GameState) -> [KeyEvent; 3] {
    let ship = state.ship.bounds();
    // Lasers leave from the ship's center
    let muzzle = ship.center_x();
    let deadband = state.ship.body.speed;

    let target = state.meteors.iter().max_by(|a, b| {
        a.body
            .pos
            .y
            .partial_cmp(&b.body.pos.y)
            .unwrap_or(Ordering::Equal)
    });

    let (left, right) = match target {
        Some(meteor) => {
            let dx = meteor.bounds().center_x() - muzzle;
            (dx < -deadband, dx > deadband)
        }
        None => (false, false),
    };

    [
        KeyEvent {
            action: InputAction::MoveLeft,
            pressed: left,
        },
        KeyEvent {
            action: InputAction::MoveRight,
            pressed: right,
        },
        KeyEvent::down(InputAction::Fire),
    ]
}
