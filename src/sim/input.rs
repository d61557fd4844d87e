//! Logical input actions
//!
//! The platform layer turns raw key names into [`KeyEvent`]s; the ship only
//! ever sees these.

/// The three things a player can ask the ship to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    Fire,
}

impl InputAction {
    /// Map a DOM `KeyboardEvent.key` value to an action
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(InputAction::MoveLeft),
            "ArrowRight" => Some(InputAction::MoveRight),
            "s" => Some(InputAction::Fire),
            _ => None,
        }
    }
}

/// Key-down (`pressed`) or key-up for one action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub action: InputAction,
    pub pressed: bool,
}

impl KeyEvent {
    pub const fn down(action: InputAction) -> Self {
        Self {
            action,
            pressed: true,
        }
    }

    pub const fn up(action: InputAction) -> Self {
        Self {
            action,
            pressed: false,
        }
    }
}
