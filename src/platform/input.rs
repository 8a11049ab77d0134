//! Keyboard mapping
//!
//! Works on `KeyboardEvent.code` strings so layout changes don't move WASD.

use crate::sim::Direction;

/// What a key press asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    /// Start, pause/resume or restart depending on the screen
    TogglePause,
    /// Open or close the menu
    Menu,
    ToggleAudio,
}

pub fn map_key(code: &str) -> Option<Command> {
    let command = match code {
        "ArrowUp" | "KeyW" => Command::Turn(Direction::Up),
        "ArrowDown" | "KeyS" => Command::Turn(Direction::Down),
        "ArrowLeft" | "KeyA" => Command::Turn(Direction::Left),
        "ArrowRight" | "KeyD" => Command::Turn(Direction::Right),
        "Space" => Command::TogglePause,
        "Escape" => Command::Menu,
        "KeyM" => Command::ToggleAudio,
        _ => return None,
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows_and_wasd() {
        assert_eq!(map_key("ArrowUp"), Some(Command::Turn(Direction::Up)));
        assert_eq!(map_key("KeyW"), Some(Command::Turn(Direction::Up)));
        assert_eq!(map_key("KeyA"), Some(Command::Turn(Direction::Left)));
        assert_eq!(map_key("ArrowRight"), Some(Command::Turn(Direction::Right)));
        assert_eq!(map_key("KeyS"), Some(Command::Turn(Direction::Down)));
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(map_key("Space"), Some(Command::TogglePause));
        assert_eq!(map_key("Escape"), Some(Command::Menu));
        assert_eq!(map_key("KeyM"), Some(Command::ToggleAudio));
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(map_key("KeyQ"), None);
        assert_eq!(map_key("w"), None);
        assert_eq!(map_key(""), None);
    }
}
