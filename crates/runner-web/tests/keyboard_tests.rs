// Host-side tests for operator keyboard shortcuts.
// The web crate is wasm-only, so the pure key module is included directly.

mod keys {
    include!("../src/keys.rs");
}

use keys::{command_for_keydown, KeyCommand};

#[test]
fn operator_shortcuts() {
    assert_eq!(command_for_keydown("KeyS"), Some(KeyCommand::Start));
    assert_eq!(command_for_keydown("KeyC"), Some(KeyCommand::Calibrate));
    assert_eq!(command_for_keydown("KeyR"), Some(KeyCommand::Restart));
    assert_eq!(command_for_keydown("KeyH"), Some(KeyCommand::ToggleHelp));
    assert_eq!(command_for_keydown("KeyD"), Some(KeyCommand::ToggleDebug));
}

#[test]
fn game_keys_are_left_to_the_game() {
    for code in ["Space", "ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight"] {
        assert_eq!(command_for_keydown(code), None, "{code}");
    }
}

#[test]
fn unmapped_keys_are_ignored() {
    assert_eq!(command_for_keydown("KeyX"), None);
    assert_eq!(command_for_keydown("s"), None);
    assert_eq!(command_for_keydown(""), None);
}
