// Operator keyboard shortcuts. Pure so it can be tested on the host.
// Game keys (Space, arrows) belong to the game page and are left alone.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    Start,
    Calibrate,
    Restart,
    ToggleHelp,
    ToggleDebug,
}

/// Map a `KeyboardEvent.code` on keydown.
#[inline]
pub fn command_for_keydown(code: &str) -> Option<KeyCommand> {
    match code {
        "KeyS" => Some(KeyCommand::Start),
        "KeyC" => Some(KeyCommand::Calibrate),
        "KeyR" => Some(KeyCommand::Restart),
        "KeyH" => Some(KeyCommand::ToggleHelp),
        "KeyD" => Some(KeyCommand::ToggleDebug),
        _ => None,
    }
}
