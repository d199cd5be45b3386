use crate::core::events::Command;

/// Seconds moved by the arrow keys, independent of the skip setting
const ARROW_SEEK_SECONDS: f64 = 5.0;

/// Keyboard bindings of the player.
pub struct Shortcut;

impl Shortcut {
    /// Map a key code (`KeyboardEvent.code` naming) to a coordinator command.
    ///
    /// Keys bound to pure UI concerns (fullscreen, playlist panel, help)
    /// resolve to `None`; the shell handles those itself.
    pub fn resolve(code: &str, shift: bool) -> Option<Command> {
        if let Some(digit) = code.strip_prefix("Digit") {
            let n: u8 = digit.parse().ok()?;
            if n > 9 {
                return None;
            }
            return Some(Command::SeekPercent(n as f64 / 10.0));
        }

        let command = match (code, shift) {
            ("Space", _) | ("KeyK", _) => Command::TogglePlayPause,
            ("ArrowLeft", _) => Command::SeekRelative(-ARROW_SEEK_SECONDS),
            ("ArrowRight", _) => Command::SeekRelative(ARROW_SEEK_SECONDS),
            ("KeyJ", _) => Command::SkipBackward,
            ("KeyL", _) => Command::SkipForward,
            ("ArrowUp", _) => Command::VolumeUp,
            ("ArrowDown", _) => Command::VolumeDown,
            ("KeyM", _) => Command::ToggleMute,
            ("KeyP", _) => Command::Previous,
            ("KeyN", _) => Command::Next,
            ("KeyR", _) => Command::ToggleLoop,
            ("KeyS", _) => Command::ToggleShuffle,
            ("Period", true) => Command::SpeedUp,
            ("Comma", true) => Command::SpeedDown,
            _ => return None,
        };
        Some(command)
    }
}
