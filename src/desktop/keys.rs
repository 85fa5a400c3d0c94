//! Key-name parsing for the `press` command.

use enigo::Key;

/// Parse a human-typed key name into an enigo key.
///
/// Accepts the aliases the HTTP surface sees ("ctrl", "esc", "pagedown");
/// any single character falls through to a unicode key press.
pub(crate) fn parse(name: &str) -> Option<Key> {
    let lower = name.trim().to_lowercase();
    let key = match lower.as_str() {
        "ctrl" | "control" => Key::Control,
        "alt" => Key::Alt,
        "shift" => Key::Shift,
        "meta" | "win" | "cmd" | "command" | "super" => Key::Meta,
        "enter" | "return" => Key::Return,
        "tab" => Key::Tab,
        "escape" | "esc" => Key::Escape,
        "space" => Key::Space,
        "backspace" | "bs" => Key::Backspace,
        "delete" | "del" => Key::Delete,
        "up" => Key::UpArrow,
        "down" => Key::DownArrow,
        "left" => Key::LeftArrow,
        "right" => Key::RightArrow,
        "home" => Key::Home,
        "end" => Key::End,
        "pageup" | "pgup" => Key::PageUp,
        "pagedown" | "pgdn" => Key::PageDown,
        "capslock" => Key::CapsLock,
        "f1" => Key::F1,
        "f2" => Key::F2,
        "f3" => Key::F3,
        "f4" => Key::F4,
        "f5" => Key::F5,
        "f6" => Key::F6,
        "f7" => Key::F7,
        "f8" => Key::F8,
        "f9" => Key::F9,
        "f10" => Key::F10,
        "f11" => Key::F11,
        "f12" => Key::F12,
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Unicode(c),
                _ => return None,
            }
        }
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_keys() {
        assert!(matches!(parse("CTRL"), Some(Key::Control)));
        assert!(matches!(parse("enter"), Some(Key::Return)));
        assert!(matches!(parse("Esc"), Some(Key::Escape)));
        assert!(matches!(parse("pgdn"), Some(Key::PageDown)));
        assert!(matches!(parse("f5"), Some(Key::F5)));
    }

    #[test]
    fn test_single_characters_become_unicode_presses() {
        assert!(matches!(parse("a"), Some(Key::Unicode('a'))));
        assert!(matches!(parse("A"), Some(Key::Unicode('a'))));
        assert!(matches!(parse("7"), Some(Key::Unicode('7'))));
    }

    #[test]
    fn test_unknown_names_are_rejected() {
        assert!(parse("hyperdrive").is_none());
        assert!(parse("").is_none());
    }
}
