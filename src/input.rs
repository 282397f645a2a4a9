use raylib::consts::KeyboardKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NextCategory,
    PreviousCategory,
    NextImage,
    PreviousImage,
    Pause,
    Quit,
}

/// Up advances through the categories, Down goes back; Right shows the next
/// slide, Left the previous one. Keypad arrows work the same way.
pub fn command_for(key: KeyboardKey) -> Option<Command> {
    use KeyboardKey::*;

    match key {
        KEY_UP | KEY_KP_8 => Some(Command::NextCategory),
        KEY_DOWN | KEY_KP_2 => Some(Command::PreviousCategory),
        KEY_RIGHT | KEY_KP_6 => Some(Command::NextImage),
        KEY_LEFT | KEY_KP_4 => Some(Command::PreviousImage),
        KEY_P => Some(Command::Pause),
        KEY_ESCAPE | KEY_Q => Some(Command::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings() {
        assert_eq!(command_for(KeyboardKey::KEY_UP), Some(Command::NextCategory));
        assert_eq!(command_for(KeyboardKey::KEY_KP_2), Some(Command::PreviousCategory));
        assert_eq!(command_for(KeyboardKey::KEY_RIGHT), Some(Command::NextImage));
        assert_eq!(command_for(KeyboardKey::KEY_KP_4), Some(Command::PreviousImage));
        assert_eq!(command_for(KeyboardKey::KEY_P), Some(Command::Pause));
        assert_eq!(command_for(KeyboardKey::KEY_Q), Some(Command::Quit));
        assert_eq!(command_for(KeyboardKey::KEY_A), None);
    }
}
