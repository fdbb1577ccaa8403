//! Platform abstraction layer
//!
//! Translates winit keyboard events into the game's own [`Key`] type so the
//! rest of the crate never sees the windowing library.

use winit::keyboard::{Key as WinitKey, NamedKey};

use crate::input::Key;

/// Map a winit logical key to a game key; unbound keys give `None`
pub fn map_key(key: &WinitKey) -> Option<Key> {
    match key.as_ref() {
        WinitKey::Named(NamedKey::ArrowLeft) => Some(Key::ArrowLeft),
        WinitKey::Named(NamedKey::ArrowRight) => Some(Key::ArrowRight),
        WinitKey::Named(NamedKey::Space) => Some(Key::Space),
        WinitKey::Named(NamedKey::Escape) => Some(Key::Escape),
        WinitKey::Character(c) => map_character(c),
        _ => None,
    }
}

/// Letter keys, ignoring shift and caps lock
fn map_character(c: &str) -> Option<Key> {
    let mut chars = c.chars();
    let first = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    match first.to_ascii_lowercase() {
        'a' => Some(Key::A),
        'd' => Some(Key::D),
        'q' => Some(Key::Q),
        // Some platforms report the space bar as a character
        ' ' => Some(Key::Space),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_keys() {
        assert_eq!(map_key(&WinitKey::Named(NamedKey::ArrowLeft)), Some(Key::ArrowLeft));
        assert_eq!(map_key(&WinitKey::Named(NamedKey::ArrowRight)), Some(Key::ArrowRight));
        assert_eq!(map_key(&WinitKey::Named(NamedKey::Space)), Some(Key::Space));
        assert_eq!(map_key(&WinitKey::Named(NamedKey::Escape)), Some(Key::Escape));
        assert_eq!(map_key(&WinitKey::Named(NamedKey::Enter)), None);
    }

    #[test]
    fn test_letters_ignore_case() {
        assert_eq!(map_key(&WinitKey::Character("a".into())), Some(Key::A));
        assert_eq!(map_key(&WinitKey::Character("A".into())), Some(Key::A));
        assert_eq!(map_key(&WinitKey::Character("D".into())), Some(Key::D));
        assert_eq!(map_key(&WinitKey::Character("q".into())), Some(Key::Q));
    }

    #[test]
    fn test_unbound_characters() {
        assert_eq!(map_key(&WinitKey::Character("x".into())), None);
        assert_eq!(map_key(&WinitKey::Character("ad".into())), None);
    }
}
