//! Keyboard input handling
//!
//! Key-down/key-up transitions are folded into a [`KeyboardInput`] which the
//! loop polls once per tick through the [`InputSource`] capability.

use std::collections::HashSet;

use crate::sim::TickInput;

/// Keys the game reacts to, independent of the windowing library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    A,
    D,
    Space,
    Escape,
    Q,
}

/// What a key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    LeftFlipper,
    RightFlipper,
    Launch,
    Exit,
}

impl Action {
    pub fn for_key(key: Key) -> Self {
        match key {
            Key::ArrowLeft | Key::A => Action::LeftFlipper,
            Key::ArrowRight | Key::D => Action::RightFlipper,
            Key::Space => Action::Launch,
            Key::Escape | Key::Q => Action::Exit,
        }
    }
}

/// Something the loop can poll for one tick's worth of input
pub trait InputSource {
    /// Snapshot the current input; one-shot actions are consumed
    fn poll_input(&mut self) -> TickInput;
}

/// Held-key state built from key events
#[derive(Debug, Clone, Default)]
pub struct KeyboardInput {
    // Keys currently down; an action stays held while any of its keys is down
    held: HashSet<Key>,
    launch_pending: bool,
    exit_pending: bool,
}

impl KeyboardInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle key down event
    pub fn key_down(&mut self, key: Key) {
        // OS key repeat sends more key-downs while held
        let newly_pressed = self.held.insert(key);
        match Action::for_key(key) {
            Action::Launch if newly_pressed => self.launch_pending = true,
            Action::Exit => self.exit_pending = true,
            Action::Launch | Action::LeftFlipper | Action::RightFlipper => {}
        }
    }

    /// Handle key up event
    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Window closed: treat like the quit key
    pub fn request_exit(&mut self) {
        self.exit_pending = true;
    }

    /// Drop held keys (window lost focus, key-ups will not arrive)
    pub fn release_all(&mut self) {
        self.held.clear();
        self.launch_pending = false;
    }

    /// Whether any key bound to `action` is down
    pub fn is_held(&self, action: Action) -> bool {
        self.held.iter().any(|&key| Action::for_key(key) == action)
    }

    pub fn left_held(&self) -> bool {
        self.is_held(Action::LeftFlipper)
    }

    pub fn right_held(&self) -> bool {
        self.is_held(Action::RightFlipper)
    }
}

impl InputSource for KeyboardInput {
    fn poll_input(&mut self) -> TickInput {
        let input = TickInput {
            left_flipper: self.left_held(),
            right_flipper: self.right_held(),
            launch: self.launch_pending,
            exit: self.exit_pending,
        };
        // Clear one-shot inputs after processing
        self.launch_pending = false;
        self.exit_pending = false;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_aliases_map_to_same_action() {
        assert_eq!(Action::for_key(Key::ArrowLeft), Action::for_key(Key::A));
        assert_eq!(Action::for_key(Key::ArrowRight), Action::for_key(Key::D));
        assert_eq!(Action::for_key(Key::Escape), Action::for_key(Key::Q));
        assert_eq!(Action::for_key(Key::Space), Action::Launch);
    }

    #[test]
    fn test_key_aliases_produce_same_input() {
        for (a, b) in [
            (Key::ArrowLeft, Key::A),
            (Key::ArrowRight, Key::D),
            (Key::Escape, Key::Q),
            (Key::Space, Key::Space),
        ] {
            let mut first = KeyboardInput::new();
            let mut second = KeyboardInput::new();
            first.key_down(a);
            second.key_down(b);
            assert_eq!(first.poll_input(), second.poll_input(), "{:?} vs {:?}", a, b);
            assert_eq!(first.poll_input(), second.poll_input(), "{:?} vs {:?} held", a, b);
        }
    }

    #[test]
    fn test_right_flipper_held_until_both_aliases_released() {
        let mut kb = KeyboardInput::new();
        kb.key_down(Key::ArrowRight);
        kb.key_down(Key::D);
        kb.key_up(Key::ArrowRight);
        assert!(kb.is_held(Action::RightFlipper));
        assert!(kb.poll_input().right_flipper);

        kb.key_up(Key::D);
        assert!(!kb.poll_input().right_flipper);
    }

    #[test]
    fn test_flipper_follows_held_keys() {
        let mut kb = KeyboardInput::new();
        kb.key_down(Key::A);
        assert!(kb.poll_input().left_flipper);
        // Still held on the next poll
        assert!(kb.poll_input().left_flipper);

        kb.key_down(Key::ArrowLeft);
        kb.key_up(Key::A);
        assert!(kb.poll_input().left_flipper);

        kb.key_up(Key::ArrowLeft);
        let input = kb.poll_input();
        assert!(!input.left_flipper);
        assert!(!input.right_flipper);
    }

    #[test]
    fn test_launch_is_one_shot() {
        let mut kb = KeyboardInput::new();
        kb.key_down(Key::Space);
        assert!(kb.poll_input().launch);
        assert!(!kb.poll_input().launch);
    }

    #[test]
    fn test_key_repeat_does_not_relaunch() {
        let mut kb = KeyboardInput::new();
        kb.key_down(Key::Space);
        assert!(kb.poll_input().launch);
        kb.key_down(Key::Space);
        kb.key_down(Key::Space);
        assert!(!kb.poll_input().launch);

        kb.key_up(Key::Space);
        kb.key_down(Key::Space);
        assert!(kb.poll_input().launch);
    }

    #[test]
    fn test_tap_between_polls_still_launches() {
        let mut kb = KeyboardInput::new();
        kb.key_down(Key::Space);
        kb.key_up(Key::Space);
        assert!(kb.poll_input().launch);
    }

    #[test]
    fn test_exit_and_release_all() {
        let mut kb = KeyboardInput::new();
        kb.key_down(Key::D);
        kb.key_down(Key::Q);
        kb.release_all();
        let input = kb.poll_input();
        assert!(input.exit);
        assert!(!input.right_flipper);

        kb.request_exit();
        assert!(kb.poll_input().exit);
        assert!(!kb.poll_input().exit);
    }
}
