use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState, Modifiers};

/// Current keyboard state for the window.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub focused: bool,
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies an input event to the current state and records deltas in `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = *m,

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Releases are not delivered while unfocused; avoid stuck keys.
                    self.keys_down.clear();
                }
            }

            InputEvent::Key {
                key,
                state,
                modifiers,
                repeat,
            } => {
                self.modifiers = *modifiers;
                match state {
                    KeyState::Pressed => {
                        if self.keys_down.insert(*key) && !*repeat {
                            frame.keys_pressed.insert(*key);
                        }
                    }
                    KeyState::Released => {
                        if self.keys_down.remove(key) {
                            frame.keys_released.insert(*key);
                        }
                    }
                }
            }
        }

        frame.push_event(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState, repeat: bool) -> InputEvent {
        InputEvent::Key {
            key,
            state,
            modifiers: Modifiers::default(),
            repeat,
        }
    }

    #[test]
    fn press_and_release_recorded() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();

        st.apply_event(&mut fr, key(Key::Escape, KeyState::Pressed, false));
        assert!(st.key_down(Key::Escape));
        assert!(fr.pressed(Key::Escape));

        fr.clear();
        st.apply_event(&mut fr, key(Key::Escape, KeyState::Released, false));
        assert!(!st.key_down(Key::Escape));
        assert!(fr.keys_released.contains(&Key::Escape));
        assert!(!fr.pressed(Key::Escape));
    }

    #[test]
    fn repeat_is_not_a_new_press() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();

        st.apply_event(&mut fr, key(Key::Space, KeyState::Pressed, false));
        fr.clear();
        st.apply_event(&mut fr, key(Key::Space, KeyState::Pressed, true));
        assert!(!fr.pressed(Key::Space));
        assert_eq!(fr.events.len(), 1);
    }

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();

        st.apply_event(&mut fr, InputEvent::Focused(true));
        st.apply_event(&mut fr, key(Key::ArrowUp, KeyState::Pressed, false));
        st.apply_event(&mut fr, InputEvent::Focused(false));
        assert!(!st.focused);
        assert!(st.keys_down.is_empty());
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, key(Key::Enter, KeyState::Released, false));
        assert!(fr.keys_released.is_empty());
    }

    #[test]
    fn key_event_updates_modifiers() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        let shift = Modifiers { shift: true, ..Default::default() };
        st.apply_event(
            &mut fr,
            InputEvent::Key { key: Key::Tab, state: KeyState::Pressed, modifiers: shift, repeat: false },
        );
        assert!(st.modifiers.any());
    }
}
