use std::collections::HashSet;

use super::types::{InputEvent, Key};

/// Per-frame input deltas.
///
/// `InputState` holds what is currently down; `InputFrame` holds what changed
/// since the last rendered frame. The runtime clears it after every frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    /// Keys that went down this frame (repeats excluded).
    pub keys_pressed: HashSet<Key>,

    /// Keys that went up this frame.
    pub keys_released: HashSet<Key>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.keys_released.clear();
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    #[inline]
    pub fn pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }
}
