//! Input subsystem.
//!
//! Public types do not expose winit; `translate_window_event` is the only bridge.

mod frame;
mod state;
mod types;
mod platform;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState, Modifiers};
pub use platform::translate_window_event;
