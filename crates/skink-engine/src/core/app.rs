use winit::event::WindowEvent;

use super::ctx::FrameCtx;
use crate::time::FixedTick;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by the runtime.
pub trait App {
    /// Called for every window event, before the runtime handles it.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per fixed step, oldest first, before the frame that follows.
    fn on_fixed_update(&mut self, tick: &FixedTick) {
        let _ = tick;
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called once before the window and its GPU context are destroyed.
    /// Release GPU resources here.
    fn on_exit(&mut self) {}
}
