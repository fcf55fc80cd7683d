use skink_engine::core::{App, AppControl, FrameCtx};
use skink_engine::input::{InputFrame, Key};
use skink_engine::paint::Color;
use skink_engine::render::QuadRenderer;
use skink_engine::time::FixedTick;

/// Clear color behind the quad.
pub const CLEAR: Color = Color::BLACK;

/// The renderer bootstrap: draws the quad, closes on Escape.
///
/// Fixed updates are counted but do nothing yet; they are where state
/// integration hooks in.
#[derive(Default)]
pub struct SkinkApp {
    quad: Option<QuadRenderer>,
    frames: u64,
    fixed_ticks: u64,
}

impl SkinkApp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the renderer on first use so shader errors surface once, up front.
    fn quad(&mut self) -> anyhow::Result<&mut QuadRenderer> {
        if self.quad.is_none() {
            self.quad = Some(QuadRenderer::new()?);
        }
        self.quad
            .as_mut()
            .ok_or_else(|| anyhow::anyhow!("quad renderer unavailable"))
    }
}

/// Escape pressed this frame closes the window.
pub fn wants_close(input: &InputFrame) -> bool {
    input.pressed(Key::Escape)
}

impl App for SkinkApp {
    fn on_fixed_update(&mut self, _tick: &FixedTick) {
        self.fixed_ticks += 1;
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if wants_close(ctx.input_frame) {
            log::info!("escape pressed; closing");
            return AppControl::Exit;
        }

        let quad = match self.quad() {
            Ok(q) => q,
            Err(e) => {
                log::error!("{e:#}");
                return AppControl::Exit;
            }
        };

        let control = ctx.render(CLEAR, |rctx, target| quad.render(rctx, target));

        self.frames += 1;
        if ctx.time.frame_index % 600 == 0 {
            log::trace!(
                "t = {:.3}s, {} fixed ticks",
                ctx.time.elapsed.as_secs_f64(),
                self.fixed_ticks
            );
        }

        control
    }

    fn on_exit(&mut self) {
        // Drop GPU resources while the device is still alive.
        self.quad = None;
    }
}

impl Drop for SkinkApp {
    fn drop(&mut self) {
        log::debug!("{} frames, {} fixed ticks", self.frames, self.fixed_ticks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skink_engine::input::{InputEvent, InputState, KeyState, Modifiers};

    fn press(key: Key, repeat: bool) -> InputEvent {
        InputEvent::Key {
            key,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
            repeat,
        }
    }

    #[test]
    fn escape_closes() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, press(Key::Escape, false));
        assert!(wants_close(&fr));
    }

    #[test]
    fn other_keys_do_not_close() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, press(Key::Space, false));
        assert!(!wants_close(&fr));
    }

    #[test]
    fn fixed_updates_are_counted() {
        let mut app = SkinkApp::new();
        let tick = FixedTick { dt: 0.001, sim_time: 0.0, index: 0 };
        app.on_fixed_update(&tick);
        app.on_fixed_update(&tick);
        assert_eq!(app.fixed_ticks, 2);
    }

    #[test]
    fn counters_outlive_on_exit() {
        let mut app = SkinkApp::new();
        let tick = FixedTick { dt: 0.001, sim_time: 0.0, index: 0 };
        app.on_fixed_update(&tick);
        app.on_exit();
        // Reported when the app is dropped, after the runtime has shut down.
        assert_eq!(app.fixed_ticks, 1);
        drop(app);
    }

    #[test]
    fn renderer_builds_without_a_device() {
        let mut app = SkinkApp::new();
        assert!(app.quad().is_ok());
        app.on_exit();
        assert!(app.quad.is_none());
    }
}
