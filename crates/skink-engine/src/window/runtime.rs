use std::path::PathBuf;

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::assets::IconImage;
use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::{translate_window_event, InputFrame, InputState};
use crate::time::{FixedStep, FixedStepConfig, FrameClock};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Window icon image. A missing or unreadable file is logged and skipped.
    pub icon: Option<PathBuf>,
    pub fixed_step: FixedStepConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "Little Brown Skink Renderer".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            icon: Some(PathBuf::from("assets/lbs-icon.png")),
            fixed_step: FixedStepConfig::default(),
        }
    }
}

/// Runtime context passed to the application.
///
/// Requests are buffered and applied after the current callback returns.
#[derive(Default)]
pub struct RuntimeCtx {
    exit: bool,
}

impl RuntimeCtx {
    pub fn exit(&mut self) {
        self.exit = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and drives `app` until the window closes or the app exits.
    ///
    /// Returns an error if the window or its GPU context cannot be created.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,
    fixed_step: FixedStep,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowEntry>,
    exit_requested: bool,
    fatal: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            window: None,
            exit_requested: false,
            fatal: None,
        }
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let mut attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        if let Some(path) = &self.config.icon {
            match IconImage::load(path).and_then(IconImage::into_window_icon) {
                Ok(icon) => attrs = attrs.with_window_icon(Some(icon)),
                Err(e) => log::warn!("window icon not set: {e:#}"),
            }
        }

        let window = event_loop
            .create_window(attrs)
            .context("window or graphics context creation failed")?;

        let gpu_init = self.gpu_init.clone();
        let fixed = self.config.fixed_step;

        WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            fixed_step: FixedStep::new(fixed),
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init)).context("failed to initialize GPU")
            },
        }
        .try_build()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.fatal = Some(err);
        self.shutdown(event_loop);
    }

    /// Releases app resources, then the GPU context, then the window.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if !self.exit_requested {
            self.exit_requested = true;
            self.app.on_exit();
        }
        if self.window.take().is_some() {
            log::debug!("window destroyed");
        }
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(entry) = self.window.as_mut() else { return };
        let app = &mut self.app;

        let mut runtime_ctx = RuntimeCtx::default();
        let mut control = AppControl::Continue;

        entry.with_mut(|fields| {
            let time = fields.clock.tick();

            for tick in fields.fixed_step.advance(time.dt_duration()) {
                app.on_fixed_update(&tick);
            }

            {
                let mut ctx = FrameCtx {
                    window: WindowCtx { window: fields.window },
                    gpu: fields.gpu,
                    input: fields.input_state,
                    input_frame: fields.input_frame,
                    time,
                    alpha: fields.fixed_step.alpha(),
                    runtime: &mut runtime_ctx,
                };

                control = app.on_frame(&mut ctx);
            }

            // Per-frame deltas are consumed by exactly one frame.
            fields.input_frame.clear();
        });

        if control == AppControl::Exit || runtime_ctx.exit_requested() {
            self.shutdown(event_loop);
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.exit_requested {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(mut entry) => {
                // Loop time starts now, not before GPU setup.
                entry.with_clock_mut(|clock| clock.restart());
                entry.with_window(|w| w.request_redraw());
                self.window = Some(entry);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; presentation is paced by the surface present mode.
        if let Some(entry) = &self.window {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.window.as_mut() else { return };
        if entry.with_window(|w| w.id()) != window_id {
            return;
        }

        entry.with_mut(|fields| {
            if let Some(ev) = translate_window_event(fields.input_state, &event) {
                fields.input_state.apply_event(fields.input_frame, ev);
            }
        });

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.shutdown(event_loop);
            return;
        }

        match &event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                log::info!("window closed");
                self.shutdown(event_loop);
            }

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.window.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.window.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if !self.exit_requested {
            self.exit_requested = true;
            self.app.on_exit();
        }
        self.window = None;
    }
}

