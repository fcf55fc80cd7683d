use std::time::Duration;

/// Fixed-timestep settings.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FixedStepConfig {
    /// Length of one update step.
    pub step: Duration,

    /// Upper bound on steps run for a single frame; pending time beyond it is dropped.
    pub max_steps_per_frame: u32,
}

impl Default for FixedStepConfig {
    fn default() -> Self {
        Self {
            step: Duration::from_millis(1),
            max_steps_per_frame: 250,
        }
    }
}

/// One fixed update step handed to the application.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FixedTick {
    /// Step length in seconds.
    pub dt: f32,

    /// Simulated time at the start of this step, in seconds.
    pub sim_time: f64,

    /// Monotonic step counter.
    pub index: u64,
}

/// Accumulator that converts variable frame deltas into whole fixed steps.
///
/// Call `advance` once per frame with the frame delta, then run `ticks()` worth
/// of updates. Leftover time is carried to the next frame and exposed via
/// `alpha` for interpolating between the previous and current state.
#[derive(Debug, Clone)]
pub struct FixedStep {
    config: FixedStepConfig,
    accumulator: Duration,
    stepped: Duration,
    index: u64,
}

impl FixedStep {
    pub fn new(config: FixedStepConfig) -> Self {
        debug_assert!(!config.step.is_zero(), "fixed step must be non-zero");
        Self {
            config,
            accumulator: Duration::ZERO,
            stepped: Duration::ZERO,
            index: 0,
        }
    }

    pub fn config(&self) -> FixedStepConfig {
        self.config
    }

    /// Adds `dt` and returns the ticks to run this frame, oldest first.
    pub fn advance(&mut self, dt: Duration) -> Vec<FixedTick> {
        let step = self.config.step;
        if step.is_zero() {
            return Vec::new();
        }

        self.accumulator += dt;

        let pending = (self.accumulator.as_nanos() / step.as_nanos()) as u64;
        let run = pending.min(self.config.max_steps_per_frame as u64);

        if pending > run {
            let dropped = pending - run;
            log::debug!("fixed step falling behind; dropping {dropped} step(s)");
            self.accumulator = self
                .accumulator
                .saturating_sub(step.saturating_mul(dropped.min(u32::MAX as u64) as u32));
        }

        let mut ticks = Vec::with_capacity(run as usize);
        for _ in 0..run {
            ticks.push(FixedTick {
                dt: step.as_secs_f32(),
                sim_time: self.stepped.as_secs_f64(),
                index: self.index,
            });
            self.stepped += step;
            self.accumulator -= step;
            self.index = self.index.wrapping_add(1);
        }

        ticks
    }

    /// Fraction of a step left in the accumulator, in `[0, 1)`.
    pub fn alpha(&self) -> f32 {
        if self.config.step.is_zero() {
            return 0.0;
        }
        (self.accumulator.as_secs_f64() / self.config.step.as_secs_f64()) as f32
    }

    /// Total time covered by steps that have run.
    pub fn sim_time(&self) -> Duration {
        self.stepped
    }
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(FixedStepConfig::default())
    }
}
