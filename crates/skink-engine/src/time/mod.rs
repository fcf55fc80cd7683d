//! Time subsystem.
//!
//! - `FrameClock`: one per render loop; `tick()` once per presented frame
//! - `FixedStep`: turns frame deltas into whole fixed-length update steps

mod fixed_step;
mod frame_clock;

pub use fixed_step::{FixedStep, FixedStepConfig, FixedTick};
pub use frame_clock::{FrameClock, FrameTime};
