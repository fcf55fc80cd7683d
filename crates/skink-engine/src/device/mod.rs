//! GPU device + surface management.
//!
//! - creates the wgpu Instance/Adapter/Device/Queue
//! - creates & configures the Surface (swapchain)
//! - acquires frames and provides encoders/views for rendering

mod context;
mod error;
mod frame;
mod init;
mod surface;

pub use context::Gpu;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use init::GpuInit;
