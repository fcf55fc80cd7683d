//! GPU rendering.
//!
//! Renderers own their GPU resources (pipelines, buffers) and record passes
//! into the frame's encoder. The frame has already been cleared when they run.

mod ctx;
mod quad;

pub use ctx::{RenderCtx, RenderTarget};
pub use quad::{QuadRenderer, QuadVertex, QUAD_INDICES, QUAD_VERTICES};
