//! Viewport geometry.
//!
//! Sizes are logical pixels (DPI-aware). The quad renderer works directly in
//! NDC, so the viewport is only used for sizing decisions.

mod viewport;

pub use viewport::Viewport;
