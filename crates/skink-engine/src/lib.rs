//! Skink engine crate.
//!
//! Platform and GPU runtime for the Little Brown Skink renderer: one window,
//! one wgpu context, a fixed-step update hook, and a full-screen quad.

pub mod assets;
pub mod coords;
pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod shader;
pub mod time;
pub mod window;
