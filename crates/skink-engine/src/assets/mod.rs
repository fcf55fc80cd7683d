//! Asset loading. The only asset is the window icon.

mod icon;

pub use icon::IconImage;
