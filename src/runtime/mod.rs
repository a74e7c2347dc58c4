//! The rendering context abstraction and the browser runtime that drives the frame loop.
//!
//! Everything runs on the main WASM thread, see the [single_threaded] module.

mod context_options;
pub use self::context_options::{ContextOptions, ContextOptionsBuilder, PowerPreference};

mod rendering_context;
pub use self::rendering_context::RenderingContext;

mod webgl;

pub mod animation;
pub mod listeners;
pub mod single_threaded;

#[cfg(test)]
pub(crate) mod fake;
