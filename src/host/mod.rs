//! SDL2 host: window, event translation, and the canvas-backed renderer

pub mod canvas;
pub mod input;
pub mod text;

pub use canvas::SdlRenderer;
pub use input::{HostCommand, poll_events};
