//! Renderer - Cell buffers and terminal output.
//!
//! [`FrameBuffer`] holds what a frame should look like; [`DiffRenderer`]
//! writes the cells that changed since the last frame.

mod buffer;
mod diff;

pub use buffer::FrameBuffer;
pub use diff::DiffRenderer;
