//! ked-screen - deterministic frame composition for the ked editor
//!
//! This crate knows nothing about file descriptors or termios. It turns a
//! window size and a cursor position into one contiguous byte frame and
//! writes it through a single flush, so a repaint is never interleaved with
//! anything else on the wire.

pub mod escape;

mod cursor;
mod frame;
mod render;

pub use cursor::Cursor;
pub use frame::FrameBuffer;
pub use render::Renderer;
