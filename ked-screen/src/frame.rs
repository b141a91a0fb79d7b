//! Frame batching
//!
//! One `FrameBuffer` is created per repaint, filled with every fragment of
//! the frame, flushed through a single write, and discarded. Nothing is
//! retained across frames.

use std::io::{self, Write};

/// Append-only byte buffer for one in-progress frame
#[derive(Debug, Default)]
pub struct FrameBuffer {
    buf: Vec<u8>,
}

impl FrameBuffer {
    /// Create an empty frame buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a frame buffer with room for `capacity` bytes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Append a fragment to the frame
    ///
    /// A failed reservation drops the fragment: the frame renders with a
    /// local artifact instead of tearing down the session.
    pub fn append(&mut self, bytes: &[u8]) {
        if self.buf.try_reserve(bytes.len()).is_ok() {
            self.buf.extend_from_slice(bytes);
        }
    }

    /// The accumulated frame bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Number of bytes accumulated so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the frame is still empty
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Write the whole frame in one go and release the buffer
    pub fn flush(self, out: &mut impl Write) -> io::Result<()> {
        out.write_all(&self.buf)?;
        out.flush()
    }
}
