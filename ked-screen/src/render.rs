//! Full-frame rendering
//!
//! Every repaint redraws the whole screen: hide the cursor, return to the
//! home position, draw each row, reposition the cursor, show it again. The
//! frame goes out as one buffered write; there is no diffing and no damage
//! tracking. The last row must not end in a row separator or the terminal
//! would scroll and drift the geometry.

use std::io::{self, Write};

use ked_tty::WindowSize;

use crate::cursor::Cursor;
use crate::escape;
use crate::frame::FrameBuffer;

/// Placeholder glyph for rows without content
const ROW_PLACEHOLDER: &[u8] = b"~";
/// Row separator; raw mode disables output post-processing, so the carriage
/// return has to be explicit
const ROW_SEPARATOR: &[u8] = b"\r\n";

/// Paints one screen frame for a fixed window size
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    size: WindowSize,
}

impl Renderer {
    /// Create a renderer for the probed window size
    pub fn new(size: WindowSize) -> Self {
        Self { size }
    }

    /// The window size this renderer paints for
    pub fn size(&self) -> WindowSize {
        self.size
    }

    /// Compose one complete frame for the given cursor position
    pub fn compose(&self, cursor: Cursor) -> FrameBuffer {
        // Rough per-row cost plus the cursor bookkeeping around the frame
        let mut frame = FrameBuffer::with_capacity(self.size.rows as usize * 8 + 32);

        frame.append(escape::HIDE_CURSOR);
        frame.append(escape::CURSOR_HOME);

        for row in 0..self.size.rows {
            frame.append(ROW_PLACEHOLDER);
            frame.append(escape::ERASE_LINE);
            if row + 1 < self.size.rows {
                frame.append(ROW_SEPARATOR);
            }
        }

        // Escape sequences are 1-indexed
        frame.append(&escape::cursor_goto(cursor.row + 1, cursor.col + 1));
        frame.append(escape::SHOW_CURSOR);
        frame
    }

    /// Compose and flush one frame as a single write
    pub fn draw(&self, cursor: Cursor, out: &mut impl Write) -> io::Result<()> {
        self.compose(cursor).flush(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_occurrences(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|w| *w == needle).count()
    }

    #[test]
    fn test_frame_has_one_separator_less_than_rows() {
        let renderer = Renderer::new(WindowSize::new(10, 3));
        let frame = renderer.compose(Cursor::new());
        assert_eq!(count_occurrences(frame.as_bytes(), ROW_SEPARATOR), 2);
    }

    #[test]
    fn test_frame_never_ends_with_separator() {
        let renderer = Renderer::new(WindowSize::new(10, 3));
        let frame = renderer.compose(Cursor::new());
        assert!(!frame.as_bytes().ends_with(ROW_SEPARATOR));
    }

    #[test]
    fn test_frame_brackets_with_cursor_visibility() {
        let renderer = Renderer::new(WindowSize::new(80, 24));
        let frame = renderer.compose(Cursor::new());
        assert!(frame.as_bytes().starts_with(escape::HIDE_CURSOR));
        assert!(frame.as_bytes().ends_with(escape::SHOW_CURSOR));
    }

    #[test]
    fn test_frame_repositions_one_indexed() {
        let renderer = Renderer::new(WindowSize::new(80, 24));
        let frame = renderer.compose(Cursor { col: 2, row: 1 });
        assert_eq!(count_occurrences(frame.as_bytes(), b"\x1b[2;3H"), 1);
    }

    #[test]
    fn test_frame_layout_for_small_screen() {
        let renderer = Renderer::new(WindowSize::new(10, 3));
        let frame = renderer.compose(Cursor::new());
        let expected = b"\x1b[?25l\x1b[H~\x1b[K\r\n~\x1b[K\r\n~\x1b[K\x1b[1;1H\x1b[?25h";
        assert_eq!(frame.as_bytes(), expected);
    }

    #[test]
    fn test_every_row_is_erased() {
        let renderer = Renderer::new(WindowSize::new(10, 5));
        let frame = renderer.compose(Cursor::new());
        assert_eq!(count_occurrences(frame.as_bytes(), escape::ERASE_LINE), 5);
    }
}
