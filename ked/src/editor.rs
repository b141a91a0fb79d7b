//! The blocking read-render cycle
//!
//! The loop alternates between exactly two states: paint a frame, wait for
//! one key. Movement keys nudge the cursor, `Ctrl+Q` resets the screen and
//! quits, everything else is a no-op. Timeouts just repaint, which is what
//! keeps the loop responsive without any second thread.

use log::warn;

use ked_screen::{escape, Cursor, FrameBuffer, Renderer};
use ked_tty::{read_key, Console, Key, Result, WindowSize};
use ked_tty::{MOVE_DOWN, MOVE_LEFT, MOVE_RIGHT, MOVE_UP};

/// Ctrl key chord: bitwise AND with 0x1f mirrors what the terminal sends
const fn ctrl(byte: u8) -> u8 {
    byte & 0x1f
}

/// The only graceful-exit key
const QUIT: u8 = ctrl(b'q');

/// What dispatch decided about the key it was handed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Editor session state: fixed geometry, a cursor, and a renderer
pub struct Editor {
    cursor: Cursor,
    renderer: Renderer,
}

impl Editor {
    /// Create an editor for the probed window size
    pub fn new(size: WindowSize) -> Self {
        Self {
            cursor: Cursor::new(),
            renderer: Renderer::new(size),
        }
    }

    /// Current cursor position
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Run the read-render cycle until the quit key arrives
    ///
    /// Render failures degrade the current frame and are absorbed; only a
    /// failing read tears the session down (and the raw-mode guard held by
    /// the caller restores the terminal on that path too).
    pub fn run(&mut self, console: &mut Console) -> Result<()> {
        loop {
            if let Err(err) = self.renderer.draw(self.cursor, console) {
                warn!("frame write failed: {err}");
            }

            match read_key(console)? {
                Key::Timeout => continue,
                Key::Byte(key) => {
                    if self.dispatch(key) == Flow::Quit {
                        // Courtesy reset, flushed as one write like any other
                        // frame; mode restoration happens separately when the
                        // raw-mode guard drops.
                        let _ = Self::reset_frame().flush(console);
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Apply one key to the editor state
    fn dispatch(&mut self, key: u8) -> Flow {
        match key {
            QUIT => return Flow::Quit,
            MOVE_LEFT => self.cursor.move_by(-1, 0),
            MOVE_RIGHT => self.cursor.move_by(1, 0),
            MOVE_UP => self.cursor.move_by(0, -1),
            MOVE_DOWN => self.cursor.move_by(0, 1),
            _ => {}
        }
        Flow::Continue
    }

    /// The clear-and-home frame emitted on quit
    fn reset_frame() -> FrameBuffer {
        let mut frame = FrameBuffer::new();
        frame.append(escape::CLEAR_SCREEN);
        frame.append(escape::CURSOR_HOME);
        frame
    }
}
