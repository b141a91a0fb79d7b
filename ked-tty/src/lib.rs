//! ked-tty - raw console access for the ked editor
//!
//! This crate owns everything that touches the terminal device directly:
//! - Console handle acquisition (duplicated stdin/stdout fds)
//! - Raw mode entry and guaranteed restoration (scope-bound guard)
//! - Window-size determination (ioctl primary, cursor-report probe secondary)
//! - Key input with a bounded wait and arrow-key canonicalization
//!
//! Everything above this crate works with plain bytes and `io::Write`; only
//! this crate issues termios, poll, and ioctl calls.

mod console;
mod error;
mod input;
mod raw;
mod size;

pub use console::Console;
pub use error::{Error, Result};
pub use input::{read_key, Key, MOVE_DOWN, MOVE_LEFT, MOVE_RIGHT, MOVE_UP};
pub use raw::RawMode;
pub use size::{window_size, WindowSize};
