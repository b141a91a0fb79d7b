//! Key input with a bounded wait
//!
//! `read_key` turns the blocking console read into an effectively pollable
//! operation: it waits at most one second for input and reports a timeout as
//! `Key::Timeout` instead of an error, so the caller can simply loop.
//!
//! Arrow keys arrive as `ESC [ A..D` escape sequences; they are mapped to
//! canonical single-byte movement codes regardless of the bytes the terminal
//! actually sent. Every other byte passes through raw.

use std::io::Read;

use nix::errno::Errno;
use nix::poll::{poll, PollFd, PollFlags, PollTimeout};

use crate::console::Console;
use crate::error::{Error, Result};

/// Canonical movement code for arrow-up
pub const MOVE_UP: u8 = b'w';
/// Canonical movement code for arrow-down
pub const MOVE_DOWN: u8 = b's';
/// Canonical movement code for arrow-left
pub const MOVE_LEFT: u8 = b'a';
/// Canonical movement code for arrow-right
pub const MOVE_RIGHT: u8 = b'd';

const ESC: u8 = 0x1b;

/// How long one read waits before reporting `Key::Timeout`
const POLL_WINDOW_MS: u16 = 1000;

/// A single decoded key press, consumed immediately by dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// The poll window elapsed with no input
    Timeout,
    /// A key byte, with arrow keys canonicalized to movement codes
    Byte(u8),
}

/// Wait up to one second for the next key press
pub fn read_key(console: &mut Console) -> Result<Key> {
    read_key_within(console, PollTimeout::from(POLL_WINDOW_MS))
}

/// Wait up to `window` for the next key press (tests use short windows)
pub fn read_key_within(console: &mut Console, window: PollTimeout) -> Result<Key> {
    let mut fds = [PollFd::new(console.input_fd(), PollFlags::POLLIN)];
    match poll(&mut fds, window) {
        Ok(0) => return Ok(Key::Timeout),
        Ok(_) => {}
        // A signal interrupting the wait is indistinguishable from an empty
        // window as far as the loop is concerned.
        Err(Errno::EINTR) => return Ok(Key::Timeout),
        Err(err) => return Err(Error::Read(err.into())),
    }

    match next_byte(console)? {
        None => Ok(Key::Timeout),
        Some(ESC) => decode_escape(console),
        Some(byte) => Ok(Key::Byte(byte)),
    }
}

/// Decode the tail of an escape sequence
///
/// The follow-up reads run under `VMIN=0`/`VTIME=1`, so a bare ESC key (no
/// tail arriving) resolves in a tenth of a second rather than blocking.
/// Unrecognized sequences collapse to the ESC byte.
fn decode_escape(console: &mut Console) -> Result<Key> {
    let Some(b'[') = next_byte(console)? else {
        return Ok(Key::Byte(ESC));
    };
    let key = match next_byte(console)? {
        Some(b'A') => MOVE_UP,
        Some(b'B') => MOVE_DOWN,
        Some(b'C') => MOVE_RIGHT,
        Some(b'D') => MOVE_LEFT,
        _ => ESC,
    };
    Ok(Key::Byte(key))
}

/// Read one byte, treating a `VTIME` expiry as "nothing there"
fn next_byte(console: &mut Console) -> Result<Option<u8>> {
    let mut byte = [0u8; 1];
    match console.read(&mut byte) {
        Ok(0) => Ok(None),
        Ok(_) => Ok(Some(byte[0])),
        Err(err) => Err(Error::Read(err)),
    }
}
