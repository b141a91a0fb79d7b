//! Error types for console operations

use std::io;

use nix::errno::Errno;
use thiserror::Error;

/// Console error type
#[derive(Error, Debug)]
pub enum Error {
    /// Querying the current terminal mode failed
    #[error("failed to query terminal mode: {0}")]
    ModeQuery(Errno),

    /// Installing a terminal mode failed
    #[error("failed to set terminal mode: {0}")]
    ModeSet(Errno),

    /// The window-size ioctl failed
    #[error("failed to determine window size: {0}")]
    WindowSize(String),

    /// The cursor-position report was malformed or never terminated
    #[error("malformed cursor position report: {0}")]
    CursorReport(String),

    /// Reading console input failed (a timeout is not an error)
    #[error("failed to read console input: {0}")]
    Read(#[source] io::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for console operations
pub type Result<T> = std::result::Result<T, Error>;
