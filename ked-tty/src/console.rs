//! Console handle acquisition
//!
//! The editor talks to exactly one input stream and one output stream for the
//! whole process lifetime. `Console` duplicates both fds once at startup so
//! the rest of the crate can poll, read, and write without holding locks on
//! the std handles.

use std::fs::File;
use std::io::{self, Read, Write};
use std::os::fd::{AsFd, BorrowedFd, OwnedFd};

use crate::error::Result;

/// The process-wide console stream pair
pub struct Console {
    input: File,
    output: File,
}

impl Console {
    /// Duplicate stdin/stdout into an owned console pair
    pub fn open() -> Result<Self> {
        let input = io::stdin().as_fd().try_clone_to_owned()?;
        let output = io::stdout().as_fd().try_clone_to_owned()?;
        Ok(Self::from_fds(input, output))
    }

    /// Build a console over arbitrary fds (tests point this at a pty pair)
    pub fn from_fds(input: OwnedFd, output: OwnedFd) -> Self {
        Self {
            input: File::from(input),
            output: File::from(output),
        }
    }

    /// Borrow the input fd for poll/termios calls
    pub fn input_fd(&self) -> BorrowedFd<'_> {
        self.input.as_fd()
    }

    /// Borrow the output fd for the window-size ioctl
    pub fn output_fd(&self) -> BorrowedFd<'_> {
        self.output.as_fd()
    }
}

impl Read for Console {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.input.read(buf)
    }
}

impl Write for Console {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }
}
