//! Raw mode entry and guaranteed restoration
//!
//! `RawMode` is a scope-bound guard: enabling raw mode hands back a value
//! whose `Drop` reinstalls the terminal mode captured at entry. Holding the
//! guard on the stack for the whole session means every exit path - normal
//! return, `?` propagation, panic unwinding - puts the terminal back the way
//! it was found. No exit-hook registry is involved.

use std::os::fd::{AsFd, BorrowedFd, OwnedFd};

use log::warn;
use nix::sys::termios::{
    self, ControlFlags, InputFlags, LocalFlags, OutputFlags, SetArg,
    SpecialCharacterIndices, Termios,
};

use crate::error::{Error, Result};

/// Scope guard holding the terminal in raw mode
///
/// The installed mode is raw for exactly as long as the guard lives; dropping
/// it restores the original mode. Create one guard per session: enabling raw
/// mode again while a guard is alive would capture the already-raw state as
/// "original".
pub struct RawMode {
    fd: OwnedFd,
    original: Termios,
}

impl RawMode {
    /// Capture the current mode, install raw mode, and return the guard
    pub fn enable(fd: BorrowedFd<'_>) -> Result<Self> {
        let original = termios::tcgetattr(fd).map_err(Error::ModeQuery)?;
        let owned = fd.try_clone_to_owned()?;
        let raw = raw_termios(&original);
        termios::tcsetattr(fd, SetArg::TCSAFLUSH, &raw).map_err(Error::ModeSet)?;
        Ok(Self {
            fd: owned,
            original,
        })
    }

    /// The mode that will be reinstalled on drop
    pub fn original(&self) -> &Termios {
        &self.original
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        // Best effort: the process is on its way out and there is nowhere
        // left to report a failure.
        if let Err(err) = termios::tcsetattr(self.fd.as_fd(), SetArg::TCSAFLUSH, &self.original) {
            warn!("failed to restore terminal mode: {err}");
        }
    }
}

/// Compute the raw mode from a captured original
///
/// Input side: no break-to-signal, no CR translation, no parity check, no
/// high-bit stripping, no flow control. Output side: no post-processing (the
/// terminal gets escape bytes verbatim, and `\n` is not expanded). Local
/// side: no echo, no line buffering, no signal keys, no extended input.
/// `VMIN=0`/`VTIME=1` bounds every read at a tenth of a second so escape
/// sequence tails and the cursor-report probe cannot hang.
fn raw_termios(original: &Termios) -> Termios {
    let mut raw = original.clone();
    raw.input_flags.remove(
        InputFlags::BRKINT
            | InputFlags::ICRNL
            | InputFlags::INPCK
            | InputFlags::ISTRIP
            | InputFlags::IXON,
    );
    raw.output_flags.remove(OutputFlags::OPOST);
    raw.control_flags.insert(ControlFlags::CS8);
    raw.local_flags.remove(
        LocalFlags::ECHO | LocalFlags::ICANON | LocalFlags::IEXTEN | LocalFlags::ISIG,
    );
    raw.control_chars[SpecialCharacterIndices::VMIN as usize] = 0;
    raw.control_chars[SpecialCharacterIndices::VTIME as usize] = 1;
    raw
}
