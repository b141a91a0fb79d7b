//! Window-size determination
//!
//! Two independently fallible strategies:
//! 1. Primary: `ioctl(TIOCGWINSZ)` on the output stream.
//! 2. Secondary: park the cursor at the bottom-right extreme and ask the
//!    terminal where it ended up (`ESC[6n` cursor-position report).
//!
//! The primary answer always wins. The probe exists to cover terminals whose
//! ioctl reports a zero width, and to cross-check the ioctl when both
//! succeed; a disagreement is logged and otherwise discarded, which is a
//! known gap carried over from the original design rather than an oversight.

use std::io::{self, Read, Write};
use std::os::fd::{AsRawFd, BorrowedFd};

use log::{debug, warn};

use crate::console::Console;
use crate::error::{Error, Result};

/// Cursor to the bottom-right extreme: 999 columns right, 999 rows down
const CURSOR_TO_EXTREME: &[u8] = b"\x1b[999C\x1b[999B";
/// Cursor-position report request; the terminal answers `ESC[<r>;<c>R`
const CURSOR_REPORT_REQUEST: &[u8] = b"\x1b[6n";
/// Hard cap on the report length, the backstop against a mute terminal
const REPORT_CAP: usize = 32;

/// Window size in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    /// Number of rows
    pub rows: u16,
    /// Number of columns
    pub cols: u16,
}

impl WindowSize {
    /// Create a new window size
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { rows, cols }
    }
}

impl From<libc::winsize> for WindowSize {
    fn from(ws: libc::winsize) -> Self {
        Self {
            rows: ws.ws_row,
            cols: ws.ws_col,
        }
    }
}

/// Determine the window size, probing once at startup
///
/// A failed ioctl is fatal; there is no silent-degrade default. A zero
/// reported width falls back to the cursor probe. When both strategies
/// answer and disagree, the ioctl value is returned.
pub fn window_size(console: &mut Console) -> Result<WindowSize> {
    let primary = ioctl_window_size(console.output_fd())
        .map_err(|err| Error::WindowSize(err.to_string()))?;

    if primary.cols == 0 {
        debug!("ioctl reported zero width, falling back to cursor probe");
        return probe_window_size(console);
    }

    match probe_window_size(console) {
        Ok(probed) if probed != primary => {
            warn!(
                "window-size probes disagree: ioctl {}x{}, cursor {}x{}; using ioctl",
                primary.cols, primary.rows, probed.cols, probed.rows
            );
        }
        Ok(_) => {}
        Err(err) => debug!("cursor probe failed ({err}); using ioctl"),
    }

    Ok(primary)
}

/// Primary strategy: ask the kernel
fn ioctl_window_size(fd: BorrowedFd<'_>) -> io::Result<WindowSize> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(fd.as_raw_fd(), libc::TIOCGWINSZ as libc::c_ulong, &mut ws) };
    if result == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(WindowSize::from(ws))
    }
}

/// Secondary strategy: ask the terminal itself
///
/// Requires raw mode: the reply arrives on the input stream and must not be
/// echoed or line-buffered, and `VTIME` bounds each byte read.
fn probe_window_size(console: &mut Console) -> Result<WindowSize> {
    console.write_all(CURSOR_TO_EXTREME)?;
    console.write_all(CURSOR_REPORT_REQUEST)?;
    console.flush()?;

    let report = read_report(console)?;
    parse_report(&report)
}

/// Read the report byte-by-byte until the terminating `R` or the cap
fn read_report(input: &mut impl Read) -> Result<Vec<u8>> {
    let mut report = Vec::with_capacity(REPORT_CAP);
    let mut byte = [0u8; 1];

    while report.len() < REPORT_CAP {
        match input.read(&mut byte) {
            // VTIME expiry: the terminal stopped talking
            Ok(0) => {
                return Err(Error::CursorReport(
                    "terminal did not reply with a cursor report".into(),
                ))
            }
            Ok(_) if byte[0] == b'R' => {
                report.push(byte[0]);
                return Ok(report);
            }
            Ok(_) => report.push(byte[0]),
            Err(err) => return Err(Error::Read(err)),
        }
    }

    Err(Error::CursorReport(
        "no terminating 'R' within the report cap".into(),
    ))
}

/// Parse `ESC [ <rows> ; <cols> R` into a window size
fn parse_report(report: &[u8]) -> Result<WindowSize> {
    let body = report
        .strip_prefix(b"\x1b[")
        .ok_or_else(|| Error::CursorReport("missing ESC[ marker".into()))?;
    let body = body
        .strip_suffix(b"R")
        .ok_or_else(|| Error::CursorReport("missing terminating 'R'".into()))?;

    let text = std::str::from_utf8(body)
        .map_err(|_| Error::CursorReport("non-ASCII report body".into()))?;
    let (rows, cols) = text
        .split_once(';')
        .ok_or_else(|| Error::CursorReport("missing ';' separator".into()))?;

    let rows: u16 = rows
        .parse()
        .map_err(|_| Error::CursorReport(format!("bad row count {rows:?}")))?;
    let cols: u16 = cols
        .parse()
        .map_err(|_| Error::CursorReport(format!("bad column count {cols:?}")))?;

    Ok(WindowSize::new(cols, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::os::fd::AsFd;

    use nix::pty::openpty;
    use proptest::prelude::*;

    use crate::raw::RawMode;

    fn set_winsize(fd: BorrowedFd<'_>, cols: u16, rows: u16) {
        let ws = libc::winsize {
            ws_row: rows,
            ws_col: cols,
            ws_xpixel: 0,
            ws_ypixel: 0,
        };
        let result = unsafe { libc::ioctl(fd.as_raw_fd(), libc::TIOCSWINSZ as libc::c_ulong, &ws) };
        assert_eq!(result, 0);
    }

    // The slave must be raw for the probe: the report read is bounded by
    // VTIME, not by a newline.
    fn pty_console() -> (File, Console, RawMode) {
        let pty = openpty(None, None).unwrap();
        let raw = RawMode::enable(pty.slave.as_fd()).unwrap();
        let slave = pty.slave.try_clone().unwrap();
        (
            File::from(pty.master),
            Console::from_fds(pty.slave, slave),
            raw,
        )
    }

    #[test]
    fn test_primary_wins_when_probes_disagree() {
        let (mut master, mut console, _raw) = pty_console();
        set_winsize(console.output_fd(), 80, 24);

        // A disagreeing cursor report is already waiting when the probe asks
        master.write_all(b"\x1b[5;7R").unwrap();

        let size = window_size(&mut console).unwrap();
        assert_eq!(size, WindowSize::new(80, 24));
    }

    #[test]
    fn test_zero_width_falls_back_to_cursor_probe() {
        let (mut master, mut console, _raw) = pty_console();
        set_winsize(console.output_fd(), 0, 0);

        master.write_all(b"\x1b[24;80R").unwrap();

        let size = window_size(&mut console).unwrap();
        assert_eq!(size, WindowSize::new(80, 24));
    }

    #[test]
    fn test_parse_report() {
        let size = parse_report(b"\x1b[24;80R").unwrap();
        assert_eq!(size.rows, 24);
        assert_eq!(size.cols, 80);
    }

    #[test]
    fn test_parse_report_missing_marker() {
        assert!(matches!(
            parse_report(b"24;80R"),
            Err(Error::CursorReport(_))
        ));
    }

    #[test]
    fn test_parse_report_missing_separator() {
        assert!(matches!(
            parse_report(b"\x1b[2480R"),
            Err(Error::CursorReport(_))
        ));
    }

    #[test]
    fn test_read_report_stops_at_terminator() {
        let mut input = std::io::Cursor::new(b"\x1b[24;80Rtrailing".to_vec());
        let report = read_report(&mut input).unwrap();
        assert_eq!(report, b"\x1b[24;80R");
    }

    #[test]
    fn test_read_report_fails_at_cap_instead_of_hanging() {
        // More than REPORT_CAP bytes and no 'R' anywhere
        let mut input = std::io::Cursor::new(vec![b'1'; 64]);
        assert!(matches!(
            read_report(&mut input),
            Err(Error::CursorReport(_))
        ));
    }

    #[test]
    fn test_read_report_fails_on_silence() {
        // A zero-length read models VTIME expiry with no reply at all;
        // silence is reported as such, not as a cap overrun
        let mut input = std::io::Cursor::new(Vec::new());
        match read_report(&mut input) {
            Err(Error::CursorReport(msg)) => assert!(msg.contains("did not reply")),
            other => panic!("expected a cursor-report error, got {other:?}"),
        }
    }

    proptest! {
        #[test]
        fn test_parse_report_never_panics(report in proptest::collection::vec(any::<u8>(), 0..40)) {
            let _ = parse_report(&report);
        }

        #[test]
        fn test_parse_report_round_trips(rows in 1u16..1000, cols in 1u16..1000) {
            let report = format!("\x1b[{rows};{cols}R");
            let size = parse_report(report.as_bytes()).unwrap();
            prop_assert_eq!(size.rows, rows);
            prop_assert_eq!(size.cols, cols);
        }
    }
}
