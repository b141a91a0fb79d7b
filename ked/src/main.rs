//! ked - a minimal raw-mode terminal editor shell
//!
//! Startup acquires the console, enters raw mode behind a scope guard,
//! probes the window size once, and hands control to the editor loop. Every
//! startup failure is fatal with a distinct exit code; once the loop is
//! running, only a failing read ends the session. The raw-mode guard lives
//! on `run`'s stack, so the terminal mode is restored on every way out.

mod editor;

use std::process::ExitCode;

use log::debug;

use editor::Editor;
use ked_tty::{window_size, Console, Error, RawMode};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ked: {err}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run() -> ked_tty::Result<()> {
    let mut console = Console::open()?;
    let _raw = RawMode::enable(console.input_fd())?;

    let size = window_size(&mut console)?;
    debug!("window size {}x{}", size.cols, size.rows);

    Editor::new(size).run(&mut console)
    // _raw drops here, restoring the terminal mode
}

/// Stable exit-code enumeration: 0 normal quit, then one code per fatal class
fn exit_code(err: &Error) -> u8 {
    match err {
        Error::ModeQuery(_) => 1,
        Error::ModeSet(_) => 2,
        Error::Read(_) => 3,
        Error::WindowSize(_) | Error::CursorReport(_) => 4,
        Error::Io(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_per_class() {
        use std::io;
        let codes = [
            exit_code(&Error::ModeQuery(nix::errno::Errno::ENOTTY)),
            exit_code(&Error::ModeSet(nix::errno::Errno::ENOTTY)),
            exit_code(&Error::Read(io::Error::other("boom"))),
            exit_code(&Error::WindowSize("boom".into())),
            exit_code(&Error::Io(io::Error::other("boom"))),
        ];
        for (i, a) in codes.iter().enumerate() {
            assert_ne!(*a, 0);
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_parse_failure_maps_to_geometry_code() {
        assert_eq!(
            exit_code(&Error::CursorReport("bad".into())),
            exit_code(&Error::WindowSize("bad".into()))
        );
    }
}
