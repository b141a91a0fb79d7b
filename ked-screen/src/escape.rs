//! Escape sequences emitted on the output stream
//!
//! These are byte-exact for terminal compatibility; see the VT100/xterm
//! cursor and erase controls. Reposition arguments are 1-indexed.

/// Clear the whole screen
pub const CLEAR_SCREEN: &[u8] = b"\x1b[2J";
/// Cursor to the home position
pub const CURSOR_HOME: &[u8] = b"\x1b[H";
/// Hide the cursor while a frame is painted
pub const HIDE_CURSOR: &[u8] = b"\x1b[?25l";
/// Show the cursor again once the frame is complete
pub const SHOW_CURSOR: &[u8] = b"\x1b[?25h";
/// Erase from the cursor to the end of the line
pub const ERASE_LINE: &[u8] = b"\x1b[K";

/// Reposition the cursor; `row` and `col` are 1-indexed
pub fn cursor_goto(row: i32, col: i32) -> Vec<u8> {
    format!("\x1b[{row};{col}H").into_bytes()
}
