//! Cursor position state

/// Cursor position, zero-based `(col, row)`
///
/// Movement applies signed deltas without clamping, so positions outside
/// `[0, cols) x [0, rows)` (negatives included) are representable. That
/// matches the behavior this engine inherits; whether it is intentional
/// minimalism is an open question, so it is characterized by tests rather
/// than corrected here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Column position (0-indexed)
    pub col: i32,
    /// Row position (0-indexed)
    pub row: i32,
}

impl Cursor {
    /// Create a cursor at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a signed movement delta, unclamped
    pub fn move_by(&mut self, d_col: i32, d_row: i32) {
        self.col += d_col;
        self.row += d_row;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_sum_signed_deltas() {
        let mut cursor = Cursor::new();
        cursor.move_by(1, 0);
        cursor.move_by(1, 0);
        cursor.move_by(0, 1);
        cursor.move_by(-1, 0);
        assert_eq!(cursor, Cursor { col: 1, row: 1 });
    }

    #[test]
    fn test_no_lower_bound_is_enforced() {
        // Boundary characterization: nothing stops the cursor going negative.
        let mut cursor = Cursor::new();
        cursor.move_by(-1, -1);
        assert_eq!(cursor, Cursor { col: -1, row: -1 });
    }
}
