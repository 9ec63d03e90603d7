//! Error codes for fenboard diagnostics.
//!
//! - `E0xx` - FEN placement errors
//! - `E1xx` - Square name errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Placement Errors (E0xx)
    // =========================================================================
    /// Unexpected character in a rank.
    ///
    /// Ranks may only contain the piece letters `kqbnrpKQBNRP` and the
    /// digits `1` to `8`.
    E001,

    /// Rank too long.
    ///
    /// The rank expands to more than 8 squares.
    E002,

    /// Rank too short.
    ///
    /// The rank expands to fewer than 8 squares.
    E003,

    /// Wrong number of ranks.
    ///
    /// The placement field must contain exactly 8 ranks separated by `/`.
    E004,

    /// Empty input.
    ///
    /// The FEN string contains no placement field.
    E005,

    // =========================================================================
    // Square Errors (E1xx)
    // =========================================================================
    /// Invalid square name.
    ///
    /// Squares are written as a file letter `a`-`h` followed by a rank
    /// digit `1`-`8`, for example `e4`.
    E100,
}

impl ErrorCode {
    /// Returns the string form of the code, for example `"E002"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            ErrorCode::E005 => "E005",
            ErrorCode::E100 => "E100",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E004.to_string(), "E004");
        assert_eq!(ErrorCode::E100.to_string(), "E100");
    }
}
