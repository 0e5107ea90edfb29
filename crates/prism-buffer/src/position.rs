//! Line/column positions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A position in the buffer (line and column).
///
/// Both line and column are 0-indexed; the column counts characters, not
/// bytes. `Display` and `FromStr` use the 1-indexed `LINE:COL` form users type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Position {
    /// Line number (0-indexed)
    pub line: usize,
    /// Column number (0-indexed, in characters)
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Position at the start of the document.
    pub const ZERO: Position = Position { line: 0, column: 0 };
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Error parsing a `LINE:COL` string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid position \"{0}\": expected LINE:COL with both parts starting at 1")]
pub struct ParsePositionError(String);

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePositionError(s.to_string());
        let (line, column) = s.trim().split_once(':').ok_or_else(err)?;
        let line: usize = line.parse().map_err(|_| err())?;
        let column: usize = column.parse().map_err(|_| err())?;
        if line == 0 || column == 0 {
            return Err(err());
        }
        Ok(Self::new(line - 1, column - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering() {
        assert!(Position::new(0, 9) < Position::new(1, 0));
        assert!(Position::new(2, 1) < Position::new(2, 3));
        assert_eq!(Position::ZERO, Position::default());
    }

    #[test]
    fn test_display_is_one_indexed() {
        assert_eq!(Position::new(0, 4).to_string(), "1:5");
    }

    #[test]
    fn test_parse() {
        assert_eq!("3:7".parse::<Position>(), Ok(Position::new(2, 6)));
        assert_eq!(" 1:1 ".parse::<Position>(), Ok(Position::ZERO));
        assert!("0:1".parse::<Position>().is_err());
        assert!("12".parse::<Position>().is_err());
        assert!("a:b".parse::<Position>().is_err());
    }

    #[test]
    fn test_serialization_is_zero_indexed() {
        let json = serde_json::to_string(&Position::new(2, 6)).unwrap();
        assert_eq!(json, r#"{"line":2,"column":6}"#);
    }
}
