//! Compact bin codes.
//!
//! A bin code is eight characters, `RRBBLLSS`: a two-letter row, a two-digit
//! bay, a two-letter level and a two-digit side, e.g. `AC07AB02`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Known row codes, in physical order. Rows pair up back to back: index 0
/// and 1 form the first pair, 2 and 3 the second, and so on.
pub const ROW_CODES: [&str; 26] = [
    "AA", "AB", "AC", "AD", "AE", "AF", "AG", "AH", "AI", "AJ", "AK", "AL", "AM", "AN", "AO",
    "AP", "AQ", "AR", "AS", "AT", "AU", "AV", "AW", "AX", "AY", "AZ",
];

/// Known level codes, ground level first.
pub const LEVEL_CODES: [&str; 7] = ["AA", "AB", "AC", "AD", "AE", "AF", "AG"];

/// Bay limit used by [`ParsedLocationCode::parse`].
pub const DEFAULT_BAYS_PER_ROW: u8 = 20;

const CODE_LEN: usize = 8;

/// A validated bin code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParsedLocationCode {
    row: [u8; 2],
    bay: u8,
    level: [u8; 2],
    side: u8,
}

impl ParsedLocationCode {
    /// Parses a bin code against the default bay limit.
    pub fn parse(code: &str) -> Option<Self> {
        Self::parse_bounded(code, DEFAULT_BAYS_PER_ROW)
    }

    /// Parses a bin code, accepting bays in `1..=max_bays`.
    ///
    /// Returns `None` when the grammar does not match, the level is not in
    /// [`LEVEL_CODES`], the bay is out of range, or the side is not 1 or 2.
    pub fn parse_bounded(code: &str, max_bays: u8) -> Option<Self> {
        let bytes = code.as_bytes();
        if bytes.len() != CODE_LEN {
            return None;
        }

        let row = letters(&bytes[0..2])?;
        let bay = digits(&bytes[2..4])?;
        let level = letters(&bytes[4..6])?;
        let side = digits(&bytes[6..8])?;

        if level_position(&level).is_none() {
            return None;
        }
        if bay == 0 || bay > max_bays {
            return None;
        }
        if side != 1 && side != 2 {
            return None;
        }

        Some(Self { row, bay, level, side })
    }

    /// Parses the tail of a location path.
    ///
    /// Four segments are `row/bay/level/side`. Three segments are
    /// `row/bay/level`: the level itself is the storage slot and the side is
    /// taken as 1. Every segment must be exactly two characters.
    pub fn from_segments(segments: &[&str], max_bays: u8) -> Option<Self> {
        if segments.iter().any(|segment| segment.len() != 2) {
            return None;
        }
        let code = match segments {
            [row, bay, level] => format!("{row}{bay}{level}01"),
            [row, bay, level, side] => format!("{row}{bay}{level}{side}"),
            _ => return None,
        };
        Self::parse_bounded(&code, max_bays)
    }

    /// Formats the code back to its eight-character form.
    pub fn format(&self) -> String {
        format!("{}{:02}{}{:02}", self.row(), self.bay, self.level(), self.side)
    }

    pub fn row(&self) -> &str {
        // Only ASCII letters are ever stored.
        std::str::from_utf8(&self.row).unwrap_or_default()
    }

    pub fn level(&self) -> &str {
        std::str::from_utf8(&self.level).unwrap_or_default()
    }

    pub fn bay(&self) -> u8 {
        self.bay
    }

    pub fn side(&self) -> u8 {
        self.side
    }

    /// Position of the row in [`ROW_CODES`]; unknown rows fall back to 0.
    pub fn row_index(&self) -> usize {
        row_index(self.row())
    }

    /// Position of the level in [`LEVEL_CODES`].
    pub fn level_index(&self) -> usize {
        level_index(self.level())
    }

    /// Index of the back-to-back pair the row belongs to.
    pub fn pair_index(&self) -> usize {
        self.row_index() / 2
    }

    /// Whether the row is the second (higher-Z) member of its pair.
    pub fn is_second_of_pair(&self) -> bool {
        self.row_index() % 2 == 1
    }
}

impl fmt::Display for ParsedLocationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// Position of `row` in [`ROW_CODES`], or `None` when unknown.
pub fn row_position(row: &str) -> Option<usize> {
    ROW_CODES.iter().position(|known| *known == row)
}

/// Position of `row` in [`ROW_CODES`]. Unknown rows degrade to 0, so two
/// different unknown rows share a position.
pub fn row_index(row: &str) -> usize {
    row_position(row).unwrap_or(0)
}

/// Position of `level` in [`LEVEL_CODES`], or `None` when unknown.
pub fn level_position(level: impl AsRef<[u8]>) -> Option<usize> {
    let level = level.as_ref();
    LEVEL_CODES.iter().position(|known| known.as_bytes() == level)
}

/// Position of `level` in [`LEVEL_CODES`]. Unknown levels degrade to 0.
pub fn level_index(level: &str) -> usize {
    level_position(level).unwrap_or(0)
}

fn letters(bytes: &[u8]) -> Option<[u8; 2]> {
    if bytes.iter().all(u8::is_ascii_uppercase) {
        Some([bytes[0], bytes[1]])
    } else {
        None
    }
}

fn digits(bytes: &[u8]) -> Option<u8> {
    if bytes.iter().all(u8::is_ascii_digit) {
        Some((bytes[0] - b'0') * 10 + (bytes[1] - b'0'))
    } else {
        None
    }
}
