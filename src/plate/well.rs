use std::fmt;
use std::str::FromStr;

pub const PLATE_ROWS: usize = 8;
pub const PLATE_COLUMNS: usize = 12;
pub const PLATE_SLOTS: usize = PLATE_ROWS * PLATE_COLUMNS;

const ROW_LETTERS: [char; PLATE_ROWS] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

/// A well on a 96-well plate, stored as its column-major slot index.
///
/// Slots fill down a column before moving right: A1 is slot 0, H1 is
/// slot 7, A2 is slot 8 and H12 is slot 95.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Well(usize);

impl Well {
    pub const A1: Well = Well(0);

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        (index < PLATE_SLOTS).then_some(Well(index))
    }

    /// `row_ordinal` is 0 for row A, `column` is 1-based.
    #[must_use]
    pub fn from_row_column(row_ordinal: usize, column: usize) -> Option<Self> {
        if row_ordinal >= PLATE_ROWS || column == 0 || column > PLATE_COLUMNS {
            return None;
        }

        Some(Well((column - 1) * PLATE_ROWS + row_ordinal))
    }

    /// Parses a well name, falling back to A1 for anything malformed.
    #[must_use]
    pub fn parse_or_a1(name: &str) -> Self {
        parse_well(name).unwrap_or(Well::A1)
    }

    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }

    #[must_use]
    pub fn row_ordinal(self) -> usize {
        self.0 % PLATE_ROWS
    }

    #[must_use]
    pub fn row_letter(self) -> char {
        ROW_LETTERS[self.row_ordinal()]
    }

    #[must_use]
    pub fn column(self) -> usize {
        self.0 / PLATE_ROWS + 1
    }

    /// The well `offset` slots further along the fill order, if still on the plate.
    #[must_use]
    pub fn offset(self, offset: usize) -> Option<Self> {
        self.0.checked_add(offset).and_then(Well::from_index)
    }
}

impl Default for Well {
    fn default() -> Self {
        Well::A1
    }
}

impl fmt::Display for Well {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row_letter(), self.column())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWellError(String);

impl fmt::Display for ParseWellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid well '{}': expected a row A-H followed by a column 1-12",
            self.0
        )
    }
}

impl std::error::Error for ParseWellError {}

impl FromStr for Well {
    type Err = ParseWellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_well(s).ok_or_else(|| ParseWellError(s.to_string()))
    }
}

fn parse_well(name: &str) -> Option<Well> {
    let mut chars = name.trim().chars();
    let letter = chars.next()?.to_ascii_uppercase();
    let row_ordinal = ROW_LETTERS.iter().position(|&c| c == letter)?;

    let digits = chars.as_str();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let column = digits.parse::<usize>().ok()?;
    Well::from_row_column(row_ordinal, column)
}

/// Column-major slot index of a well name. Malformed or off-plate names map to 0 (A1).
#[must_use]
pub fn well_to_index(name: &str) -> usize {
    Well::parse_or_a1(name).index()
}

#[must_use]
pub fn index_to_well(index: usize) -> Option<String> {
    Well::from_index(index).map(|well| well.to_string())
}

/// Every well in fill order: A1..H1, A2..H2, ..., A12..H12.
pub fn all_wells() -> impl Iterator<Item = Well> {
    (0..PLATE_SLOTS).map(Well)
}
