use crate::excel::Cell;

/// One worksheet as an ordered list of rows. Row 0 is the header row.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Convenience constructor for already-textual data.
    pub fn from_values<S: AsRef<str>>(name: impl Into<String>, rows: &[Vec<S>]) -> Self {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|value| Cell::new(value.as_ref())).collect())
            .collect();

        Self::new(name, rows)
    }

    pub fn header(&self) -> &[Cell] {
        self.rows.first().map(Vec::as_slice).unwrap_or_default()
    }

    /// Data rows below the header that have at least one non-blank cell, in source order.
    pub fn data_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows
            .iter()
            .skip(1)
            .filter(|row| !row.iter().all(Cell::is_blank))
            .map(Vec::as_slice)
    }
}
