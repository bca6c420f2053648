use serde::Serialize;
use uuid::Uuid;

use crate::plate::{PLATE_COLUMNS, PLATE_ROWS, PLATE_SLOTS, Well};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PreviewCell {
    pub value: String,
    pub source_file_id: Option<Uuid>,
}

impl PreviewCell {
    #[must_use]
    pub fn is_filled(&self) -> bool {
        !self.value.trim().is_empty()
    }
}

/// 96 preview cells indexed by slot (column-major).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewGrid {
    cells: Vec<PreviewCell>,
}

impl PreviewGrid {
    pub fn new() -> Self {
        Self {
            cells: vec![PreviewCell::default(); PLATE_SLOTS],
        }
    }

    pub fn get(&self, well: Well) -> &PreviewCell {
        &self.cells[well.index()]
    }

    /// Writes a slot; slots past the plate are ignored.
    pub fn set(&mut self, index: usize, cell: PreviewCell) {
        if let Some(slot) = self.cells.get_mut(index) {
            *slot = cell;
        }
    }

    pub fn slots(&self) -> &[PreviewCell] {
        &self.cells
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_filled()).count()
    }

    /// The plate as 8 rows (A..H) of 12 cells (1..12), for on-screen display.
    pub fn rows(&self) -> Vec<Vec<&PreviewCell>> {
        (0..PLATE_ROWS)
            .map(|row| {
                (1..=PLATE_COLUMNS)
                    .filter_map(|column| Well::from_row_column(row, column))
                    .map(|well| self.get(well))
                    .collect()
            })
            .collect()
    }
}

impl Default for PreviewGrid {
    fn default() -> Self {
        Self::new()
    }
}
