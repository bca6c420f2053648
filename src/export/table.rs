use crate::excel::Cell;
use crate::merge::MergeResult;
use crate::plate::{Well, all_wells};

#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub well: Well,
    pub cells: Vec<Cell>,
    /// Display name of the file that filled this well; empty for unplaced wells.
    pub source: String,
}

impl ExportRow {
    fn empty(well: Well, width: usize) -> Self {
        Self {
            well,
            cells: vec![Cell::empty(); width],
            source: String::new(),
        }
    }

    /// The row as text: well name, data cells, source file.
    pub fn values(&self) -> Vec<String> {
        let mut values = Vec::with_capacity(self.cells.len() + 2);
        values.push(self.well.to_string());
        values.extend(self.cells.iter().map(|cell| cell.value.clone()));
        values.push(self.source.clone());
        values
    }
}

/// The export table: a header row and one row per well in fill order.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    pub header: Vec<String>,
    pub rows: Vec<ExportRow>,
}

impl ExportTable {
    pub fn from_merge(result: &MergeResult) -> Self {
        let mut rows: Vec<ExportRow> = all_wells()
            .map(|well| ExportRow::empty(well, result.universal_width))
            .collect();

        for record in &result.records {
            if let Some(row) = rows.get_mut(record.well.index()) {
                row.cells = record
                    .cells
                    .iter()
                    .take(result.universal_width)
                    .cloned()
                    .collect();
                row.cells.resize_with(result.universal_width, Cell::empty);
                row.source = record.file_name.clone();
            }
        }

        Self {
            header: result.export_header(),
            rows,
        }
    }

    pub fn filled_rows(&self) -> usize {
        self.rows.iter().filter(|row| !row.source.is_empty()).count()
    }
}
