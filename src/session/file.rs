use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::excel::{Cell, Sheet};
use crate::placement::PlacementBlock;
use crate::plate::{PLATE_SLOTS, Well};

/// One ingested spreadsheet and where the user wants it on the plate.
///
/// Every sheet is kept so switching the active sheet never needs a re-read.
#[derive(Debug, Clone)]
pub struct PlateFile {
    pub id: Uuid,
    pub name: String,
    pub path: PathBuf,
    pub sheets: Vec<Sheet>,
    pub start_well: Well,
}

impl PlateFile {
    pub fn new(name: impl Into<String>, sheets: Vec<Sheet>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            path: PathBuf::new(),
            sheets,
            start_well: Well::A1,
        }
    }

    /// Named after the file name component of `path`.
    pub fn from_path(path: &Path, sheets: Vec<Sheet>) -> Self {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self {
            path: path.to_path_buf(),
            ..Self::new(name, sheets)
        }
    }

    #[must_use]
    pub fn with_start_well(mut self, well: Well) -> Self {
        self.start_well = well;
        self
    }

    pub fn sheet(&self, sheet_index: usize) -> Option<&Sheet> {
        self.sheets.get(sheet_index)
    }

    /// Header row of the given sheet; empty when the file has no such sheet.
    pub fn header(&self, sheet_index: usize) -> &[Cell] {
        self.sheet(sheet_index).map(|sheet| sheet.header()).unwrap_or_default()
    }

    /// Non-empty data rows, uncapped.
    pub fn row_count(&self, sheet_index: usize) -> usize {
        self.sheet(sheet_index)
            .map_or(0, |sheet| sheet.data_rows().count())
    }

    pub fn capped_length(&self, sheet_index: usize) -> usize {
        self.row_count(sheet_index).min(PLATE_SLOTS)
    }

    /// The rows that actually land on the plate: the first `capped_length` non-empty rows.
    pub fn kept_rows(&self, sheet_index: usize) -> impl Iterator<Item = &[Cell]> {
        self.sheet(sheet_index)
            .into_iter()
            .flat_map(|sheet| sheet.data_rows())
            .take(PLATE_SLOTS)
    }

    pub fn block(&self, sheet_index: usize) -> PlacementBlock {
        PlacementBlock::new(self.start_well, self.capped_length(sheet_index))
    }
}
