use uuid::Uuid;

use crate::excel::Cell;
use crate::merge::PreviewGrid;
use crate::plate::Well;

pub const WELL_POSITION_HEADER: &str = "Well Position";
pub const SOURCE_FILE_HEADER: &str = "Source File";

/// One kept data row of one file, padded to the universal width.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRecord {
    pub file_id: Uuid,
    pub file_name: String,
    /// Position among the file's kept rows, starting at 0.
    pub sequence: usize,
    pub well: Well,
    pub cells: Vec<Cell>,
}

/// Why the preview came out empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewDiagnostic {
    /// The selected column is past every file's header width.
    OutOfRange { column: usize, max_width: usize },
    /// The column exists but every kept value in it is blank.
    NoData { column: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverflowWarning {
    /// Non-empty data rows across all files, before capping.
    pub total_rows: usize,
    /// Files with more than 96 rows and their uncapped row counts.
    pub truncated_files: Vec<(String, usize)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergeResult {
    pub universal_width: usize,
    /// The first file's header row, padded to the universal width.
    pub header: Vec<String>,
    /// Display names for each data column, letters where the header is blank.
    pub column_names: Vec<String>,
    pub records: Vec<ExportRecord>,
    pub preview: PreviewGrid,
    pub diagnostic: Option<PreviewDiagnostic>,
    pub overflow: Option<OverflowWarning>,
}

impl MergeResult {
    /// `["Well Position", <header...>, "Source File"]`
    pub fn export_header(&self) -> Vec<String> {
        let mut header = Vec::with_capacity(self.header.len() + 2);
        header.push(WELL_POSITION_HEADER.to_string());
        header.extend(self.header.iter().cloned());
        header.push(SOURCE_FILE_HEADER.to_string());
        header
    }
}

impl Default for MergeResult {
    fn default() -> Self {
        Self {
            universal_width: 0,
            header: Vec::new(),
            column_names: Vec::new(),
            records: Vec::new(),
            preview: PreviewGrid::new(),
            diagnostic: None,
            overflow: None,
        }
    }
}

impl std::fmt::Display for PreviewDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreviewDiagnostic::OutOfRange { column, max_width } => write!(
                f,
                "Column {} is out of range: the widest file has {} column(s)",
                column + 1,
                max_width
            ),
            PreviewDiagnostic::NoData { column } => {
                write!(f, "Column {} has no data in any file", column + 1)
            }
        }
    }
}

impl std::fmt::Display for OverflowWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} samples loaded but the plate holds 96; only the first 96 rows of each file are placed",
            self.total_rows
        )?;

        for (name, rows) in &self.truncated_files {
            write!(f, "; {} has {} rows", name, rows)?;
        }

        Ok(())
    }
}
