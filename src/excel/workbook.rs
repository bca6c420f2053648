use anyhow::{Context, Result};
use calamine::{Data, Range, Reader, open_workbook_auto};
use std::path::Path;

use crate::excel::converters::{excel_date_to_iso_string, format_number};
use crate::excel::{Cell, CellType, Sheet};

/// Reads every worksheet of an xlsx/xlsm/xlsb/xls/ods file into string tables.
pub fn open_workbook<P: AsRef<Path>>(path: P) -> Result<Vec<Sheet>> {
    let path = path.as_ref();

    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Unable to parse Excel file: {}", path.display()))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let mut sheets = Vec::with_capacity(sheet_names.len());

    for name in &sheet_names {
        let range = workbook
            .worksheet_range(name)
            .with_context(|| format!("Unable to read worksheet: {}", name))?;

        sheets.push(create_sheet_from_range(name, &range));
    }

    if sheets.is_empty() {
        anyhow::bail!("No worksheets found in file: {}", path.display());
    }

    tracing::debug!(
        "Read {} worksheet(s) from {}",
        sheets.len(),
        path.display()
    );

    Ok(sheets)
}

fn create_sheet_from_range(name: &str, range: &Range<Data>) -> Sheet {
    let rows = range
        .rows()
        .map(|row| row.iter().map(convert_cell).collect())
        .collect();

    Sheet::new(name, rows)
}

fn convert_cell(cell: &Data) -> Cell {
    let (value, cell_type) = match cell {
        Data::Empty => (String::new(), CellType::Empty),
        Data::String(s) => {
            if s.trim().is_empty() {
                (s.clone(), CellType::Empty)
            } else {
                (s.clone(), CellType::Text)
            }
        }
        Data::Float(f) => (format_number(*f), CellType::Number),
        Data::Int(i) => (i.to_string(), CellType::Number),
        Data::Bool(b) => (
            if *b { "TRUE" } else { "FALSE" }.to_string(),
            CellType::Boolean,
        ),
        Data::Error(e) => (e.to_string(), CellType::Text),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            match excel_date_to_iso_string(serial) {
                Some(iso) => (iso, CellType::Date),
                None => (format_number(serial), CellType::Number),
            }
        }
        Data::DateTimeIso(s) => (s.clone(), CellType::Date),
        Data::DurationIso(s) => (s.clone(), CellType::Text),
    };

    Cell::new_with_type(value, cell_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_cell_values() {
        assert_eq!(convert_cell(&Data::Float(2.0)).value, "2");
        assert_eq!(convert_cell(&Data::Int(7)).cell_type, CellType::Number);
        assert_eq!(convert_cell(&Data::Bool(true)).value, "TRUE");
        assert_eq!(convert_cell(&Data::Empty).cell_type, CellType::Empty);
        assert!(convert_cell(&Data::String("  ".to_string())).is_blank());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = open_workbook("does/not/exist.xlsx").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.xlsx"));
    }
}
