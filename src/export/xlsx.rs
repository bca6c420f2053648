use anyhow::{Context, Result};
use chrono::Local;
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook};
use std::path::{Path, PathBuf};

use crate::excel::CellType;
use crate::export::ExportTable;

pub const LAYOUT_SHEET_NAME: &str = "Plate Layout";

/// `plate_layout_<timestamp>.xlsx` inside `dir`.
pub fn default_output_path(dir: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    dir.join(format!("plate_layout_{}.xlsx", timestamp))
}

pub fn write_xlsx(table: &ExportTable, path: &Path) -> Result<()> {
    let mut workbook = XlsxWorkbook::new();

    let header_format = Format::new().set_bold();
    let number_format = Format::new().set_num_format("General");

    let worksheet = workbook.add_worksheet().set_name(LAYOUT_SHEET_NAME)?;

    for (col, name) in table.header.iter().enumerate() {
        let col_idx = col as u16;
        worksheet.set_column_width(col_idx, 15)?;
        worksheet.write_string_with_format(0, col_idx, name, &header_format)?;
    }

    let source_col = (table.header.len() - 1) as u16;

    for (index, row) in table.rows.iter().enumerate() {
        let row_idx = (index + 1) as u32;

        worksheet.write_string(row_idx, 0, row.well.to_string())?;

        for (col, cell) in row.cells.iter().enumerate() {
            // Skip empty cells
            if cell.value.is_empty() {
                continue;
            }

            let col_idx = (col + 1) as u16;

            match cell.cell_type {
                CellType::Number => {
                    if let Ok(num) = cell.value.parse::<f64>() {
                        worksheet.write_number_with_format(
                            row_idx,
                            col_idx,
                            num,
                            &number_format,
                        )?;
                    } else {
                        worksheet.write_string(row_idx, col_idx, &cell.value)?;
                    }
                }
                CellType::Boolean => {
                    if let Ok(b) = cell.value.to_lowercase().parse::<bool>() {
                        worksheet.write_boolean(row_idx, col_idx, b)?;
                    } else {
                        worksheet.write_string(row_idx, col_idx, &cell.value)?;
                    }
                }
                CellType::Text | CellType::Date | CellType::Empty => {
                    worksheet.write_string(row_idx, col_idx, &cell.value)?;
                }
            }
        }

        if !row.source.is_empty() {
            worksheet.write_string(row_idx, source_col, &row.source)?;
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(
        "Wrote {} filled well(s) to {}",
        table.filled_rows(),
        path.display()
    );

    Ok(())
}
