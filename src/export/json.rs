use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Value, json};

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::excel::{Cell, CellType};
use crate::export::ExportTable;
use crate::merge::{SOURCE_FILE_HEADER, WELL_POSITION_HEADER};
use crate::placement::PlacementStatus;
use crate::session::Session;

pub type OrderedRow = IndexMap<String, Value>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSummary {
    pub name: String,
    pub start_well: String,
    pub rows: usize,
    pub placed_rows: usize,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateExport {
    pub sheet: Option<String>,
    pub files: Vec<FileSummary>,
    pub warnings: Vec<String>,
    pub wells: Vec<OrderedRow>,
}

pub fn serialize_to_json<T: Serialize>(data: &T) -> Result<String> {
    serde_json::to_string_pretty(data).context("Failed to serialize data to JSON")
}

pub fn write_json_to_file<T: Serialize>(data: &T, path: &Path) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))?;

    let json_string = serialize_to_json(data)?;

    file.write_all(json_string.as_bytes())
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    Ok(())
}

// Numbers and booleans keep their JSON type, blanks become null
fn process_cell_value(cell: &Cell) -> Value {
    if cell.is_blank() {
        return Value::Null;
    }

    match cell.cell_type {
        CellType::Number => match cell.value.parse::<f64>() {
            Ok(num) if num.fract() == 0.0 && num.abs() < 1e15 => json!(num as i64),
            Ok(num) => json!(num),
            Err(_) => json!(cell.value),
        },
        CellType::Boolean => match cell.value.to_lowercase().as_str() {
            "true" => json!(true),
            "false" => json!(false),
            _ => json!(cell.value),
        },
        _ => json!(cell.value),
    }
}

/// Object keys for the data columns. Blank headers use the column letter and
/// repeated names get the letter appended, repeatedly if needed, so every key
/// is unique and no column is lost.
fn column_keys(column_names: &[String]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::with_capacity(column_names.len());
    let reserved = |keys: &[String], key: &str| {
        keys.iter().any(|k| k == key) || key == WELL_POSITION_HEADER || key == SOURCE_FILE_HEADER
    };

    for (index, name) in column_names.iter().enumerate() {
        let mut key = name.clone();

        if reserved(&keys, &key) {
            let letter = crate::utils::column_letter(index);
            let later = &column_names[index + 1..];

            key = format!("{} ({})", name, letter);
            while reserved(&keys, &key) || later.contains(&key) {
                key = format!("{} ({})", key, letter);
            }
        }

        keys.push(key);
    }

    keys
}

pub fn table_to_rows(table: &ExportTable, column_names: &[String]) -> Vec<OrderedRow> {
    let keys = column_keys(column_names);

    table
        .rows
        .iter()
        .map(|row| {
            let mut obj = IndexMap::with_capacity(keys.len() + 2);
            obj.insert(WELL_POSITION_HEADER.to_string(), json!(row.well.to_string()));

            for (key, cell) in keys.iter().zip(&row.cells) {
                obj.insert(key.clone(), process_cell_value(cell));
            }

            let source = if row.source.is_empty() {
                Value::Null
            } else {
                json!(row.source)
            };
            obj.insert(SOURCE_FILE_HEADER.to_string(), source);

            obj
        })
        .collect()
}

pub fn build_plate_export(session: &Session) -> PlateExport {
    let result = session.result();
    let table = ExportTable::from_merge(result);
    let sheet = session.active_sheet();

    let files = session
        .files()
        .iter()
        .zip(session.outcomes())
        .map(|(file, outcome)| {
            let placed_rows = if outcome.is_placed() { outcome.length } else { 0 };
            FileSummary {
                name: file.name.clone(),
                start_well: outcome.start.to_string(),
                rows: file.row_count(sheet),
                placed_rows,
                status: match outcome.status {
                    PlacementStatus::Requested => "placed",
                    PlacementStatus::Corrected { .. } => "moved",
                    PlacementStatus::Unplaceable => "unplaceable",
                },
            }
        })
        .collect();

    let mut warnings = Vec::new();
    if let Some(overflow) = &result.overflow {
        warnings.push(overflow.to_string());
    }
    if let Some(diagnostic) = &result.diagnostic {
        warnings.push(diagnostic.to_string());
    }

    PlateExport {
        sheet: session.active_sheet_name().map(str::to_string),
        files,
        warnings,
        wells: table_to_rows(&table, &result.column_names),
    }
}

pub fn export_json(session: &Session, path: &Path) -> Result<()> {
    write_json_to_file(&build_plate_export(session), path)
}
