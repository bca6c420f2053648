//! Reading source workbooks from disk and writing the merged plate back out.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use std::path::{Path, PathBuf};

use plate_merge::excel::{LoadRequest, load_batch, open_workbook};
use plate_merge::export::{
    ExportTable, LAYOUT_SHEET_NAME, build_plate_export, export_json, write_xlsx,
};
use plate_merge::plate::{PLATE_SLOTS, Well};
use plate_merge::session::{Mutation, Session};
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

fn write_source(dir: &Path, name: &str, header: &[&str], rows: &[(&str, f64)]) -> PathBuf {
    let path = dir.join(name);
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet().set_name("Plate").unwrap();

    for (col, title) in header.iter().enumerate() {
        worksheet.write_string(0, col as u16, *title).unwrap();
    }
    for (index, (sample, value)) in rows.iter().enumerate() {
        let row = (index + 1) as u32;
        worksheet.write_string(row, 0, *sample).unwrap();
        worksheet.write_number(row, 1, *value).unwrap();
    }

    workbook.save(&path).unwrap();
    path
}

fn load_session(requests: &[LoadRequest]) -> Session {
    let batch = load_batch(requests);
    assert!(batch.failures.is_empty());

    let mut session = Session::new();
    session.apply(Mutation::AddFiles(batch.files));
    session
}

#[test]
fn test_batch_load_keeps_request_order_and_skips_failures() {
    let dir = TempDir::new().unwrap();
    let first = write_source(dir.path(), "first.xlsx", &["Sample", "OD"], &[("a", 0.1)]);
    let second = write_source(dir.path(), "second.xlsx", &["Sample", "OD"], &[("b", 0.2)]);

    let requests = vec![
        LoadRequest::new(&first),
        LoadRequest::new(dir.path().join("missing.xlsx")),
        LoadRequest {
            path: second,
            start_well: Well::parse_or_a1("A3"),
        },
    ];

    let batch = load_batch(&requests);

    assert_eq!(batch.failures.len(), 1);
    assert!(batch.failures[0].path.ends_with("missing.xlsx"));

    let names: Vec<&str> = batch.files.iter().map(|file| file.name.as_str()).collect();
    assert_eq!(names, vec!["first.xlsx", "second.xlsx"]);
    assert_eq!(batch.files[1].start_well.to_string(), "A3");
    assert_eq!(batch.files[0].sheets[0].name, "Plate");
}

#[test]
fn test_xlsx_export_round_trips_through_reader() {
    let dir = TempDir::new().unwrap();
    let source = write_source(
        dir.path(),
        "samples.xlsx",
        &["Sample", "OD"],
        &[("s1", 0.5), ("s2", 1.25)],
    );

    let session = load_session(&[LoadRequest {
        path: source,
        start_well: Well::parse_or_a1("B1"),
    }]);

    let output = dir.path().join("layout.xlsx");
    write_xlsx(&ExportTable::from_merge(session.result()), &output).unwrap();

    let sheets = open_workbook(&output).unwrap();
    assert_eq!(sheets.len(), 1);
    assert_eq!(sheets[0].name, LAYOUT_SHEET_NAME);

    let rows = &sheets[0].rows;
    assert_eq!(rows.len(), PLATE_SLOTS + 1);

    let header: Vec<&str> = rows[0].iter().map(|cell| cell.value.as_str()).collect();
    assert_eq!(header, vec!["Well Position", "Sample", "OD", "Source File"]);

    let a1: Vec<&str> = rows[1].iter().map(|cell| cell.value.as_str()).collect();
    assert_eq!(a1[0], "A1");
    assert!(a1[1..].iter().all(|value| value.is_empty()));

    let b1: Vec<&str> = rows[2].iter().map(|cell| cell.value.as_str()).collect();
    assert_eq!(b1, vec!["B1", "s1", "0.5", "samples.xlsx"]);

    let c1: Vec<&str> = rows[3].iter().map(|cell| cell.value.as_str()).collect();
    assert_eq!(c1, vec!["C1", "s2", "1.25", "samples.xlsx"]);

    assert_eq!(rows[PLATE_SLOTS][0].value, "H12");
}

#[test]
fn test_json_export_lists_every_well() {
    let dir = TempDir::new().unwrap();
    let source = write_source(dir.path(), "od.xlsx", &["Sample", "OD"], &[("x", 2.0)]);

    let session = load_session(&[LoadRequest::new(source)]);

    let plate = build_plate_export(&session);
    assert_eq!(plate.sheet.as_deref(), Some("Plate"));
    assert_eq!(plate.wells.len(), PLATE_SLOTS);
    assert_eq!(plate.files.len(), 1);
    assert_eq!(plate.files[0].status, "placed");
    assert!(plate.warnings.is_empty());

    let output = dir.path().join("layout.json");
    export_json(&session, &output).unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    let first = &written["wells"][0];
    assert_eq!(first["Well Position"], "A1");
    assert_eq!(first["Sample"], "x");
    assert_eq!(first["OD"], 2);
    assert_eq!(first["Source File"], "od.xlsx");
    assert_eq!(written["wells"][1]["Sample"], serde_json::Value::Null);
}
