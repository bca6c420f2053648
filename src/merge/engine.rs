use crate::excel::Cell;
use crate::merge::{
    ExportRecord, MergeResult, OverflowWarning, PreviewCell, PreviewDiagnostic, PreviewGrid,
};
use crate::placement::PlacementOutcome;
use crate::plate::PLATE_SLOTS;
use crate::session::PlateFile;
use crate::utils::display_name;

/// Builds the export records and the plate preview for the active sheet.
///
/// `outcomes` are the resolved placements, one per file and in the same
/// order. Unplaceable files still widen the table but their rows are left
/// out of both the export records and the preview.
///
/// The header always comes from the first file in the list. Headers of
/// later files are ignored even when they disagree.
pub fn merge(
    files: &[PlateFile],
    outcomes: &[PlacementOutcome],
    sheet: usize,
    preview_column: usize,
) -> MergeResult {
    let universal_width = files
        .iter()
        .map(|file| file.header(sheet).len())
        .max()
        .unwrap_or(0);

    let header: Vec<String> = match files.first() {
        Some(file) => fit_row(file.header(sheet), universal_width)
            .into_iter()
            .map(|cell| cell.value)
            .collect(),
        None => Vec::new(),
    };

    let column_names = header
        .iter()
        .enumerate()
        .map(|(index, name)| display_name(name, index))
        .collect();

    let placed: Vec<(&PlateFile, &PlacementOutcome)> = files
        .iter()
        .zip(outcomes)
        .filter(|(_, outcome)| outcome.is_placed())
        .collect();

    let records = build_records(&placed, sheet, universal_width);
    let preview = build_preview(&placed, sheet, preview_column);

    let diagnostic = if !files.is_empty() && preview.filled_count() == 0 {
        if preview_column >= universal_width {
            Some(PreviewDiagnostic::OutOfRange {
                column: preview_column,
                max_width: universal_width,
            })
        } else {
            Some(PreviewDiagnostic::NoData {
                column: preview_column,
            })
        }
    } else {
        None
    };

    let overflow = detect_overflow(files, sheet);

    tracing::debug!(
        "Merged {} file(s): width {}, {} record(s), {} filled well(s)",
        files.len(),
        universal_width,
        records.len(),
        preview.filled_count()
    );

    MergeResult {
        universal_width,
        header,
        column_names,
        records,
        preview,
        diagnostic,
        overflow,
    }
}

/// Pads or truncates a row to exactly `width` cells.
fn fit_row(row: &[Cell], width: usize) -> Vec<Cell> {
    let mut fitted: Vec<Cell> = row.iter().take(width).cloned().collect();
    fitted.resize_with(width, Cell::empty);
    fitted
}

fn build_records(
    placed: &[(&PlateFile, &PlacementOutcome)],
    sheet: usize,
    width: usize,
) -> Vec<ExportRecord> {
    let mut records = Vec::new();

    for (file, outcome) in placed {
        for (sequence, row) in file.kept_rows(sheet).enumerate() {
            let Some(well) = outcome.start.offset(sequence) else {
                break;
            };

            records.push(ExportRecord {
                file_id: file.id,
                file_name: file.name.clone(),
                sequence,
                well,
                cells: fit_row(row, width),
            });
        }
    }

    records
}

fn build_preview(
    placed: &[(&PlateFile, &PlacementOutcome)],
    sheet: usize,
    column: usize,
) -> PreviewGrid {
    let mut preview = PreviewGrid::new();

    for (file, outcome) in placed {
        let start = outcome.start.index();

        for (offset, row) in file.kept_rows(sheet).enumerate() {
            let value = row
                .get(column)
                .map(|cell| cell.value.clone())
                .unwrap_or_default();

            preview.set(
                start + offset,
                PreviewCell {
                    value,
                    source_file_id: Some(file.id),
                },
            );
        }
    }

    preview
}

fn detect_overflow(files: &[PlateFile], sheet: usize) -> Option<OverflowWarning> {
    let counts: Vec<(&PlateFile, usize)> = files
        .iter()
        .map(|file| (file, file.row_count(sheet)))
        .collect();

    let total_rows: usize = counts.iter().map(|(_, rows)| rows).sum();
    if total_rows <= PLATE_SLOTS {
        return None;
    }

    let truncated_files: Vec<(String, usize)> = counts
        .iter()
        .filter(|(_, rows)| *rows > PLATE_SLOTS)
        .map(|(file, rows)| (file.name.clone(), *rows))
        .collect();

    Some(OverflowWarning {
        total_rows,
        truncated_files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::excel::Sheet;
    use crate::placement::{PlacementBlock, resolve_placements};
    use crate::plate::Well;

    fn file(name: &str, rows: &[Vec<&str>]) -> PlateFile {
        PlateFile::new(name, vec![Sheet::from_values("Sheet1", rows)])
    }

    fn run(files: &[PlateFile], column: usize) -> MergeResult {
        let blocks: Vec<PlacementBlock> = files.iter().map(|f| f.block(0)).collect();
        merge(files, &resolve_placements(&blocks), 0, column)
    }

    #[test]
    fn test_universal_width_pads_narrow_files() {
        let files = [
            file("a.xlsx", &[vec!["S", "B", "C", "D", "E"], vec!["a1", "1", "2", "3", "4"]]),
            file("b.xlsx", &[vec!["S", "B", "C"], vec!["b1", "5", "6"]])
                .with_start_well(Well::parse_or_a1("A2")),
        ];

        let result = run(&files, 0);

        assert_eq!(result.universal_width, 5);
        let b_row = &result.records[1];
        assert_eq!(b_row.cells.len(), 5);
        assert_eq!(b_row.cells[3], Cell::empty());
        assert_eq!(b_row.cells[4], Cell::empty());
        assert_eq!(b_row.well.to_string(), "A2");
    }

    #[test]
    fn test_header_comes_from_first_file() {
        let files = [
            file("a.xlsx", &[vec!["Sample", ""], vec!["x", "1"]]),
            file("b.xlsx", &[vec!["Other", "OD", "Extra"], vec!["y", "2", "3"]]),
        ];

        let result = run(&files, 0);

        assert_eq!(result.header, vec!["Sample", "", ""]);
        assert_eq!(result.column_names, vec!["Sample", "B", "C"]);
        assert_eq!(
            result.export_header(),
            vec!["Well Position", "Sample", "", "", "Source File"]
        );
    }

    #[test]
    fn test_blank_rows_are_filtered_before_placement() {
        let files = [file(
            "a.xlsx",
            &[vec!["S", "V"], vec!["s1", "1"], vec!["", ""], vec!["s2", "2"]],
        )];

        let result = run(&files, 1);

        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[1].sequence, 1);
        assert_eq!(result.records[1].well.to_string(), "B1");
        assert_eq!(result.preview.get(Well::parse_or_a1("B1")).value, "2");
    }

    #[test]
    fn test_preview_uses_selected_column_and_empty_for_short_rows() {
        let files = [file("a.xlsx", &[vec!["S", "V", "W"], vec!["s1", "1"], vec!["s2", "2", "z"]])];

        let result = run(&files, 2);

        assert_eq!(result.preview.get(Well::A1).value, "");
        assert_eq!(result.preview.get(Well::A1).source_file_id, Some(files[0].id));
        assert_eq!(result.preview.get(Well::parse_or_a1("B1")).value, "z");
        assert_eq!(result.diagnostic, None);
    }

    #[test]
    fn test_out_of_range_diagnostic() {
        let files = [
            file("a.xlsx", &[vec!["A", "B", "C", "D"], vec!["1", "2", "3", "4"]]),
            file("b.xlsx", &[vec!["A", "B"], vec!["1", "2"]]),
        ];

        let result = run(&files, 20);

        assert_eq!(
            result.diagnostic,
            Some(PreviewDiagnostic::OutOfRange {
                column: 20,
                max_width: 4
            })
        );
        assert_eq!(result.records.len(), 2);
    }

    #[test]
    fn test_no_data_diagnostic() {
        let files = [file("a.xlsx", &[vec!["S", "V"], vec!["s1", ""], vec!["s2", " "]])];

        let result = run(&files, 1);

        assert_eq!(result.diagnostic, Some(PreviewDiagnostic::NoData { column: 1 }));
    }

    #[test]
    fn test_no_files_means_no_diagnostic() {
        let result = merge(&[], &[], 0, 3);

        assert_eq!(result.diagnostic, None);
        assert_eq!(result.universal_width, 0);
        assert!(result.export_header().len() == 2);
    }

    #[test]
    fn test_overflow_warning_and_prefix_cap() {
        let mut rows = vec![vec!["S".to_string()]];
        rows.extend((0..100).map(|i| vec![format!("s{i}")]));
        let big = PlateFile::new("big.xlsx", vec![Sheet::from_values("Sheet1", &rows)]);

        let result = run(std::slice::from_ref(&big), 0);

        assert_eq!(result.records.len(), PLATE_SLOTS);
        assert_eq!(result.records[95].cells[0].value, "s95");
        let overflow = result.overflow.unwrap();
        assert_eq!(overflow.total_rows, 100);
        assert_eq!(overflow.truncated_files, vec![("big.xlsx".to_string(), 100)]);
    }

    #[test]
    fn test_unplaceable_file_places_nothing_but_widens() {
        let mut rows = vec![vec!["S".to_string()]];
        rows.extend((0..90).map(|i| vec![format!("s{i}")]));
        let first = PlateFile::new("first.xlsx", vec![Sheet::from_values("Sheet1", &rows)]);
        let second = file(
            "second.xlsx",
            &[
                vec!["S", "X", "Y"],
                vec!["a"], vec!["b"], vec!["c"], vec!["d"], vec!["e"],
                vec!["f"], vec!["g"], vec!["h"], vec!["i"], vec!["j"],
            ],
        );

        let result = run(&[first, second], 0);

        assert_eq!(result.universal_width, 3);
        assert_eq!(result.records.len(), 90);
        assert_eq!(result.preview.get(Well::A1).value, "s0");
    }

    #[test]
    fn test_cells_past_the_header_are_dropped() {
        let files = [file("ragged.xlsx", &[vec!["S"], vec!["a", "b", "c"]])];

        let result = run(&files, 0);

        assert_eq!(result.universal_width, 1);
        assert_eq!(result.records[0].cells.len(), 1);
        assert_eq!(result.records[0].cells[0].value, "a");
    }
}
