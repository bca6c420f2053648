mod json;
mod table;
mod xlsx;

pub use json::{
    FileSummary, PlateExport, build_plate_export, export_json, serialize_to_json,
    table_to_rows,
};
pub use table::{ExportRow, ExportTable};
pub use xlsx::{LAYOUT_SHEET_NAME, default_output_path, write_xlsx};
