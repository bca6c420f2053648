mod engine;
mod preview;
mod types;

pub use engine::merge;
pub use preview::{PreviewCell, PreviewGrid};
pub use types::{
    ExportRecord, MergeResult, OverflowWarning, PreviewDiagnostic, SOURCE_FILE_HEADER,
    WELL_POSITION_HEADER,
};
