mod batch;
mod cell;
mod converters;
mod sheet;
mod workbook;

pub use batch::{BatchLoad, LoadFailure, LoadRequest, load_batch};
pub use cell::{Cell, CellType};
pub use sheet::Sheet;
pub use workbook::open_workbook;
