mod well;

pub use well::{
    PLATE_COLUMNS, PLATE_ROWS, PLATE_SLOTS, ParseWellError, Well, all_wells, index_to_well,
    well_to_index,
};
