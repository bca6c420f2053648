mod helpers;

pub use helpers::{
    column_letter, column_letter_to_index, display_name, parse_column, truncate_to_width,
};
