use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub value: String,
    pub cell_type: CellType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    Text,
    Number,
    Date,
    Boolean,
    Empty,
}

impl Cell {
    /// Builds a cell from raw text, guessing its type the way a spreadsheet would show it.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cell_type = if value.trim().is_empty() {
            CellType::Empty
        } else if value.parse::<f64>().is_ok() {
            CellType::Number
        } else if value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false") {
            CellType::Boolean
        } else {
            CellType::Text
        };

        Self::new_with_type(value, cell_type)
    }

    pub fn new_with_type(value: String, cell_type: CellType) -> Self {
        Self { value, cell_type }
    }

    pub fn empty() -> Self {
        Self {
            value: String::new(),
            cell_type: CellType::Empty,
        }
    }

    /// Empty or whitespace-only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::empty()
    }
}
