mod navigation;
mod state;
mod ui;

pub use state::*;
