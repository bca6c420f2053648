pub mod app;
pub mod commands;
pub mod excel;
pub mod export;
pub mod merge;
pub mod placement;
pub mod plate;
pub mod session;
pub mod ui;
pub mod utils;
