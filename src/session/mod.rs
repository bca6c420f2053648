mod file;
mod state;

pub use file::PlateFile;
pub use state::{Correction, Mutation, Session, UpdateReport};
