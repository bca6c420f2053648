mod resolver;

pub use resolver::{
    PlacementBlock, PlacementOutcome, PlacementStatus, conflicts, first_fit, occupied_slots,
    resolve_placements, validate_and_correct,
};
