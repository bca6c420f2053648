use std::collections::BTreeSet;
use std::ops::Range;

use crate::plate::{PLATE_SLOTS, Well};

/// A contiguous run of slots claimed by one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementBlock {
    pub start: Well,
    pub length: usize,
}

impl PlacementBlock {
    #[must_use]
    pub fn new(start: Well, length: usize) -> Self {
        Self { start, length }
    }

    /// Slots covered by the block, clipped to the plate.
    #[must_use]
    pub fn slots(&self) -> Range<usize> {
        let start = self.start.index();
        start..(start + self.length).min(PLATE_SLOTS)
    }

    #[must_use]
    pub fn fits_plate(&self) -> bool {
        self.start.index() + self.length <= PLATE_SLOTS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementStatus {
    /// The requested start well was free.
    Requested,
    /// The requested well collided and the block was moved to the first free window.
    Corrected { requested: Well },
    /// No free window of the block's length exists; the requested well is kept.
    Unplaceable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementOutcome {
    pub start: Well,
    pub length: usize,
    pub status: PlacementStatus,
}

impl PlacementOutcome {
    #[must_use]
    pub fn is_placed(&self) -> bool {
        !matches!(self.status, PlacementStatus::Unplaceable)
    }

    #[must_use]
    pub fn block(&self) -> PlacementBlock {
        PlacementBlock::new(self.start, self.length)
    }
}

/// Union of the slots claimed by the blocks before `upto`.
#[must_use]
pub fn occupied_slots(blocks: &[PlacementBlock], upto: usize) -> BTreeSet<usize> {
    blocks
        .iter()
        .take(upto)
        .flat_map(PlacementBlock::slots)
        .collect()
}

/// True when the block runs off the end of the plate or touches an occupied slot.
#[must_use]
pub fn conflicts(occupied: &BTreeSet<usize>, block: &PlacementBlock) -> bool {
    !block.fits_plate() || block.slots().any(|slot| occupied.contains(&slot))
}

/// Finds the lowest start well whose next `length` slots are all free.
///
/// When a candidate window hits an occupied slot the search resumes just
/// past that slot, since no window containing it can succeed.
#[must_use]
pub fn first_fit(occupied: &BTreeSet<usize>, length: usize) -> Option<Well> {
    let mut start = 0;

    while start + length <= PLATE_SLOTS {
        match (start..start + length).find(|slot| occupied.contains(slot)) {
            Some(taken) => start = taken + 1,
            None => return Well::from_index(start),
        }
    }

    None
}

/// Checks the block at `index` against every block before it and moves it
/// to the first free window when it collides or overflows the plate.
///
/// Returns `None` when `index` is out of bounds.
pub fn validate_and_correct(blocks: &mut [PlacementBlock], index: usize) -> Option<PlacementStatus> {
    let occupied = occupied_slots(blocks, index);
    let block = blocks.get_mut(index)?;

    if !conflicts(&occupied, block) {
        return Some(PlacementStatus::Requested);
    }

    match first_fit(&occupied, block.length) {
        Some(found) => {
            let requested = block.start;
            block.start = found;
            Some(PlacementStatus::Corrected { requested })
        }
        None => Some(PlacementStatus::Unplaceable),
    }
}

/// Resolves every block in list order without touching the input.
///
/// A block only ever sees the blocks placed before it. Unplaceable blocks
/// keep their requested well and still claim the slots it covers, the same
/// way [`occupied_slots`] counts them, so later blocks resolve identically
/// through either form.
#[must_use]
pub fn resolve_placements(blocks: &[PlacementBlock]) -> Vec<PlacementOutcome> {
    let mut occupied = BTreeSet::new();
    let mut outcomes = Vec::with_capacity(blocks.len());

    for (position, block) in blocks.iter().enumerate() {
        let outcome = if !conflicts(&occupied, block) {
            PlacementOutcome {
                start: block.start,
                length: block.length,
                status: PlacementStatus::Requested,
            }
        } else if let Some(found) = first_fit(&occupied, block.length) {
            tracing::debug!(
                "Block {} moved from {} to {} ({} slots)",
                position,
                block.start,
                found,
                block.length
            );
            PlacementOutcome {
                start: found,
                length: block.length,
                status: PlacementStatus::Corrected {
                    requested: block.start,
                },
            }
        } else {
            tracing::warn!(
                "Block {} needs {} free slots and none are left; keeping {}",
                position,
                block.length,
                block.start
            );
            PlacementOutcome {
                start: block.start,
                length: block.length,
                status: PlacementStatus::Unplaceable,
            }
        };

        occupied.extend(outcome.block().slots());

        outcomes.push(outcome);
    }

    outcomes
}
