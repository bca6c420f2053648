//! Well coordinates, column letters and collision resolution through the public API.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use plate_merge::placement::{PlacementBlock, PlacementStatus, resolve_placements};
use plate_merge::plate::{PLATE_SLOTS, Well, all_wells, index_to_well, well_to_index};
use plate_merge::utils::{column_letter, column_letter_to_index};
use test_case::test_case;

fn well(name: &str) -> Well {
    name.parse().unwrap()
}

#[test_case("A1", 0)]
#[test_case("H1", 7)]
#[test_case("A2", 8)]
#[test_case("C2", 10)]
#[test_case("C4", 26)]
#[test_case("A12", 88)]
#[test_case("H12", 95)]
fn test_well_index(name: &str, index: usize) {
    assert_eq!(well_to_index(name), index);
    assert_eq!(index_to_well(index).as_deref(), Some(name));
}

#[test_case("" ; "empty")]
#[test_case("Z9" ; "bad row")]
#[test_case("A13" ; "past last column")]
#[test_case("A0" ; "column zero")]
#[test_case("B" ; "no column")]
#[test_case("C-1" ; "negative column")]
fn test_malformed_well_falls_back_to_a1(name: &str) {
    assert_eq!(well_to_index(name), 0);
    assert!(name.parse::<Well>().is_err());
}

#[test]
fn test_every_well_round_trips() {
    for (index, well) in all_wells().enumerate() {
        assert_eq!(well.index(), index);
        assert_eq!(well_to_index(&well.to_string()), index);
    }
    assert_eq!(index_to_well(PLATE_SLOTS), None);
}

#[test_case(0, "A")]
#[test_case(25, "Z")]
#[test_case(26, "AA")]
#[test_case(51, "AZ")]
#[test_case(701, "ZZ")]
#[test_case(702, "AAA")]
fn test_column_letters(index: usize, letters: &str) {
    assert_eq!(column_letter(index), letters);
    assert_eq!(column_letter_to_index(letters), Some(index));
}

#[test]
fn test_colliding_block_moves_to_first_free_run() {
    let blocks = [
        PlacementBlock::new(Well::A1, 10),
        PlacementBlock::new(Well::A1, 5),
    ];

    let outcomes = resolve_placements(&blocks);

    assert_eq!(outcomes[0].status, PlacementStatus::Requested);
    assert_eq!(outcomes[1].start.index(), 10);
    assert_eq!(outcomes[1].start.to_string(), "C2");
    assert_eq!(
        outcomes[1].status,
        PlacementStatus::Corrected {
            requested: Well::A1
        }
    );
}

#[test]
fn test_block_without_room_is_unplaceable() {
    let blocks = [
        PlacementBlock::new(Well::A1, 90),
        PlacementBlock::new(Well::A1, 10),
    ];

    let outcomes = resolve_placements(&blocks);

    assert!(outcomes[0].is_placed());
    assert_eq!(outcomes[1].status, PlacementStatus::Unplaceable);
    assert!(!outcomes[1].is_placed());
}

#[test]
fn test_block_running_off_the_plate_is_corrected() {
    // 10 rows from H12 would need slots 95..105
    let blocks = [PlacementBlock::new(well("H12"), 10)];

    let outcomes = resolve_placements(&blocks);

    assert_eq!(outcomes[0].start, Well::A1);
    assert!(matches!(outcomes[0].status, PlacementStatus::Corrected { .. }));
}

#[test]
fn test_non_overlapping_blocks_keep_their_wells() {
    let blocks = [
        PlacementBlock::new(Well::A1, 8),
        PlacementBlock::new(well("A2"), 8),
        PlacementBlock::new(well("A12"), 8),
    ];

    let outcomes = resolve_placements(&blocks);

    assert!(
        outcomes
            .iter()
            .all(|outcome| outcome.status == PlacementStatus::Requested)
    );
    assert_eq!(outcomes[2].start, well("A12"));
}

#[test]
fn test_resolution_is_idempotent() {
    let blocks = [
        PlacementBlock::new(Well::A1, 30),
        PlacementBlock::new(well("B2"), 20),
        PlacementBlock::new(Well::A1, 12),
    ];

    let first = resolve_placements(&blocks);
    let resolved: Vec<PlacementBlock> = first.iter().map(|outcome| outcome.block()).collect();
    let second = resolve_placements(&resolved);

    let starts = |outcomes: &[plate_merge::placement::PlacementOutcome]| {
        outcomes.iter().map(|outcome| outcome.start).collect::<Vec<_>>()
    };
    assert_eq!(starts(&first), starts(&second));
    assert!(
        second
            .iter()
            .all(|outcome| outcome.status == PlacementStatus::Requested)
    );
}
