#![cfg(feature = "host")]
#![allow(missing_docs)]
//! Host-level tests for line wirings.

use xmas_lights::led2d::{LineGroup, Scan, Wiring};

#[test]
fn row_per_line_gives_each_line_one_progressive_row() {
    const STRIPS: Wiring<3, 100, 3> = Wiring::row_per_line();
    for (line_index, group) in STRIPS.groups().iter().enumerate() {
        assert_eq!(group.first_row(), line_index);
        assert_eq!(group.rows(), 1);
        assert_eq!(group.scan(), Scan::Progressive);
        assert_eq!(group.len(100), 100);
    }
}

#[test]
fn split_serpentine_matches_hand_built_wiring() {
    const SPLIT: Wiring<2, 32, 16> = Wiring::split_serpentine();
    const HAND: Wiring<2, 32, 16> = Wiring::new([
        LineGroup::new(0, 8, Scan::Serpentine),
        LineGroup::new(8, 8, Scan::Serpentine),
    ]);
    const _: () = assert!(SPLIT.equals(&HAND));
    assert_eq!(SPLIT, HAND);
}

#[test]
fn equals_notices_a_different_scan() {
    const FORWARD: Wiring<1, 4, 2> = Wiring::new([LineGroup::new(0, 2, Scan::Progressive)]);
    const SNAKE: Wiring<1, 4, 2> = Wiring::new([LineGroup::new(0, 2, Scan::Serpentine)]);
    assert!(!FORWARD.equals(&SNAKE));
}

#[test]
fn serpentine_pixel_order_snakes() {
    let group = LineGroup::new(2, 3, Scan::Serpentine);
    let order: Vec<(usize, usize)> = group.pixel_order::<3>().collect();
    assert_eq!(
        order,
        [
            (0, 2),
            (1, 2),
            (2, 2),
            (2, 3),
            (1, 3),
            (0, 3),
            (0, 4),
            (1, 4),
            (2, 4),
        ]
    );
}

#[test]
fn reversed_pixel_order_runs_right_to_left() {
    let group = LineGroup::new(0, 2, Scan::Reversed);
    let order: Vec<(usize, usize)> = group.pixel_order::<2>().collect();
    assert_eq!(order, [(1, 0), (0, 0), (1, 1), (0, 1)]);
}

#[test]
fn every_pixel_appears_exactly_once_across_lines() {
    const PANEL: Wiring<4, 7, 8> = Wiring::split_serpentine();
    let mut seen = [[0u8; 7]; 8];
    for group in PANEL.groups() {
        for (x_index, y_index) in group.pixel_order::<7>() {
            seen[y_index][x_index] += 1;
        }
    }
    assert!(seen.iter().flatten().all(|&count| count == 1));
}

#[test]
#[should_panic(expected = "row is carried by more than one line")]
fn overlapping_groups_are_rejected() {
    let _ = Wiring::<2, 4, 3>::new([
        LineGroup::new(0, 2, Scan::Progressive),
        LineGroup::new(1, 2, Scan::Progressive),
    ]);
}

#[test]
#[should_panic(expected = "wiring does not cover every row")]
fn uncovered_rows_are_rejected() {
    let _ = Wiring::<1, 4, 3>::new([LineGroup::new(0, 2, Scan::Progressive)]);
}

#[test]
fn scan_reversal_by_row() {
    assert!(!Scan::Progressive.is_reversed(1));
    assert!(Scan::Reversed.is_reversed(0));
    assert!(!Scan::Serpentine.is_reversed(0));
    assert!(Scan::Serpentine.is_reversed(1));
}
