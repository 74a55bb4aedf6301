//! Compile-time description of which output line carries which rows of the frame.
//!
//! A [`Wiring`] assigns a contiguous group of rows to each data line. Within a group,
//! the [`Scan`] says how the chain of LEDs snakes through those rows. The encoder
//! walks each group in [`LineGroup::pixel_order`] and emits pixels in that order.
//!
//! Wirings are validated at **compile time** when built in a `const`:
//! - every group must lie inside the frame
//! - every row must be carried by exactly one line
//!
//! ```rust
//! use xmas_lights::led2d::{LineGroup, Scan, Wiring};
//!
//! // Three 100-LED strips, one per row, each wired left to right.
//! const STRIPS: Wiring<3, 100, 3> = Wiring::row_per_line();
//!
//! // A 32×16 panel fed by two lines of eight snaking rows each.
//! const PANEL: Wiring<2, 32, 16> = Wiring::split_serpentine();
//!
//! // Hand-built: the second line enters from the right edge.
//! const CUSTOM: Wiring<2, 10, 2> = Wiring::new([
//!     LineGroup::new(0, 1, Scan::Progressive),
//!     LineGroup::new(1, 1, Scan::Reversed),
//! ]);
//! # let _ = (STRIPS, PANEL, CUSTOM);
//! ```

/// How an LED chain runs through the rows of its group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scan {
    /// Every row left to right.
    Progressive,
    /// Every row right to left.
    Reversed,
    /// First row left to right, then alternating direction (a snake).
    Serpentine,
}

impl Scan {
    /// Whether the row at `row_in_group` (0-based within the group) runs right to left.
    #[must_use]
    pub const fn is_reversed(self, row_in_group: usize) -> bool {
        match self {
            Self::Progressive => false,
            Self::Reversed => true,
            Self::Serpentine => row_in_group % 2 == 1,
        }
    }
}

/// The rows carried by one output line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineGroup {
    first_row: u16,
    rows: u16,
    scan: Scan,
}

impl LineGroup {
    /// A group of `rows` rows starting at `first_row`.
    #[must_use]
    pub const fn new(first_row: u16, rows: u16, scan: Scan) -> Self {
        assert!(rows > 0, "a line must carry at least one row");
        Self {
            first_row,
            rows,
            scan,
        }
    }

    /// First frame row carried by this line.
    #[must_use]
    pub const fn first_row(&self) -> usize {
        self.first_row as usize
    }

    /// Number of rows carried by this line.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows as usize
    }

    /// Scan order within the group.
    #[must_use]
    pub const fn scan(&self) -> Scan {
        self.scan
    }

    /// Number of LEDs on this line for a frame `width` pixels wide.
    #[must_use]
    pub const fn len(&self, width: usize) -> usize {
        self.rows() * width
    }

    /// `(x, y)` frame coordinates in the order the LEDs sit on the wire.
    pub fn pixel_order<const W: usize>(&self) -> impl Iterator<Item = (usize, usize)> {
        let first_row = self.first_row();
        let scan = self.scan;
        (0..self.rows()).flat_map(move |row_in_group| {
            let y_index = first_row + row_in_group;
            let reversed = scan.is_reversed(row_in_group);
            (0..W).map(move |step| {
                let x_index = if reversed { W - 1 - step } else { step };
                (x_index, y_index)
            })
        })
    }
}

/// Assignment of the rows of a `W`×`H` frame to `LINES` output lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wiring<const LINES: usize, const W: usize, const H: usize> {
    groups: [LineGroup; LINES],
}

impl<const LINES: usize, const W: usize, const H: usize> Wiring<LINES, W, H> {
    /// Constructor: verifies the groups cover every row of the frame exactly once.
    #[must_use]
    pub const fn new(groups: [LineGroup; LINES]) -> Self {
        assert!(LINES > 0, "at least one output line is required");
        assert!(W > 0 && H > 0, "W and H must be positive");
        assert!(H <= u16::MAX as usize, "H must fit in u16");

        let mut seen = [false; H];
        let mut line_index = 0;
        while line_index < LINES {
            let group = groups[line_index];
            let end = group.first_row() + group.rows();
            assert!(end <= H, "line group extends past the last row");
            let mut y_index = group.first_row();
            while y_index < end {
                assert!(!seen[y_index], "row is carried by more than one line");
                seen[y_index] = true;
                y_index += 1;
            }
            line_index += 1;
        }

        let mut y_index = 0;
        while y_index < H {
            assert!(seen[y_index], "wiring does not cover every row");
            y_index += 1;
        }

        Self { groups }
    }

    /// One line per row, each row left to right.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, reason = "H is asserted to fit in u16")]
    pub const fn row_per_line() -> Self {
        assert!(LINES == H, "row_per_line requires LINES == H");
        assert!(H <= u16::MAX as usize, "H must fit in u16");

        let mut groups = [LineGroup::new(0, 1, Scan::Progressive); LINES];
        let mut line_index = 0;
        while line_index < LINES {
            groups[line_index] = LineGroup::new(line_index as u16, 1, Scan::Progressive);
            line_index += 1;
        }
        Self::new(groups)
    }

    /// Equal bands of `H / LINES` rows per line, each snaking (serpentine) through its band.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, reason = "H is asserted to fit in u16")]
    pub const fn split_serpentine() -> Self {
        assert!(LINES > 0, "at least one output line is required");
        assert!(H % LINES == 0, "split_serpentine requires H divisible by LINES");
        assert!(H <= u16::MAX as usize, "H must fit in u16");

        let band = H / LINES;
        let mut groups = [LineGroup::new(0, 1, Scan::Serpentine); LINES];
        let mut line_index = 0;
        while line_index < LINES {
            groups[line_index] =
                LineGroup::new((line_index * band) as u16, band as u16, Scan::Serpentine);
            line_index += 1;
        }
        Self::new(groups)
    }

    /// The groups, one per output line.
    #[must_use]
    pub const fn groups(&self) -> &[LineGroup; LINES] {
        &self.groups
    }

    /// Const equality helper for compile-time assertions.
    #[must_use]
    pub const fn equals(&self, other: &Self) -> bool {
        let mut line_index = 0;
        while line_index < LINES {
            let mine = self.groups[line_index];
            let theirs = other.groups[line_index];
            if mine.first_row != theirs.first_row
                || mine.rows != theirs.rows
                || !scan_equals(mine.scan, theirs.scan)
            {
                return false;
            }
            line_index += 1;
        }
        true
    }
}

const fn scan_equals(first: Scan, second: Scan) -> bool {
    matches!(
        (first, second),
        (Scan::Progressive, Scan::Progressive)
            | (Scan::Reversed, Scan::Reversed)
            | (Scan::Serpentine, Scan::Serpentine)
    )
}
