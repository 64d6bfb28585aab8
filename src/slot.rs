//! Slot derivation: the maximal fillable runs of a grid, which are the variables of the
//! constraint problem.

use strum::VariantArray;

use crate::grid::Grid;
use crate::location::Location;

/// The direction a word runs in.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray)]
pub enum Orientation {
    /// Left to right along a row.
    Across,
    /// Top to bottom along a column.
    Down,
}

impl Orientation {
    /// The perpendicular orientation.
    pub fn invert(&self) -> Self {
        match self {
            Self::Across => Self::Down,
            Self::Down => Self::Across,
        }
    }

    /// Unit step `(d_row, d_col)` along this orientation.
    pub(crate) fn delta(&self) -> (usize, usize) {
        match self {
            Self::Across => (0, 1),
            Self::Down => (1, 0),
        }
    }
}

/// A maximal, isolated run of at least two fillable cells in one orientation.
///
/// Slots are derived from a grid snapshot, never stored; they compare by value over all
/// four fields. Invariant: the run contains no [`Blocked`](crate::Cell::Blocked) cell
/// and is bounded immediately before and after by a grid edge or a blocked cell.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Slot {
    /// Row of the first cell.
    pub row: usize,
    /// Column of the first cell.
    pub col: usize,
    /// Direction the run extends in.
    pub orientation: Orientation,
    /// Number of cells in the run, at least 2.
    pub len: usize,
}

impl Slot {
    /// The location of the `i`-th cell of the run.
    pub fn cell(&self, i: usize) -> Location {
        let (dr, dc) = self.orientation.delta();
        Location(self.row + dr * i, self.col + dc * i)
    }

    /// The locations of the run, in order.
    pub fn cells(&self) -> impl Iterator<Item = Location> + '_ {
        (0..self.len).map(|i| self.cell(i))
    }

    /// Whether `location` lies on this run.
    pub fn covers(&self, location: Location) -> bool {
        match self.orientation {
            Orientation::Across => {
                location.0 == self.row && (self.col..self.col + self.len).contains(&location.1)
            }
            Orientation::Down => {
                location.1 == self.col && (self.row..self.row + self.len).contains(&location.0)
            }
        }
    }
}

/// Extract every slot of `grid`, in row-major scan order with [`Across`](Orientation::Across)
/// before [`Down`](Orientation::Down) at each cell.
///
/// A cell starts a slot in some orientation iff it is fillable, the cell behind it is
/// off-grid or blocked, and the cell ahead of it is fillable; the run then extends to the
/// next blocked cell or edge. Runs of length 1 are discarded.
pub fn find_slots(grid: &Grid) -> Vec<Slot> {
    let mut slots = Vec::new();

    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let start = Location(row, col);
            if !grid.is_fillable(start) {
                continue;
            }

            for &orientation in Orientation::VARIANTS {
                let (dr, dc) = orientation.delta();
                let behind = start.offset_by((-(dr as isize), -(dc as isize)));
                let ahead = start.offset_by((dr as isize, dc as isize));
                if grid.is_fillable(behind) || !grid.is_fillable(ahead) {
                    continue;
                }

                let mut len = 0;
                let mut probe = start;
                while grid.is_fillable(probe) {
                    len += 1;
                    probe = probe.offset_by((dr as isize, dc as isize));
                }

                if len >= 2 {
                    slots.push(Slot { row, col, orientation, len });
                }
            }
        }
    }

    slots
}
