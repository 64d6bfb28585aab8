use std::fmt::{Display, Formatter};

use ndarray::{Array2, AssignElem};

use crate::cell::Cell;
use crate::location::Location;

/// Reasons a [`Grid`] access may fail.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GridError {
    /// A read or write addressed a cell outside `[0, height) × [0, width)`.
    /// This indicates a defect in the caller, not a recoverable condition.
    OutOfBounds,
}

/// A rectangular matrix of [`Cell`]s.
///
/// Built either [blank](Self::blank) (for the generator to grow into) or
/// [from textual rows](Self::from_rows). All rows have equal length; ragged input is
/// right-padded with [`Blocked`](Cell::Blocked) so slot extraction never indexes out
/// of bounds.
#[derive(Clone, Eq, PartialEq)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    /// An all-[`Empty`](Cell::Empty) grid of the given dimensions.
    pub fn blank(height: usize, width: usize) -> Self {
        Self {
            cells: Array2::from_shape_simple_fn((height, width), Cell::default),
        }
    }

    /// Parse a grid from textual rows of cell markers (see [`Cell::from_marker`]).
    /// Short rows are right-padded with [`Blocked`](Cell::Blocked) up to the widest row.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|row| row.as_ref().chars().count()).max().unwrap_or(0);
        let parsed: Vec<Vec<Cell>> = rows
            .iter()
            .map(|row| row.as_ref().chars().map(Cell::from_marker).collect())
            .collect();

        Self {
            cells: Array2::from_shape_fn((height, width), |(r, c)| {
                parsed[r].get(c).copied().unwrap_or(Cell::Blocked)
            }),
        }
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// The cell at `location`, or [`None`] if the location is off-grid.
    pub fn get(&self, location: Location) -> Option<Cell> {
        self.cells.get(location.as_index()).copied()
    }

    /// Overwrite the cell at `location`.
    pub fn set(&mut self, location: Location, cell: Cell) -> Result<(), GridError> {
        match self.cells.get_mut(location.as_index()) {
            Some(existing) => {
                existing.assign_elem(cell);
                Ok(())
            }
            None => Err(GridError::OutOfBounds),
        }
    }

    /// Whether `location` is on-grid and not [`Blocked`](Cell::Blocked).
    pub fn is_fillable(&self, location: Location) -> bool {
        self.get(location).is_some_and(|cell| cell.is_fillable())
    }

    /// Write without a bounds check. Callers must have validated `location` already.
    pub(crate) fn put(&mut self, location: Location, cell: Cell) {
        self.cells[location.as_index()] = cell;
    }

    /// Convert every still-[`Empty`](Cell::Empty) cell to [`Blocked`](Cell::Blocked),
    /// fixing the grid topology once generation is done.
    pub(crate) fn block_empty(&mut self) {
        self.cells.map_inplace(|cell| {
            if *cell == Cell::Empty {
                cell.assign_elem(Cell::Blocked);
            }
        })
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut out = String::with_capacity(self.cells.nrows() * (self.cells.ncols() + 1));

        for row in self.cells.rows() {
            for cell in row {
                out.push(cell.marker());
            }
            out.push('\n');
        }

        write!(f, "{}", out)
    }
}
