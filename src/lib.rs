#![warn(missing_docs)]

//! # `crossgrid`
//!
//! A builder and solver for crossword-style word grids.
//! The generator grows a bounded [`Grid`] by repeatedly crossing a new word through a letter of
//! an already-placed one ([`Generator::generate`](crate::Generator::generate)); the solver takes
//! a grid with blanked cells and fills every slot with dictionary words consistent with the
//! crossing constraints ([`Solver::solve`](crate::Solver::solve)).
//!
//! Both sides share one constraint model. "Slots" — maximal, isolated runs of at least two
//! fillable cells — are derived from a grid snapshot by [`slot::find_slots`] and are the
//! variables of a constraint-satisfaction problem; [`intersection::Intersections`] records which
//! perpendicular slot pairs share a cell and at which offset into each run. The solver searches
//! that problem with minimum-remaining-values variable ordering and chronological backtracking,
//! yielding every intermediate assignment as a step so a consumer can animate the search.
//!
//! Word lists and rendering are external collaborators: build a [`WordIndex`] from any source of
//! alphabetic tokens and consume the produced grids and assignment snapshots however you like.

pub use cell::Cell;
pub use dictionary::{DictionaryError, WordIndex};
pub use generator::{puzzle_grid, Generator, GeneratorError, PlacedWord};
pub use grid::{Grid, GridError};
pub use location::Location;
pub use solver::{Assignment, SolveSteps, Solver};

pub(crate) mod cell;
pub(crate) mod dictionary;
pub(crate) mod generator;
pub(crate) mod grid;
pub mod intersection;
pub(crate) mod location;
pub mod slot;
pub(crate) mod solver;
mod tests;
