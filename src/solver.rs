//! Backtracking search over slot → word assignments, yielding every intermediate step.

use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use tracing::{debug, trace};

use crate::cell::Cell;
use crate::dictionary::WordIndex;
use crate::grid::Grid;
use crate::intersection::Intersections;
use crate::slot::{find_slots, Slot};

/// A partial or complete mapping from slots to words.
///
/// Every yielded snapshot is consistent: any two assigned slots that cross agree on the
/// shared character. Completeness is relative to a solver's slot set; check it with
/// [`Solver::is_complete`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Assignment {
    entries: HashMap<Slot, String>,
}

impl Assignment {
    /// The word assigned to `slot`, if any.
    pub fn get(&self, slot: &Slot) -> Option<&str> {
        self.entries.get(slot).map(String::as_str)
    }

    /// Number of assigned slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no slot is assigned.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The assigned `(slot, word)` pairs, in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&Slot, &str)> {
        self.entries.iter().map(|(slot, word)| (slot, word.as_str()))
    }

    fn insert(&mut self, slot: Slot, word: String) {
        self.entries.insert(slot, word);
    }

    fn remove(&mut self, slot: &Slot) -> Option<String> {
        self.entries.remove(slot)
    }
}

/// Chronological backtracking solver with minimum-remaining-values variable ordering.
///
/// The input grid is read-only topology: slots and crossings are derived once at
/// construction, and answers live in [`Assignment`]s. [`solve`](Self::solve) returns a
/// lazy, single-pass sequence of every assignment snapshot the search visits; construct
/// a new solver to restart.
pub struct Solver<'a> {
    grid: Grid,
    index: &'a WordIndex,
    slots: Vec<Slot>,
    crossings: Intersections,
}

impl<'a> Solver<'a> {
    /// Derive the constraint model of `grid`.
    pub fn new(grid: Grid, index: &'a WordIndex) -> Self {
        let slots = find_slots(&grid);
        let crossings = Intersections::build(&slots);
        debug!(slots = slots.len(), crossings = crossings.len(), "derived constraint model");

        Self { grid, index, slots, crossings }
    }

    /// The slots of the grid, in extraction order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// The crossing structure of the grid's slots.
    pub fn crossings(&self) -> &Intersections {
        &self.crossings
    }

    /// Whether `assignment` covers every slot of this grid.
    pub fn is_complete(&self, assignment: &Assignment) -> bool {
        assignment.len() == self.slots.len()
    }

    /// Search for a filling of the grid.
    ///
    /// The returned iterator yields the empty root assignment first, then one snapshot
    /// per tentative assignment in visitation order, and ends after the first complete
    /// assignment — or, if the search space is exhausted, without one; callers detect
    /// that by checking [`is_complete`](Self::is_complete) on the last element.
    pub fn solve(&self) -> SolveSteps<'_, 'a> {
        SolveSteps {
            solver: self,
            assignment: Assignment::default(),
            used: HashSet::new(),
            stack: Vec::new(),
            started: false,
            finished: false,
        }
    }

    /// Copy the grid and write every assigned word's letters along its slot.
    pub fn materialize(&self, assignment: &Assignment) -> Grid {
        let mut grid = self.grid.clone();

        for (slot, word) in assignment.iter() {
            for (location, byte) in slot.cells().zip(word.bytes()) {
                grid.put(location, Cell::Letter(byte as char));
            }
        }

        grid
    }

    /// The fixed characters of `slot`: letters already on the grid, overlaid with the
    /// shared characters of every crossing slot currently assigned.
    fn pattern(&self, slot: Slot, assignment: &Assignment) -> Vec<Option<char>> {
        let mut pattern = slot
            .cells()
            .map(|location| match self.grid.get(location) {
                Some(Cell::Letter(c)) => Some(c),
                _ => None,
            })
            .collect_vec();

        for (other, crossing) in self.crossings.crossing_slots(slot) {
            if let Some(word) = assignment.get(&other) {
                let (own, theirs) = crossing.offsets_for(slot.orientation);
                pattern[own] = Some(word.as_bytes()[theirs] as char);
            }
        }

        pattern
    }

    fn fits(word: &str, pattern: &[Option<char>]) -> bool {
        word.bytes()
            .zip(pattern)
            .all(|(byte, fixed)| fixed.map_or(true, |c| c == byte as char))
    }

    /// Words of the slot's exact length matching its current pattern, in the index's
    /// stable enumeration order.
    fn domain(&self, slot: Slot, assignment: &Assignment) -> Vec<String> {
        let pattern = self.pattern(slot, assignment);
        self.index
            .by_length(slot.len)
            .iter()
            .filter(|word| Self::fits(word, &pattern))
            .cloned()
            .collect_vec()
    }

    /// Minimum-remaining-values selection: the unassigned slot with the fewest words
    /// matching its pattern, ties broken by extraction order. [`None`] once every slot
    /// is assigned.
    fn select_slot(&self, assignment: &Assignment) -> Option<Slot> {
        let mut best: Option<(Slot, usize)> = None;

        for &slot in &self.slots {
            if assignment.get(&slot).is_some() {
                continue;
            }
            let pattern = self.pattern(slot, assignment);
            let count = self
                .index
                .by_length(slot.len)
                .iter()
                .filter(|word| Self::fits(word, &pattern))
                .count();

            if best.map_or(true, |(_, min)| count < min) {
                best = Some((slot, count));
            }
        }

        best.map(|(slot, _)| slot)
    }
}

struct Frame {
    slot: Slot,
    candidates: Vec<String>,
    next: usize,
    committed: bool,
}

/// Lazy sequence of assignment snapshots produced by [`Solver::solve`].
///
/// Pull-based and finite: each step is computed as the consumer advances, and dropping
/// the iterator abandons the search. Not restartable.
pub struct SolveSteps<'s, 'a> {
    solver: &'s Solver<'a>,
    assignment: Assignment,
    used: HashSet<String>,
    stack: Vec<Frame>,
    started: bool,
    finished: bool,
}

impl Iterator for SolveSteps<'_, '_> {
    type Item = Assignment;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        // the empty root assignment is itself a step
        if !self.started {
            self.started = true;
            return Some(self.assignment.clone());
        }

        if self.solver.is_complete(&self.assignment) {
            debug!(assigned = self.assignment.len(), "complete assignment reported");
            self.finished = true;
            return None;
        }

        let Some(slot) = self.solver.select_slot(&self.assignment) else {
            self.finished = true;
            return None;
        };
        let candidates = self.solver.domain(slot, &self.assignment);
        self.stack.push(Frame { slot, candidates, next: 0, committed: false });

        loop {
            let Some(frame) = self.stack.last_mut() else {
                // search space exhausted without a complete assignment
                self.finished = true;
                return None;
            };

            if frame.committed {
                if let Some(word) = self.assignment.remove(&frame.slot) {
                    self.used.remove(&word);
                }
                frame.committed = false;
            }

            let mut chosen = None;
            while frame.next < frame.candidates.len() {
                let word = &frame.candidates[frame.next];
                frame.next += 1;
                // a word may be used at most once across the whole puzzle
                if !self.used.contains(word) {
                    chosen = Some(word.clone());
                    break;
                }
            }

            match chosen {
                Some(word) => {
                    trace!(slot = ?frame.slot, word = %word, "tentative assignment");
                    self.used.insert(word.clone());
                    self.assignment.insert(frame.slot, word);
                    frame.committed = true;
                    return Some(self.assignment.clone());
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
