//! Constructive layout: randomized, intersection-driven growth of a word grid.

use std::collections::HashSet;

use itertools::Itertools;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use strum::VariantArray;
use tracing::debug;

use crate::cell::Cell;
use crate::dictionary::WordIndex;
use crate::grid::Grid;
use crate::location::{Dimension, Location};
use crate::slot::{Orientation, Slot};

/// Attempt budget multiplier on the requested word count.
const ATTEMPT_FACTOR: usize = 15;
/// Every this many failed attempts, try a random free placement instead of a crossing.
const FALLBACK_PERIOD: usize = 20;
/// Unused words sampled per fallback.
const FALLBACK_WORD_SAMPLES: usize = 5;
/// Random `(row, col, orientation)` triples tried per sampled fallback word.
const FALLBACK_TRIES_PER_WORD: usize = 10;

/// Reasons generation cannot start.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GeneratorError {
    /// The dictionary holds no word of length `size` or `size - 1` to seed the grid with.
    NoSeedWord,
}

/// One word committed to the grid, in placement order.
///
/// The placement list is the source of truth for which word occupies which slot; its
/// order is generation history only.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlacedWord {
    /// The placed word, lowercase.
    pub word: String,
    /// Row of the first letter.
    pub row: usize,
    /// Column of the first letter.
    pub col: usize,
    /// Direction the word runs in.
    pub orientation: Orientation,
}

impl PlacedWord {
    /// The slot this placement occupies.
    pub fn slot(&self) -> Slot {
        Slot {
            row: self.row,
            col: self.col,
            orientation: self.orientation,
            len: self.word.len(),
        }
    }
}

/// Builds a finished grid by repeatedly crossing a new word through a letter of an
/// already-placed one, with a random free-placement fallback when crossing growth stalls.
///
/// Construction is best-effort: the result may hold fewer words than requested (callers
/// inspect the returned placement count), but every committed placement is legal.
pub struct Generator<'a> {
    size: Dimension,
    index: &'a WordIndex,
    rng: StdRng,
}

impl<'a> Generator<'a> {
    /// A generator for a `size × size` grid, drawing entropy from the OS.
    pub fn new(size: Dimension, index: &'a WordIndex) -> Self {
        Self {
            size,
            index,
            rng: StdRng::from_entropy(),
        }
    }

    /// A generator with an injected RNG seed, for reproducible output.
    pub fn with_seed(size: Dimension, index: &'a WordIndex, seed: u64) -> Self {
        Self {
            size,
            index,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Lay out up to `target_words` words and return the finished grid (every unfilled
    /// cell converted to [`Blocked`](Cell::Blocked)) plus the placements in commit order.
    ///
    /// The main loop is bounded to `15 × target_words` attempts; exhausting the budget
    /// degrades to a smaller result, never an error.
    pub fn generate(&mut self, target_words: usize) -> Result<(Grid, Vec<PlacedWord>), GeneratorError> {
        let size = self.size.get();
        let mut grid = Grid::blank(size, size);
        let mut placements: Vec<PlacedWord> = Vec::new();
        let mut used: HashSet<String> = HashSet::new();

        let seed = self.pick_seed()?;
        let row = size / 2;
        let col = (size - seed.len()) / 2;
        debug!(word = %seed, row, col, "seeding grid");
        commit(&mut grid, &mut placements, &mut used, seed, row, col, Orientation::Across);

        let mut failures = 0usize;
        for _ in 0..target_words.saturating_mul(ATTEMPT_FACTOR) {
            if placements.len() >= target_words {
                break;
            }

            if self.try_crossing_placement(&mut grid, &mut placements, &mut used) {
                continue;
            }

            failures += 1;
            if failures % FALLBACK_PERIOD == 0 {
                self.try_random_placement(&mut grid, &mut placements, &mut used);
            }
        }

        grid.block_empty();
        debug!(placed = placements.len(), target = target_words, "generation finished");
        Ok((grid, placements))
    }

    fn pick_seed(&mut self) -> Result<String, GeneratorError> {
        let index = self.index;
        let size = self.size.get();

        [size, size.saturating_sub(1)]
            .iter()
            .find_map(|&len| index.by_length(len).choose(&mut self.rng))
            .cloned()
            .ok_or(GeneratorError::NoSeedWord)
    }

    /// One attempt at growing the grid through an existing letter. Every candidate
    /// dimension (anchor letter, word length, word, letter position within the word) is
    /// visited in uniformly random order; the first legal placement is committed.
    fn try_crossing_placement(
        &mut self,
        grid: &mut Grid,
        placements: &mut Vec<PlacedWord>,
        used: &mut HashSet<String>,
    ) -> bool {
        let index = self.index;
        let Some(anchor) = placements.choose(&mut self.rng).cloned() else {
            return false;
        };
        let orientation = anchor.orientation.invert();

        let mut letter_positions = (0..anchor.word.len()).collect_vec();
        letter_positions.shuffle(&mut self.rng);

        for i in letter_positions {
            let letter = anchor.word.as_bytes()[i] as char;

            let mut lengths = index.lengths().collect_vec();
            lengths.shuffle(&mut self.rng);

            for len in lengths {
                let mut candidates = index
                    .by_length(len)
                    .iter()
                    .filter(|word| !used.contains(*word) && word.contains(letter))
                    .collect_vec();
                candidates.shuffle(&mut self.rng);

                for word in candidates {
                    let mut positions = word.match_indices(letter).map(|(j, _)| j).collect_vec();
                    positions.shuffle(&mut self.rng);

                    for j in positions {
                        // perpendicular placement aligning the shared letter
                        let (row, col) = match anchor.orientation {
                            Orientation::Across => {
                                (anchor.row as isize - j as isize, (anchor.col + i) as isize)
                            }
                            Orientation::Down => {
                                ((anchor.row + i) as isize, anchor.col as isize - j as isize)
                            }
                        };
                        if row < 0 || col < 0 {
                            continue;
                        }
                        let (row, col) = (row as usize, col as usize);

                        if can_place(grid, placements, word, row, col, orientation) {
                            debug!(word = %word, row, col, ?orientation, "crossing placement");
                            commit(grid, placements, used, word.clone(), row, col, orientation);
                            return true;
                        }
                    }
                }
            }
        }

        false
    }

    /// Pure crossing growth stalls once few compatible letters remain exposed; this
    /// samples a handful of unused words and tries uniformly random placements for each.
    fn try_random_placement(
        &mut self,
        grid: &mut Grid,
        placements: &mut Vec<PlacedWord>,
        used: &mut HashSet<String>,
    ) -> bool {
        let index = self.index;
        let size = self.size.get();

        let pool = index
            .lengths()
            .flat_map(|len| index.by_length(len))
            .filter(|word| !used.contains(*word) && word.len() <= size)
            .collect_vec();

        let sampled = pool
            .choose_multiple(&mut self.rng, FALLBACK_WORD_SAMPLES)
            .map(|word| (*word).clone())
            .collect_vec();

        for word in sampled {
            for _ in 0..FALLBACK_TRIES_PER_WORD {
                let orientation =
                    Orientation::VARIANTS[self.rng.gen_range(0..Orientation::VARIANTS.len())];
                let (dr, dc) = orientation.delta();
                let row = self.rng.gen_range(0..=size - 1 - dr * (word.len() - 1));
                let col = self.rng.gen_range(0..=size - 1 - dc * (word.len() - 1));

                if can_place(grid, placements, &word, row, col, orientation) {
                    debug!(word = %word, row, col, ?orientation, "fallback placement");
                    commit(grid, placements, used, word, row, col, orientation);
                    return true;
                }
            }
        }

        false
    }
}

/// Whether `word` may legally occupy the run starting at `(row, col)` in `orientation`.
///
/// Legal means: in bounds; every occupied cell is empty or already holds the same letter
/// at a genuine crossing (a perpendicular placed word covers it); no freshly lettered
/// cell butts against a parallel word; and the cells immediately before and after the
/// run are off-grid or unlettered, so the run stays maximal and isolated.
pub(crate) fn can_place(
    grid: &Grid,
    placements: &[PlacedWord],
    word: &str,
    row: usize,
    col: usize,
    orientation: Orientation,
) -> bool {
    let len = word.len();
    let (dr, dc) = orientation.delta();

    if row + dr * (len - 1) >= grid.height() || col + dc * (len - 1) >= grid.width() {
        return false;
    }

    for (i, byte) in word.bytes().enumerate() {
        let at = Location(row + dr * i, col + dc * i);

        match grid.get(at) {
            Some(Cell::Letter(existing)) => {
                if existing != byte as char {
                    return false;
                }
                // reuse is only a crossing if a perpendicular word actually runs here
                if !placements
                    .iter()
                    .any(|placed| placed.orientation != orientation && placed.slot().covers(at))
                {
                    return false;
                }
            }
            Some(Cell::Empty) => {
                for side in [-1isize, 1] {
                    let neighbor = at.offset_by((side * dc as isize, side * dr as isize));
                    if matches!(grid.get(neighbor), Some(Cell::Letter(_))) {
                        return false;
                    }
                }
            }
            Some(Cell::Blocked) | None => return false,
        }
    }

    let behind = Location(row, col).offset_by((-(dr as isize), -(dc as isize)));
    let ahead = Location(row + dr * len, col + dc * len);
    for end in [behind, ahead] {
        if matches!(grid.get(end), Some(Cell::Letter(_))) {
            return false;
        }
    }

    true
}

fn commit(
    grid: &mut Grid,
    placements: &mut Vec<PlacedWord>,
    used: &mut HashSet<String>,
    word: String,
    row: usize,
    col: usize,
    orientation: Orientation,
) {
    let placed = PlacedWord { word, row, col, orientation };

    for (location, byte) in placed.slot().cells().zip(placed.word.bytes()) {
        grid.put(location, Cell::Letter(byte as char));
    }

    used.insert(placed.word.clone());
    placements.push(placed);
}

/// Blank a finished grid into a puzzle: blocked cells stay, and only letters covered by
/// one of the `revealed` placements survive.
pub fn puzzle_grid(grid: &Grid, revealed: &[PlacedWord]) -> Grid {
    let mut puzzle = grid.clone();

    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let at = Location(row, col);
            if matches!(grid.get(at), Some(Cell::Letter(_)))
                && !revealed.iter().any(|placed| placed.slot().covers(at))
            {
                puzzle.put(at, Cell::Empty);
            }
        }
    }

    puzzle
}
