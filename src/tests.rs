#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::num::NonZero;

    use unordered_pair::UnorderedPair;

    use crate::intersection::Intersections;
    use crate::slot::{find_slots, Orientation, Slot};
    use crate::{
        puzzle_grid, Cell, DictionaryError, Generator, Grid, GridError, Location, Solver,
        WordIndex,
    };

    fn index(words: &[&str]) -> WordIndex {
        WordIndex::build(words).unwrap()
    }

    #[test]
    fn ragged_rows_pad_blocked() {
        let grid = Grid::from_rows(&["cat", "#"]);

        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 3);
        assert_eq!(format!("{}", grid), "cat
###
");
    }

    #[test]
    fn set_rejects_out_of_bounds() {
        let mut grid = Grid::blank(2, 2);

        assert_eq!(grid.set(Location(2, 0), Cell::Blocked), Err(GridError::OutOfBounds));
        assert_eq!(grid.set(Location(0, 5), Cell::Blocked), Err(GridError::OutOfBounds));

        grid.set(Location(1, 1), Cell::Letter('a')).unwrap();
        assert_eq!(grid.get(Location(1, 1)), Some(Cell::Letter('a')));
        assert_eq!(grid.get(Location(5, 5)), None);
    }

    #[test]
    fn index_filters_and_orders_words() {
        assert!(matches!(WordIndex::build(Vec::<&str>::new()), Err(DictionaryError::Empty)));
        assert!(matches!(WordIndex::build(["", "123", "a1"]), Err(DictionaryError::Empty)));

        let index = index(&["dog", "cat", "DOG", "horse", "a1"]);
        assert_eq!(index.by_length(3).to_vec(), vec!["cat", "dog"]);
        assert!(index.by_length(4).is_empty());
        assert_eq!(index.lengths().collect::<Vec<_>>(), vec![3, 5]);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn slots_are_maximal_and_ordered() {
        // a 3x3 ring around a single blocked cell
        let grid = Grid::from_rows(&["   ", " # ", "   "]);
        let slots = find_slots(&grid);

        assert_eq!(slots, vec![
            Slot { row: 0, col: 0, orientation: Orientation::Across, len: 3 },
            Slot { row: 0, col: 0, orientation: Orientation::Down, len: 3 },
            Slot { row: 0, col: 2, orientation: Orientation::Down, len: 3 },
            Slot { row: 2, col: 0, orientation: Orientation::Across, len: 3 },
        ]);

        for slot in &slots {
            let (dr, dc) = slot.orientation.delta();
            let behind = slot.cell(0).offset_by((-(dr as isize), -(dc as isize)));
            let ahead = slot.cell(slot.len - 1).offset_by((dr as isize, dc as isize));
            for end in [behind, ahead] {
                assert!(matches!(grid.get(end), None | Some(Cell::Blocked)));
            }
        }
    }

    #[test]
    fn single_cell_runs_yield_no_slots() {
        let grid = Grid::from_rows(&["# #"]);
        assert!(find_slots(&grid).is_empty());
    }

    #[test]
    fn crossings_share_a_physical_cell() {
        let grid = Grid::from_rows(&["   ", " # ", "   "]);
        let slots = find_slots(&grid);
        let crossings = Intersections::build(&slots);

        // the ring's two across slots each cross both down slots
        assert_eq!(crossings.len(), 4);

        for (UnorderedPair(a, b), crossing) in crossings.pairs() {
            let (across, down) = match a.orientation {
                Orientation::Across => (a, b),
                Orientation::Down => (b, a),
            };
            assert_eq!(across.cell(crossing.in_across), down.cell(crossing.in_down));
        }

        let top = Slot { row: 0, col: 0, orientation: Orientation::Across, len: 3 };
        let right = Slot { row: 0, col: 2, orientation: Orientation::Down, len: 3 };
        let at = crossings.between(UnorderedPair(top, right)).unwrap();
        assert_eq!((at.in_across, at.in_down), (2, 0));
        // lookup is unordered
        assert_eq!(crossings.between(UnorderedPair(right, top)), Some(at));
    }

    #[test]
    fn extraction_is_idempotent() {
        let grid = Grid::from_rows(&["   ", " # ", "   "]);

        let first = find_slots(&grid);
        let second = find_slots(&grid);
        assert_eq!(first, second);

        let crossings_a: Vec<_> = Intersections::build(&first).pairs().collect();
        let crossings_b: Vec<_> = Intersections::build(&second).pairs().collect();
        assert_eq!(crossings_a, crossings_b);
    }

    #[test]
    fn solves_a_single_slot() {
        let index = index(&["cat", "dog"]);
        let solver = Solver::new(Grid::from_rows(&["   "]), &index);

        let steps: Vec<_> = solver.solve().collect();
        assert_eq!(steps.len(), 2);
        assert!(steps[0].is_empty());

        let slot = Slot { row: 0, col: 0, orientation: Orientation::Across, len: 3 };
        assert_eq!(steps[1].get(&slot), Some("cat"));
        assert!(solver.is_complete(&steps[1]));
    }

    #[test]
    fn slotless_grid_is_vacuously_solved() {
        let index = index(&["cat", "dog"]);
        let solver = Solver::new(Grid::from_rows(&["# #"]), &index);

        assert!(solver.slots().is_empty());

        let steps: Vec<_> = solver.solve().collect();
        assert_eq!(steps.len(), 1);
        assert!(steps[0].is_empty());
        assert!(solver.is_complete(&steps[0]));
    }

    #[test]
    fn exhausted_search_ends_without_completion() {
        let index = index(&["cats"]);
        let solver = Solver::new(Grid::from_rows(&["   "]), &index);

        let steps: Vec<_> = solver.solve().collect();
        assert_eq!(steps.len(), 1);
        assert!(!solver.is_complete(&steps[0]));
    }

    #[test]
    fn backtracks_over_a_dead_end() {
        // one across and one down slot crossing at their first cells
        let grid = Grid::from_rows(&["   ", " ##", " ##"]);
        let index = index(&["bad", "dab", "dad"]);
        let solver = Solver::new(grid, &index);

        let across = Slot { row: 0, col: 0, orientation: Orientation::Across, len: 3 };
        let down = Slot { row: 0, col: 0, orientation: Orientation::Down, len: 3 };
        assert_eq!(solver.slots(), &[across, down]);

        // "bad" is tried first but leaves the down slot with no unused candidate
        let steps: Vec<_> = solver.solve().collect();
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[1].get(&across), Some("bad"));
        assert_eq!(steps[2].get(&across), Some("dab"));
        assert_eq!(steps[3].get(&across), Some("dab"));
        assert_eq!(steps[3].get(&down), Some("dad"));
        assert!(solver.is_complete(&steps[3]));
    }

    #[test]
    fn steps_stay_consistent_and_words_unique() {
        let grid = Grid::from_rows(&["   ", " ##", " ##"]);
        let index = index(&["cat", "cow", "dog"]);
        let solver = Solver::new(grid, &index);

        let steps: Vec<_> = solver.solve().collect();

        for step in &steps {
            for (UnorderedPair(a, b), crossing) in solver.crossings().pairs() {
                if let (Some(wa), Some(wb)) = (step.get(&a), step.get(&b)) {
                    let (in_a, in_b) = crossing.offsets_for(a.orientation);
                    assert_eq!(wa.as_bytes()[in_a], wb.as_bytes()[in_b]);
                }
            }

            let words: HashSet<_> = step.iter().map(|(_, word)| word).collect();
            assert_eq!(words.len(), step.len());
        }

        let last = steps.last().unwrap();
        assert!(solver.is_complete(last));
    }

    #[test]
    fn pattern_offsets_resolve_from_either_side() {
        // the down slot carries a pre-filled letter, so MRV assigns it first and the
        // across slot's pattern must be read through the crossing's other side
        let grid = Grid::from_rows(&["   ", "d##", " ##"]);
        let index = index(&["ada", "ant", "bob", "cat"]);
        let solver = Solver::new(grid, &index);

        let across = Slot { row: 0, col: 0, orientation: Orientation::Across, len: 3 };
        let down = Slot { row: 0, col: 0, orientation: Orientation::Down, len: 3 };

        let steps: Vec<_> = solver.solve().collect();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[1].get(&down), Some("ada"));
        assert_eq!(steps[2].get(&across), Some("ant"));
        assert!(solver.is_complete(&steps[2]));
    }

    #[test]
    fn disjoint_slots_use_distinct_words() {
        let grid = Grid::from_rows(&["   ", "###", "   "]);
        let index = index(&["cat", "dog"]);
        let solver = Solver::new(grid, &index);

        assert!(solver.crossings().is_empty());

        let steps: Vec<_> = solver.solve().collect();
        let last = steps.last().unwrap();
        assert!(solver.is_complete(last));

        let words: Vec<_> = last.iter().map(|(_, word)| word.to_string()).collect();
        assert_eq!(words.len(), 2);
        assert_ne!(words[0], words[1]);
    }

    #[test]
    fn materialize_writes_assignment_onto_grid() {
        let index = index(&["cat", "dog"]);
        let solver = Solver::new(Grid::from_rows(&["   "]), &index);

        let last = solver.solve().last().unwrap();
        assert_eq!(format!("{}", solver.materialize(&last)), "cat
");
    }

    #[test]
    fn seed_word_is_centered_on_the_middle_row() {
        let index = index(&["porcupines", "cat", "dog"]);
        let mut generator = Generator::with_seed(NonZero::new(10).unwrap(), &index, 7);

        let (grid, placements) = generator.generate(1).unwrap();

        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].word, "porcupines");
        assert_eq!((placements[0].row, placements[0].col), (5, 0));
        assert_eq!(placements[0].orientation, Orientation::Across);

        assert_eq!(format!("{}", grid), "##########
##########
##########
##########
##########
porcupines
##########
##########
##########
##########
");
    }

    #[test]
    fn missing_seed_word_fails_generation() {
        let index = index(&["cat", "dog"]);
        let mut generator = Generator::with_seed(NonZero::new(10).unwrap(), &index, 7);

        assert!(matches!(generator.generate(3), Err(crate::GeneratorError::NoSeedWord)));
    }

    fn crossword_index() -> WordIndex {
        index(&[
            "lattice", "tea", "eat", "ate", "tan", "net", "ant", "toe", "cat", "ice", "ace",
            "lie", "tie", "let", "all", "tin", "nil", "can", "late", "tale", "lace",
        ])
    }

    #[test]
    fn generated_placements_are_legal() {
        let index = crossword_index();
        let mut generator = Generator::with_seed(NonZero::new(7).unwrap(), &index, 42);

        let (grid, placements) = generator.generate(4).unwrap();
        assert!(!placements.is_empty() && placements.len() <= 4);
        assert_eq!(placements[0].word, "lattice");

        // no word is placed twice
        let words: HashSet<_> = placements.iter().map(|p| p.word.as_str()).collect();
        assert_eq!(words.len(), placements.len());

        // the grid letters match every placement
        for placed in &placements {
            for (location, byte) in placed.slot().cells().zip(placed.word.bytes()) {
                assert_eq!(grid.get(location), Some(Cell::Letter(byte as char)));
            }
        }

        // finalization blocked every unfilled cell
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                assert_ne!(grid.get(Location(row, col)), Some(Cell::Empty));
            }
        }

        // every placement spans exactly one extracted slot, and overlapping placements
        // are genuine perpendicular crossings
        let slots = find_slots(&grid);
        for placed in &placements {
            assert!(slots.contains(&placed.slot()));
        }
        for (i, a) in placements.iter().enumerate() {
            for b in placements.iter().skip(i + 1) {
                let shared = a.slot().cells().filter(|at| b.slot().covers(*at)).count();
                if shared > 0 {
                    assert_eq!(shared, 1);
                    assert_ne!(a.orientation, b.orientation);
                }
            }
        }
    }

    #[test]
    fn generated_puzzle_round_trips_through_the_solver() {
        let index = crossword_index();
        let mut generator = Generator::with_seed(NonZero::new(7).unwrap(), &index, 42);
        let (grid, placements) = generator.generate(4).unwrap();

        // blank everything but the first word, then re-derive and fill
        let puzzle = puzzle_grid(&grid, &placements[..1]);
        let solver = Solver::new(puzzle, &index);
        assert_eq!(solver.slots().len(), placements.len());

        let steps: Vec<_> = solver.solve().collect();
        assert!(steps[0].is_empty());

        let last = steps.last().unwrap();
        assert!(solver.is_complete(last));

        // the revealed word survives into the solution
        let solved = solver.materialize(last);
        for (location, byte) in placements[0].slot().cells().zip(placements[0].word.bytes()) {
            assert_eq!(solved.get(location), Some(Cell::Letter(byte as char)));
        }
    }
}
