//! Crossing derivation: which perpendicular slot pairs share a cell, and where.

use itertools::Itertools;
use petgraph::graphmap::UnGraphMap;
use unordered_pair::UnorderedPair;

use crate::slot::{Orientation, Slot};

/// The shared cell of a crossing pair, as an offset into each slot's run.
///
/// Invariant: `across.cell(in_across)` and `down.cell(in_down)` are the same physical
/// grid cell.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Crossing {
    /// Offset of the shared cell within the across slot.
    pub in_across: usize,
    /// Offset of the shared cell within the down slot.
    pub in_down: usize,
}

impl Crossing {
    /// Resolve the offset pair as `(own, other)` for a slot of the given orientation,
    /// regardless of which side of the pair that slot is on.
    pub fn offsets_for(&self, orientation: Orientation) -> (usize, usize) {
        match orientation {
            Orientation::Across => (self.in_across, self.in_down),
            Orientation::Down => (self.in_down, self.in_across),
        }
    }
}

/// The crossing structure of a slot set.
///
/// Stored as an undirected graph: slots are nodes, crossings are edges weighted with
/// their [`Crossing`] offsets. A pair of perpendicular slots crosses at most once, so a
/// single edge per pair suffices; a slot with no edges constrains nothing but is still a
/// node (the search must still fill it).
pub struct Intersections {
    graph: UnGraphMap<Slot, Crossing>,
}

impl Intersections {
    /// Pairwise-scan `slots` for perpendicular pairs whose spans overlap.
    ///
    /// The scan is quadratic in the slot count, which is bounded by grid area.
    pub fn build(slots: &[Slot]) -> Self {
        let mut graph = UnGraphMap::with_capacity(slots.len(), slots.len());
        for slot in slots {
            graph.add_node(*slot);
        }

        for (a, b) in slots.iter().tuple_combinations() {
            if a.orientation == b.orientation {
                continue;
            }
            let (across, down) = match a.orientation {
                Orientation::Across => (*a, *b),
                Orientation::Down => (*b, *a),
            };

            let spans_cross = (across.col..across.col + across.len).contains(&down.col)
                && (down.row..down.row + down.len).contains(&across.row);
            if spans_cross {
                graph.add_edge(
                    across,
                    down,
                    Crossing {
                        in_across: down.col - across.col,
                        in_down: across.row - down.row,
                    },
                );
            }
        }

        Self { graph }
    }

    /// The slots crossing `slot`, each with the crossing's offset pair.
    ///
    /// `slot` must belong to the slot set this index was built from.
    pub fn crossing_slots(&self, slot: Slot) -> impl Iterator<Item = (Slot, Crossing)> + '_ {
        self.graph
            .edges(slot)
            .map(move |(a, b, crossing)| (if a == slot { b } else { a }, *crossing))
    }

    /// The crossing between the two slots of `pair`, if any.
    pub fn between(&self, pair: UnorderedPair<Slot>) -> Option<Crossing> {
        self.graph.edge_weight(pair.0, pair.1).copied()
    }

    /// Every crossing pair, with its offsets.
    pub fn pairs(&self) -> impl Iterator<Item = (UnorderedPair<Slot>, Crossing)> + '_ {
        self.graph
            .all_edges()
            .map(|(a, b, crossing)| (UnorderedPair(a, b), *crossing))
    }

    /// Number of crossing pairs.
    pub fn len(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether no pair of slots crosses.
    pub fn is_empty(&self) -> bool {
        self.graph.edge_count() == 0
    }
}
