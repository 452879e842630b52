//! Discovered-wall bookkeeping.

use std::collections::BTreeSet;

use tracing::debug;

use crate::maze::{Dimensions, Direction, Position};

/// Set of wall sides the player has bumped into.
///
/// This structure records `(cell, direction)` pairs. Revealing an internal wall always records the
/// mirrored side on the neighbouring cell as well, while border walls only have the one side. The set
/// is transient: it is emptied whenever an attempt starts over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WallRevealTracker {
    /// Size of the grid the walls belong to.
    dimensions: Dimensions,
    /// Discovered wall sides.
    revealed: BTreeSet<(Position, Direction)>,
}

impl WallRevealTracker {
    /// Creates an empty tracker for a grid of the given size.
    #[must_use]
    pub const fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            revealed: BTreeSet::new(),
        }
    }

    /// Marks the wall on the `direction` side of `cell` as discovered.
    ///
    /// Revealing the same wall again has no effect.
    pub fn reveal(&mut self, cell: Position, direction: Direction) {
        let fresh = self.revealed.insert((cell, direction));

        if let Some(neighbor) = self.dimensions.neighbor(cell, direction) {
            let _ = self.revealed.insert((neighbor, direction.opposite()));
        }

        if fresh {
            debug!(%cell, ?direction, "revealed wall");
        }
    }

    /// Whether the wall on the `direction` side of `cell` has been discovered.
    #[must_use]
    pub fn is_revealed(&self, cell: Position, direction: Direction) -> bool {
        self.revealed.contains(&(cell, direction))
    }

    /// Forgets every discovered wall.
    pub fn clear(&mut self) {
        self.revealed.clear();
    }

    /// Iterates over the discovered sides in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Direction)> + '_ {
        self.revealed.iter().copied()
    }

    /// Number of discovered sides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    /// Whether nothing has been discovered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn tracker(rows: usize, cols: usize) -> WallRevealTracker {
        WallRevealTracker::new(Dimensions::new(rows, cols).expect("dimensions should be valid"))
    }

    #[test]
    fn test_internal_wall_is_mirrored() {
        let mut fog = tracker(3, 3);

        fog.reveal(Position::new(1, 1), Direction::East);

        assert_eq!(fog.len(), 2);
        assert!(fog.is_revealed(Position::new(1, 1), Direction::East));
        assert!(fog.is_revealed(Position::new(1, 2), Direction::West));
    }

    #[test]
    fn test_border_wall_has_one_side() {
        let mut fog = tracker(3, 3);

        fog.reveal(Position::new(0, 2), Direction::North);

        assert_eq!(
            fog.iter().collect::<Vec<_>>(),
            vec![(Position::new(0, 2), Direction::North)]
        );
    }

    #[test]
    fn test_reveal_is_idempotent() {
        let mut once = tracker(4, 4);
        once.reveal(Position::new(2, 1), Direction::South);

        let mut twice = once.clone();
        twice.reveal(Position::new(2, 1), Direction::South);
        twice.reveal(Position::new(3, 1), Direction::North);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_clear_empties_the_set() {
        let mut fog = tracker(2, 2);
        fog.reveal(Position::new(0, 0), Direction::South);
        assert!(!fog.is_empty());

        fog.clear();

        assert!(fog.is_empty());
        assert!(!fog.is_revealed(Position::new(0, 0), Direction::South));
    }

    fn direction_strategy() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::North),
            Just(Direction::South),
            Just(Direction::East),
            Just(Direction::West),
        ]
    }

    proptest! {
        #[test]
        fn prop_every_revealed_internal_side_has_its_mirror(
            reveals in prop::collection::vec((0_usize..5, 0_usize..6, direction_strategy()), 0..40),
        ) {
            let dimensions = Dimensions::new(5, 6).expect("dimensions should be valid");
            let mut fog = WallRevealTracker::new(dimensions);
            for (row, col, direction) in reveals {
                fog.reveal(Position::new(row, col), direction);
            }

            for (cell, direction) in fog.iter() {
                if let Some(neighbor) = dimensions.neighbor(cell, direction) {
                    prop_assert!(fog.is_revealed(neighbor, direction.opposite()));
                }
            }
        }
    }
}
