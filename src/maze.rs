//! Grid data model for perfect mazes.
//!
//! This module contains the cell coordinates, the four unit directions and the [`Grid`] itself. Cells
//! are addressed by row-major flat index and neighbours are computed arithmetically, so no cell
//! ever holds a reference to another one.

use bitflags::bitflags;

use crate::MazeError;

/// Smallest accepted side length for a grid.
pub const MIN_DIMENSION: usize = 1;

/// Largest accepted side length for a grid.
///
/// Every engine operation is linear in the cell count, this bound only keeps the terminal rendering
/// and the recorded history within sane sizes.
pub const MAX_DIMENSION: usize = 64;

/// Coordinates of a single cell in the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Zero-based row, growing downwards.
    pub row: usize,
    /// Zero-based column, growing to the right.
    pub col: usize,
}

impl Position {
    /// Builds a position from a row and a column.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "({}, {})", self.row, self.col)
    }
}

/// Unit movement directions.
///
/// This enumeration names the four sides of a cell. It is used both for player moves and for the
/// wall flags each cell carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    /// Towards row zero.
    North,
    /// Towards the last row.
    South,
    /// Towards the last column.
    East,
    /// Towards column zero.
    West,
}

impl Direction {
    /// All directions, in the order the generator inspects neighbours.
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::West, Self::East];

    /// Returns the direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    /// Returns the wall flag matching this side of a cell.
    #[must_use]
    pub const fn wall(self) -> Walls {
        match self {
            Self::North => Walls::NORTH,
            Self::South => Walls::SOUTH,
            Self::East => Walls::EAST,
            Self::West => Walls::WEST,
        }
    }
}

bitflags! {
    /// Set of walls present around a single cell.
    ///
    /// A set flag means the wall is standing. Internal walls are stored on both of the cells they
    /// separate, and [`Grid`] only ever changes them in pairs.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Walls: u8 {
        /// Wall on the north side.
        const NORTH = 0b0001;
        /// Wall on the south side.
        const SOUTH = 0b0010;
        /// Wall on the east side.
        const EAST = 0b0100;
        /// Wall on the west side.
        const WEST = 0b1000;
    }
}

/// Validated grid size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dimensions {
    /// Number of rows.
    rows: usize,
    /// Number of columns.
    cols: usize,
}

impl Dimensions {
    /// Validates a row and column count.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidDimensions`] when either side falls outside
    /// [`MIN_DIMENSION`]..=[`MAX_DIMENSION`].
    pub fn new(rows: usize, cols: usize) -> Result<Self, MazeError> {
        let bounds = MIN_DIMENSION..=MAX_DIMENSION;
        if bounds.contains(&rows) && bounds.contains(&cols) {
            Ok(Self { rows, cols })
        } else {
            Err(MazeError::InvalidDimensions { rows, cols })
        }
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(self) -> usize {
        self.cols
    }

    /// Total number of cells.
    #[must_use]
    pub const fn cell_count(self) -> usize {
        self.rows * self.cols
    }

    /// The cell diagonally opposite the origin, where the goal is placed.
    #[must_use]
    pub const fn far_corner(self) -> Position {
        Position::new(self.rows - 1, self.cols - 1)
    }

    /// Whether the position lies inside the grid.
    #[must_use]
    pub const fn contains(self, position: Position) -> bool {
        position.row < self.rows && position.col < self.cols
    }

    /// Row-major flat index of an in-bounds position.
    #[must_use]
    pub const fn index_of(self, position: Position) -> Option<usize> {
        if self.contains(position) {
            Some(position.row * self.cols + position.col)
        } else {
            None
        }
    }

    /// Inverse of [`index_of`](Dimensions::index_of).
    #[must_use]
    pub const fn position_of(self, index: usize) -> Option<Position> {
        if index < self.cell_count() {
            Some(Position::new(index / self.cols, index % self.cols))
        } else {
            None
        }
    }

    /// Returns the in-bounds neighbour of `position` in `direction`.
    ///
    /// `None` means the side is on the border of the grid (or `position` itself is outside it).
    #[must_use]
    pub fn neighbor(self, position: Position, direction: Direction) -> Option<Position> {
        if !self.contains(position) {
            return None;
        }

        let target = match direction {
            Direction::North => Position::new(position.row.checked_sub(1)?, position.col),
            Direction::South => Position::new(position.row + 1, position.col),
            Direction::East => Position::new(position.row, position.col + 1),
            Direction::West => Position::new(position.row, position.col.checked_sub(1)?),
        };

        self.contains(target).then_some(target)
    }
}

/// Snapshot of a single cell with its wall flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Where the cell sits.
    pub position: Position,
    /// Walls standing around it.
    pub walls: Walls,
}

impl Cell {
    /// Whether the wall on the given side is standing.
    #[must_use]
    pub const fn has_wall(&self, direction: Direction) -> bool {
        self.walls.contains(direction.wall())
    }
}

/// Rectangular maze grid.
///
/// This structure holds one [`Walls`] set per cell in row-major order. It is produced by the
/// generator and only read afterwards; the sole mutation, [`carve`](Grid::carve), opens both sides
/// of an edge at once so the two flags of a shared wall never disagree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Size of the grid.
    dimensions: Dimensions,
    /// Wall flags, indexed by [`Dimensions::index_of`].
    walls: Vec<Walls>,
}

impl Grid {
    /// Builds a grid in which every wall is standing.
    #[must_use]
    pub fn closed(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            walls: vec![Walls::all(); dimensions.cell_count()],
        }
    }

    /// Size of the grid.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Returns the cell at `position`, if it is inside the grid.
    #[must_use]
    pub fn cell(&self, position: Position) -> Option<Cell> {
        let index = self.dimensions.index_of(position)?;
        self.walls.get(index).map(|walls| Cell {
            position,
            walls: *walls,
        })
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.walls.iter().enumerate().filter_map(|(index, walls)| {
            self.dimensions
                .position_of(index)
                .map(|position| Cell {
                    position,
                    walls: *walls,
                })
        })
    }

    /// Whether a wall stands on the `direction` side of `position`.
    ///
    /// Positions outside the grid are reported as fully walled.
    #[must_use]
    pub fn has_wall(&self, position: Position, direction: Direction) -> bool {
        self.cell(position)
            .is_none_or(|cell| cell.has_wall(direction))
    }

    /// Removes the wall between `position` and its neighbour in `direction`.
    ///
    /// Both cells are updated together. Returns the neighbour, or `None` when the side faces the
    /// border and there is nothing to open.
    pub fn carve(&mut self, position: Position, direction: Direction) -> Option<Position> {
        let neighbor = self.dimensions.neighbor(position, direction)?;
        let from = self.dimensions.index_of(position)?;
        let to = self.dimensions.index_of(neighbor)?;

        self.walls.get_mut(from)?.remove(direction.wall());
        self.walls.get_mut(to)?.remove(direction.opposite().wall());

        Some(neighbor)
    }

    /// Neighbours reachable from `position` through open edges.
    pub fn open_neighbors(&self, position: Position) -> impl Iterator<Item = Position> + '_ {
        Direction::ALL.into_iter().filter_map(move |direction| {
            if self.has_wall(position, direction) {
                None
            } else {
                self.dimensions.neighbor(position, direction)
            }
        })
    }

    /// Counts the open internal edges, each shared wall counted once.
    #[must_use]
    pub fn open_edge_count(&self) -> usize {
        self.cells()
            .map(|cell| {
                [Direction::South, Direction::East]
                    .into_iter()
                    .filter(|&direction| {
                        !cell.has_wall(direction)
                            && self.dimensions.neighbor(cell.position, direction).is_some()
                    })
                    .count()
            })
            .sum()
    }

    /// Checks that every shared wall reads the same from both of its cells.
    #[must_use]
    pub fn walls_are_symmetric(&self) -> bool {
        self.cells().all(|cell| {
            Direction::ALL.into_iter().all(|direction| {
                self.dimensions
                    .neighbor(cell.position, direction)
                    .is_none_or(|neighbor| {
                        cell.has_wall(direction) == self.has_wall(neighbor, direction.opposite())
                    })
            })
        })
    }
}

/// Grids shared by tests across the engine.
#[cfg(test)]
pub(crate) mod fixtures {
    use super::{Dimensions, Direction, Grid, Position};

    /// 2x2 grid with (0,0)-(0,1), (0,1)-(1,1) and (1,1)-(1,0) open, leaving (0,0)-(1,0) walled.
    pub(crate) fn u_shaped_grid() -> Grid {
        let mut grid =
            Grid::closed(Dimensions::new(2, 2).expect("2x2 dimensions should be valid"));
        let _ = grid.carve(Position::new(0, 0), Direction::East);
        let _ = grid.carve(Position::new(0, 1), Direction::South);
        let _ = grid.carve(Position::new(1, 1), Direction::West);
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(rows: usize, cols: usize) -> Dimensions {
        Dimensions::new(rows, cols).expect("dimensions should be valid")
    }

    #[test]
    fn test_dimensions_bounds() {
        assert!(Dimensions::new(1, 1).is_ok());
        assert!(Dimensions::new(MAX_DIMENSION, MAX_DIMENSION).is_ok());
        assert_eq!(
            Dimensions::new(0, 5),
            Err(MazeError::InvalidDimensions { rows: 0, cols: 5 })
        );
        assert_eq!(
            Dimensions::new(5, MAX_DIMENSION + 1),
            Err(MazeError::InvalidDimensions {
                rows: 5,
                cols: MAX_DIMENSION + 1
            })
        );
    }

    #[test]
    fn test_index_round_trip_and_corner() {
        let size = dims(3, 4);

        assert_eq!(size.index_of(Position::new(2, 1)), Some(9));
        assert_eq!(size.position_of(9), Some(Position::new(2, 1)));
        assert_eq!(size.index_of(Position::new(3, 0)), None);
        assert_eq!(size.position_of(12), None);
        assert_eq!(size.far_corner(), Position::new(2, 3));
    }

    #[test]
    fn test_neighbor_on_border_and_inside() {
        let size = dims(2, 2);
        let origin = Position::new(0, 0);

        assert_eq!(size.neighbor(origin, Direction::North), None);
        assert_eq!(size.neighbor(origin, Direction::West), None);
        assert_eq!(
            size.neighbor(origin, Direction::South),
            Some(Position::new(1, 0))
        );
        assert_eq!(
            size.neighbor(origin, Direction::East),
            Some(Position::new(0, 1))
        );
        assert_eq!(size.neighbor(Position::new(1, 1), Direction::South), None);
    }

    #[test]
    fn test_opposite_is_involution() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_ne!(direction.opposite(), direction);
        }
    }

    #[test]
    fn test_carve_opens_both_sides() {
        let mut grid = Grid::closed(dims(2, 2));

        let opened = grid.carve(Position::new(0, 0), Direction::East);

        assert_eq!(opened, Some(Position::new(0, 1)));
        assert!(!grid.has_wall(Position::new(0, 0), Direction::East));
        assert!(!grid.has_wall(Position::new(0, 1), Direction::West));
        assert!(grid.has_wall(Position::new(0, 0), Direction::South));
        assert_eq!(grid.open_edge_count(), 1);
        assert!(grid.walls_are_symmetric());
    }

    #[test]
    fn test_carve_border_is_noop() {
        let mut grid = Grid::closed(dims(2, 2));

        assert_eq!(grid.carve(Position::new(0, 0), Direction::North), None);
        assert_eq!(grid, Grid::closed(dims(2, 2)));
    }

    #[test]
    fn test_open_neighbors_follow_carved_edges() {
        let mut grid = Grid::closed(dims(3, 3));
        let center = Position::new(1, 1);
        let _ = grid.carve(center, Direction::North);
        let _ = grid.carve(center, Direction::West);

        let mut reachable: Vec<Position> = grid.open_neighbors(center).collect();
        reachable.sort();

        assert_eq!(reachable, vec![Position::new(0, 1), Position::new(1, 0)]);
    }

    #[test]
    fn test_outside_positions_are_walled() {
        let grid = Grid::closed(dims(2, 2));

        assert!(grid.has_wall(Position::new(5, 5), Direction::South));
        assert!(grid.cell(Position::new(2, 0)).is_none());
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(3, 7).to_string(), "(3, 7)");
    }
}
