/// The address of a cell on the grid.
///
/// Coordinates are signed so that a snake that has just run off the edge of
/// the grid still has a meaningful head position.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct Coordinate {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Coordinate {
    pub(crate) const fn new(x: i32, y: i32) -> Coordinate {
        Coordinate { x, y }
    }
}

/// One of the four directions in which the snake can move.  `Up` is toward
/// row 0.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the unit vector `(dx, dy)` for this direction
    pub(crate) fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Return the direction that reverses this one
    pub(crate) fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Return the coordinate one cell away from `pos` in direction `dir`
pub(crate) fn translate(pos: Coordinate, dir: Direction) -> Coordinate {
    let (dx, dy) = dir.delta();
    Coordinate {
        x: pos.x.saturating_add(dx),
        y: pos.y.saturating_add(dy),
    }
}

/// The extent of the playing field: cells `[0, width) x [0, height)`
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Grid {
    pub(crate) width: u16,
    pub(crate) height: u16,
}

impl Grid {
    pub(crate) const fn new(width: u16, height: u16) -> Grid {
        Grid { width, height }
    }

    pub(crate) fn contains(self, pos: Coordinate) -> bool {
        (0..i32::from(self.width)).contains(&pos.x) && (0..i32::from(self.height)).contains(&pos.y)
    }

    pub(crate) fn center(self) -> Coordinate {
        Coordinate::new(i32::from(self.width / 2), i32::from(self.height / 2))
    }

    /// Total number of cells in the grid
    pub(crate) fn area(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Iterate over every cell of the grid, row by row
    pub(crate) fn cells(self) -> impl Iterator<Item = Coordinate> {
        let width = i32::from(self.width);
        (0..i32::from(self.height)).flat_map(move |y| (0..width).map(move |x| Coordinate::new(x, y)))
    }
}
