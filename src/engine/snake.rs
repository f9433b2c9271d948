use super::geometry::{translate, Coordinate, Direction, Grid};
use std::collections::VecDeque;
use std::num::NonZeroU16;

/// The snake: its body, heading, and pending growth.
///
/// Death is not recorded here; the board decides that from
/// [`Snake::collision()`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The cells occupied by the snake, head first
    pub(super) body: VecDeque<Coordinate>,

    /// The direction applied on the most recent step
    pub(super) direction: Direction,

    /// The direction that will be applied on the next step
    pub(super) next_direction: Direction,

    /// Number of upcoming steps on which the tail stays put
    pub(super) grow_pending: u32,
}

impl Snake {
    /// Create a snake consisting of just its head at `start`, facing right.
    /// The rest of its `initial_length` grows out over the first moves.
    pub(crate) fn new(start: Coordinate, initial_length: NonZeroU16) -> Snake {
        Snake {
            body: VecDeque::from([start]),
            direction: Direction::Right,
            next_direction: Direction::Right,
            grow_pending: u32::from(initial_length.get() - 1),
        }
    }

    pub(crate) fn head(&self) -> Coordinate {
        self.body.front().copied().unwrap_or_default()
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    #[cfg(test)]
    pub(crate) fn next_direction(&self) -> Direction {
        self.next_direction
    }

    pub(crate) fn len(&self) -> usize {
        self.body.len()
    }

    /// Iterate over the cells of the snake, head first
    pub(crate) fn body(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.body.iter().copied()
    }

    /// Return a copy of the snake's cells, head first
    pub(crate) fn body_snapshot(&self) -> Vec<Coordinate> {
        self.body().collect()
    }

    /// Queue a turn for the next step.  A request to reverse straight back
    /// into the snake's neck is ignored.
    pub(crate) fn request_direction_change(&mut self, direction: Direction) {
        if direction.opposite() != self.direction {
            self.next_direction = direction;
        }
    }

    /// Move the snake forwards one cell.  The tail is kept if growth is
    /// pending.
    pub(crate) fn advance(&mut self) {
        self.direction = self.next_direction;
        let new_head = translate(self.head(), self.direction);
        self.body.push_front(new_head);
        if self.grow_pending > 0 {
            self.grow_pending -= 1;
        } else {
            let _ = self.body.pop_back();
        }
    }

    /// Lengthen the snake by one cell over its next move
    pub(crate) fn grow(&mut self) {
        self.grow_pending = self.grow_pending.saturating_add(1);
    }

    /// Report whether the head has left `grid` or bitten the body.  Leaving
    /// the grid takes precedence.
    pub(crate) fn collision(&self, grid: Grid) -> Option<Collision> {
        let head = self.head();
        if !grid.contains(head) {
            Some(Collision::Wall)
        } else if self.body.iter().skip(1).any(|&p| p == head) {
            Some(Collision::SelfBite)
        } else {
            None
        }
    }

    #[cfg(test)]
    pub(crate) fn check_collision(&self, grid: Grid) -> bool {
        self.collision(grid).is_some()
    }
}

/// What the snake ran into
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Collision {
    Wall,
    SelfBite,
}
