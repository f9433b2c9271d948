//! The game simulation: snake, food, and board state, independent of how
//! the game is displayed or controlled.
mod board;
mod food;
mod geometry;
mod settings;
mod snake;
pub(crate) use self::board::{BoardError, GameBoard, Outcome, Snapshot};
pub(crate) use self::geometry::{Coordinate, Direction, Grid};
pub(crate) use self::settings::{Settings, SettingsError};
#[cfg(test)]
pub(crate) use self::snake::Collision;
