use super::geometry::Grid;
use std::num::NonZeroU16;
use std::time::Duration;
use thiserror::Error;

/// Validated parameters of a game
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Settings {
    grid: Grid,
    initial_speed: Duration,
    min_speed: Duration,
    speed_step: Duration,
    initial_length: NonZeroU16,
}

impl Settings {
    pub(crate) const DEFAULT_GRID: Grid = Grid::new(20, 20);
    pub(crate) const DEFAULT_INITIAL_SPEED: Duration = Duration::from_millis(600);
    pub(crate) const DEFAULT_MIN_SPEED: Duration = Duration::from_millis(50);
    pub(crate) const DEFAULT_SPEED_STEP: Duration = Duration::from_millis(5);
    pub(crate) const DEFAULT_INITIAL_LENGTH: u16 = 3;

    /// Construct a `Settings`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the grid has no cells, if `initial_length` is zero,
    /// if `min_speed` is zero, or if `min_speed` is longer than
    /// `initial_speed`.
    pub(crate) fn new(
        grid: Grid,
        initial_speed: Duration,
        min_speed: Duration,
        speed_step: Duration,
        initial_length: u16,
    ) -> Result<Settings, SettingsError> {
        if grid.width == 0 || grid.height == 0 {
            return Err(SettingsError::EmptyGrid {
                width: grid.width,
                height: grid.height,
            });
        }
        let initial_length = NonZeroU16::new(initial_length).ok_or(SettingsError::ZeroLength)?;
        if min_speed.is_zero() {
            return Err(SettingsError::ZeroMinSpeed);
        }
        if min_speed > initial_speed {
            return Err(SettingsError::MinAboveInitial {
                min_speed,
                initial_speed,
            });
        }
        Ok(Settings {
            grid,
            initial_speed,
            min_speed,
            speed_step,
            initial_length,
        })
    }

    pub(crate) fn grid(&self) -> Grid {
        self.grid
    }

    /// Time between ticks at the start of a game
    pub(crate) fn initial_speed(&self) -> Duration {
        self.initial_speed
    }

    /// Shortest time between ticks that the game will speed up to
    pub(crate) fn min_speed(&self) -> Duration {
        self.min_speed
    }

    /// Amount by which the time between ticks shrinks per food eaten
    pub(crate) fn speed_step(&self) -> Duration {
        self.speed_step
    }

    pub(crate) fn initial_length(&self) -> NonZeroU16 {
        self.initial_length
    }

    /// Return the tick interval that follows `speed` after a food is eaten
    pub(crate) fn next_speed(&self, speed: Duration) -> Duration {
        speed.saturating_sub(self.speed_step).max(self.min_speed)
    }
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            grid: Settings::DEFAULT_GRID,
            initial_speed: Settings::DEFAULT_INITIAL_SPEED,
            min_speed: Settings::DEFAULT_MIN_SPEED,
            speed_step: Settings::DEFAULT_SPEED_STEP,
            initial_length: NonZeroU16::MIN.saturating_add(Settings::DEFAULT_INITIAL_LENGTH - 1),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum SettingsError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: u16, height: u16 },
    #[error("initial snake length must be at least 1")]
    ZeroLength,
    #[error("minimum tick interval must be nonzero")]
    ZeroMinSpeed,
    #[error("minimum tick interval ({min_speed:?}) is longer than initial tick interval ({initial_speed:?})")]
    MinAboveInitial {
        min_speed: Duration,
        initial_speed: Duration,
    },
}
