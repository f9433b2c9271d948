use super::food::{Food, FoodError};
use super::geometry::{Coordinate, Direction, Grid};
use super::settings::Settings;
use super::snake::{Collision, Snake};
use rand::Rng;
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;

/// The complete simulation state of a game: the snake, the food, the score,
/// and the current tick interval.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GameBoard<R> {
    rng: R,
    settings: Settings,
    snake: Snake,
    food: Food,
    score: u32,
    outcome: Outcome,
    current_speed: Duration,
}

impl<R: Rng> GameBoard<R> {
    /// Start a new game.
    ///
    /// # Errors
    ///
    /// Returns `Err` if there is no room on the grid for the first food.
    pub(crate) fn new(settings: Settings, mut rng: R) -> Result<GameBoard<R>, BoardError> {
        let (snake, food) = Self::fresh_pieces(settings, &mut rng)?;
        Ok(GameBoard {
            rng,
            settings,
            snake,
            food,
            score: 0,
            outcome: Outcome::Running,
            current_speed: settings.initial_speed(),
        })
    }

    fn fresh_pieces(settings: Settings, rng: &mut R) -> Result<(Snake, Food), BoardError> {
        let snake = Snake::new(settings.grid().center(), settings.initial_length());
        let occupied = snake.body().collect::<HashSet<_>>();
        let food = Food::generate_random(settings.grid(), &occupied, rng)?;
        Ok((snake, food))
    }

    /// Advance the game by one tick.  Does nothing once the game is over.
    ///
    /// The snake moves first; a collision ends the game before any food on
    /// the new head cell is counted.
    pub(crate) fn update(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.snake.advance();
        if let Some(collision) = self.snake.collision(self.settings.grid()) {
            self.outcome = Outcome::Collided(collision);
            tracing::info!(
                ?collision,
                score = self.score,
                length = self.snake.len(),
                "Game over"
            );
            return;
        }
        if self.snake.head() == self.food.position() {
            self.snake.grow();
            self.score += 1;
            self.current_speed = self.settings.next_speed(self.current_speed);
            let occupied = self.snake.body().collect::<HashSet<_>>();
            match Food::generate_random(self.settings.grid(), &occupied, &mut self.rng) {
                Ok(food) => {
                    self.food = food;
                    tracing::debug!(
                        score = self.score,
                        speed = ?self.current_speed,
                        food = ?self.food.position(),
                        "Food eaten"
                    );
                }
                Err(FoodError::NoFreeCell) => {
                    self.outcome = Outcome::Exhausted;
                    tracing::info!(score = self.score, "Snake filled the grid; game over");
                }
            }
        }
    }

    /// Discard the current game and start over with the same settings
    ///
    /// # Errors
    ///
    /// Returns `Err` if there is no room on the grid for the first food.
    pub(crate) fn reset(&mut self) -> Result<(), BoardError> {
        let (snake, food) = Self::fresh_pieces(self.settings, &mut self.rng)?;
        tracing::info!(previous_score = self.score, "Resetting game");
        self.snake = snake;
        self.food = food;
        self.score = 0;
        self.outcome = Outcome::Running;
        self.current_speed = self.settings.initial_speed();
        Ok(())
    }
}

impl<R> GameBoard<R> {
    pub(crate) fn request_direction_change(&mut self, direction: Direction) {
        self.snake.request_direction_change(direction);
    }

    /// Return an owned copy of everything needed to draw the board
    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            body: self.snake.body_snapshot(),
            food: self.food.position(),
            score: self.score,
            game_over: self.is_game_over(),
            direction: self.snake.direction(),
        }
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    /// Time to wait before the next call to [`GameBoard::update()`]
    pub(crate) fn current_speed(&self) -> Duration {
        self.current_speed
    }

    pub(crate) fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub(crate) fn is_game_over(&self) -> bool {
        self.outcome != Outcome::Running
    }

    pub(crate) fn grid(&self) -> Grid {
        self.settings.grid()
    }
}

/// How a game stands
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Outcome {
    Running,
    Collided(Collision),
    /// The snake has filled the grid and there is nowhere left to place
    /// food.
    Exhausted,
}

/// A read-only view of a [`GameBoard`] for rendering
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snapshot {
    /// The snake's cells, head first
    pub(crate) body: Vec<Coordinate>,
    pub(crate) food: Coordinate,
    pub(crate) score: u32,
    pub(crate) game_over: bool,
    pub(crate) direction: Direction,
}

impl Snapshot {
    pub(crate) fn head(&self) -> Option<Coordinate> {
        self.body.first().copied()
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum BoardError {
    #[error("grid has no room for food")]
    NoFreeCell(#[from] FoodError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::collections::VecDeque;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn new_board(settings: Settings) -> GameBoard<ChaCha12Rng> {
        GameBoard::new(settings, ChaCha12Rng::seed_from_u64(RNG_SEED))
            .expect("board should have room for food")
    }

    fn coords<const N: usize>(cells: [(i32, i32); N]) -> Vec<Coordinate> {
        cells.into_iter().map(|(x, y)| Coordinate::new(x, y)).collect()
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn settings(width: u16, height: u16, initial_length: u16) -> Settings {
        Settings::new(
            Grid::new(width, height),
            ms(600),
            ms(50),
            ms(5),
            initial_length,
        )
        .expect("test settings should be valid")
    }

    /// Replace the food with one at `pos`
    fn park_food(board: &mut GameBoard<ChaCha12Rng>, pos: Coordinate) {
        board.food = Food::new(pos);
    }

    #[test]
    fn new_board_state() {
        let board = new_board(Settings::default());
        let snap = board.snapshot();
        assert_eq!(snap.body, coords([(10, 10)]));
        assert_ne!(snap.food, Coordinate::new(10, 10));
        assert!(board.grid().contains(snap.food));
        assert_eq!(snap.score, 0);
        assert!(!snap.game_over);
        assert_eq!(snap.direction, Direction::Right);
        assert_eq!(board.current_speed(), ms(600));
        assert_eq!(board.outcome(), Outcome::Running);
    }

    #[test]
    fn first_moves_grow_to_initial_length() {
        let mut board = new_board(Settings::default());
        park_food(&mut board, Coordinate::new(0, 0));
        board.update();
        board.update();
        assert_eq!(board.snapshot().body, coords([(12, 10), (11, 10), (10, 10)]));
        board.update();
        assert_eq!(board.snapshot().body, coords([(13, 10), (12, 10), (11, 10)]));
        assert_eq!(board.score(), 0);
    }

    #[test]
    fn move_without_turn_drops_tail() {
        let mut board = new_board(Settings::default());
        park_food(&mut board, Coordinate::new(0, 0));
        board.snake.body = VecDeque::from(coords([(10, 10), (9, 10), (8, 10)]));
        board.snake.grow_pending = 0;
        board.update();
        assert_eq!(board.snapshot().body, coords([(11, 10), (10, 10), (9, 10)]));
    }

    #[test]
    fn wall_collision_ends_game() {
        let mut board = new_board(settings(20, 20, 1));
        board.snake.body = VecDeque::from(coords([(0, 0)]));
        board.snake.direction = Direction::Left;
        board.snake.next_direction = Direction::Left;
        park_food(&mut board, Coordinate::new(5, 5));
        board.update();
        assert_eq!(board.outcome(), Outcome::Collided(Collision::Wall));
        let snap = board.snapshot();
        assert!(snap.game_over);
        assert_eq!(snap.score, 0);
        // The fatal head position is not rolled back
        assert_eq!(snap.head(), Some(Coordinate::new(-1, 0)));
    }

    #[test]
    fn updates_after_game_over_are_no_ops() {
        let mut board = new_board(settings(20, 20, 1));
        board.snake.body = VecDeque::from(coords([(19, 4)]));
        board.update();
        assert!(board.is_game_over());
        let before = board.clone();
        for _ in 0..5 {
            board.update();
        }
        assert_eq!(board, before);
    }

    #[test]
    fn eat_food() {
        let mut board = new_board(settings(20, 20, 1));
        board.snake.body = VecDeque::from(coords([(10, 10), (9, 10), (8, 10)]));
        park_food(&mut board, Coordinate::new(11, 10));
        board.update();
        let snap = board.snapshot();
        assert_eq!(snap.score, 1);
        assert!(!snap.game_over);
        // Growth is realised on the next move
        assert_eq!(snap.body, coords([(11, 10), (10, 10), (9, 10)]));
        assert!(!snap.body.contains(&snap.food));
        assert!(board.grid().contains(snap.food));
        assert_eq!(board.current_speed(), ms(595));
        park_food(&mut board, Coordinate::new(0, 0));
        board.update();
        assert_eq!(
            board.snapshot().body,
            coords([(12, 10), (11, 10), (10, 10), (9, 10)])
        );
    }

    #[test]
    fn collision_beats_food() {
        let mut board = new_board(settings(20, 20, 1));
        board.snake.body = VecDeque::from(coords([(5, 5), (6, 5), (6, 6), (5, 6), (4, 6)]));
        board.snake.direction = Direction::Left;
        board.snake.next_direction = Direction::Left;
        board.request_direction_change(Direction::Down);
        // Food can't normally be under the body, but if the head lands on
        // both, the collision wins.
        park_food(&mut board, Coordinate::new(5, 6));
        board.update();
        assert_eq!(board.outcome(), Outcome::Collided(Collision::SelfBite));
        assert_eq!(board.score(), 0);
        assert_eq!(board.current_speed(), ms(600));
    }

    #[test]
    fn speed_never_drops_below_minimum() {
        let settings = Settings::new(Grid::new(30, 3), ms(70), ms(50), ms(8), 1)
            .expect("test settings should be valid");
        let mut board = new_board(settings);
        board.snake.body = VecDeque::from(coords([(0, 1)]));
        let mut last_speed = board.current_speed();
        let mut last_score = board.score();
        for x in 1..10 {
            park_food(&mut board, Coordinate::new(x, 1));
            board.update();
            assert!(!board.is_game_over());
            assert!(board.score() > last_score);
            assert!(board.current_speed() <= last_speed);
            assert!(board.current_speed() >= ms(50));
            last_speed = board.current_speed();
            last_score = board.score();
        }
        assert_eq!(board.current_speed(), ms(50));
        assert_eq!(board.score(), 9);
    }

    #[test]
    fn direction_request_reaches_snake() {
        let mut board = new_board(Settings::default());
        park_food(&mut board, Coordinate::new(0, 0));
        board.request_direction_change(Direction::Left);
        board.update();
        assert_eq!(board.snapshot().direction, Direction::Right);
        board.request_direction_change(Direction::Down);
        board.update();
        assert_eq!(board.snapshot().direction, Direction::Down);
        assert_eq!(board.snapshot().head(), Some(Coordinate::new(11, 11)));
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut board = new_board(settings(20, 20, 3));
        board.snake.body = VecDeque::from(coords([(10, 10), (9, 10), (8, 10)]));
        park_food(&mut board, Coordinate::new(11, 10));
        board.update();
        board.snake.body = VecDeque::from(coords([(19, 0)]));
        board.update();
        assert!(board.is_game_over());
        assert_eq!(board.score(), 1);
        board.reset().expect("reset should find room for food");
        let snap = board.snapshot();
        assert_eq!(snap.body, coords([(10, 10)]));
        assert_eq!(snap.score, 0);
        assert!(!snap.game_over);
        assert_eq!(snap.direction, Direction::Right);
        assert_eq!(board.current_speed(), ms(600));
        assert_eq!(board.snake.grow_pending, 2);
    }

    #[test]
    fn filling_the_grid_exhausts_it() {
        let mut board = new_board(settings(3, 1, 1));
        board.snake.body = VecDeque::from(coords([(1, 0), (0, 0)]));
        board.snake.grow_pending = 1;
        park_food(&mut board, Coordinate::new(2, 0));
        board.update();
        assert_eq!(board.outcome(), Outcome::Exhausted);
        assert!(board.snapshot().game_over);
        assert_eq!(board.score(), 1);
    }

    #[test]
    fn no_room_for_first_food() {
        let r = GameBoard::new(settings(1, 1, 1), ChaCha12Rng::seed_from_u64(RNG_SEED));
        assert_eq!(r, Err(BoardError::NoFreeCell(FoodError::NoFreeCell)));
    }

    #[test]
    fn snapshot_does_not_alias_state() {
        let board = new_board(Settings::default());
        let mut snap = board.snapshot();
        snap.body.clear();
        snap.score = 99;
        assert_eq!(board.snapshot().body.len(), 1);
        assert_eq!(board.score(), 0);
    }
}
