mod paused;
mod view;
use self::paused::{PauseOpt, Paused};
use self::view::GameView;
use crate::app::Screen;
use crate::command::Command;
use crate::engine::{BoardError, Direction, GameBoard, Settings};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget, Frame};
use std::io;
use std::time::Instant;

/// The game screen: drives a [`GameBoard`] from a timer and the keyboard
#[derive(Clone, Debug)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    board: GameBoard<R>,
    state: GameState,
    next_tick: Option<Instant>,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(settings: Settings) -> Result<Self, BoardError> {
        Game::new_with_rng(settings, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(settings: Settings, rng: R) -> Result<Game<R>, BoardError> {
        Ok(Game {
            board: GameBoard::new(settings, rng)?,
            state: GameState::Running,
            next_tick: None,
        })
    }

    /// Wait for either the next tick or the next input event, whichever
    /// comes first, and handle it.  Returns `Some` if the app should switch
    /// screens.
    pub(crate) fn process_input(&mut self) -> io::Result<Option<Screen>> {
        if self.ticking() {
            // Re-armed after every tick so that speed-ups apply immediately
            let when = *self
                .next_tick
                .get_or_insert_with(|| Instant::now() + self.board.current_speed());
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.tick();
                Ok(None)
            } else {
                Ok(self.handle_event(read()?))
            }
        } else {
            Ok(self.handle_event(read()?))
        }
    }

    fn tick(&mut self) {
        self.board.update();
        self.next_tick = None;
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        if event == Event::FocusLost {
            if self.ticking() {
                self.pause();
            }
            return None;
        }
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        match self.state {
            GameState::Running if self.board.is_game_over() => match cmd {
                Command::Restart | Command::Enter => self.restart(),
                Command::Q | Command::Quit => return Some(Screen::Quit),
                _ => (),
            },
            GameState::Running => match cmd {
                Command::Up => self.board.request_direction_change(Direction::Up),
                Command::Down => self.board.request_direction_change(Direction::Down),
                Command::Left => self.board.request_direction_change(Direction::Left),
                Command::Right => self.board.request_direction_change(Direction::Right),
                Command::Pause => self.pause(),
                Command::Restart => self.restart(),
                Command::Q | Command::Quit => return Some(Screen::Quit),
                _ => (),
            },
            GameState::Paused(ref mut paused) => match paused.handle_command(cmd)? {
                PauseOpt::Resume => self.resume(),
                PauseOpt::Restart => self.restart(),
                PauseOpt::Quit => return Some(Screen::Quit),
            },
        }
        None
    }

    fn restart(&mut self) {
        match self.board.reset() {
            Ok(()) => {
                self.state = GameState::Running;
                self.next_tick = None;
            }
            Err(e) => tracing::error!(error = %e, "Failed to restart game"),
        }
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    /// Is the game clock running?
    fn ticking(&self) -> bool {
        self.state == GameState::Running && !self.board.is_game_over()
    }

    fn pause(&mut self) {
        tracing::debug!(score = self.board.score(), "Game paused");
        self.state = GameState::Paused(Paused::new());
    }

    fn resume(&mut self) {
        tracing::debug!("Game resumed");
        self.state = GameState::Running;
        self.next_tick = None;
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let paused = match self.state {
            GameState::Running => None,
            GameState::Paused(paused) => Some(paused),
        };
        GameView {
            grid: self.board.grid(),
            snapshot: self.board.snapshot(),
            outcome: self.board.outcome(),
            paused,
        }
        .render(area, buf);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum GameState {
    Running,
    Paused(Paused),
}
