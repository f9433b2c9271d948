use super::paused::Paused;
use crate::consts;
use crate::engine::{Coordinate, Direction, Grid, Outcome, Snapshot};
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Margin, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
};

/// Everything needed to draw one frame of a game
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct GameView {
    pub(super) grid: Grid,
    pub(super) snapshot: Snapshot,
    pub(super) outcome: Outcome,
    pub(super) paused: Option<Paused>,
}

impl GameView {
    /// The smallest area in which a game on `grid` can be drawn: the bordered
    /// grid plus two message lines
    pub(super) fn min_size(grid: Grid) -> Size {
        Size {
            width: grid.width.saturating_add(2),
            height: grid.height.saturating_add(4),
        }
    }
}

impl Widget for GameView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let need = GameView::min_size(self.grid);
        if area.width < need.width || area.height < need.height {
            render_too_small(need, area, buf);
            return;
        }
        let [block_area, msg1_area, msg2_area] =
            Layout::vertical([need.height.saturating_sub(2), 1, 1])
                .flex(Flex::Center)
                .areas(area);
        let [block_area] = Layout::horizontal([need.width])
            .flex(Flex::Center)
            .areas(block_area);

        Block::bordered()
            .title(format!(" Score: {} ", self.snapshot.score))
            .render(block_area, buf);
        let mut level = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
        };
        level.draw_cell(self.snapshot.food, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
        let behind_head = self.snapshot.body.get(1..).unwrap_or_default();
        if let Some((&tail, middle)) = behind_head.split_last() {
            for &pos in middle {
                level.draw_cell(pos, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
            }
            level.draw_cell(tail, consts::SNAKE_TAIL_SYMBOL, consts::SNAKE_STYLE);
        }
        // Draw the head last so that, if it's a collision, we overwrite
        // whatever it's colliding with, including the border
        if let Some(head) = self.snapshot.head() {
            if matches!(self.outcome, Outcome::Collided(_)) {
                level.draw_cell(head, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
            } else {
                level.draw_cell(head, head_symbol(self.snapshot.direction), consts::SNAKE_STYLE);
            }
        }

        if self.snapshot.game_over {
            let headline = match self.outcome {
                Outcome::Exhausted => "You filled the grid!",
                Outcome::Running | Outcome::Collided(_) => "GAME OVER!",
            };
            Span::from(format!(
                " {headline} Final score: {}",
                self.snapshot.score
            ))
            .render(msg1_area, buf);
            restart_or_quit().render(msg2_area, buf);
        }

        if let Some(paused) = self.paused {
            let pause_area = center_rect(
                block_area,
                Size {
                    width: Paused::WIDTH,
                    height: Paused::HEIGHT,
                },
            );
            paused.render(pause_area, buf);
        }
    }
}

fn render_too_small(need: Size, area: Rect, buf: &mut Buffer) {
    let [line1, line2] = Layout::vertical([1, 1]).flex(Flex::Start).areas(area);
    Line::from(" Terminal too small").render(line1, buf);
    Line::from(format!(
        " Need at least {}×{}, have {}×{}",
        need.width, need.height, area.width, area.height
    ))
    .render(line2, buf);
}

fn restart_or_quit() -> Line<'static> {
    Line::from_iter([
        Span::raw(" Restart ("),
        Span::styled("r", consts::KEY_STYLE),
        Span::raw(") — Quit ("),
        Span::styled("q", consts::KEY_STYLE),
        Span::raw(")"),
    ])
}

/// Return the glyph to use for drawing the snake's head
fn head_symbol(direction: Direction) -> char {
    match direction {
        Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
        Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
        Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
        Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
    }
}

/// A view of the buffer in which grid coordinates are relative to the
/// top-left cell of the level.  Coordinates one step outside the level land
/// on its border.
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Coordinate, symbol: char, style: Style) {
        let Ok(x) = u16::try_from(i32::from(self.area.x).saturating_add(pos.x)) else {
            return;
        };
        let Ok(y) = u16::try_from(i32::from(self.area.y).saturating_add(pos.y)) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(style);
        }
    }
}
