use crate::consts;
use crate::game::{Direction, GameState, Snapshot};
use crate::theme::{Palette, Theme};
use crate::util::{center_rect, get_display_area};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect, Size},
    style::Style,
    text::Line,
    widgets::{Block, Widget},
};

/// Widget drawing the whole game screen: score bar, board & status line
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GameView<'a> {
    snapshot: Snapshot<'a>,
    palette: Palette,
    /// Whether the "New High Score!" notice is currently active
    notice: bool,
}

impl<'a> GameView<'a> {
    pub(crate) fn new(snapshot: Snapshot<'a>, theme: Theme, notice: bool) -> GameView<'a> {
        GameView {
            snapshot,
            palette: theme.palette(),
            notice,
        }
    }

    fn status_line(&self) -> Line<'static> {
        let snap = &self.snapshot;
        match snap.state {
            GameState::Idle => Line::styled(" Press Space or Enter to begin", self.palette.status),
            GameState::Running | GameState::Paused if self.notice => {
                Line::styled(" New High Score!", self.palette.notice)
            }
            GameState::Running => Line::styled(
                " Move: ←↓↑→/wasd  Pause: Space  Reset: r  Theme: t  Quit: q",
                self.palette.status,
            ),
            GameState::Paused => {
                Line::styled(" Paused: press Space to resume", self.palette.status)
            }
            GameState::Over => Line::styled(
                format!(" Game Over! Score: {}  Press Space to play again", snap.score),
                self.palette.status,
            ),
        }
    }
}

impl Widget for GameView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let snap = &self.snapshot;

        let score_area = Rect {
            height: display.height.min(1),
            ..display
        };
        Line::styled(format!(" Score: {}", snap.score), self.palette.score_bar)
            .render(score_area, buf);
        Line::styled(format!("Best: {} ", snap.high_score), self.palette.score_bar)
            .right_aligned()
            .render(score_area, buf);

        let board_area = Rect {
            y: display.y.saturating_add(1),
            height: display.height.saturating_sub(2),
            ..display
        };
        let block_area = center_rect(
            board_area,
            Size {
                width: consts::BOARD_SIZE * consts::CELL_WIDTH + 2,
                height: consts::BOARD_SIZE + 2,
            },
        );
        let block = Block::bordered().style(self.palette.board);
        let board_inner = block.inner(block_area);
        block.render(block_area, buf);
        let mut canvas = Canvas {
            area: board_inner,
            buf: &mut *buf,
        };
        for pos in Rect::new(0, 0, consts::BOARD_SIZE, consts::BOARD_SIZE).positions() {
            canvas.draw_cell(pos, consts::EMPTY_SYMBOL, self.palette.empty);
        }
        if let Some(food) = snap.food {
            canvas.draw_cell(food, consts::FOOD_SYMBOL, self.palette.food);
        }
        for &p in snap.snake.iter().skip(1) {
            canvas.draw_cell(p, consts::SNAKE_BODY_SYMBOL, self.palette.snake);
        }
        // Draw the head last so that, if it's a collision, we overwrite
        // whatever it's colliding with
        if let Some(head) = snap.head() {
            if snap.state == GameState::Over {
                canvas.draw_cell(head, consts::COLLISION_SYMBOL, self.palette.collision);
            } else {
                canvas.draw_cell(head, head_symbol(snap.direction), self.palette.head);
            }
        }

        let status_area = Rect {
            y: display.bottom().saturating_sub(1),
            height: display.height.min(1),
            ..display
        };
        self.status_line().render(status_area, buf);
    }
}

fn head_symbol(direction: Direction) -> char {
    match direction {
        Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
        Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
        Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
        Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
    }
}

/// The inner area of the board, addressed in board cells
#[derive(Debug)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        let Some(x) = pos
            .x
            .checked_mul(consts::CELL_WIDTH)
            .and_then(|x| x.checked_add(self.area.x))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y).filter(|&y| y < self.area.bottom()) else {
            return;
        };
        for dx in 0..consts::CELL_WIDTH {
            let Some(cx) = x.checked_add(dx).filter(|&cx| cx < self.area.right()) else {
                return;
            };
            if let Some(cell) = self.buf.cell_mut((cx, y)) {
                cell.set_char(if dx == 0 { symbol } else { ' ' });
                cell.set_style(style);
            }
        }
    }
}
