use super::direction::Direction;
use crate::consts;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// The snake: the cells it covers and where it is headed
///
/// All positions are relative to the top-left corner of the board.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    /// The cells occupied by the snake, head first
    pub(super) cells: VecDeque<Position>,

    /// The direction in which the snake last moved (or will first move)
    pub(super) direction: Direction,
}

impl Snake {
    /// Create a snake in the starting configuration: two cells in the middle
    /// row, facing right.
    pub(super) fn initial() -> Snake {
        Snake {
            cells: VecDeque::from(consts::INITIAL_SNAKE),
            direction: consts::INITIAL_DIRECTION,
        }
    }

    pub(super) fn head(&self) -> Position {
        self.cells[0]
    }

    pub(super) fn cells(&self) -> &VecDeque<Position> {
        &self.cells
    }

    pub(super) fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    /// Return the cell the head would move to next, or `None` if that would
    /// leave the board.
    pub(super) fn next_head(&self) -> Option<Position> {
        self.direction.advance(self.head(), consts::BOARD_SIZE)
    }

    /// Move the head to `head`, which must be adjacent to the current head.
    /// Unless `grow` is true, the tail cell is vacated.
    pub(super) fn slither(&mut self, head: Position, grow: bool) {
        self.cells.push_front(head);
        if !grow {
            let _ = self.cells.pop_back();
        }
    }
}
