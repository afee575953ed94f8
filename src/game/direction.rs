use ratatui::layout::Position;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The unit `(dx, dy)` offset of one step in this direction.  `y` grows
    /// downwards.
    pub(crate) fn delta(self) -> (i16, i16) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub(crate) fn is_opposite(self, other: Direction) -> bool {
        self.reverse() == other
    }

    /// Return the cell one step from `pos` in this direction on a square
    /// board with sides of length `size`, or `None` if the step would leave
    /// the board.
    pub(crate) fn advance(self, pos: Position, size: u16) -> Option<Position> {
        let (dx, dy) = self.delta();
        let x = step_in_bounds(pos.x, dx, size)?;
        let y = step_in_bounds(pos.y, dy, size)?;
        Some(Position { x, y })
    }
}

fn step_in_bounds(coord: u16, delta: i16, size: u16) -> Option<u16> {
    coord.checked_add_signed(delta).filter(|&c| c < size)
}
