//! Assorted constants & hard-coded configuration
use crate::game::Direction;
use ratatui::layout::{Position, Size};
use std::time::Duration;

/// Time between movements of the snake
pub(crate) const TICK_PERIOD: Duration = Duration::from_millis(110);

/// How long the "New High Score!" notice stays on screen
pub(crate) const HIGH_SCORE_NOTICE_PERIOD: Duration = Duration::from_millis(2200);

/// Width & height of the (square) board, in cells
pub(crate) const BOARD_SIZE: u16 = 20;

/// The cells of a new snake, head first
pub(crate) const INITIAL_SNAKE: [Position; 2] = [Position { x: 8, y: 10 }, Position { x: 7, y: 10 }];

/// The direction a new snake starts out moving in
pub(crate) const INITIAL_DIRECTION: Direction = Direction::Right;

/// Key under which the high score is kept in the key-value store
pub(crate) const HIGH_SCORE_KEY: &str = "highScore-snake-v1";

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Number of terminal columns used to draw one board cell
pub(crate) const CELL_WIDTH: u16 = 2;

/// Approximate pixel width of a terminal column, for swipe detection
pub(crate) const COLUMN_PIXELS: i32 = 8;

/// Approximate pixel height of a terminal row, for swipe detection
pub(crate) const ROW_PIXELS: i32 = 16;

/// A drag must travel at least this many pixels along one axis to count as a
/// swipe.
pub(crate) const SWIPE_THRESHOLD_PIXELS: i32 = 30;

/// Glyph for the snake's head when it is moving up
pub(crate) const SNAKE_HEAD_UP_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving down
pub(crate) const SNAKE_HEAD_DOWN_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving right
pub(crate) const SNAKE_HEAD_RIGHT_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving left
pub(crate) const SNAKE_HEAD_LEFT_SYMBOL: char = '>';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: char = '●';

/// Glyph for an unoccupied cell
pub(crate) const EMPTY_SYMBOL: char = '·';

/// Glyph for the snake's head once the game is over
pub(crate) const COLLISION_SYMBOL: char = '×';
