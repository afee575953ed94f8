use crate::consts;
use crate::game::Direction;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

/// Turns left-button mouse drags into steering directions, standing in for
/// swipes on a touchscreen.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct SwipeTracker {
    /// Where the current swipe started, in pixels
    start: Option<(i32, i32)>,
}

impl SwipeTracker {
    pub(crate) fn new() -> SwipeTracker {
        SwipeTracker::default()
    }

    /// Feed a mouse event to the tracker.  Returns `Some` once a drag has
    /// travelled far enough to count as a swipe, after which the next drag
    /// event starts a new swipe.
    pub(crate) fn handle_mouse(&mut self, ev: MouseEvent) -> Option<Direction> {
        let point = to_pixels(ev.column, ev.row);
        match ev.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.start = Some(point);
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some((x0, y0)) = self.start else {
                    self.start = Some(point);
                    return None;
                };
                let direction = swipe_direction(point.0 - x0, point.1 - y0)?;
                self.start = None;
                Some(direction)
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.start = None;
                None
            }
            _ => None,
        }
    }
}

fn to_pixels(column: u16, row: u16) -> (i32, i32) {
    (
        i32::from(column) * consts::COLUMN_PIXELS,
        i32::from(row) * consts::ROW_PIXELS,
    )
}

/// Classify a displacement as a swipe along its dominant axis.  Ties go to the
/// vertical axis.
fn swipe_direction(dx: i32, dy: i32) -> Option<Direction> {
    let threshold = consts::SWIPE_THRESHOLD_PIXELS;
    if dx.abs() < threshold && dy.abs() < threshold {
        None
    } else if dx.abs() > dy.abs() {
        Some(if dx > 0 {
            Direction::Right
        } else {
            Direction::Left
        })
    } else if dy > 0 {
        Some(Direction::Down)
    } else {
        Some(Direction::Up)
    }
}
