use crate::consts;
use ratatui::layout::{Flex, Layout, Rect, Size};

/// Return the region of `buffer_area` in which to draw everything: a
/// [`consts::DISPLAY_SIZE`] rectangle in the middle, or all of `buffer_area`
/// if it is smaller than that.
pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    let [display] = Layout::horizontal([consts::DISPLAY_SIZE.width])
        .flex(Flex::Center)
        .areas(buffer_area);
    let [display] = Layout::vertical([consts::DISPLAY_SIZE.height])
        .flex(Flex::Center)
        .areas(display);
    display
}

/// Return a `Rect` of the given size centered within `area`, clipped to
/// `area` if it does not fit.  When the leftover space is odd, the extra
/// column/row goes on the right/bottom.
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let width = size.width.min(area.width);
    let height = size.height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
