use crate::consts;
use ratatui::layout::{Flex, Layout, Rect, Size};

/// Return the centered [`DISPLAY_SIZE`][consts::DISPLAY_SIZE] rectangle that
/// all screens draw inside.
pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    center_rect(buffer_area, consts::DISPLAY_SIZE)
}

/// Center a rectangle of the given size inside `area`, clipping if `area` is
/// too small.
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [inner] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [inner] = Layout::vertical([size.height]).flex(Flex::Center).areas(inner);
    inner
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Rect::new(0, 0, 80, 26), Size::new(20, 10), Rect::new(30, 8, 20, 10))]
    #[case(Rect::new(0, 0, 80, 26), Size::new(80, 26), Rect::new(0, 0, 80, 26))]
    #[case(Rect::new(10, 5, 20, 8), Size::new(10, 4), Rect::new(15, 7, 10, 4))]
    fn test_center_rect(#[case] area: Rect, #[case] size: Size, #[case] centered: Rect) {
        assert_eq!(center_rect(area, size), centered);
    }
}
