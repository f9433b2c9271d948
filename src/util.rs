use enum_map::Enum;
use ratatui::layout::{Flex, Layout, Rect, Size};

/// Navigation helpers for fieldless enums used as menu items
pub(crate) trait EnumExt: Enum + Sized {
    fn min() -> Self {
        Self::from_usize(0)
    }

    fn max() -> Self {
        Self::from_usize(Self::LENGTH.saturating_sub(1))
    }

    fn next(self) -> Option<Self> {
        let i = self.into_usize().saturating_add(1);
        (i < Self::LENGTH).then(|| Self::from_usize(i))
    }

    fn prev(self) -> Option<Self> {
        self.into_usize().checked_sub(1).map(Self::from_usize)
    }

    fn iter() -> impl Iterator<Item = Self> {
        (0..Self::LENGTH).map(Self::from_usize)
    }
}

impl<T: Enum> EnumExt for T {}

/// Return a `Rect` of the given size centered within `area`, shrunk to fit
/// if necessary
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [area] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(area);
    area
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
    enum Abc {
        A,
        B,
        C,
    }

    #[test]
    fn enum_navigation() {
        assert_eq!(Abc::min(), Abc::A);
        assert_eq!(Abc::max(), Abc::C);
        assert_eq!(Abc::A.next(), Some(Abc::B));
        assert_eq!(Abc::C.next(), None);
        assert_eq!(Abc::B.prev(), Some(Abc::A));
        assert_eq!(Abc::A.prev(), None);
        assert_eq!(Abc::iter().collect::<Vec<_>>(), [Abc::A, Abc::B, Abc::C]);
    }

    #[rstest]
    #[case(Rect::new(0, 0, 30, 10), Size::new(10, 6), Rect::new(10, 2, 10, 6))]
    #[case(Rect::new(5, 2, 12, 5), Size::new(4, 1), Rect::new(9, 4, 4, 1))]
    #[case(Rect::new(3, 4, 22, 24), Size::new(22, 24), Rect::new(3, 4, 22, 24))]
    #[case(Rect::new(0, 0, 8, 3), Size::new(10, 6), Rect::new(0, 0, 8, 3))]
    fn test_center_rect(#[case] area: Rect, #[case] size: Size, #[case] r: Rect) {
        assert_eq!(center_rect(area, size), r);
    }
}
