//! Layout primitives - cell rectangles and the flex row/column used for dialog buttons

/// Rectangle bounds in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Create rectangle from terminal dimensions (fills entire screen)
    pub fn fullscreen(cols: u16, rows: u16) -> Self {
        Rect::new(0, 0, cols, rows)
    }

    /// Get right edge x-coordinate
    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Get bottom edge y-coordinate
    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if point is inside rectangle
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Create a subrect with padding applied
    pub fn inner(&self, padding: u16) -> Self {
        let padding2 = padding.saturating_mul(2);
        Rect {
            x: self.x.saturating_add(padding),
            y: self.y.saturating_add(padding),
            width: self.width.saturating_sub(padding2),
            height: self.height.saturating_sub(padding2),
        }
    }

    /// A `width` x `height` rectangle centered inside this one, clamped to fit
    pub fn centered(&self, width: u16, height: u16) -> Self {
        let width = width.min(self.width);
        let height = height.min(self.height);
        Rect {
            x: self.x + (self.width - width) / 2,
            y: self.y + (self.height - height) / 2,
            width,
            height,
        }
    }

    /// Take a single row off the top, returning (row, remainder)
    pub fn take_row(&self) -> (Rect, Rect) {
        self.split_horizontal(1)
    }

    /// Take up to `height` rows off the bottom, returning (remainder, bottom)
    pub fn take_bottom(&self, height: u16) -> (Rect, Rect) {
        self.split_horizontal(self.height.saturating_sub(height))
    }

    /// Split horizontally into top and bottom
    pub fn split_horizontal(&self, top_height: u16) -> (Rect, Rect) {
        let top_height = top_height.min(self.height);
        let top = Rect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: top_height,
        };

        let bottom = Rect {
            x: self.x,
            y: self.y.saturating_add(top_height),
            width: self.width,
            height: self.height - top_height,
        };

        (top, bottom)
    }
}

/// Flex direction for a run of children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexDirection {
    Row,
    Column,
}

/// Size constraint for flex children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Size {
    /// Fixed size in cells
    Fixed(u16),
    /// Proportional size (flex grow factor)
    Flex(u16),
}

/// Flex layout calculator
#[derive(Debug, Clone)]
pub struct FlexLayout {
    direction: FlexDirection,
    gap: u16,
}

impl FlexLayout {
    pub fn new(direction: FlexDirection) -> Self {
        FlexLayout { direction, gap: 0 }
    }

    pub fn row() -> Self {
        Self::new(FlexDirection::Row)
    }

    pub fn column() -> Self {
        Self::new(FlexDirection::Column)
    }

    /// Set gap between children
    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    /// Calculate child rectangles for given container and sizes
    ///
    /// Leftover cells from integer division go to the last flex child so a
    /// row of equal buttons always spans the container.
    pub fn layout(&self, container: Rect, sizes: &[Size]) -> Vec<Rect> {
        if sizes.is_empty() {
            return Vec::new();
        }

        let main_size = match self.direction {
            FlexDirection::Row => container.width,
            FlexDirection::Column => container.height,
        };
        let total_gap = self
            .gap
            .saturating_mul(sizes.len().saturating_sub(1) as u16);
        let available = main_size.saturating_sub(total_gap);

        let mut fixed_space = 0u16;
        let mut flex_units = 0u16;
        for size in sizes {
            match size {
                Size::Fixed(s) => fixed_space = fixed_space.saturating_add(*s),
                Size::Flex(f) => flex_units = flex_units.saturating_add(*f),
            }
        }

        let flex_space = available.saturating_sub(fixed_space);
        let unit = flex_space.checked_div(flex_units).unwrap_or(0);
        let remainder = flex_space.saturating_sub(unit.saturating_mul(flex_units));
        let last_flex = sizes.iter().rposition(|s| matches!(s, Size::Flex(_)));

        let mut rects = Vec::with_capacity(sizes.len());
        let mut offset = 0u16;

        for (i, size) in sizes.iter().enumerate() {
            let mut child_main_size = match size {
                Size::Fixed(s) => *s,
                Size::Flex(f) => unit.saturating_mul(*f),
            };
            if Some(i) == last_flex {
                child_main_size = child_main_size.saturating_add(remainder);
            }

            rects.push(self.child_rect(&container, offset, child_main_size));
            offset = offset
                .saturating_add(child_main_size)
                .saturating_add(self.gap);
        }

        rects
    }

    fn child_rect(&self, inner: &Rect, offset: u16, child_main_size: u16) -> Rect {
        match self.direction {
            FlexDirection::Row => Rect::new(
                inner.x.saturating_add(offset),
                inner.y,
                child_main_size,
                inner.height,
            ),
            FlexDirection::Column => Rect::new(
                inner.x,
                inner.y.saturating_add(offset),
                inner.width,
                child_main_size,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let r = Rect::new(10, 10, 20, 20);
        assert!(r.contains(15, 15));
        assert!(r.contains(10, 10)); // edge
        assert!(!r.contains(30, 30)); // outside
        assert!(!r.contains(5, 15)); // left of rect
    }

    #[test]
    fn test_rect_centered() {
        let screen = Rect::new(0, 0, 80, 24);
        assert_eq!(screen.centered(40, 10), Rect::new(20, 7, 40, 10));

        // Larger than the parent clamps to it
        assert_eq!(screen.centered(100, 30), screen);
    }

    #[test]
    fn test_take_row() {
        let r = Rect::new(2, 3, 10, 4);
        let (row, rest) = r.take_row();
        assert_eq!(row, Rect::new(2, 3, 10, 1));
        assert_eq!(rest, Rect::new(2, 4, 10, 3));

        let (row, rest) = Rect::new(0, 0, 10, 0).take_row();
        assert!(row.is_empty());
        assert!(rest.is_empty());
    }

    #[test]
    fn test_take_bottom() {
        let r = Rect::new(2, 3, 10, 6);
        let (rest, bottom) = r.take_bottom(2);
        assert_eq!(rest, Rect::new(2, 3, 10, 4));
        assert_eq!(bottom, Rect::new(2, 7, 10, 2));

        // Asking for more than there is hands over everything
        let (rest, bottom) = Rect::new(0, 5, 10, 1).take_bottom(3);
        assert!(rest.is_empty());
        assert_eq!(bottom, Rect::new(0, 5, 10, 1));
    }

    #[test]
    fn test_flex_row_spans_container() {
        let container = Rect::new(0, 0, 31, 1);
        let rects = FlexLayout::row()
            .gap(1)
            .layout(container, &[Size::Flex(1), Size::Flex(1)]);

        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0], Rect::new(0, 0, 15, 1));
        assert_eq!(rects[1], Rect::new(16, 0, 15, 1));
    }

    #[test]
    fn test_flex_column_fixed_rows() {
        let container = Rect::new(4, 10, 20, 5);
        let rects = FlexLayout::column().layout(container, &[Size::Fixed(1); 3]);

        assert_eq!(rects[0], Rect::new(4, 10, 20, 1));
        assert_eq!(rects[1], Rect::new(4, 11, 20, 1));
        assert_eq!(rects[2], Rect::new(4, 12, 20, 1));
    }
}
