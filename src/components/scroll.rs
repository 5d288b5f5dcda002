//! Vertical viewport over content taller than the space it is drawn in
//!
//! Pure bookkeeping: tracks the content height, the viewport height and the
//! offset of the first visible line. Owners draw the lines in
//! [`ScrollView::visible_range`] themselves.

use std::ops::Range;

/// Vertical scroll position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollView {
    content_height: usize,
    viewport_height: usize,
    offset: usize,
}

impl ScrollView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update both heights, clamping the offset to the new bounds
    pub fn resize(&mut self, content_height: usize, viewport_height: usize) {
        self.content_height = content_height;
        self.viewport_height = viewport_height;
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn max_offset(&self) -> usize {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Whether the content overflows the viewport
    pub fn is_scrollable(&self) -> bool {
        self.max_offset() > 0
    }

    pub fn can_scroll_up(&self) -> bool {
        self.offset > 0
    }

    pub fn can_scroll_down(&self) -> bool {
        self.offset < self.max_offset()
    }

    /// Move up one line; returns whether the offset changed
    pub fn scroll_up(&mut self) -> bool {
        if !self.can_scroll_up() {
            return false;
        }
        self.offset -= 1;
        true
    }

    /// Move down one line; returns whether the offset changed
    pub fn scroll_down(&mut self) -> bool {
        if !self.can_scroll_down() {
            return false;
        }
        self.offset += 1;
        true
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    /// Indices of the content lines currently in view
    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.offset + self.viewport_height).min(self.content_height);
        self.offset.min(end)..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_without_scrolling() {
        let mut scroll = ScrollView::new();
        scroll.resize(3, 5);
        assert!(!scroll.is_scrollable());
        assert!(!scroll.scroll_down());
        assert_eq!(scroll.visible_range(), 0..3);
    }

    #[test]
    fn test_scrolls_within_bounds() {
        let mut scroll = ScrollView::new();
        scroll.resize(10, 4);
        assert!(scroll.is_scrollable());
        assert!(!scroll.scroll_up());

        for _ in 0..20 {
            scroll.scroll_down();
        }
        assert_eq!(scroll.offset(), 6);
        assert_eq!(scroll.visible_range(), 6..10);
        assert!(!scroll.can_scroll_down());

        assert!(scroll.scroll_up());
        assert_eq!(scroll.visible_range(), 5..9);
    }

    #[test]
    fn test_resize_clamps_offset() {
        let mut scroll = ScrollView::new();
        scroll.resize(10, 2);
        for _ in 0..8 {
            scroll.scroll_down();
        }
        scroll.resize(10, 8);
        assert_eq!(scroll.offset(), 2);

        scroll.resize(0, 0);
        assert_eq!(scroll.offset(), 0);
        assert_eq!(scroll.visible_range(), 0..0);
    }
}
