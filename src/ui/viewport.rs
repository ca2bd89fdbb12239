//! Scroll state for the post view.

use std::ops::Range;

/// The visible window over a post's wrapped lines.
///
/// # Example
///
/// ```
/// use blogcraft::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(80, 20, 50);
/// vp.page_down();
/// assert_eq!(vp.visible_range(), 20..40);
/// vp.go_to_bottom();
/// assert_eq!(vp.offset(), 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    offset: usize,
    total_lines: usize,
}

impl Viewport {
    /// A viewport at the top of `total_lines` lines, `height` rows tall.
    pub const fn new(width: u16, height: u16, total_lines: usize) -> Self {
        Self {
            width,
            height,
            offset: 0,
            total_lines,
        }
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    pub const fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Line indices currently on screen.
    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.offset + usize::from(self.height)).min(self.total_lines);
        self.offset..end.max(self.offset)
    }

    /// How far down the post is scrolled, 0-100.
    pub fn scroll_percent(&self) -> u8 {
        let max = self.max_offset();
        if max == 0 {
            return 100;
        }
        let percent = (self.offset * 100 + max / 2) / max;
        u8::try_from(percent.min(100)).unwrap_or(100)
    }

    pub const fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.offset = (self.offset + n).min(self.max_offset());
    }

    pub const fn page_up(&mut self) {
        self.scroll_up(self.height as usize);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(usize::from(self.height));
    }

    pub const fn go_to_top(&mut self) {
        self.offset = 0;
    }

    pub const fn go_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Adopt a new terminal size, keeping the offset in range.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Adopt a new line count after the post loaded or rewrapped.
    pub fn set_total_lines(&mut self, total: usize) {
        self.total_lines = total;
        self.offset = self.offset.min(self.max_offset());
    }

    const fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.height as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_post_does_not_scroll() {
        let mut vp = Viewport::new(80, 20, 5);
        vp.scroll_down(3);
        assert_eq!(vp.offset(), 0);
        assert_eq!(vp.visible_range(), 0..5);
        assert_eq!(vp.scroll_percent(), 100);
    }

    #[test]
    fn test_scroll_clamps_both_ends() {
        let mut vp = Viewport::new(80, 10, 25);
        vp.scroll_down(100);
        assert_eq!(vp.offset(), 15);
        vp.scroll_up(100);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_paging_moves_by_height() {
        let mut vp = Viewport::new(80, 10, 100);
        vp.page_down();
        vp.page_down();
        assert_eq!(vp.offset(), 20);
        vp.page_up();
        assert_eq!(vp.offset(), 10);
    }

    #[test]
    fn test_scroll_percent_tracks_position() {
        let mut vp = Viewport::new(80, 10, 110);
        assert_eq!(vp.scroll_percent(), 0);
        vp.scroll_down(50);
        assert_eq!(vp.scroll_percent(), 50);
        vp.go_to_bottom();
        assert_eq!(vp.scroll_percent(), 100);
    }

    #[test]
    fn test_shrinking_post_clamps_offset() {
        let mut vp = Viewport::new(80, 10, 100);
        vp.go_to_bottom();
        vp.set_total_lines(30);
        assert_eq!(vp.offset(), 20);
    }

    #[test]
    fn test_taller_terminal_clamps_offset() {
        let mut vp = Viewport::new(80, 10, 30);
        vp.go_to_bottom();
        vp.resize(100, 25);
        assert_eq!(vp.offset(), 5);
        assert_eq!(vp.width(), 100);
    }
}
