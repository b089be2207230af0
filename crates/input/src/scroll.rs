/// Vertical scroll progress, recorded the way a document scrollbar reports
/// it: `scroll_top / (scroll_height - client_height)`, truncated to three
/// decimal digits.
///
/// Content that is not scrollable (`scroll_height == client_height`) makes
/// the division produce NaN or an infinity; the value is stored as-is. This
/// is a known edge case, not silently fixed here.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollMonitor {
    ratio: f32,
}

impl ScrollMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the ratio from a scroll event.
    pub fn update(&mut self, scroll_top: f32, scroll_height: f32, client_height: f32) {
        let ratio = scroll_top / (scroll_height - client_height);
        self.ratio = (ratio * 1000.0).trunc() / 1000.0;
    }

    /// Last recorded ratio, in [0, 1] for scrollable content.
    pub fn ratio(&self) -> f32 {
        self.ratio
    }
}

/// A fixed-height virtual page scrolled by wheel deltas.
///
/// Desktop stand-in for the document scrollbar: wheel input moves a scroll
/// offset over virtual content, and the monitor derives the ratio from it.
#[derive(Debug, Clone, Copy)]
pub struct VirtualPage {
    scroll_top: f32,
    content_height: f32,
    client_height: f32,
    monitor: ScrollMonitor,
}

impl VirtualPage {
    pub fn new(content_height: f32, client_height: f32) -> Self {
        let mut page = Self {
            scroll_top: 0.0,
            content_height,
            client_height,
            monitor: ScrollMonitor::new(),
        };
        page.refresh();
        page
    }

    /// Scroll by a wheel delta in pixels; positive moves the content down
    /// (increases the scroll offset).
    pub fn wheel(&mut self, delta_px: f32) {
        let max = (self.content_height - self.client_height).max(0.0);
        self.scroll_top = (self.scroll_top + delta_px).clamp(0.0, max);
        self.refresh();
    }

    /// Viewport height changed; the ratio denominator moves with it.
    pub fn set_client_height(&mut self, client_height: f32) {
        self.client_height = client_height;
        let max = (self.content_height - self.client_height).max(0.0);
        self.scroll_top = self.scroll_top.min(max);
        self.refresh();
    }

    pub fn ratio(&self) -> f32 {
        self.monitor.ratio()
    }

    fn refresh(&mut self) {
        self.monitor
            .update(self.scroll_top, self.content_height, self.client_height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_is_truncated_to_three_decimals() {
        let mut m = ScrollMonitor::new();
        m.update(123.456, 1000.0, 0.0);
        assert_eq!(m.ratio(), 0.123);
    }

    #[test]
    fn ratio_spans_zero_to_one() {
        let mut m = ScrollMonitor::new();
        m.update(0.0, 4000.0, 600.0);
        assert_eq!(m.ratio(), 0.0);
        m.update(3400.0, 4000.0, 600.0);
        assert_eq!(m.ratio(), 1.0);
    }

    #[test]
    fn non_scrollable_content_yields_nan() {
        // Division by zero when content fits the client exactly. Documented
        // edge case: the value is recorded as-is.
        let mut m = ScrollMonitor::new();
        m.update(0.0, 600.0, 600.0);
        assert!(m.ratio().is_nan());
    }

    #[test]
    fn virtual_page_clamps_scroll_offset() {
        let mut page = VirtualPage::new(4000.0, 600.0);
        page.wheel(-500.0);
        assert_eq!(page.ratio(), 0.0);
        page.wheel(1_000_000.0);
        assert_eq!(page.ratio(), 1.0);
    }

    #[test]
    fn virtual_page_ratio_moves_with_wheel() {
        let mut page = VirtualPage::new(4000.0, 600.0);
        page.wheel(1700.0);
        assert_eq!(page.ratio(), 0.5);
    }

    #[test]
    fn client_resize_reclamps_offset() {
        let mut page = VirtualPage::new(1000.0, 400.0);
        page.wheel(600.0);
        assert_eq!(page.ratio(), 1.0);
        page.set_client_height(800.0);
        assert!(page.ratio() <= 1.0);
    }
}
