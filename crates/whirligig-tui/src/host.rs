use std::collections::HashMap;

use whirligig_core::geometry::uniform_layout;
use whirligig_core::{DemoConfig, Host, Overflow, SignalKind, SlideGeometry, SubscriptionId};

/// Track laid out as fixed-width columns in the terminal
#[derive(Debug, Clone)]
pub struct TerminalHost {
    slides: Vec<SlideGeometry>,
    scroll_offset: f64,
    viewport_width: f64,
    overflow: Overflow,
    subscriptions: HashMap<SubscriptionId, SignalKind>,
    next_subscription: u64,
    pointer_down: bool,
}

impl TerminalHost {
    pub fn new(config: &DemoConfig, viewport_width: u16) -> Self {
        Self {
            slides: uniform_layout(
                config.slide_count,
                config.slide_width as f64,
                config.gutter as f64,
            ),
            scroll_offset: 0.0,
            viewport_width: viewport_width as f64,
            overflow: Overflow::Auto,
            subscriptions: HashMap::new(),
            next_subscription: 0,
            pointer_down: false,
        }
    }

    pub fn slides(&self) -> &[SlideGeometry] {
        &self.slides
    }

    pub fn overflow(&self) -> Overflow {
        self.overflow
    }

    pub fn set_viewport_width(&mut self, width: u16) {
        self.viewport_width = width as f64;
        self.scroll_offset = self.scroll_offset.clamp(0.0, self.max_scroll());
    }

    /// Total width of the track content
    pub fn content_width(&self) -> f64 {
        self.slides.last().map(|s| s.offset_end()).unwrap_or(0.0)
    }

    pub fn max_scroll(&self) -> f64 {
        (self.content_width() - self.viewport_width).max(0.0)
    }

    /// Scroll as the user would. Returns false when native scrolling is
    /// suppressed or the offset did not move.
    pub fn scroll_by(&mut self, delta: f64) -> bool {
        if self.overflow == Overflow::Hidden {
            return false;
        }
        let before = self.scroll_offset;
        self.scroll_offset = (before + delta).clamp(0.0, self.max_scroll());
        self.scroll_offset != before
    }

    /// Whether signals of `kind` should be forwarded to the track
    pub fn forwards(&self, kind: SignalKind) -> bool {
        self.subscriptions.values().any(|k| *k == kind)
    }

    pub fn set_pointer_down(&mut self, down: bool) {
        self.pointer_down = down;
    }
}

impl Host for TerminalHost {
    fn geometry(&self) -> Vec<SlideGeometry> {
        self.slides.clone()
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset.clamp(0.0, self.max_scroll());
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn set_overflow(&mut self, overflow: Overflow) {
        self.overflow = overflow;
    }

    fn subscribe(&mut self, kind: SignalKind) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscriptions.insert(id, kind);
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscriptions.remove(&id);
    }

    fn has_ongoing_interaction(&self) -> bool {
        self.pointer_down
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> TerminalHost {
        let config = DemoConfig {
            slide_count: 4,
            slide_width: 20,
            gutter: 2,
            ..Default::default()
        };
        TerminalHost::new(&config, 40)
    }

    #[test]
    fn test_layout_includes_gutter() {
        let host = host();
        assert_eq!(host.slides()[1].offset_start, 22.0);
        assert_eq!(host.content_width(), 86.0);
        assert_eq!(host.max_scroll(), 46.0);
    }

    #[test]
    fn test_offset_is_clamped() {
        let mut host = host();
        host.set_scroll_offset(500.0);
        assert_eq!(host.scroll_offset(), 46.0);
        host.set_scroll_offset(-3.0);
        assert_eq!(host.scroll_offset(), 0.0);
    }

    #[test]
    fn test_free_scroll_respects_overflow() {
        let mut host = host();
        assert!(host.scroll_by(5.0));
        assert_eq!(host.scroll_offset(), 5.0);

        host.set_overflow(Overflow::Hidden);
        assert!(!host.scroll_by(5.0));
        assert_eq!(host.scroll_offset(), 5.0);
    }

    #[test]
    fn test_forwards_only_subscribed_kinds() {
        let mut host = host();
        let id = host.subscribe(SignalKind::Swipe);
        assert!(host.forwards(SignalKind::Swipe));
        assert!(!host.forwards(SignalKind::KeyUp));
        host.unsubscribe(id);
        assert!(!host.forwards(SignalKind::Swipe));
    }
}
