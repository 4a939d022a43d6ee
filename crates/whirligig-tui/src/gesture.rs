//! Minimal gesture recognition on top of terminal mouse events
//!
//! Turns raw wheel/drag input into the settled-scroll and swipe signals the
//! track consumes.

use std::time::{Duration, Instant};

use whirligig_core::SwipeDirection;

/// Reports a scroll as settled once no scroll input arrived for `debounce`
#[derive(Debug, Clone)]
pub struct ScrollEndDetector {
    debounce: Duration,
    last_scroll: Option<Instant>,
}

impl ScrollEndDetector {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            last_scroll: None,
        }
    }

    /// Record scroll input. Returns true if this starts a new scroll.
    pub fn scrolled(&mut self, now: Instant) -> bool {
        let started = self.last_scroll.is_none();
        self.last_scroll = Some(now);
        started
    }

    /// Returns true exactly once per scroll, when it has settled
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.last_scroll {
            Some(last) if now.saturating_duration_since(last) >= self.debounce => {
                self.last_scroll = None;
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub fn is_scrolling(&self) -> bool {
        self.last_scroll.is_some()
    }
}

/// Tracks a press-drag-release sequence along the horizontal axis
#[derive(Debug, Clone)]
pub struct SwipeRecognizer {
    threshold: u16,
    origin: Option<(u16, u16)>,
    last_column: u16,
}

impl SwipeRecognizer {
    pub fn new(threshold: u16) -> Self {
        Self {
            threshold,
            origin: None,
            last_column: 0,
        }
    }

    pub fn press(&mut self, column: u16, row: u16) {
        self.origin = Some((column, row));
        self.last_column = column;
    }

    /// Horizontal movement since the previous press/drag event
    pub fn drag(&mut self, column: u16) -> i32 {
        if self.origin.is_none() {
            return 0;
        }
        let dx = column as i32 - self.last_column as i32;
        self.last_column = column;
        dx
    }

    /// Direction of pointer travel, if it was long enough to count as a swipe
    pub fn release(&mut self, column: u16, row: u16) -> Option<SwipeDirection> {
        let (x0, y0) = self.origin.take()?;
        let dx = column as i32 - x0 as i32;
        let dy = row as i32 - y0 as i32;
        let threshold = self.threshold as i32;

        if dx.abs() >= dy.abs() && dx.abs() >= threshold {
            Some(if dx < 0 {
                SwipeDirection::Left
            } else {
                SwipeDirection::Right
            })
        } else if dy.abs() > dx.abs() && dy.abs() >= threshold {
            Some(if dy < 0 {
                SwipeDirection::Up
            } else {
                SwipeDirection::Down
            })
        } else {
            None
        }
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.origin.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_end_fires_once_after_quiet_period() {
        let mut detector = ScrollEndDetector::new(Duration::from_millis(100));
        let t0 = Instant::now();

        assert!(detector.scrolled(t0));
        assert!(!detector.scrolled(t0 + Duration::from_millis(50)));
        assert!(!detector.poll(t0 + Duration::from_millis(120)));
        assert!(detector.poll(t0 + Duration::from_millis(150)));
        assert!(!detector.poll(t0 + Duration::from_millis(300)));
        assert!(!detector.is_scrolling());
    }

    #[test]
    fn test_horizontal_swipe() {
        let mut swipe = SwipeRecognizer::new(5);
        swipe.press(40, 10);
        assert_eq!(swipe.drag(35), -5);
        assert_eq!(swipe.drag(30), -5);
        assert_eq!(swipe.release(30, 11), Some(SwipeDirection::Left));
        assert!(!swipe.is_pressed());

        swipe.press(10, 10);
        assert_eq!(swipe.release(18, 10), Some(SwipeDirection::Right));
    }

    #[test]
    fn test_short_drag_is_not_a_swipe() {
        let mut swipe = SwipeRecognizer::new(5);
        swipe.press(10, 10);
        assert_eq!(swipe.release(13, 10), None);
    }

    #[test]
    fn test_vertical_swipe() {
        let mut swipe = SwipeRecognizer::new(3);
        swipe.press(10, 10);
        assert_eq!(swipe.release(11, 2), Some(SwipeDirection::Up));
    }

    #[test]
    fn test_drag_without_press() {
        let mut swipe = SwipeRecognizer::new(3);
        assert_eq!(swipe.drag(20), 0);
        assert_eq!(swipe.release(20, 0), None);
    }
}
