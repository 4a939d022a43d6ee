//! Interaction signals delivered by the host

use serde::{Deserialize, Serialize};

/// Direction reported by the swipe detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SwipeDirection {
    /// Slide step for a horizontal track advancing `slide_by` per page
    pub fn step(self, slide_by: usize) -> i64 {
        match self {
            SwipeDirection::Left => -(slide_by as i64),
            SwipeDirection::Right => slide_by as i64,
            SwipeDirection::Up | SwipeDirection::Down => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionSignal {
    ScrollStart,
    /// Scrolling settled (debounced by the host)
    ScrollEnd,
    TouchStart,
    TouchEnd,
    Swipe(SwipeDirection),
    /// A key was released; carries the DOM-style key name
    KeyUp(String),
}

impl InteractionSignal {
    pub fn kind(&self) -> SignalKind {
        match self {
            InteractionSignal::ScrollStart => SignalKind::ScrollStart,
            InteractionSignal::ScrollEnd => SignalKind::ScrollEnd,
            InteractionSignal::TouchStart => SignalKind::TouchStart,
            InteractionSignal::TouchEnd => SignalKind::TouchEnd,
            InteractionSignal::Swipe(_) => SignalKind::Swipe,
            InteractionSignal::KeyUp(_) => SignalKind::KeyUp,
        }
    }
}

/// Subscription key for a family of signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    ScrollStart,
    ScrollEnd,
    TouchStart,
    TouchEnd,
    Swipe,
    KeyUp,
}

impl SignalKind {
    pub const ALL: [SignalKind; 6] = [
        SignalKind::ScrollStart,
        SignalKind::ScrollEnd,
        SignalKind::TouchStart,
        SignalKind::TouchEnd,
        SignalKind::Swipe,
        SignalKind::KeyUp,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swipe_steps() {
        assert_eq!(SwipeDirection::Left.step(2), -2);
        assert_eq!(SwipeDirection::Right.step(2), 2);
        assert_eq!(SwipeDirection::Up.step(2), 0);
        assert_eq!(SwipeDirection::Down.step(2), 0);
    }
}
