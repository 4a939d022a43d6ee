//! Host capability consumed by the navigation core
//!
//! The core never touches a concrete UI toolkit. Whatever renders the track
//! implements [`Host`] and forwards interaction signals to
//! [`Track::handle_signal`](crate::Track::handle_signal).

use std::collections::HashSet;

use crate::geometry::{uniform_layout, SlideGeometry, Viewport};
use crate::signal::SignalKind;

/// Native overflow scrolling mode of the track container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Auto,
    Hidden,
}

impl Overflow {
    pub fn for_prevent_scroll(prevent_scroll: bool) -> Self {
        if prevent_scroll {
            Overflow::Hidden
        } else {
            Overflow::Auto
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

pub trait Host {
    /// Ordered slide extents, freshly measured
    fn geometry(&self) -> Vec<SlideGeometry>;

    fn scroll_offset(&self) -> f64;

    fn set_scroll_offset(&mut self, offset: f64);

    fn viewport_width(&self) -> f64;

    fn set_overflow(&mut self, overflow: Overflow);

    /// Start forwarding signals of `kind` to the track
    fn subscribe(&mut self, kind: SignalKind) -> SubscriptionId;

    fn unsubscribe(&mut self, id: SubscriptionId);

    /// Whether some other interaction (pointer held, focus drag) is ongoing
    fn has_ongoing_interaction(&self) -> bool {
        false
    }

    fn is_wholly_in_view(&self, slide: &SlideGeometry) -> bool {
        Viewport::new(self.scroll_offset(), self.viewport_width()).contains(slide)
    }
}

/// In-memory host with no rendering attached.
///
/// Scroll offset writes are recorded so callers can inspect the animation
/// path after the fact.
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    slides: Vec<SlideGeometry>,
    scroll_offset: f64,
    viewport_width: f64,
    overflow: Overflow,
    overflow_history: Vec<Overflow>,
    offset_writes: Vec<f64>,
    subscriptions: HashSet<SubscriptionId>,
    next_subscription: u64,
    interacting: bool,
}

impl HeadlessHost {
    pub fn new(slides: Vec<SlideGeometry>, viewport_width: f64) -> Self {
        Self {
            slides,
            scroll_offset: 0.0,
            viewport_width,
            overflow: Overflow::Auto,
            overflow_history: Vec::new(),
            offset_writes: Vec::new(),
            subscriptions: HashSet::new(),
            next_subscription: 0,
            interacting: false,
        }
    }

    /// Equal-width slides with no gutter
    pub fn uniform(count: usize, slide_width: f64, viewport_width: f64) -> Self {
        Self::new(uniform_layout(count, slide_width, 0.0), viewport_width)
    }

    pub fn set_slides(&mut self, slides: Vec<SlideGeometry>) {
        self.slides = slides;
    }

    /// Move the offset as a user scroll would, without recording a write
    pub fn scroll_to(&mut self, offset: f64) {
        self.scroll_offset = offset;
    }

    pub fn set_interacting(&mut self, interacting: bool) {
        self.interacting = interacting;
    }

    pub fn overflow(&self) -> Overflow {
        self.overflow
    }

    pub fn overflow_history(&self) -> &[Overflow] {
        &self.overflow_history
    }

    pub fn offset_writes(&self) -> &[f64] {
        &self.offset_writes
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }
}

impl Host for HeadlessHost {
    fn geometry(&self) -> Vec<SlideGeometry> {
        self.slides.clone()
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset;
        self.offset_writes.push(offset);
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn set_overflow(&mut self, overflow: Overflow) {
        self.overflow = overflow;
        self.overflow_history.push(overflow);
    }

    fn subscribe(&mut self, _kind: SignalKind) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscriptions.insert(id);
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscriptions.remove(&id);
    }

    fn has_ongoing_interaction(&self) -> bool {
        self.interacting
    }
}
