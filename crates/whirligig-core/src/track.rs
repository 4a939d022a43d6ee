//! Navigation state machine of a single carousel track
//!
//! A [`Track`] owns the active index and the animating/scrolling flags. It
//! moves the host's scroll offset through the [`AnimationScheduler`] and
//! reports committed index changes as [`TrackEvent`]s.
//!
//! The active index is updated optimistically: as soon as a transition is
//! requested the new index is visible through [`Track::active_index`], while
//! the scroll offset catches up over the following frames.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

use crate::animation::{AnimationScheduler, Completion, Easing, TransitionId, Tween};
use crate::config::CarouselConfig;
use crate::correction;
use crate::geometry::nearest_slide_index;
use crate::host::{Host, Overflow, SubscriptionId};
use crate::index::normalize;
use crate::obscured::{EdgeObscuration, ObscurationAnalyzer};
use crate::signal::{InteractionSignal, SignalKind, SwipeDirection};
use crate::{Error, Result};

/// Lifecycle notifications around committed index changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "index", rename_all = "snake_case")]
pub enum TrackEvent {
    /// A transition towards this index is about to start
    BeforeSlide(usize),
    /// The track settled on this index
    AfterSlide(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    pub active_index: usize,
    /// True exactly while a transition has not yet settled
    pub is_animating: bool,
    pub is_scrolling: bool,
    /// Slides per step; 0 means continuous stepping
    pub slide_by: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SlideOptions {
    /// Set the offset directly instead of animating
    pub immediate: bool,
}

impl SlideOptions {
    pub fn immediate() -> Self {
        Self { immediate: true }
    }
}

/// A requested transition that has not settled yet
#[derive(Debug, Clone)]
pub struct PendingTransition {
    pub from_index: usize,
    pub to_index: usize,
    pub delta: f64,
    pub duration: Duration,
    pub easing: Easing,
}

pub struct Track<H: Host> {
    host: Option<H>,
    config: CarouselConfig,
    state: NavigationState,
    scheduler: AnimationScheduler,
    analyzer: Box<dyn ObscurationAnalyzer>,
    custom_easing: Option<Easing>,
    pending: HashMap<TransitionId, PendingTransition>,
    subscriptions: Vec<(SignalKind, SubscriptionId)>,
    external_target: Option<i64>,
    event_tx: Option<mpsc::UnboundedSender<TrackEvent>>,
}

impl<H: Host> Track<H> {
    pub fn new(config: CarouselConfig) -> Self {
        let state = NavigationState {
            active_index: config.start_at.max(0) as usize,
            is_animating: false,
            is_scrolling: false,
            slide_by: config.effective_slide_by(),
        };
        Self {
            host: None,
            config,
            state,
            scheduler: AnimationScheduler::new(),
            analyzer: Box::new(EdgeObscuration),
            custom_easing: None,
            pending: HashMap::new(),
            subscriptions: Vec::new(),
            external_target: None,
            event_tx: None,
        }
    }

    /// Set the event sender for lifecycle notifications
    pub fn with_event_sender(mut self, tx: mpsc::UnboundedSender<TrackEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    /// Replace the boundary detection used for continuous stepping
    pub fn with_analyzer(mut self, analyzer: Box<dyn ObscurationAnalyzer>) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Use a custom easing curve instead of the configured preset
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.custom_easing = Some(easing);
        self
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    #[inline]
    pub fn active_index(&self) -> usize {
        self.state.active_index
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.state.is_animating
    }

    #[inline]
    pub fn is_scrolling(&self) -> bool {
        self.state.is_scrolling
    }

    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.host.is_some()
    }

    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }

    /// Whether the owner should keep calling [`Track::update`] at frame rate
    pub fn needs_update(&self) -> bool {
        self.scheduler.needs_update() || self.external_target.is_some()
    }

    /// Attach the track to its container and align to `start_at`
    pub fn mount(&mut self, mut host: H) {
        host.set_overflow(Overflow::for_prevent_scroll(self.config.prevent_scroll));
        self.subscriptions = SignalKind::ALL
            .iter()
            .map(|&kind| (kind, host.subscribe(kind)))
            .collect();
        self.host = Some(host);
        debug!(start_at = self.config.start_at, "track mounted");

        let result = self.slide_to(self.config.start_at, SlideOptions::immediate());
        self.discard(result, "initial alignment");
    }

    /// Release every subscription and detach from the container.
    ///
    /// Transitions still in flight are dropped without notification.
    pub fn unmount(&mut self) -> Option<H> {
        let mut host = self.host.take()?;
        for (_, id) in self.subscriptions.drain(..) {
            host.unsubscribe(id);
        }
        self.scheduler.cancel(&mut host);
        let dropped = self.scheduler.advance(&mut host, Instant::now());
        trace!(dropped = dropped.len(), "discarding completions on unmount");
        self.pending.clear();
        self.external_target = None;
        self.state.is_animating = false;
        self.state.is_scrolling = false;
        debug!("track unmounted");
        Some(host)
    }

    /// Navigate to `index`, normalised against the current slide count.
    ///
    /// The active index changes immediately; the scroll offset follows over
    /// the configured duration. `AfterSlide` is reported once the transition
    /// settles in a later [`Track::update`].
    pub fn slide_to(&mut self, index: i64, options: SlideOptions) -> Result<TransitionId> {
        let host = self.host.as_mut().ok_or(Error::NotMounted)?;
        let slides = host.geometry();
        if slides.is_empty() {
            return Err(Error::NotReady);
        }

        let target = normalize(index, slides.len(), self.config.infinite);
        let starting = self.state.active_index;
        let target_offset = slides[target].offset_start;
        let delta = target_offset - host.scroll_offset();

        if starting != target {
            emit(self.event_tx.as_ref(), TrackEvent::BeforeSlide(target));
        }

        // A superseded transition never reports; its origin carries over so
        // the replacement still announces the index change.
        let origin = self
            .scheduler
            .active_id()
            .and_then(|id| self.pending.get(&id))
            .map(|p| p.from_index)
            .unwrap_or(starting);

        self.state.is_animating = true;
        self.state.active_index = target;

        let easing = self
            .custom_easing
            .clone()
            .unwrap_or(Easing::Preset(self.config.easing));
        let duration = Duration::from_millis(self.config.animation_duration_ms);
        let id = if options.immediate {
            self.scheduler.jump(host, target_offset)
        } else {
            let tween = Tween {
                delta,
                duration,
                easing: easing.clone(),
                restore_overflow: Overflow::for_prevent_scroll(self.config.prevent_scroll),
            };
            self.scheduler.animate(host, tween, Instant::now())
        };

        debug!(
            requested = index,
            from = starting,
            to = target,
            delta,
            immediate = options.immediate,
            "slide requested"
        );

        self.pending.insert(
            id,
            PendingTransition {
                from_index: origin,
                to_index: target,
                delta,
                duration,
                easing,
            },
        );
        Ok(id)
    }

    /// Step forward by `slide_by`, or to the slide cut off at the trailing
    /// edge when stepping is continuous
    pub fn next(&mut self) -> Result<TransitionId> {
        let target = self.next_target()?;
        self.slide_to(target, SlideOptions::default())
    }

    /// Step back by `slide_by`, or to the slide cut off at the leading edge
    /// when stepping is continuous
    pub fn prev(&mut self) -> Result<TransitionId> {
        let target = self.prev_target()?;
        self.slide_to(target, SlideOptions::default())
    }

    fn next_target(&self) -> Result<i64> {
        let host = self.host.as_ref().ok_or(Error::NotMounted)?;
        let slides = host.geometry();
        let count = slides.len() as i64;
        if count == 0 {
            return Err(Error::NotReady);
        }
        let infinite = self.config.infinite;

        if self.state.slide_by == 0 {
            let (_, next) = self
                .analyzer
                .boundary_slides(&slides, &|s| host.is_wholly_in_view(s));
            let at_end = slides.last().is_some_and(|s| host.is_wholly_in_view(s));
            return Ok(if infinite && at_end { 0 } else { next as i64 });
        }

        let active = self.state.active_index as i64;
        let slide_by = self.state.slide_by as i64;
        let last = (count - slide_by).max(0);
        let candidate = (active + slide_by).min(last);
        Ok(if infinite && active == last { 0 } else { candidate })
    }

    fn prev_target(&self) -> Result<i64> {
        let host = self.host.as_ref().ok_or(Error::NotMounted)?;
        let slides = host.geometry();
        let count = slides.len() as i64;
        if count == 0 {
            return Err(Error::NotReady);
        }
        let infinite = self.config.infinite;

        if self.state.slide_by == 0 {
            let (prev, _) = self
                .analyzer
                .boundary_slides(&slides, &|s| host.is_wholly_in_view(s));
            let at_start = slides.first().is_some_and(|s| host.is_wholly_in_view(s));
            return Ok(if infinite && at_start { count - 1 } else { prev as i64 });
        }

        let active = self.state.active_index as i64;
        let slide_by = self.state.slide_by as i64;
        let last = (count - slide_by).max(0);
        let candidate = (active - slide_by).max(0);
        // Only stepping off the first page wraps; landing on 0 from a later page does not
        Ok(if infinite && active == 0 { last } else { candidate })
    }

    /// Slide whose leading edge is closest to the current scroll offset
    pub fn nearest_slide_index(&self) -> Result<usize> {
        let host = self.host.as_ref().ok_or(Error::NotMounted)?;
        nearest_slide_index(&host.geometry(), host.scroll_offset()).ok_or(Error::NotReady)
    }

    pub fn can_self_correct(&self) -> bool {
        let Some(host) = self.host.as_ref() else {
            return false;
        };
        correction::can_self_correct(
            self.config.prevent_auto_correct,
            self.state.is_animating,
            self.state.is_scrolling,
            host.has_ongoing_interaction(),
        )
    }

    pub fn should_self_correct(&self) -> bool {
        correction::should_snap(self.can_self_correct(), self.config.snap_to_slide)
    }

    /// Follow `index` on the next update cycle
    pub fn push_slide_to(&mut self, index: i64) {
        self.external_target = Some(index);
    }

    /// Apply a new configuration without resnapping the active index
    pub fn reconfigure(&mut self, config: CarouselConfig) {
        if config.slide_by != self.config.slide_by
            || config.visible_slides != self.config.visible_slides
        {
            self.state.slide_by = config.effective_slide_by();
            debug!(slide_by = self.state.slide_by, "step size changed");
        }

        if config.slide_to != self.config.slide_to {
            if let Some(index) = config.slide_to {
                self.external_target = Some(index);
            }
        }

        if config.prevent_scroll != self.config.prevent_scroll {
            let overflow = Overflow::for_prevent_scroll(config.prevent_scroll);
            // A running tween keeps overflow hidden and restores it when done
            if !self.scheduler.set_restore_overflow(overflow) {
                if let Some(host) = self.host.as_mut() {
                    host.set_overflow(overflow);
                }
            }
        }

        self.config = config;
    }

    /// Deliver an interaction signal forwarded by the host.
    ///
    /// Signals arriving while unmounted, or of a kind the track is not
    /// subscribed to, are ignored. Navigation failures are swallowed.
    pub fn handle_signal(&mut self, signal: InteractionSignal) {
        let kind = signal.kind();
        if !self.subscriptions.iter().any(|(k, _)| *k == kind) {
            trace!(?kind, "signal ignored: not subscribed");
            return;
        }

        match signal {
            InteractionSignal::ScrollStart | InteractionSignal::TouchStart => {
                self.state.is_scrolling = true;
            }
            InteractionSignal::ScrollEnd => {
                self.state.is_scrolling = false;
                self.self_correct();
            }
            InteractionSignal::TouchEnd => self.self_correct(),
            InteractionSignal::Swipe(direction) => self.on_swipe(direction),
            InteractionSignal::KeyUp(key) => self.on_key_up(&key),
        }
    }

    fn self_correct(&mut self) {
        if !self.can_self_correct() {
            return;
        }
        let nearest = match self.nearest_slide_index() {
            Ok(i) => i,
            Err(e) => {
                debug!(error = %e, "self-correction skipped");
                return;
            }
        };

        if self.config.snap_to_slide {
            let result = self.slide_to(nearest as i64, SlideOptions::default());
            self.discard(result, "snap to nearest");
        } else {
            emit(self.event_tx.as_ref(), TrackEvent::AfterSlide(nearest));
        }
    }

    fn on_swipe(&mut self, direction: SwipeDirection) {
        if self.config.prevent_swipe || !self.config.snap_to_slide {
            return;
        }
        let step = direction.step(self.state.slide_by);
        let result = self.slide_to(self.state.active_index as i64 + step, SlideOptions::default());
        self.discard(result, "swipe");
    }

    fn on_key_up(&mut self, key: &str) {
        let is_next = self.config.next_keys.iter().any(|k| k == key);
        let is_prev = self.config.prev_keys.iter().any(|k| k == key);
        if !is_next && !is_prev {
            return;
        }

        self.state.is_animating = true;
        if is_next {
            let result = self.next();
            self.discard(result, "next key");
        }
        if is_prev {
            let result = self.prev();
            self.discard(result, "prev key");
        }
    }

    /// Advance animations, settle finished transitions, then follow any
    /// pushed target and self-correct if allowed.
    ///
    /// Returns whether another frame is needed.
    pub fn update(&mut self, now: Instant) -> bool {
        let Some(host) = self.host.as_mut() else {
            return false;
        };

        for completion in self.scheduler.advance(host, now) {
            self.settle(completion);
        }

        self.revalidate_active_index();

        if let Some(index) = self.external_target.take() {
            let result = self.slide_to(index, SlideOptions::default());
            self.discard(result, "external target");
        }

        if self.should_self_correct() {
            if let Ok(nearest) = self.nearest_slide_index() {
                if nearest != self.state.active_index {
                    let result = self.slide_to(nearest as i64, SlideOptions::default());
                    self.discard(result, "resnap");
                }
            }
        }

        self.needs_update()
    }

    /// Keep the active index inside a slide set that shrank since it was set
    fn revalidate_active_index(&mut self) {
        let count = self.host.as_ref().map(|h| h.geometry().len()).unwrap_or(0);
        if count == 0 || self.state.active_index < count {
            return;
        }
        let index = normalize(self.state.active_index as i64, count, self.config.infinite);
        debug!(
            from = self.state.active_index,
            to = index,
            count,
            "active index out of range"
        );
        self.state.active_index = index;
    }

    fn settle(&mut self, completion: Completion) {
        let Some(transition) = self.pending.remove(&completion.id) else {
            return;
        };
        self.state.is_animating = !self.pending.is_empty();

        match completion.outcome {
            Ok(()) => {
                if transition.from_index != transition.to_index {
                    emit(self.event_tx.as_ref(), TrackEvent::AfterSlide(transition.to_index));
                }
            }
            Err(e) => {
                debug!(id = completion.id.0, error = %e, "transition settled without completing");
            }
        }
    }

    /// Swallow a navigation failure, leaving the machine idle if nothing is in flight
    fn discard(&mut self, result: Result<TransitionId>, context: &str) {
        if let Err(e) = result {
            self.state.is_animating = !self.pending.is_empty();
            debug!(error = %e, "{} ignored", context);
        }
    }
}

fn emit(tx: Option<&mpsc::UnboundedSender<TrackEvent>>, event: TrackEvent) {
    if let Some(tx) = tx {
        if tx.send(event).is_err() {
            warn!("Failed to send track event: receiver dropped");
        }
    }
}
