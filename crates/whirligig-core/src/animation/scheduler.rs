//! L3 Molecular Layer: Scroll-offset transition scheduler
//!
//! Combines easing and timing to drive the host's scroll offset. The owner
//! calls [`AnimationScheduler::advance`] once per frame; every transition
//! started here settles exactly once, through the completion queue, on a
//! later `advance` call.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tracing::trace;

use super::easing::Easing;
use super::timing::{is_complete, lerp, progress};
use crate::host::{Host, Overflow};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionId(pub u64);

/// Settlement of one transition
#[derive(Debug)]
pub struct Completion {
    pub id: TransitionId,
    pub outcome: Result<()>,
}

/// Parameters of an interpolated transition
#[derive(Debug, Clone)]
pub struct Tween {
    /// Distance to travel from the current offset
    pub delta: f64,
    pub duration: Duration,
    pub easing: Easing,
    /// Overflow mode to put back once the transition ends
    pub restore_overflow: Overflow,
}

#[derive(Debug, Clone)]
struct ActiveTransition {
    id: TransitionId,
    start: Instant,
    from: f64,
    to: f64,
    duration: Duration,
    easing: Easing,
    restore_overflow: Overflow,
}

#[derive(Debug, Default)]
pub struct AnimationScheduler {
    active: Option<ActiveTransition>,
    settled: VecDeque<Completion>,
    next_id: u64,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a transition is currently interpolating
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Id of the interpolating transition, if any
    pub fn active_id(&self) -> Option<TransitionId> {
        self.active.as_ref().map(|a| a.id)
    }

    /// Whether `advance` still has work: frames to run or completions to hand out
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.active.is_some() || !self.settled.is_empty()
    }

    /// Change the overflow mode the interpolating transition puts back.
    /// Returns false when nothing is interpolating.
    pub fn set_restore_overflow(&mut self, overflow: Overflow) -> bool {
        match self.active.as_mut() {
            Some(anim) => {
                anim.restore_overflow = overflow;
                true
            }
            None => false,
        }
    }

    fn allocate_id(&mut self) -> TransitionId {
        let id = TransitionId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Interpolate from the host's current offset by `tween.delta`.
    ///
    /// A transition already in flight is cancelled first. Zero duration or
    /// zero distance settles without interpolation frames.
    pub fn animate<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        tween: Tween,
        now: Instant,
    ) -> TransitionId {
        self.cancel(host);
        let id = self.allocate_id();
        let from = host.scroll_offset();
        let to = from + tween.delta;

        if tween.duration.is_zero() || tween.delta == 0.0 {
            if tween.delta != 0.0 {
                host.set_scroll_offset(to);
            }
            trace!(id = id.0, offset = to, "transition settled without frames");
            self.settled.push_back(Completion { id, outcome: Ok(()) });
            return id;
        }

        host.set_overflow(Overflow::Hidden);
        self.active = Some(ActiveTransition {
            id,
            start: now,
            from,
            to,
            duration: tween.duration,
            easing: tween.easing,
            restore_overflow: tween.restore_overflow,
        });
        trace!(
            id = id.0,
            from,
            to,
            duration_ms = tween.duration.as_millis() as u64,
            "transition started"
        );
        id
    }

    /// Set the offset directly, still settling through the completion queue
    pub fn jump<H: Host + ?Sized>(&mut self, host: &mut H, offset: f64) -> TransitionId {
        self.cancel(host);
        let id = self.allocate_id();
        host.set_scroll_offset(offset);
        self.settled.push_back(Completion { id, outcome: Ok(()) });
        id
    }

    /// Run one frame and hand out everything that settled since the last call
    pub fn advance<H: Host + ?Sized>(&mut self, host: &mut H, now: Instant) -> Vec<Completion> {
        if let Some(ref anim) = self.active {
            if is_complete(anim.start, anim.duration, now) {
                host.set_scroll_offset(anim.to);
                host.set_overflow(anim.restore_overflow);
                self.settled.push_back(Completion {
                    id: anim.id,
                    outcome: Ok(()),
                });
                self.active = None;
            } else {
                let t = progress(anim.start, anim.duration, now);
                let offset = lerp(anim.from, anim.to, anim.easing.apply(t));
                trace!(id = anim.id.0, t, offset, "transition frame");
                host.set_scroll_offset(offset);
            }
        }

        self.settled.drain(..).collect()
    }

    /// Abort the interpolating transition where it stands
    pub fn cancel<H: Host + ?Sized>(&mut self, host: &mut H) -> Option<TransitionId> {
        let anim = self.active.take()?;
        host.set_overflow(anim.restore_overflow);
        trace!(id = anim.id.0, "transition cancelled");
        self.settled.push_back(Completion {
            id: anim.id,
            outcome: Err(Error::AnimationCancelled),
        });
        Some(anim.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EasingType;
    use crate::host::HeadlessHost;

    fn tween(delta: f64, duration_ms: u64) -> Tween {
        Tween {
            delta,
            duration: Duration::from_millis(duration_ms),
            easing: Easing::Preset(EasingType::Linear),
            restore_overflow: Overflow::Auto,
        }
    }

    fn count_for(completions: &[Completion], id: TransitionId) -> usize {
        completions.iter().filter(|c| c.id == id).count()
    }

    #[test]
    fn test_zero_duration_completes_once() {
        let mut host = HeadlessHost::uniform(3, 100.0, 100.0);
        let mut scheduler = AnimationScheduler::new();
        let now = Instant::now();

        let id = scheduler.animate(&mut host, tween(200.0, 0), now);
        assert!(!scheduler.is_animating());
        assert_eq!(host.scroll_offset(), 200.0);

        let first = scheduler.advance(&mut host, now);
        assert_eq!(count_for(&first, id), 1);
        assert!(first[0].outcome.is_ok());

        let second = scheduler.advance(&mut host, now + Duration::from_secs(1));
        assert_eq!(count_for(&second, id), 0);
    }

    #[test]
    fn test_zero_delta_does_not_touch_offset() {
        let mut host = HeadlessHost::uniform(3, 100.0, 100.0);
        let mut scheduler = AnimationScheduler::new();

        let id = scheduler.animate(&mut host, tween(0.0, 300), Instant::now());
        assert!(host.offset_writes().is_empty());
        assert!(host.overflow_history().is_empty());

        let done = scheduler.advance(&mut host, Instant::now());
        assert_eq!(count_for(&done, id), 1);
    }

    #[test]
    fn test_interpolates_then_completes() {
        let mut host = HeadlessHost::uniform(3, 100.0, 100.0);
        let mut scheduler = AnimationScheduler::new();
        let start = Instant::now();

        let id = scheduler.animate(&mut host, tween(100.0, 100), start);
        assert!(scheduler.is_animating());
        assert_eq!(host.overflow(), Overflow::Hidden);

        let mid = scheduler.advance(&mut host, start + Duration::from_millis(50));
        assert!(mid.is_empty());
        assert!((host.scroll_offset() - 50.0).abs() < 0.001);

        let end = scheduler.advance(&mut host, start + Duration::from_millis(100));
        assert_eq!(count_for(&end, id), 1);
        assert_eq!(host.scroll_offset(), 100.0);
        assert_eq!(host.overflow(), Overflow::Auto);
        assert!(!scheduler.needs_update());
    }

    #[test]
    fn test_restores_configured_overflow() {
        let mut host = HeadlessHost::uniform(3, 100.0, 100.0);
        let mut scheduler = AnimationScheduler::new();
        let start = Instant::now();
        let mut t = tween(100.0, 100);
        t.restore_overflow = Overflow::Hidden;

        scheduler.animate(&mut host, t, start);
        scheduler.advance(&mut host, start + Duration::from_secs(1));
        assert_eq!(host.overflow(), Overflow::Hidden);
        assert_eq!(host.overflow_history(), &[Overflow::Hidden, Overflow::Hidden]);
    }

    #[test]
    fn test_replacing_cancels_previous_exactly_once() {
        let mut host = HeadlessHost::uniform(3, 100.0, 100.0);
        let mut scheduler = AnimationScheduler::new();
        let start = Instant::now();

        let first = scheduler.animate(&mut host, tween(200.0, 100), start);
        scheduler.advance(&mut host, start + Duration::from_millis(50));
        let mid = start + Duration::from_millis(50);
        let second = scheduler.animate(&mut host, tween(-100.0, 100), mid);

        let settled = scheduler.advance(&mut host, start + Duration::from_secs(1));
        assert_eq!(count_for(&settled, first), 1);
        assert_eq!(count_for(&settled, second), 1);

        let cancelled = settled.iter().find(|c| c.id == first).unwrap();
        assert!(matches!(cancelled.outcome, Err(Error::AnimationCancelled)));
        // Second transition started from the midpoint of the first
        assert!((host.scroll_offset() - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_jump_sets_offset_and_settles() {
        let mut host = HeadlessHost::uniform(3, 100.0, 100.0);
        let mut scheduler = AnimationScheduler::new();

        let id = scheduler.jump(&mut host, 150.0);
        assert_eq!(host.scroll_offset(), 150.0);
        assert!(scheduler.needs_update());

        let settled = scheduler.advance(&mut host, Instant::now());
        assert_eq!(count_for(&settled, id), 1);
    }

    #[test]
    fn test_cancel_without_active_is_noop() {
        let mut host = HeadlessHost::uniform(3, 100.0, 100.0);
        let mut scheduler = AnimationScheduler::new();
        assert_eq!(scheduler.cancel(&mut host), None);
        assert!(scheduler.advance(&mut host, Instant::now()).is_empty());
    }

    #[test]
    fn test_restore_overflow_can_change_mid_flight() {
        let mut host = HeadlessHost::uniform(3, 100.0, 100.0);
        let mut scheduler = AnimationScheduler::new();
        let start = Instant::now();

        assert!(!scheduler.set_restore_overflow(Overflow::Hidden));

        scheduler.animate(&mut host, tween(200.0, 100), start);
        assert!(scheduler.set_restore_overflow(Overflow::Hidden));
        scheduler.advance(&mut host, start + Duration::from_secs(1));
        assert_eq!(host.overflow(), Overflow::Hidden);
    }
}
