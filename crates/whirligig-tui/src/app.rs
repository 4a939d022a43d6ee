use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::{debug, info};
use whirligig_core::{
    AppConfig, Host, InteractionSignal, SlideGeometry, SlideOptions, Track, TrackEvent,
};

use crate::gesture::{ScrollEndDetector, SwipeRecognizer};
use crate::host::TerminalHost;
use crate::input::Action;
use crate::keymap::validate_keys;
use crate::theme::Theme;

/// How many lifecycle events the status bar remembers
const EVENT_HISTORY: usize = 4;

/// Application state
pub struct App {
    pub config: Arc<AppConfig>,
    pub track: Track<TerminalHost>,
    pub theme: Theme,
    pub should_quit: bool,
    pub status_message: Option<String>,
    /// Most recent lifecycle events, newest last
    pub recent_events: VecDeque<TrackEvent>,
    events_rx: mpsc::UnboundedReceiver<TrackEvent>,
    scroll_end: ScrollEndDetector,
    swipe: SwipeRecognizer,
}

impl App {
    pub fn new(config: Arc<AppConfig>, viewport_width: u16, theme: Theme) -> Self {
        validate_keys(&config.carousel.next_keys);
        validate_keys(&config.carousel.prev_keys);

        let (tx, events_rx) = mpsc::unbounded_channel();
        let mut track = Track::new(config.carousel.clone()).with_event_sender(tx);
        track.mount(TerminalHost::new(&config.demo, viewport_width));
        info!(
            slides = config.demo.slide_count,
            active = track.active_index(),
            "carousel ready"
        );

        Self {
            scroll_end: ScrollEndDetector::new(Duration::from_millis(
                config.demo.scroll_end_debounce_ms,
            )),
            swipe: SwipeRecognizer::new(config.demo.swipe_threshold),
            config,
            track,
            theme,
            should_quit: false,
            status_message: None,
            recent_events: VecDeque::with_capacity(EVENT_HISTORY),
            events_rx,
        }
    }

    pub fn slides(&self) -> &[SlideGeometry] {
        self.track.host().map(|h| h.slides()).unwrap_or(&[])
    }

    pub fn scroll_offset(&self) -> f64 {
        self.track.host().map(|h| h.scroll_offset()).unwrap_or(0.0)
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn handle_action(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::KeyUp(key) => {
                self.clear_status();
                self.deliver(InteractionSignal::KeyUp(key));
            }
            Action::FreeScroll(steps) => {
                let delta = steps as f64 * self.config.demo.scroll_step as f64;
                self.free_scroll(delta, now);
            }
            Action::GoTo(index) => {
                if index >= self.slides().len() {
                    self.set_status(format!("No slide {}", index + 1));
                    return;
                }
                if let Err(e) = self.track.slide_to(index as i64, SlideOptions::default()) {
                    self.set_status(format!("Cannot move: {}", e));
                }
            }
            Action::Next => {
                if let Err(e) = self.track.next() {
                    self.set_status(format!("Cannot move: {}", e));
                }
            }
            Action::Prev => {
                if let Err(e) = self.track.prev() {
                    self.set_status(format!("Cannot move: {}", e));
                }
            }
            Action::Press(column, row) => {
                self.swipe.press(column, row);
                if let Some(host) = self.track.host_mut() {
                    host.set_pointer_down(true);
                }
                self.deliver(InteractionSignal::TouchStart);
            }
            Action::Drag(column, _) => {
                let dx = self.swipe.drag(column);
                if dx != 0 {
                    // Content follows the pointer
                    self.free_scroll(-dx as f64, now);
                }
            }
            Action::Release(column, row) => {
                if !self.swipe.is_pressed() {
                    return;
                }
                let direction = self.swipe.release(column, row);
                if let Some(host) = self.track.host_mut() {
                    host.set_pointer_down(false);
                }
                self.deliver(InteractionSignal::TouchEnd);
                if let Some(direction) = direction {
                    debug!(?direction, "swipe recognised");
                    self.deliver(InteractionSignal::Swipe(direction));
                }
            }
            Action::None => {}
        }
    }

    /// Settle debounced scrolling, advance the track and collect its
    /// lifecycle events. Returns whether the next tick should come at frame rate.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.scroll_end.poll(now) {
            self.deliver(InteractionSignal::ScrollEnd);
        }

        let animating = self.track.update(now);

        while let Ok(event) = self.events_rx.try_recv() {
            debug!(?event, "track event");
            if self.recent_events.len() == EVENT_HISTORY {
                self.recent_events.pop_front();
            }
            self.recent_events.push_back(event);
        }

        animating || self.scroll_end.is_scrolling()
    }

    pub fn resize(&mut self, width: u16) {
        if let Some(host) = self.track.host_mut() {
            host.set_viewport_width(width);
        }
    }

    fn free_scroll(&mut self, delta: f64, now: Instant) {
        let moved = self
            .track
            .host_mut()
            .map(|h| h.scroll_by(delta))
            .unwrap_or(false);
        if moved && self.scroll_end.scrolled(now) {
            self.deliver(InteractionSignal::ScrollStart);
        }
    }

    /// Forward a signal the way a browser would: only if someone listens
    fn deliver(&mut self, signal: InteractionSignal) {
        let subscribed = self
            .track
            .host()
            .map(|h| h.forwards(signal.kind()))
            .unwrap_or(false);
        if subscribed {
            self.track.handle_signal(signal);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use whirligig_core::{CarouselConfig, DemoConfig};

    fn app(carousel: CarouselConfig) -> App {
        let config = AppConfig {
            carousel,
            demo: DemoConfig {
                slide_count: 6,
                slide_width: 20,
                gutter: 0,
                scroll_step: 5,
                ..Default::default()
            },
            ..Default::default()
        };
        App::new(Arc::new(config), 40, Theme::default())
    }

    fn settle(app: &mut App, now: Instant) -> Instant {
        let later = now + Duration::from_secs(5);
        app.tick(later);
        app.tick(later);
        later
    }

    #[test]
    fn test_arrow_key_moves_by_page() {
        let mut app = app(CarouselConfig::default());
        let now = Instant::now();
        app.tick(now);

        app.handle_action(Action::KeyUp("ArrowRight".to_string()), now);
        assert!(app.track.is_animating());
        let now = settle(&mut app, now);

        assert_eq!(app.track.active_index(), 2);
        assert_eq!(app.scroll_offset(), 40.0);
        assert!(!app.track.is_animating());
        assert_eq!(app.recent_events.back(), Some(&TrackEvent::AfterSlide(2)));

        app.handle_action(Action::Quit, now);
        assert!(app.should_quit);
    }

    #[test]
    fn test_free_scroll_settles_on_nearest() {
        let mut app = app(CarouselConfig {
            snap_to_slide: true,
            ..Default::default()
        });
        let now = Instant::now();
        app.tick(now);

        app.handle_action(Action::FreeScroll(3), now);
        assert!(app.track.is_scrolling());
        assert_eq!(app.scroll_offset(), 15.0);

        let now = settle(&mut app, now);
        assert!(!app.track.is_scrolling());
        settle(&mut app, now);
        assert_eq!(app.track.active_index(), 1);
        assert_eq!(app.scroll_offset(), 20.0);
    }

    #[test]
    fn test_goto_out_of_range_sets_status() {
        let mut app = app(CarouselConfig::default());
        app.handle_action(Action::GoTo(8), Instant::now());
        assert_eq!(app.status_message.as_deref(), Some("No slide 9"));
        assert_eq!(app.track.active_index(), 0);
    }

    #[test]
    fn test_drag_then_swipe() {
        let mut app = app(CarouselConfig {
            snap_to_slide: true,
            slide_by: Some(2),
            ..Default::default()
        });
        let now = Instant::now();
        app.tick(now);

        app.handle_action(Action::GoTo(2), now);
        let now = settle(&mut app, now);
        assert_eq!(app.track.active_index(), 2);

        app.handle_action(Action::Press(30, 5), now);
        assert!(app.track.is_scrolling());
        app.handle_action(Action::Drag(36, 5), now);
        app.handle_action(Action::Release(38, 5), now);

        // Pointer travelled right
        assert_eq!(app.track.active_index(), 4);
    }
}
