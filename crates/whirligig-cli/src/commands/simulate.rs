use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use whirligig_core::{
    AppConfig, HeadlessHost, Host, InteractionSignal, NavigationState, SlideOptions,
    SwipeDirection, Track, TrackEvent,
};

/// Give up waiting for a track that never goes idle
const SETTLE_LIMIT: Duration = Duration::from_secs(10);

const DEFAULT_STEPS: &[&str] = &["next", "settle", "next", "settle", "prev", "settle"];

pub struct SimulateOptions {
    pub slides: Option<usize>,
    pub slide_width: Option<f64>,
    pub viewport: Option<f64>,
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq)]
enum Step {
    Next,
    Prev,
    Slide(i64),
    Push(i64),
    Key(String),
    Swipe(SwipeDirection),
    Scroll(f64),
    ScrollEnd,
    TouchStart,
    TouchEnd,
    Wait(Option<Duration>),
    Settle,
}

#[derive(Debug, Serialize)]
struct TraceEntry {
    step: String,
    #[serde(flatten)]
    state: NavigationState,
    offset: f64,
    events: Vec<TrackEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub async fn run(config: &AppConfig, options: SimulateOptions, steps: &[String]) -> Result<()> {
    let slides = options.slides.unwrap_or(config.demo.slide_count);
    let slide_width = options.slide_width.unwrap_or(config.demo.slide_width as f64);
    let viewport = options.viewport.unwrap_or_else(|| match config.carousel.visible_slides {
        0 => slide_width * 2.5,
        n => slide_width * n as f64,
    });
    let frame = Duration::from_millis(1000 / config.demo.animation_fps.max(1) as u64);
    let animation = Duration::from_millis(config.carousel.animation_duration_ms);

    let steps: Vec<String> = if steps.is_empty() {
        DEFAULT_STEPS.iter().map(|s| s.to_string()).collect()
    } else {
        steps.to_vec()
    };
    let parsed = steps
        .iter()
        .map(|s| parse_step(s))
        .collect::<Result<Vec<_>>>()?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut track = Track::new(config.carousel.clone()).with_event_sender(tx);
    track.mount(HeadlessHost::uniform(slides, slide_width, viewport));
    track.update(Instant::now());
    debug!(slides, slide_width, viewport, "simulation started");

    let mut trace = vec![record(&track, "mount", &mut rx, None)];
    if !options.json {
        print_entry(&trace[0]);
    }

    for (raw, step) in steps.iter().zip(parsed) {
        let error = apply(&mut track, step, frame, animation).await.err();
        track.update(Instant::now());

        let entry = record(&track, raw, &mut rx, error.map(|e| e.to_string()));
        if !options.json {
            print_entry(&entry);
        }
        trace.push(entry);
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&trace)?);
    }

    Ok(())
}

async fn apply(
    track: &mut Track<HeadlessHost>,
    step: Step,
    frame: Duration,
    animation: Duration,
) -> Result<()> {
    match step {
        Step::Next => {
            track.next()?;
        }
        Step::Prev => {
            track.prev()?;
        }
        Step::Slide(index) => {
            track.slide_to(index, SlideOptions::default())?;
        }
        Step::Push(index) => track.push_slide_to(index),
        Step::Key(key) => track.handle_signal(InteractionSignal::KeyUp(key)),
        Step::Swipe(direction) => track.handle_signal(InteractionSignal::Swipe(direction)),
        Step::Scroll(offset) => {
            track.handle_signal(InteractionSignal::ScrollStart);
            if let Some(host) = track.host_mut() {
                host.scroll_to(offset);
            }
        }
        Step::ScrollEnd => track.handle_signal(InteractionSignal::ScrollEnd),
        Step::TouchStart => {
            if let Some(host) = track.host_mut() {
                host.set_interacting(true);
            }
            track.handle_signal(InteractionSignal::TouchStart);
        }
        Step::TouchEnd => {
            if let Some(host) = track.host_mut() {
                host.set_interacting(false);
            }
            track.handle_signal(InteractionSignal::TouchEnd);
        }
        Step::Wait(duration) => {
            let deadline = Instant::now() + duration.unwrap_or(animation + frame);
            run_frames(track, frame, deadline, false).await;
        }
        Step::Settle => {
            let deadline = Instant::now() + SETTLE_LIMIT;
            if !run_frames(track, frame, deadline, true).await {
                warn!("track still busy after {:?}", SETTLE_LIMIT);
            }
        }
    }
    Ok(())
}

/// Drive the track at frame rate until `deadline`, or until it goes idle
/// when `until_idle` is set. Returns whether the track went idle.
async fn run_frames(
    track: &mut Track<HeadlessHost>,
    frame: Duration,
    deadline: Instant,
    until_idle: bool,
) -> bool {
    loop {
        let now = Instant::now();
        let busy = track.update(now);
        if until_idle && !busy {
            return true;
        }
        if now >= deadline {
            return !busy;
        }
        tokio::time::sleep(frame.min(deadline - now)).await;
    }
}

fn record(
    track: &Track<HeadlessHost>,
    step: &str,
    rx: &mut mpsc::UnboundedReceiver<TrackEvent>,
    error: Option<String>,
) -> TraceEntry {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    TraceEntry {
        step: step.to_string(),
        state: track.state(),
        offset: track.host().map(|h| h.scroll_offset()).unwrap_or(0.0),
        events,
        error,
    }
}

fn print_entry(entry: &TraceEntry) {
    let events = entry
        .events
        .iter()
        .map(|e| match e {
            TrackEvent::BeforeSlide(i) => format!("before:{}", i),
            TrackEvent::AfterSlide(i) => format!("after:{}", i),
        })
        .collect::<Vec<_>>()
        .join(" ");
    let error = entry
        .error
        .as_ref()
        .map(|e| format!(" ({})", e))
        .unwrap_or_default();

    println!(
        "{:<16} active={:<3} animating={:<5} scrolling={:<5} offset={:>8.1} {}{}",
        entry.step,
        entry.state.active_index,
        entry.state.is_animating,
        entry.state.is_scrolling,
        entry.offset,
        events,
        error
    );
}

fn parse_step(raw: &str) -> Result<Step> {
    let (name, arg) = match raw.split_once(':') {
        Some((name, arg)) => (name, Some(arg)),
        None => (raw, None),
    };
    let required = || arg.ok_or_else(|| anyhow!("step '{}' needs an argument", name));

    let step = match name {
        "next" => Step::Next,
        "prev" => Step::Prev,
        "slide" => Step::Slide(required()?.parse()?),
        "push" => Step::Push(required()?.parse()?),
        "key" => Step::Key(required()?.to_string()),
        "swipe" => Step::Swipe(match required()? {
            "left" => SwipeDirection::Left,
            "right" => SwipeDirection::Right,
            "up" => SwipeDirection::Up,
            "down" => SwipeDirection::Down,
            other => return Err(anyhow!("unknown swipe direction '{}'", other)),
        }),
        "scroll" => Step::Scroll(required()?.parse()?),
        "scroll-end" => Step::ScrollEnd,
        "touch-start" => Step::TouchStart,
        "touch-end" => Step::TouchEnd,
        "wait" => Step::Wait(match arg {
            Some(ms) => Some(Duration::from_millis(ms.parse()?)),
            None => None,
        }),
        "settle" => Step::Settle,
        _ => return Err(anyhow!("unknown step '{}'", raw)),
    };
    Ok(step)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_steps() {
        assert_eq!(parse_step("next").unwrap(), Step::Next);
        assert_eq!(parse_step("scroll-end").unwrap(), Step::ScrollEnd);
        assert_eq!(parse_step("wait").unwrap(), Step::Wait(None));
        assert_eq!(
            parse_step("wait:250").unwrap(),
            Step::Wait(Some(Duration::from_millis(250)))
        );
    }

    #[test]
    fn test_parse_steps_with_arguments() {
        assert_eq!(parse_step("slide:-1").unwrap(), Step::Slide(-1));
        assert_eq!(parse_step("scroll:420.5").unwrap(), Step::Scroll(420.5));
        assert_eq!(
            parse_step("key:ArrowRight").unwrap(),
            Step::Key("ArrowRight".to_string())
        );
        assert_eq!(
            parse_step("swipe:left").unwrap(),
            Step::Swipe(SwipeDirection::Left)
        );
    }

    #[test]
    fn test_parse_rejects_bad_steps() {
        assert!(parse_step("jump").is_err());
        assert!(parse_step("slide").is_err());
        assert!(parse_step("slide:x").is_err());
        assert!(parse_step("swipe:sideways").is_err());
    }

    #[tokio::test]
    async fn test_scripted_run_settles_on_target() {
        let config = AppConfig::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut track = Track::new(config.carousel.clone()).with_event_sender(tx);
        track.mount(HeadlessHost::uniform(5, 100.0, 250.0));
        track.update(Instant::now());

        let frame = Duration::from_millis(5);
        apply(&mut track, Step::Slide(3), frame, Duration::ZERO)
            .await
            .unwrap();
        apply(&mut track, Step::Settle, frame, Duration::ZERO)
            .await
            .unwrap();

        let entry = record(&track, "settle", &mut rx, None);
        assert_eq!(entry.state.active_index, 3);
        assert!(!entry.state.is_animating);
        assert_eq!(entry.offset, 300.0);
        assert_eq!(
            entry.events,
            vec![TrackEvent::BeforeSlide(3), TrackEvent::AfterSlide(3)]
        );
    }
}
