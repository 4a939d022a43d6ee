use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use whirligig_core::TrackEvent;

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let state = app.track.state();
        let count = app.slides().len();
        let base = Style::default().bg(theme.bg2);

        let mut spans = vec![Span::styled(
            format!(
                " {}/{} {} ",
                (state.active_index + 1).min(count),
                count,
                pagination_dots(count, state.active_index)
            ),
            base.fg(theme.fg0),
        )];

        let config = app.track.config();
        if config.infinite {
            spans.push(Span::styled("WRAP ", base.fg(theme.grey2)));
        }
        if config.snap_to_slide {
            spans.push(Span::styled("SNAP ", base.fg(theme.grey2)));
        }
        if state.is_animating {
            spans.push(Span::styled("ANIMATING ", base.fg(theme.warning)));
        }
        if state.is_scrolling {
            spans.push(Span::styled("SCROLLING ", base.fg(theme.info)));
        }

        let detail = match (&app.status_message, app.recent_events.back()) {
            (Some(msg), _) => format!("| {} ", msg),
            (None, Some(event)) => format!("| {} ", describe(event)),
            (None, None) => String::new(),
        };
        spans.push(Span::styled(detail, base.fg(theme.grey2)));

        let used: usize = spans.iter().map(|s| s.width()).sum();
        let help_hint = " ←/→:slide S-←/→:scroll 1-9:jump q:quit ";
        let padding_len = (area.width as usize).saturating_sub(used + help_hint.chars().count());
        spans.push(Span::styled(" ".repeat(padding_len), base));
        spans.push(Span::styled(help_hint, base.fg(theme.grey2)));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

/// One dot per slide, filled for the active one
fn pagination_dots(count: usize, active: usize) -> String {
    (0..count)
        .map(|i| if i == active { '●' } else { '○' })
        .collect()
}

fn describe(event: &TrackEvent) -> String {
    match event {
        TrackEvent::BeforeSlide(i) => format!("sliding to {}", i + 1),
        TrackEvent::AfterSlide(i) => format!("settled on {}", i + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_dots() {
        assert_eq!(pagination_dots(4, 1), "○●○○");
        assert_eq!(pagination_dots(0, 0), "");
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(&TrackEvent::BeforeSlide(2)), "sliding to 3");
        assert_eq!(describe(&TrackEvent::AfterSlide(0)), "settled on 1");
    }
}
