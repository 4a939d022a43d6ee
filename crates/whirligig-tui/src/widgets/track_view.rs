use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::app::App;

pub struct TrackViewWidget;

impl TrackViewWidget {
    /// Draw every slide that intersects the viewport, clipped at its edges
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        frame.render_widget(Block::default().style(Style::default().bg(theme.bg0)), area);

        let scroll = app.scroll_offset().round() as i32;
        let view_width = area.width as i32;
        let active = app.track.active_index();

        for slide in app.slides() {
            let start = slide.offset_start.round() as i32 - scroll;
            let end = slide.offset_end().round() as i32 - scroll;
            let visible_start = start.max(0);
            let visible_end = end.min(view_width);
            if visible_end <= visible_start {
                continue;
            }

            let clipped_left = start < 0;
            let clipped_right = end > view_width;
            let mut borders = Borders::TOP | Borders::BOTTOM;
            if !clipped_left {
                borders |= Borders::LEFT;
            }
            if !clipped_right {
                borders |= Borders::RIGHT;
            }

            let color = theme.slide_color(slide.index);
            let border_style = if slide.index == active {
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.grey0)
            };

            let rect = Rect {
                x: area.x + visible_start as u16,
                y: area.y,
                width: (visible_end - visible_start) as u16,
                height: area.height,
            };
            let mut block = Block::default().borders(borders).border_style(border_style);
            if !clipped_left {
                block = block.title(format!(" {} ", slide.index + 1));
            }
            let inner = block.inner(rect);

            // Interior columns hidden past the left edge
            let skip = if clipped_left {
                (visible_start - start - 1).max(0) as usize
            } else {
                0
            };
            let interior = (end - start - 2).max(0) as usize;
            let label = centered(&format!("#{}", slide.index + 1), interior);

            let mut lines = vec![Line::default(); inner.height.saturating_sub(1) as usize / 2];
            lines.push(Line::styled(
                clip_columns(&label, skip, inner.width as usize),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));

            frame.render_widget(Paragraph::new(lines).block(block), rect);
        }
    }
}

/// Pad `text` on both sides so it sits in the middle of `width` columns
fn centered(text: &str, width: usize) -> String {
    let text_width: usize = text.chars().filter_map(|c| c.width()).sum();
    let left = width.saturating_sub(text_width) / 2;
    let right = width.saturating_sub(text_width + left);
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

/// Display columns `skip..skip + take` of `text`
fn clip_columns(text: &str, skip: usize, take: usize) -> String {
    let mut column = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if column >= skip && column + w <= skip + take {
            out.push(c);
        }
        column += w;
        if column >= skip + take {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered() {
        assert_eq!(centered("#1", 6), "  #1  ");
        assert_eq!(centered("#10", 6), " #10  ");
        assert_eq!(centered("#100", 2), "#100");
    }

    #[test]
    fn test_clip_columns() {
        assert_eq!(clip_columns("abcdef", 2, 3), "cde");
        assert_eq!(clip_columns("abcdef", 0, 10), "abcdef");
        assert_eq!(clip_columns("abc", 5, 2), "");
    }

    #[test]
    fn test_clip_columns_wide_chars() {
        // Wide glyphs straddling the boundary are dropped
        assert_eq!(clip_columns("a日b", 0, 2), "a");
        assert_eq!(clip_columns("a日b", 1, 3), "日b");
    }
}
