use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use whirligig_core::AppConfig;
use whirligig_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::{handle_key_event, handle_mouse_event},
    theme::Theme,
    widgets::{StatusBarWidget, TrackViewWidget},
};

/// Height of the slide row, borders included
const TRACK_HEIGHT: u16 = 9;

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Whirligig"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let width = terminal.size()?.width;
    let mut app = App::new(config.clone(), width, Theme::default());

    let result = event_loop(&mut terminal, &mut app, &config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    config: &AppConfig,
) -> Result<()> {
    let event_handler =
        EventHandler::new(config.demo.tick_rate_ms).with_animation_fps(config.demo.animation_fps);

    loop {
        // Frame rate while the track moves, idle rate otherwise
        let needs_fast_update = app.tick(Instant::now());

        terminal.draw(|frame| {
            let size = frame.area();
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(TRACK_HEIGHT),
                    Constraint::Min(0),
                    Constraint::Length(1),
                ])
                .split(size);

            TrackViewWidget::render(frame, main_layout[0], app);
            StatusBarWidget::render(frame, main_layout[2], app);
        })?;

        let event = if needs_fast_update {
            event_handler.next_frame()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => app.handle_action(handle_key_event(key), Instant::now()),
                AppEvent::Mouse(mouse) => {
                    app.handle_action(handle_mouse_event(mouse), Instant::now())
                }
                AppEvent::Resize(width, _) => app.resize(width),
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
