//! Interactive archive viewer: cabinet, letter popup, annotation panel.

mod app;
mod ui;

pub use app::{App, Focus, InputMode, LetterView};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use dossier_archive::Archive;
use dossier_config::Config;
use dossier_oracle::Oracle;

pub async fn run(archive: Archive, config: Config, oracle: Option<Box<dyn Oracle>>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(archive, config, oracle);

    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match app.input_mode {
                InputMode::Normal => match key.code {
                    KeyCode::Char('q') => {
                        app.close_letter();
                        return Ok(());
                    }
                    KeyCode::Esc => {
                        if app.letter.as_ref().is_some_and(|l| {
                            l.session.active_term().is_some()
                        }) {
                            app.dismiss_panel();
                        } else {
                            app.close_letter();
                        }
                    }
                    KeyCode::Char('c') if app.letter.is_none() => app.cycle_category(),
                    KeyCode::Char('j') | KeyCode::Down => {
                        if app.letter.is_some() {
                            app.guess_cursor_down();
                        } else {
                            app.next_file();
                        }
                    }
                    KeyCode::Char('k') | KeyCode::Up => {
                        if app.letter.is_some() {
                            app.guess_cursor_up();
                        } else {
                            app.previous_file();
                        }
                    }
                    KeyCode::Enter if app.letter.is_none() => app.open_letter(),
                    KeyCode::Tab => app.next_redaction(),
                    KeyCode::BackTab => app.previous_redaction(),
                    KeyCode::Char('a') => app.start_guess(),
                    KeyCode::Char('v') => app.vote_selected()?,
                    KeyCode::Char('r') => app.start_reply(),
                    KeyCode::Char('x') => app.toggle_expand_selected(),
                    KeyCode::Char('n') => app.narrate(),
                    KeyCode::Char('d') => app.decrypt().await,
                    KeyCode::Char('s') => app.reconstruct().await,
                    KeyCode::Char('g') => app.generate_dossier().await,
                    KeyCode::PageUp => app.scroll_up(),
                    KeyCode::PageDown => app.scroll_down(),
                    _ => {}
                },
                InputMode::ComposingGuess => match key.code {
                    KeyCode::Enter => app.confirm_guess_text(),
                    KeyCode::Esc => app.cancel_guess(),
                    KeyCode::Backspace => app.input_backspace(),
                    KeyCode::Char(c) => app.input_char(c),
                    _ => {}
                },
                InputMode::ComposingJustification => match key.code {
                    KeyCode::Enter => app.confirm_guess()?,
                    KeyCode::Esc => app.cancel_guess(),
                    KeyCode::Backspace => app.input_backspace(),
                    KeyCode::Char(c) => app.input_char(c),
                    _ => {}
                },
                InputMode::ComposingReply => match key.code {
                    KeyCode::Enter => app.confirm_reply()?,
                    KeyCode::Esc => app.cancel_reply(),
                    KeyCode::Backspace => app.input_backspace(),
                    KeyCode::Char(c) => app.input_char(c),
                    _ => {}
                },
            }
        }
    }
}
