use std::io;
use std::sync::mpsc;
use std::time::Duration;

use log::warn;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::CrosstermBackend;
use ratatui::Terminal;

use crate::session::Session;
use crate::state::*;
use crate::timer::TimerEvent;

/// Runs the quiz screens until the user leaves; returns the session as it ended.
pub fn run_tui(
    mut state: AppState,
    timer_rx: mpsc::Receiver<TimerEvent>,
) -> Result<Session, String> {
    enable_raw_mode().map_err(|e| format!("Cannot enable raw mode: {}", e))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| format!("Cannot enter alternate screen: {}", e))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("Cannot create terminal: {}", e))?;

    let result = main_loop(&mut terminal, &mut state, &timer_rx);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result?;
    Ok(state.play.into_session())
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    timer_rx: &mpsc::Receiver<TimerEvent>,
) -> Result<(), String> {
    loop {
        terminal
            .draw(|f| crate::ui::draw(f, state))
            .map_err(|e| format!("Draw error: {}", e))?;

        if state.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(100)).map_err(|e| format!("Poll error: {}", e))? {
            if let Event::Key(key) = event::read().map_err(|e| format!("Read error: {}", e))? {
                if key.kind == KeyEventKind::Press {
                    handle_key(key, state);
                }
            }
        }

        while let Ok(ev) = timer_rx.try_recv() {
            handle_timer(ev, state);
        }
    }

    Ok(())
}

pub fn handle_timer(event: TimerEvent, state: &mut AppState) {
    if state.screen != Screen::Playing {
        return;
    }
    let before = state.play.session().current_question_index();
    match state.play.handle_timer(event) {
        Ok(_) => {
            if state.play.session().completed()
                || state.play.session().current_question_index() != before
            {
                state.after_advance(Ok(()));
            }
        }
        Err(e) => warn!("tick rejected: {}", e),
    }
}

pub fn handle_key(key: KeyEvent, state: &mut AppState) {
    if state.has_dialog() {
        handle_dialog_key(key, state);
        return;
    }

    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        confirm_or_quit(state);
        return;
    }

    match state.screen {
        Screen::Playing => handle_playing_key(key, state),
        Screen::Completed => match key.code {
            KeyCode::Enter | KeyCode::Char('v') => {
                state.screen = Screen::Results;
                state.results_scroll = 0;
            }
            KeyCode::Esc | KeyCode::Char('q') => state.quit(),
            _ => {}
        },
        Screen::Results => match key.code {
            KeyCode::Up => state.results_scroll = state.results_scroll.saturating_sub(1),
            KeyCode::Down => state.results_scroll += 1,
            KeyCode::PageUp => state.results_scroll = state.results_scroll.saturating_sub(10),
            KeyCode::PageDown => state.results_scroll += 10,
            KeyCode::Home => state.results_scroll = 0,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => state.quit(),
            _ => {}
        },
    }
}

fn confirm_or_quit(state: &mut AppState) {
    if state.screen == Screen::Playing {
        state.push_dialog(Dialog::ConfirmQuit);
    } else {
        state.quit();
    }
}

fn handle_playing_key(key: KeyEvent, state: &mut AppState) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return;
    }
    match key.code {
        KeyCode::Up => state.cursor_up(),
        KeyCode::Down => state.cursor_down(),
        KeyCode::Char(' ') => {
            let idx = state.choice_cursor;
            state.select(idx);
        }
        KeyCode::Enter => state.submit(),
        KeyCode::Tab | KeyCode::Right => state.next(),
        KeyCode::Esc => state.push_dialog(Dialog::ConfirmQuit),
        KeyCode::Char('?') => state.push_dialog(Dialog::Help),
        KeyCode::Char(c) if c.is_ascii_lowercase() => {
            let idx = (c as u8 - b'a') as usize;
            state.select(idx);
        }
        KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
            let idx = (c as u8 - b'1') as usize;
            state.select(idx);
        }
        _ => {}
    }
}

fn handle_dialog_key(key: KeyEvent, state: &mut AppState) {
    match state.top_dialog() {
        Some(Dialog::ConfirmQuit) => match key.code {
            KeyCode::Enter | KeyCode::Char('y') => {
                state.pop_dialog();
                state.quit();
            }
            KeyCode::Esc | KeyCode::Char('n') => {
                state.pop_dialog();
            }
            _ => {}
        },
        Some(Dialog::Help) => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') => {
                state.pop_dialog();
            }
            _ => {}
        },
        None => {}
    }
}
