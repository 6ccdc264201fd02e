use crate::play::Play;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    Playing,
    Completed,
    Results,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    ConfirmQuit,
    Help,
}

pub struct AppState {
    pub screen: Screen,
    pub play: Play,
    pub choice_cursor: usize,
    pub results_scroll: usize,
    pub dialog_stack: Vec<Dialog>,
    pub message: Option<String>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(play: Play) -> Self {
        let screen = if play.session().completed() {
            Screen::Completed
        } else {
            Screen::Playing
        };
        Self {
            screen,
            play,
            choice_cursor: 0,
            results_scroll: 0,
            dialog_stack: Vec::new(),
            message: None,
            should_quit: false,
        }
    }

    pub fn option_count(&self) -> usize {
        self.play
            .session()
            .current_question()
            .map(|q| q.answers.len())
            .unwrap_or(0)
    }

    pub fn cursor_up(&mut self) {
        self.choice_cursor = self.choice_cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.choice_cursor + 1 < self.option_count() {
            self.choice_cursor += 1;
        }
    }

    pub fn select(&mut self, index: usize) {
        match self.play.select_option(index) {
            Ok(()) => {
                self.choice_cursor = index;
                self.message = None;
            }
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    pub fn submit(&mut self) {
        let result = self.play.submit_answer();
        self.after_advance(result);
    }

    pub fn next(&mut self) {
        let result = self.play.skip();
        self.after_advance(result);
    }

    /// Called whenever the session may have moved to another question.
    pub fn after_advance(&mut self, result: Result<(), crate::error::SessionError>) {
        match result {
            Ok(()) => {
                self.choice_cursor = 0;
                self.message = None;
            }
            Err(e) => self.message = Some(e.to_string()),
        }
        if self.play.session().completed() && self.screen == Screen::Playing {
            self.screen = Screen::Completed;
        }
    }

    pub fn has_dialog(&self) -> bool {
        !self.dialog_stack.is_empty()
    }

    pub fn top_dialog(&self) -> Option<&Dialog> {
        self.dialog_stack.last()
    }

    pub fn push_dialog(&mut self, dialog: Dialog) {
        self.dialog_stack.push(dialog);
    }

    pub fn pop_dialog(&mut self) -> Option<Dialog> {
        self.dialog_stack.pop()
    }

    /// Leaves the quiz; the countdown stops before the loop exits.
    pub fn quit(&mut self) {
        self.play.abandon();
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Answer, Question, Quiz};
    use crate::session::SessionConfig;
    use std::time::Duration;

    fn app(n: usize) -> AppState {
        let quiz = Quiz::new(
            "ui",
            (0..n)
                .map(|i| {
                    Question::new(
                        format!("q{}", i),
                        vec![Answer::new("a", true), Answer::new("b", false)],
                    )
                })
                .collect(),
        );
        let (play, _rx) =
            Play::with_interval(quiz, SessionConfig::default(), Duration::from_secs(3600));
        AppState::new(play)
    }

    #[test]
    fn test_submit_last_question_shows_completed() {
        let mut state = app(1);
        state.select(0);
        state.submit();
        assert_eq!(state.screen, Screen::Completed);
        assert_eq!(state.play.session().score(), 5);
    }

    #[test]
    fn test_bad_selection_sets_message() {
        let mut state = app(1);
        state.select(5);
        assert!(state.message.is_some());
        assert!(state.play.session().selection().is_empty());
    }

    #[test]
    fn test_cursor_bounds() {
        let mut state = app(1);
        state.cursor_up();
        assert_eq!(state.choice_cursor, 0);
        state.cursor_down();
        state.cursor_down();
        assert_eq!(state.choice_cursor, 1);
    }

    #[test]
    fn test_quit_stops_countdown() {
        let mut state = app(2);
        state.quit();
        assert!(state.should_quit);
        assert!(!state.play.countdown().is_running());
    }
}
