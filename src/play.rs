use std::sync::mpsc;
use std::time::Duration;

use log::debug;

use crate::error::SessionError;
use crate::model::Quiz;
use crate::session::{Session, SessionConfig};
use crate::timer::{Countdown, TimerEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Counted,
    Suppressed,
}

/// A session wired to its countdown. Every transition that ends a question
/// restarts (or stops) the countdown before returning, so a tick can never be
/// applied to a question whose answer is already recorded.
pub struct Play {
    session: Session,
    countdown: Countdown,
}

impl Play {
    pub fn new(quiz: Quiz, config: SessionConfig) -> (Self, mpsc::Receiver<TimerEvent>) {
        let (countdown, rx) = Countdown::every_second();
        (Self::from_parts(quiz, config, countdown), rx)
    }

    pub fn with_interval(
        quiz: Quiz,
        config: SessionConfig,
        interval: Duration,
    ) -> (Self, mpsc::Receiver<TimerEvent>) {
        let (countdown, rx) = Countdown::new(interval);
        (Self::from_parts(quiz, config, countdown), rx)
    }

    fn from_parts(quiz: Quiz, config: SessionConfig, countdown: Countdown) -> Self {
        let mut play = Self {
            session: Session::with_config(quiz, config),
            countdown,
        };
        play.sync_countdown();
        play
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn select_option(&mut self, index: usize) -> Result<(), SessionError> {
        self.session.select_option(index)
    }

    pub fn submit_answer(&mut self) -> Result<(), SessionError> {
        self.session.submit_answer()?;
        self.sync_countdown();
        Ok(())
    }

    pub fn skip(&mut self) -> Result<(), SessionError> {
        self.session.skip()?;
        self.sync_countdown();
        Ok(())
    }

    pub fn handle_timer(&mut self, event: TimerEvent) -> Result<TickOutcome, SessionError> {
        if self.session.completed() {
            return Ok(TickOutcome::Suppressed);
        }
        if !self
            .countdown
            .accepts(&event, self.session.current_question_index())
        {
            debug!("dropping stale tick {:?}", event);
            return Ok(TickOutcome::Suppressed);
        }

        let before = self.session.current_question_index();
        self.session.tick()?;
        if self.session.completed() || self.session.current_question_index() != before {
            self.sync_countdown();
        }
        Ok(TickOutcome::Counted)
    }

    /// Stops the countdown; the session is left as is.
    pub fn abandon(&mut self) {
        self.countdown.cancel();
    }

    pub fn into_session(self) -> Session {
        let Play {
            session,
            mut countdown,
        } = self;
        countdown.cancel();
        session
    }

    fn sync_countdown(&mut self) {
        if self.session.completed() {
            self.countdown.cancel();
        } else {
            self.countdown.start(self.session.current_question_index());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Answer, Question};

    fn quiz(n: usize) -> Quiz {
        Quiz::new(
            "timed",
            (0..n)
                .map(|i| {
                    Question::new(
                        format!("q{}", i),
                        vec![Answer::new("yes", true), Answer::new("no", false)],
                    )
                })
                .collect(),
        )
    }

    fn idle() -> Duration {
        Duration::from_secs(3600)
    }

    fn tick_for(play: &Play) -> TimerEvent {
        TimerEvent::Tick {
            generation: play.countdown().generation(),
            question: play.session().current_question_index(),
        }
    }

    #[test]
    fn test_countdown_running_while_active() {
        let (play, _rx) = Play::with_interval(quiz(2), SessionConfig::default(), idle());
        assert!(play.countdown().is_running());
        assert_eq!(play.countdown().question(), Some(0));
    }

    #[test]
    fn test_default_play_starts_one_second_countdown() {
        let (play, _rx) = Play::new(quiz(2), SessionConfig::default());
        assert!(play.countdown().is_running());
        assert_eq!(play.countdown().question(), Some(0));
        assert_eq!(play.countdown().generation(), 1);
    }

    #[test]
    fn test_empty_quiz_never_starts_countdown() {
        let (play, _rx) = Play::with_interval(quiz(0), SessionConfig::default(), idle());
        assert!(play.session().completed());
        assert!(!play.countdown().is_running());
    }

    #[test]
    fn test_stale_tick_after_submit_is_suppressed() {
        let (mut play, _rx) = Play::with_interval(quiz(2), SessionConfig::default(), idle());
        let stale = tick_for(&play);
        play.submit_answer().unwrap();
        assert_eq!(play.handle_timer(stale).unwrap(), TickOutcome::Suppressed);
        assert_eq!(play.session().remaining_seconds(), 30);
        assert_eq!(play.countdown().question(), Some(1));
    }

    #[test]
    fn test_timeout_restarts_countdown_for_next_question() {
        let config = SessionConfig {
            question_seconds: 2,
        };
        let (mut play, _rx) = Play::with_interval(quiz(2), config, idle());
        let first_gen = play.countdown().generation();
        assert_eq!(play.handle_timer(tick_for(&play)).unwrap(), TickOutcome::Counted);
        assert_eq!(play.handle_timer(tick_for(&play)).unwrap(), TickOutcome::Counted);
        assert_eq!(play.session().current_question_index(), 1);
        assert!(play.countdown().generation() > first_gen);
        assert_eq!(play.countdown().question(), Some(1));
    }

    #[test]
    fn test_completion_stops_countdown() {
        let (mut play, _rx) = Play::with_interval(quiz(1), SessionConfig::default(), idle());
        let last = tick_for(&play);
        play.skip().unwrap();
        assert!(play.session().completed());
        assert!(!play.countdown().is_running());
        assert_eq!(play.handle_timer(last).unwrap(), TickOutcome::Suppressed);
    }

    #[test]
    fn test_abandon_stops_countdown() {
        let (mut play, _rx) = Play::with_interval(quiz(3), SessionConfig::default(), idle());
        play.abandon();
        assert!(!play.countdown().is_running());
        assert!(!play.session().completed());
    }
}
