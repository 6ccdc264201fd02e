use log::{debug, warn};

use crate::error::SessionError;
use crate::model::{Question, Quiz, SelectionMode};
use crate::scoring::{classify_selection_mode, is_malformed, score_selection};

pub const DEFAULT_QUESTION_SECONDS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub question_seconds: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            question_seconds: DEFAULT_QUESTION_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Submitted,
    TimedOut,
    Skipped,
}

/// The frozen selection a question ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub selection: Vec<usize>,
    pub ended_by: EndReason,
    /// Points this record added to the session score (always 0 for skips).
    pub points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Active(usize),
    Completed,
}

/// One play-through of a quiz.
///
/// All fields are private; the transition methods are the only writers.
#[derive(Debug, Clone)]
pub struct Session {
    quiz: Quiz,
    modes: Vec<SelectionMode>,
    malformed: Vec<usize>,
    config: SessionConfig,
    current_question: usize,
    remaining_seconds: u32,
    selection: Vec<usize>,
    score: u32,
    history: Vec<AnswerRecord>,
    completed: bool,
}

impl Session {
    pub fn new(quiz: Quiz) -> Self {
        Self::with_config(quiz, SessionConfig::default())
    }

    pub fn with_config(quiz: Quiz, config: SessionConfig) -> Self {
        let modes = quiz.questions.iter().map(classify_selection_mode).collect();
        let malformed: Vec<usize> = quiz
            .questions
            .iter()
            .enumerate()
            .filter(|(_, q)| is_malformed(q))
            .map(|(i, _)| i)
            .collect();
        for idx in &malformed {
            warn!(
                "quiz {:?}: question {} has no correct answer",
                quiz.name,
                idx + 1
            );
        }

        let completed = quiz.questions.is_empty();
        Self {
            quiz,
            modes,
            malformed,
            config,
            current_question: 0,
            remaining_seconds: config.question_seconds.max(1),
            selection: Vec::new(),
            score: 0,
            history: Vec::new(),
            completed,
        }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn phase(&self) -> Phase {
        if self.completed {
            Phase::Completed
        } else {
            Phase::Active(self.current_question)
        }
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn current_question_index(&self) -> usize {
        self.current_question
    }

    pub fn current_question(&self) -> Option<&Question> {
        if self.completed {
            None
        } else {
            self.quiz.questions.get(self.current_question)
        }
    }

    pub fn current_mode(&self) -> Option<SelectionMode> {
        if self.completed {
            None
        } else {
            self.modes.get(self.current_question).copied()
        }
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn question_seconds(&self) -> u32 {
        self.config.question_seconds.max(1)
    }

    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selection.contains(&index)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn answer_history(&self) -> &[AnswerRecord] {
        &self.history
    }

    /// Indices of questions that have no correct answer.
    pub fn malformed_questions(&self) -> &[usize] {
        &self.malformed
    }

    pub fn select_option(&mut self, index: usize) -> Result<(), SessionError> {
        self.ensure_active()?;
        let answer_count = self.quiz.questions[self.current_question].answers.len();
        if index >= answer_count {
            return Err(SessionError::InvalidSelection {
                index,
                answer_count,
            });
        }

        match self.modes[self.current_question] {
            SelectionMode::Single => {
                self.selection.clear();
                self.selection.push(index);
            }
            SelectionMode::Multi => {
                if self.selection.contains(&index) {
                    self.selection.retain(|&i| i != index);
                } else {
                    self.selection.push(index);
                }
            }
        }
        Ok(())
    }

    pub fn submit_answer(&mut self) -> Result<(), SessionError> {
        self.ensure_active()?;
        self.finish_question(EndReason::Submitted);
        Ok(())
    }

    /// Moves on without scoring the current selection.
    pub fn skip(&mut self) -> Result<(), SessionError> {
        self.ensure_active()?;
        self.finish_question(EndReason::Skipped);
        Ok(())
    }

    /// One elapsed second. Running out of time submits whatever is selected.
    pub fn tick(&mut self) -> Result<(), SessionError> {
        self.ensure_active()?;
        if self.remaining_seconds <= 1 {
            self.remaining_seconds = 0;
            debug!("question {} timed out", self.current_question + 1);
            self.finish_question(EndReason::TimedOut);
        } else {
            self.remaining_seconds -= 1;
        }
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), SessionError> {
        if self.completed {
            Err(SessionError::InvalidTransition)
        } else {
            Ok(())
        }
    }

    fn finish_question(&mut self, ended_by: EndReason) {
        let selection = std::mem::take(&mut self.selection);
        let points = match ended_by {
            EndReason::Submitted | EndReason::TimedOut => {
                score_selection(&self.quiz.questions[self.current_question], &selection)
            }
            EndReason::Skipped => 0,
        };
        self.score += points;
        self.history.push(AnswerRecord {
            selection,
            ended_by,
            points,
        });
        self.advance();
    }

    fn advance(&mut self) {
        if self.current_question + 1 >= self.quiz.questions.len() {
            self.completed = true;
            debug!("quiz {:?} completed with {} points", self.quiz.name, self.score);
        } else {
            self.current_question += 1;
            self.selection.clear();
            self.remaining_seconds = self.question_seconds();
        }
    }
}
