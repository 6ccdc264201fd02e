use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub name: String,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub answer: String,
    #[serde(rename = "isCorrect", default)]
    pub is_correct: bool,
}

/// Listing entry returned by the store without the question bodies.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSummary {
    pub id: u32,
    pub name: String,
    pub question_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Single,
    Multi,
}

impl Quiz {
    pub fn new(name: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            id: None,
            name: name.into(),
            questions,
            created_at: None,
        }
    }

    pub fn summary(&self) -> QuizSummary {
        QuizSummary {
            id: self.id.unwrap_or(0),
            name: self.name.clone(),
            question_count: self.questions.len(),
        }
    }
}

impl Question {
    pub fn new(question: impl Into<String>, answers: Vec<Answer>) -> Self {
        Self {
            question: question.into(),
            answers,
        }
    }

    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_correct).count()
    }

    pub fn correct_indices(&self) -> Vec<usize> {
        self.answers
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_correct)
            .map(|(i, _)| i)
            .collect()
    }
}

impl Answer {
    pub fn new(answer: impl Into<String>, is_correct: bool) -> Self {
        Self {
            answer: answer.into(),
            is_correct,
        }
    }
}
