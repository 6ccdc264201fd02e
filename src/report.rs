use crate::error::SessionError;
use crate::model::Question;
use crate::scoring::{score_selection, verdict, Verdict};
use crate::session::Session;

pub const NOT_ANSWERED: &str = "Not Answered";

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionResult {
    pub question: String,
    pub correct_answers: Vec<String>,
    pub user_answers: String,
    pub fully_correct: bool,
    pub partially_correct: bool,
}

impl QuestionResult {
    pub fn verdict(&self) -> Verdict {
        if self.fully_correct {
            Verdict::FullyCorrect
        } else if self.partially_correct {
            Verdict::PartiallyCorrect
        } else {
            Verdict::Incorrect
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub quiz_name: String,
    pub score: u32,
    pub max_score: u32,
    pub results: Vec<QuestionResult>,
}

/// Per-question breakdown of a completed session, in quiz order.
pub fn get_results(session: &Session) -> Result<Vec<QuestionResult>, SessionError> {
    if !session.completed() {
        return Err(SessionError::ResultsNotReady);
    }

    let history = session.answer_history();
    let results = session
        .quiz()
        .questions
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let selection = history.get(i).map(|r| r.selection.as_slice());
            question_result(question, selection)
        })
        .collect();

    Ok(results)
}

pub fn build_report(session: &Session) -> Result<Report, SessionError> {
    let results = get_results(session)?;
    let max_score: u32 = session
        .quiz()
        .questions
        .iter()
        .map(|q| score_selection(q, &q.correct_indices()))
        .sum();

    Ok(Report {
        quiz_name: session.quiz().name.clone(),
        score: session.score(),
        max_score,
        results,
    })
}

fn question_result(question: &Question, selection: Option<&[usize]>) -> QuestionResult {
    let correct_answers = question
        .answers
        .iter()
        .filter(|a| a.is_correct)
        .map(|a| a.answer.clone())
        .collect();

    let selection = selection.unwrap_or(&[]);
    let user_answers = if selection.is_empty() {
        NOT_ANSWERED.to_string()
    } else {
        selection
            .iter()
            .map(|&i| {
                question
                    .answers
                    .get(i)
                    .map(|a| a.answer.as_str())
                    .unwrap_or(NOT_ANSWERED)
            })
            .collect::<Vec<_>>()
            .join(", ")
    };

    let v = verdict(question, selection);
    QuestionResult {
        question: question.question.clone(),
        correct_answers,
        user_answers,
        fully_correct: v == Verdict::FullyCorrect,
        partially_correct: v == Verdict::PartiallyCorrect,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Answer, Quiz};

    fn colours() -> Question {
        Question::new(
            "Primary colours?",
            vec![
                Answer::new("Red", true),
                Answer::new("Green", false),
                Answer::new("Blue", true),
            ],
        )
    }

    #[test]
    fn test_user_answers_in_selection_order() {
        let q = colours();
        let r = question_result(&q, Some(&[2, 0][..]));
        assert_eq!(r.user_answers, "Blue, Red");
        assert_eq!(r.correct_answers, vec!["Red", "Blue"]);
        assert!(r.fully_correct);
        assert!(!r.partially_correct);
    }

    #[test]
    fn test_missing_record_and_bad_index() {
        let q = colours();
        let missing = question_result(&q, None);
        assert_eq!(missing.user_answers, NOT_ANSWERED);
        assert_eq!(missing.verdict(), Verdict::Incorrect);

        let bad = question_result(&q, Some(&[1, 9][..]));
        assert_eq!(bad.user_answers, "Green, Not Answered");
        assert_eq!(bad.verdict(), Verdict::Incorrect);
    }

    #[test]
    fn test_partial() {
        let r = question_result(&colours(), Some(&[0, 1][..]));
        assert!(r.partially_correct);
        assert_eq!(r.verdict(), Verdict::PartiallyCorrect);
    }

    #[test]
    fn test_report_totals() {
        let mut s = Session::new(Quiz::new("c", vec![colours()]));
        s.select_option(0).unwrap();
        s.submit_answer().unwrap();
        let report = build_report(&s).unwrap();
        assert_eq!(report.score, 5);
        assert_eq!(report.max_score, 10);
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.quiz_name, "c");
    }
}
