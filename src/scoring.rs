use crate::model::{Question, SelectionMode};

pub const POINTS_PER_CORRECT: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    FullyCorrect,
    PartiallyCorrect,
    Incorrect,
}

/// A question with no correct answer is malformed; it still plays as single choice.
pub fn classify_selection_mode(question: &Question) -> SelectionMode {
    if question.correct_count() > 1 {
        SelectionMode::Multi
    } else {
        SelectionMode::Single
    }
}

pub fn is_malformed(question: &Question) -> bool {
    question.correct_count() == 0
}

fn correct_hits(question: &Question, selection: &[usize]) -> usize {
    selection
        .iter()
        .filter(|&&i| question.answers.get(i).map(|a| a.is_correct).unwrap_or(false))
        .count()
}

/// Points earned by a selection: five per correct hit, never negative.
pub fn score_selection(question: &Question, selection: &[usize]) -> u32 {
    correct_hits(question, selection) as u32 * POINTS_PER_CORRECT
}

pub fn verdict(question: &Question, selection: &[usize]) -> Verdict {
    let hits = correct_hits(question, selection);
    let total = question.correct_count();

    // Zero hits first: a question with no correct answer is never fully correct.
    if hits == 0 {
        Verdict::Incorrect
    } else if hits == total {
        Verdict::FullyCorrect
    } else {
        Verdict::PartiallyCorrect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Answer;

    fn question(flags: &[bool]) -> Question {
        Question::new(
            "q",
            flags
                .iter()
                .enumerate()
                .map(|(i, &c)| Answer::new(format!("opt{}", i), c))
                .collect(),
        )
    }

    #[test]
    fn test_selection_mode() {
        assert_eq!(
            classify_selection_mode(&question(&[false, true, false])),
            SelectionMode::Single
        );
        assert_eq!(
            classify_selection_mode(&question(&[true, false, true])),
            SelectionMode::Multi
        );
        let broken = question(&[false, false]);
        assert_eq!(classify_selection_mode(&broken), SelectionMode::Single);
        assert!(is_malformed(&broken));
    }

    #[test]
    fn test_score_counts_correct_hits_only() {
        let q = question(&[true, false, true, false]);
        assert_eq!(score_selection(&q, &[]), 0);
        assert_eq!(score_selection(&q, &[1, 3]), 0);
        assert_eq!(score_selection(&q, &[0]), 5);
        assert_eq!(score_selection(&q, &[0, 1, 2, 3]), 10);
        // out-of-range indices earn nothing
        assert_eq!(score_selection(&q, &[9]), 0);
    }

    #[test]
    fn test_score_monotonic_in_correct_indices() {
        let q = question(&[true, true, false, true, false]);
        let mut selection = vec![2];
        let mut last = score_selection(&q, &selection);
        for idx in q.correct_indices() {
            selection.push(idx);
            let now = score_selection(&q, &selection);
            assert!(now >= last);
            last = now;
        }
        selection.push(4);
        assert_eq!(score_selection(&q, &selection), last);
    }

    #[test]
    fn test_verdicts() {
        let q = question(&[true, false, true]);
        assert_eq!(verdict(&q, &[0, 2]), Verdict::FullyCorrect);
        assert_eq!(verdict(&q, &[0, 1, 2]), Verdict::FullyCorrect);
        assert_eq!(verdict(&q, &[2]), Verdict::PartiallyCorrect);
        assert_eq!(verdict(&q, &[1]), Verdict::Incorrect);
        assert_eq!(verdict(&q, &[]), Verdict::Incorrect);
    }

    #[test]
    fn test_malformed_question_is_never_correct() {
        let q = question(&[false, false]);
        assert_eq!(verdict(&q, &[]), Verdict::Incorrect);
        assert_eq!(verdict(&q, &[0]), Verdict::Incorrect);
    }
}
