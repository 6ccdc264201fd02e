use std::fmt;

/// Rejections raised by session transitions and result reporting.
///
/// None of these are fatal: the session is left exactly as it was before the
/// call that produced the error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// `select_option` was given an index outside the current answer list.
    InvalidSelection { index: usize, answer_count: usize },
    /// A mutating call arrived after the session completed.
    InvalidTransition,
    /// Results were requested before the last question ended.
    ResultsNotReady,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InvalidSelection {
                index,
                answer_count,
            } => write!(
                f,
                "Option {} does not exist (question has {} options)",
                index, answer_count
            ),
            SessionError::InvalidTransition => write!(f, "Quiz is already completed"),
            SessionError::ResultsNotReady => write!(f, "Results are not available until the quiz is completed"),
        }
    }
}

impl std::error::Error for SessionError {}

/// Failures from a quiz document store.
#[derive(Debug)]
pub enum StoreError {
    NotFound(u32),
    Io(String),
    Corrupt(String),
    Invalid(Vec<String>),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "Quiz {} not found", id),
            StoreError::Io(msg) => write!(f, "Store I/O error: {}", msg),
            StoreError::Corrupt(msg) => write!(f, "Corrupt quiz store: {}", msg),
            StoreError::Invalid(problems) => {
                write!(f, "Quiz is invalid: {}", problems.join("; "))
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl From<StoreError> for String {
    fn from(err: StoreError) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = SessionError::InvalidSelection {
            index: 7,
            answer_count: 4,
        };
        assert_eq!(err.to_string(), "Option 7 does not exist (question has 4 options)");
        assert_eq!(StoreError::NotFound(3).to_string(), "Quiz 3 not found");
        let invalid = StoreError::Invalid(vec!["a".into(), "b".into()]);
        assert_eq!(invalid.to_string(), "Quiz is invalid: a; b");
    }
}
