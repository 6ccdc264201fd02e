use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::{info, warn};

use crate::error::StoreError;
use crate::model::{Quiz, QuizSummary};

pub const STORE_ENV: &str = "QUIZPLAY_STORE";
const STORE_FILE: &str = "quizzes.yaml";

/// Source and sink of quiz documents.
pub trait QuizStore {
    fn get_quiz_by_id(&self, id: u32) -> Result<Quiz, StoreError>;
    fn get_all_quizzes(&self) -> Result<Vec<QuizSummary>, StoreError>;
    /// Stores a new quiz and returns it with its assigned identifier.
    fn create_quiz(&mut self, quiz: Quiz) -> Result<Quiz, StoreError>;
}

/// Quizzes kept in a single YAML document on disk.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<Quiz>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)
            .map_err(|e| StoreError::Io(format!("Cannot read {}: {}", self.path.display(), e)))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_yaml::from_str(&content)
            .map_err(|e| StoreError::Corrupt(format!("{}: {}", self.path.display(), e)))
    }

    fn save(&self, quizzes: &[Quiz]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    StoreError::Io(format!("Cannot create {}: {}", parent.display(), e))
                })?;
            }
        }
        let yaml = serde_yaml::to_string(quizzes)
            .map_err(|e| StoreError::Corrupt(format!("Cannot serialize quizzes: {}", e)))?;
        atomic_write(&self.path, &yaml).map_err(StoreError::Io)
    }
}

impl QuizStore for FileStore {
    fn get_quiz_by_id(&self, id: u32) -> Result<Quiz, StoreError> {
        self.load()?
            .into_iter()
            .find(|q| q.id == Some(id))
            .ok_or(StoreError::NotFound(id))
    }

    fn get_all_quizzes(&self) -> Result<Vec<QuizSummary>, StoreError> {
        Ok(self.load()?.iter().map(Quiz::summary).collect())
    }

    fn create_quiz(&mut self, quiz: Quiz) -> Result<Quiz, StoreError> {
        let mut quizzes = self.load()?;
        let stored = prepare_new(&quizzes, quiz)?;
        quizzes.push(stored.clone());
        self.save(&quizzes)?;
        info!(
            "stored quiz {:?} as id {} in {}",
            stored.name,
            stored.id.unwrap_or(0),
            self.path.display()
        );
        Ok(stored)
    }
}

/// In-process store, mostly useful for tests and demos.
#[derive(Debug, Default)]
pub struct MemoryStore {
    quizzes: Vec<Quiz>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QuizStore for MemoryStore {
    fn get_quiz_by_id(&self, id: u32) -> Result<Quiz, StoreError> {
        self.quizzes
            .iter()
            .find(|q| q.id == Some(id))
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn get_all_quizzes(&self) -> Result<Vec<QuizSummary>, StoreError> {
        Ok(self.quizzes.iter().map(Quiz::summary).collect())
    }

    fn create_quiz(&mut self, quiz: Quiz) -> Result<Quiz, StoreError> {
        let stored = prepare_new(&self.quizzes, quiz)?;
        self.quizzes.push(stored.clone());
        Ok(stored)
    }
}

fn prepare_new(existing: &[Quiz], mut quiz: Quiz) -> Result<Quiz, StoreError> {
    let problems = validate_quiz(&quiz);
    if !problems.is_empty() {
        warn!("rejected quiz {:?}: {}", quiz.name, problems.join("; "));
        return Err(StoreError::Invalid(problems));
    }
    quiz.id = Some(next_id(existing));
    quiz.created_at = Some(chrono::Utc::now());
    Ok(quiz)
}

fn next_id(existing: &[Quiz]) -> u32 {
    existing.iter().filter_map(|q| q.id).max().unwrap_or(0) + 1
}

/// Authoring rules for a new quiz. Returns one message per problem found.
pub fn validate_quiz(quiz: &Quiz) -> Vec<String> {
    let mut problems = Vec::new();

    if quiz.name.trim().is_empty() {
        problems.push("Quiz Name is required".to_string());
    }
    if quiz.questions.is_empty() {
        problems.push("At least one question is required".to_string());
    }

    for (i, q) in quiz.questions.iter().enumerate() {
        if q.question.trim().is_empty() {
            problems.push(format!("Question {} is required", i + 1));
        }
        if q.answers.is_empty() {
            problems.push(format!("Question {} has no options", i + 1));
        }
        for (j, a) in q.answers.iter().enumerate() {
            if a.answer.trim().is_empty() {
                problems.push(format!("Question {}: Option {} is required", i + 1, j + 1));
            }
        }
        if !q.answers.is_empty() && q.correct_count() == 0 {
            problems.push(format!(
                "Question {}: At least one correct answer is required",
                i + 1
            ));
        }
    }

    problems
}

/// `--store` flag, then `QUIZPLAY_STORE`, then the per-user data directory.
pub fn resolve_store_path(flag: Option<&str>) -> Result<PathBuf, String> {
    if let Some(p) = flag {
        return Ok(PathBuf::from(p));
    }
    if let Ok(p) = std::env::var(STORE_ENV) {
        if !p.trim().is_empty() {
            return Ok(PathBuf::from(p));
        }
    }
    default_store_path()
}

pub fn default_store_path() -> Result<PathBuf, String> {
    let dirs = ProjectDirs::from("", "", "quizplay")
        .ok_or_else(|| "Cannot determine a data directory; pass --store".to_string())?;
    Ok(dirs.data_dir().join(STORE_FILE))
}

fn atomic_write(path: &Path, content: &str) -> Result<(), String> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, content).map_err(|e| format!("Cannot write {}: {}", tmp.display(), e))?;
    fs::rename(&tmp, path).map_err(|e| format!("Cannot rename: {}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Answer, Question};
    use assert_matches::assert_matches;

    fn sample(name: &str) -> Quiz {
        Quiz::new(
            name,
            vec![Question::new(
                "2 + 2?",
                vec![Answer::new("3", false), Answer::new("4", true)],
            )],
        )
    }

    #[test]
    fn test_memory_store_assigns_sequential_ids() {
        let mut store = MemoryStore::new();
        let a = store.create_quiz(sample("a")).unwrap();
        let b = store.create_quiz(sample("b")).unwrap();
        assert_eq!(a.id, Some(1));
        assert_eq!(b.id, Some(2));
        assert!(b.created_at.is_some());
        assert_eq!(store.get_quiz_by_id(2).unwrap().name, "b");
        assert_matches!(store.get_quiz_by_id(9), Err(StoreError::NotFound(9)));
    }

    #[test]
    fn test_validation_messages() {
        let mut quiz = sample("");
        quiz.questions.push(Question::new(
            "",
            vec![Answer::new("", false), Answer::new("x", false)],
        ));
        let problems = validate_quiz(&quiz);
        assert_eq!(
            problems,
            vec![
                "Quiz Name is required".to_string(),
                "Question 2 is required".to_string(),
                "Question 2: Option 1 is required".to_string(),
                "Question 2: At least one correct answer is required".to_string(),
            ]
        );
    }

    #[test]
    fn test_invalid_quiz_not_stored() {
        let mut store = MemoryStore::new();
        assert_matches!(store.create_quiz(sample(" ")), Err(StoreError::Invalid(_)));
        assert!(store.get_all_quizzes().unwrap().is_empty());
    }

    #[test]
    fn test_explicit_store_path_wins() {
        let p = resolve_store_path(Some("/tmp/x.yaml")).unwrap();
        assert_eq!(p, PathBuf::from("/tmp/x.yaml"));
    }
}
