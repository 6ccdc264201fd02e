use clap::Parser;
use log::warn;

use quizplay::cli::{Cli, Command};
use quizplay::parser;
use quizplay::play::Play;
use quizplay::session::SessionConfig;
use quizplay::state::AppState;
use quizplay::store::{resolve_store_path, FileStore, QuizStore};
use quizplay::tui;

fn main() {
    pretty_env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();

    let store_path = resolve_store_path(cli.store.as_deref())?;
    let mut store = FileStore::new(store_path);

    match cli.command {
        Command::List => {
            let quizzes = store.get_all_quizzes()?;
            if quizzes.is_empty() {
                println!("No quizzes in {}", store.path().display());
            }
            for q in quizzes {
                println!("{:>4}  {}  ({} questions)", q.id, q.name, q.question_count);
            }
        }
        Command::Show { id } => {
            let quiz = store.get_quiz_by_id(id)?;
            println!("{}", quiz.name);
            for (i, q) in quiz.questions.iter().enumerate() {
                println!();
                println!("{}. {}", i + 1, q.question);
                for (j, a) in q.answers.iter().enumerate() {
                    let mark = if a.is_correct { "x" } else { " " };
                    println!("   [{}] {}. {}", mark, (b'A' + (j % 26) as u8) as char, a.answer);
                }
            }
        }
        Command::Create { file } => {
            let content = std::fs::read_to_string(&file)
                .map_err(|e| format!("Cannot read quiz file: {}", e))?;
            let quiz = parser::parse_quiz(&content)?;
            let stored = store.create_quiz(quiz)?;
            println!(
                "Created quiz {} \"{}\" ({} questions)",
                stored.id.unwrap_or(0),
                stored.name,
                stored.questions.len()
            );
        }
        Command::Play { id, time_limit } => {
            if time_limit == 0 {
                return Err("--time-limit must be at least 1 second".to_string());
            }
            // Lookup failures surface here, before any session exists.
            let quiz = store.get_quiz_by_id(id)?;
            let config = SessionConfig {
                question_seconds: time_limit,
            };
            let (play, timer_rx) = Play::new(quiz, config);
            if !play.session().malformed_questions().is_empty() {
                warn!(
                    "quiz {} has questions without a correct answer; they cannot score",
                    id
                );
            }
            let state = AppState::new(play);
            let session = tui::run_tui(state, timer_rx)?;
            if session.completed() {
                println!("{}: {} points", session.quiz().name, session.score());
            }
        }
    }

    Ok(())
}
