use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "quizplay", version, about = "Timed multiple-choice quizzes in the terminal")]
pub struct Cli {
    /// Quiz store file [default: $QUIZPLAY_STORE or the user data dir]
    #[arg(long, global = true, value_name = "path")]
    pub store: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List stored quizzes
    List,

    /// Print the questions and options of a quiz
    Show {
        id: u32,
    },

    /// Import a Markdown quiz into the store
    Create {
        /// Markdown file (## per question, - [x] marks correct options)
        file: String,
    },

    /// Take a quiz
    Play {
        id: u32,

        /// Seconds allowed per question
        #[arg(long, value_name = "secs", default_value_t = crate::session::DEFAULT_QUESTION_SECONDS)]
        time_limit: u32,
    },
}
