use std::path::PathBuf;

use clap::Parser;
use mcq_quiz::{Quiz, SessionConfig};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file to load the questions from
    #[arg(short, long)]
    questions: PathBuf,

    /// Randomize question order
    #[arg(short, long)]
    shuffle: bool,

    /// Time limit for the whole quiz, in seconds
    #[arg(short, long, value_name = "SECONDS")]
    time_limit: Option<u32>,
}

fn main() {
    let args = Args::parse();
    let config = SessionConfig {
        shuffle: args.shuffle,
        time_limit: args.time_limit,
    };

    let quiz = match Quiz::from_json(&args.questions, config) {
        Ok(quiz) => quiz,
        Err(e) => {
            eprintln!("Failed to load quiz: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = quiz.run() {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
