use std::fmt;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use quiz_core::model::{Category, SessionSpec};
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{Clock, QuizLoopService, QuizSession, categories};
use storage::repository::{QuestionSource, Storage};

mod report;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidMax { raw: String },
    InvalidSeed { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidMax { raw } => write!(f, "invalid --max value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- play       [--source <src>] [--category <name>] [--max <n>] [--seed <n>] [--json]");
    eprintln!("  cargo run -p app -- categories [--source <src>]");
    eprintln!();
    eprintln!("Sources:");
    eprintln!("  bundled (default), a path to a JSON file, or an http(s):// URL");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_SOURCE, QUIZ_CATEGORY, QUIZ_MAX_QUESTIONS, QUIZ_SEED, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    Categories,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "categories" => Some(Self::Categories),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Args {
    source: QuestionSource,
    category: Option<String>,
    max_questions: usize,
    seed: Option<u64>,
    json: bool,
}

impl Args {
    fn from_env() -> Self {
        Self {
            source: std::env::var("QUIZ_SOURCE")
                .ok()
                .map_or(QuestionSource::Bundled, |raw| QuestionSource::parse(&raw)),
            category: std::env::var("QUIZ_CATEGORY")
                .ok()
                .filter(|value| !value.is_empty()),
            max_questions: std::env::var("QUIZ_MAX_QUESTIONS")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(0),
            seed: std::env::var("QUIZ_SEED")
                .ok()
                .and_then(|value| value.parse().ok()),
            json: false,
        }
    }

    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::from_env();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--source" => {
                    parsed.source = QuestionSource::parse(&require_value(args, "--source")?);
                }
                "--category" => {
                    parsed.category = Some(require_value(args, "--category")?);
                }
                "--max" => {
                    let value = require_value(args, "--max")?;
                    parsed.max_questions = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidMax { raw: value.clone() })?;
                }
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    parsed.seed = Some(
                        value
                            .parse()
                            .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?,
                    );
                }
                "--json" => parsed.json = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }
}

/// Reads lines until one parses as a number in `1..=max`.
fn prompt_choice(
    input: &mut impl BufRead,
    out: &mut impl Write,
    label: &str,
    max: usize,
) -> io::Result<Option<usize>> {
    loop {
        write!(out, "{label} [1-{max}]: ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        match line.trim().parse::<usize>() {
            Ok(n) if (1..=max).contains(&n) => return Ok(Some(n - 1)),
            _ => writeln!(out, "Please enter a number between 1 and {max}.")?,
        }
    }
}

fn pick_category(
    input: &mut impl BufRead,
    out: &mut impl Write,
    available: &[Category],
) -> io::Result<Option<Category>> {
    if available.is_empty() {
        writeln!(out, "The question catalog is empty.")?;
        return Ok(None);
    }
    writeln!(out, "Choose a category:")?;
    for (i, category) in available.iter().enumerate() {
        writeln!(out, "  {}) {category}", i + 1)?;
    }
    let choice = prompt_choice(input, out, "Category", available.len())?;
    Ok(choice.map(|i| available[i].clone()))
}

/// Drives one session from stdin. Returns `false` if input ended early.
fn play_session(
    loop_svc: &QuizLoopService,
    session: &mut QuizSession,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<bool, Box<dyn std::error::Error>> {
    while !session.is_complete() {
        let question = Arc::clone(session.current_question()?);
        report::write_question(out, &session.progress(), &question)?;

        let Some(choice) = prompt_choice(input, out, "Answer", question.options().len())? else {
            return Ok(false);
        };
        let result = loop_svc.answer_current(session, choice)?;
        report::write_feedback(out, &result)?;
    }
    Ok(true)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: play when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Play,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Play,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            io::Error::new(io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let parsed = Args::parse(&mut argv.into_iter()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    log::debug!("parsed arguments: {parsed:?}");

    let storage = Storage::open(&parsed.source)?;
    let loop_svc = QuizLoopService::new(Clock::default(), Arc::clone(&storage.questions));
    let catalog = loop_svc.load_catalog().await?;
    let available = categories(&catalog);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cmd {
        Command::Categories => {
            for category in &available {
                writeln!(out, "{category}")?;
            }
            Ok(())
        }
        Command::Play => {
            let category = match parsed.category {
                Some(name) => Category::new(name),
                None => match pick_category(&mut input, &mut out, &available)? {
                    Some(category) => category,
                    None => return Ok(()),
                },
            };

            let spec = SessionSpec::new(category).with_max_questions(parsed.max_questions);
            let mut session = match parsed.seed {
                Some(seed) => {
                    loop_svc.session_from_catalog(&catalog, &spec, &mut StdRng::seed_from_u64(seed))
                }
                None => loop_svc.session_from_catalog(&catalog, &spec, &mut rand::rng()),
            };

            if session.is_complete() {
                writeln!(out, "No questions found for category \"{}\".", spec.category)?;
            }
            if !play_session(&loop_svc, &mut session, &mut input, &mut out)? {
                writeln!(out)?;
                writeln!(out, "Quiz abandoned.")?;
                return Ok(());
            }

            let summary = loop_svc.finish(session)?;
            if parsed.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
            } else {
                report::write_summary(&mut out, &summary)?;
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::Question;
    use quiz_core::time::fixed_clock;
    use storage::repository::InMemoryRepository;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| (*s).to_owned()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn parses_flags() {
        let parsed = Args::parse(&mut args(&[
            "--source", "quiz.json", "--category", "React", "--max", "3", "--seed", "9", "--json",
        ]))
        .unwrap();
        assert_eq!(parsed.source, QuestionSource::File("quiz.json".into()));
        assert_eq!(parsed.category.as_deref(), Some("React"));
        assert_eq!(parsed.max_questions, 3);
        assert_eq!(parsed.seed, Some(9));
        assert!(parsed.json);
    }

    #[test]
    fn rejects_bad_max() {
        let err = Args::parse(&mut args(&["--max", "lots"])).unwrap_err();
        assert!(matches!(err, ArgsError::InvalidMax { .. }));
    }

    #[test]
    fn rejects_missing_value() {
        let err = Args::parse(&mut args(&["--category"])).unwrap_err();
        assert!(matches!(err, ArgsError::MissingValue { flag: "--category" }));
    }

    #[test]
    fn prompt_choice_retries_until_valid() {
        let mut input = io::Cursor::new("abc\n7\n2\n");
        let mut out = Vec::new();
        let choice = prompt_choice(&mut input, &mut out, "Answer", 3).unwrap();
        assert_eq!(choice, Some(1));
    }

    #[test]
    fn prompt_choice_stops_at_end_of_input() {
        let mut input = io::Cursor::new("");
        let mut out = Vec::new();
        assert_eq!(prompt_choice(&mut input, &mut out, "Answer", 3).unwrap(), None);
    }

    #[test]
    fn plays_session_from_scripted_input() {
        let question = Question::new("A", "Q", vec!["x".into(), "y".into()], 1).unwrap();
        let loop_svc = QuizLoopService::new(
            fixed_clock(),
            Arc::new(InMemoryRepository::new(Vec::new())),
        );
        let mut session = QuizSession::new(Category::new("A"), vec![Arc::new(question)], fixed_clock());

        let mut input = io::Cursor::new("2\n");
        let mut out = Vec::new();
        assert!(play_session(&loop_svc, &mut session, &mut input, &mut out).unwrap());

        let summary = loop_svc.finish(session).unwrap();
        assert_eq!(summary.score, 1);
        assert_eq!(summary.percentage, 100);
    }
}
