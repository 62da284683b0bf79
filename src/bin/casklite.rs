//! CaskLite interactive shell
//!
//! Reads one statement per line, runs it through the executor, and
//! prints the rendered result or a formatted error. Ctrl-C aborts the
//! current line and re-prompts; Ctrl-D ends the session.

use clap::Parser;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper};
use tracing_subscriber::{fmt, EnvFilter};

use casklite::{Config, Executor, Output};

/// Keywords offered by tab completion
const KEYWORDS: &[&str] = &[
    ".t", ".db", "create", "table", "database", "insert", "into", "values", "select", "from",
    "where", "limit", "index", "int", "str",
];

/// CaskLite shell
#[derive(Parser, Debug)]
#[command(name = "casklite")]
#[command(about = "SQL shell over append-only per-table logs")]
#[command(version)]
struct Args {
    /// Database to open; falls back to the default database when omitted
    database: Option<String>,

    /// Root directory under which databases live
    #[arg(short, long, default_value = ".")]
    root_dir: String,
}

fn main() {
    // Initialize tracing/logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,casklite=info"));

    fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();

    let config = Config::builder().root_dir(&args.root_dir).build();
    let label = args
        .database
        .clone()
        .unwrap_or_else(|| config.default_database.clone());

    let mut executor = match Executor::open(config, args.database.as_deref()) {
        Ok(e) => e,
        Err(e) => {
            tracing::error!("cannot open database: {e}");
            std::process::exit(1);
        }
    };

    println!("CaskLite v{} — one log per table", casklite::VERSION);

    let mut editor = match make_editor() {
        Ok(ed) => ed,
        Err(e) => {
            tracing::error!("cannot initialize line editor: {e}");
            std::process::exit(1);
        }
    };

    let prompt = format!("casklite@{label}> ");
    loop {
        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);
                run_line(&mut executor, line);
            }
            // Ctrl-C: drop the current line, keep the session
            Err(ReadlineError::Interrupted) => continue,
            // Ctrl-D: clean exit
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                tracing::error!("readline failed: {e}");
                break;
            }
        }
    }

    println!("Bye!");
}

/// Run one statement and print its outcome; errors never end the session
fn run_line(executor: &mut Executor, line: &str) {
    match executor.execute(line) {
        Ok(outcome) => match outcome.output {
            Output::Rows(result) => println!("{}", casklite::render::render(&result)),
            Output::Message(message) => println!("{message}"),
            Output::Done => {
                println!("{} executed in {:.2?}", outcome.operation, outcome.elapsed)
            }
        },
        Err(e) => eprintln!("ERROR: {e}"),
    }
}

fn make_editor() -> rustyline::Result<Editor<SqlHelper, DefaultHistory>> {
    let mut editor = Editor::new()?;
    editor.set_helper(Some(SqlHelper));
    Ok(editor)
}

/// rustyline helper providing keyword completion only
struct SqlHelper;

impl Completer for SqlHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let start = line[..pos]
            .rfind(|c: char| c.is_whitespace() || c == '(' || c == ',')
            .map(|i| i + 1)
            .unwrap_or(0);

        let word = line[start..pos].to_lowercase();
        let matches = KEYWORDS
            .iter()
            .filter(|kw| kw.starts_with(&word))
            .map(|kw| Pair {
                display: kw.to_string(),
                replacement: kw.to_string(),
            })
            .collect();

        Ok((start, matches))
    }
}

impl Hinter for SqlHelper {
    type Hint = String;
}

impl Highlighter for SqlHelper {}
impl Validator for SqlHelper {}
impl Helper for SqlHelper {}
