use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    process::ExitCode,
    rc::Rc,
};

use clap::Parser as _;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use unitcalc::{Parser, UnitSystem, builtin_unit_system};

const PROMPT: &str = "> ";
const ANSWER: &str = "= ";
const ERROR: &str = "! ";

/// unitcalc is a command-line calculator whose numbers can carry physical
/// units.
#[derive(clap::Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Evaluates each non-blank line of a file, sharing variables between
    /// lines, and stops at the first error.
    #[arg(short, long, conflicts_with = "expression")]
    file: Option<PathBuf>,

    /// Starts with an empty unit system instead of the built-in units.
    #[arg(long)]
    no_builtin_units: bool,

    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// A single statement to evaluate. Without it (and without `--file`) an
    /// interactive session starts.
    expression: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    let units = if args.no_builtin_units { UnitSystem::new() } else { builtin_unit_system() };
    let mut parser = Parser::new(Rc::new(units));

    if let Some(expression) = &args.expression {
        return exit_code(evaluate_line(&mut parser, expression));
    }

    if let Some(path) = &args.file {
        return run_file(&mut parser, path);
    }

    repl(&mut parser)
}

/// Installs a stderr subscriber filtered by `RUST_LOG`, falling back to
/// `default_level`.
fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry().with(filter)
                                  .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
                                  .init();
}

/// Prints the result or the error of one statement; returns `true` on
/// success.
fn evaluate_line(parser: &mut Parser, line: &str) -> bool {
    match parser.evaluate(line) {
        Ok(value) => {
            println!("{ANSWER}{value}");
            true
        },
        Err(e) => {
            eprintln!("{ERROR}{e}");
            false
        },
    }
}

fn exit_code(success: bool) -> ExitCode {
    if success { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn run_file(parser: &mut Parser, path: &Path) -> ExitCode {
    let Ok(script) = fs::read_to_string(path) else {
        eprintln!("{ERROR}Failed to read the input file '{}'. Perhaps this file does not exist?",
                  path.display());
        return ExitCode::FAILURE;
    };

    for (number, line) in script.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        tracing::debug!(line = number + 1, "evaluating file line");
        if !evaluate_line(parser, line) {
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}

fn repl(parser: &mut Parser) -> ExitCode {
    println!("Welcome to unitcalc!");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();

    loop {
        print!("{PROMPT}");
        if io::stdout().flush().is_err() {
            return ExitCode::FAILURE;
        }

        line.clear();
        match input.read_line(&mut line) {
            Ok(0) => {
                println!("\nBye!");
                return ExitCode::SUCCESS;
            },
            Ok(_) => {
                evaluate_line(parser, line.trim_end_matches(['\r', '\n']));
            },
            Err(e) => {
                println!("{ERROR}Can't read input! Terminating...");
                tracing::error!(error = %e, "failed to read standard input");
                return ExitCode::FAILURE;
            },
        }
    }
}
