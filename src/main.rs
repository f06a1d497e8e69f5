use std::{
    fs,
    io::{self, BufRead, Write},
    process,
};

use clap::Parser;
use loxide::{ErrorReporter, ast::format_program, interpreter::{evaluator::core::Interpreter,
                                                               value::core::Value}};

/// loxide is a tree-walking interpreter for the Lox scripting language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Print the parsed program instead of executing it.
    #[arg(long)]
    ast: bool,

    /// Script file to execute; starts a REPL when omitted.
    script: Vec<String>,
}

fn main() {
    let args = Args::parse();

    if args.script.len() > 1 {
        println!("Usage: lox [script]");
        process::exit(64);
    }

    match args.script.first() {
        Some(path) => run_file(path, args.ast),
        None => run_prompt(),
    }
}

/// Executes a script file and exits with the diagnostic-derived code:
/// 65 after syntax errors, 70 after a runtime error, 0 otherwise.
fn run_file(path: &str, print_ast: bool) {
    let source = fs::read_to_string(path).unwrap_or_else(|error| {
                                             eprintln!("Error reading {path:?}: {error}");
                                             process::exit(1);
                                         });

    let mut reporter = ErrorReporter::new();

    if print_ast {
        let statements = loxide::parse_source(&source, &mut reporter);
        if reporter.had_error() {
            process::exit(65);
        }
        println!("{}", format_program(&statements));
        return;
    }

    let mut interpreter = Interpreter::new();
    loxide::run(&source, &mut interpreter, &mut reporter);

    if reporter.had_error() {
        process::exit(65);
    }
    if reporter.had_runtime_error() {
        process::exit(70);
    }
}

/// Runs the interactive prompt.
///
/// One statement batch per line; an empty line or end of input terminates.
/// The interpreter persists across lines so definitions carry over, while
/// the error flags reset so one bad line does not poison the next. The final
/// value of a line is echoed when it is not nil.
fn run_prompt() {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let mut interpreter = Interpreter::new();
    let mut reporter = ErrorReporter::new();

    loop {
        print!(">> ");
        let _ = io::stdout().flush();

        let Some(Ok(line)) = lines.next() else {
            break;
        };
        if line.is_empty() {
            break;
        }

        if let Some(value) = loxide::run(&line, &mut interpreter, &mut reporter)
           && value != Value::Nil
        {
            println!("{value}");
        }
        reporter.reset();
    }
}
