use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use frontend::{
    display_error,
    lexer::{
        lexer::{tokenize, Lexer},
        tokens::TokenKind,
    },
    parser::parser::parse,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "frontend", version)]
/// Scanner and parser front end
struct App {
    #[command(subcommand)]
    command: Option<Command>,

    /// Log filter such as `debug` or `frontend::parser=trace`, overriding
    /// `RUST_LOG`
    #[arg(long, global = true, value_name = "FILTER")]
    log: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Reads lines interactively and prints their tokens (the default)
    Repl,
    /// Prints the token stream of a file
    Tokens {
        /// The file to scan
        file: PathBuf,
    },
    /// Parses a file and prints the program, or its diagnostics
    Ast {
        /// The file to parse
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let args = App::parse();

    if init_logging(args.log.as_deref()).is_err() {
        return ExitCode::FAILURE;
    }

    let result = match args.command.unwrap_or(Command::Repl) {
        Command::Repl => repl(),
        Command::Tokens { file } => print_tokens(&file),
        Command::Ast { file } => print_ast(&file),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(()) => ExitCode::FAILURE,
    }
}

/// Builds the log filter from `--log`, then `RUST_LOG`, defaulting to
/// warnings only.
fn log_filter(directives: Option<&str>) -> Result<EnvFilter, String> {
    match directives {
        Some(directives) => EnvFilter::try_new(directives).map_err(|error| error.to_string()),
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))),
    }
}

fn init_logging(directives: Option<&str>) -> Result<(), ()> {
    let filter = log_filter(directives).map_err(|error| eprintln!("Invalid log filter: {error}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn repl() -> Result<(), ()> {
    println!("Running REPL, exit using ctrl+d or ctrl+c");

    let mut rl = rustyline::DefaultEditor::new().map_err(|error| eprintln!("{error}"))?;
    while let Ok(line) = rl.readline(">> ") {
        _ = rl.add_history_entry(line.as_str());

        let mut lexer = Lexer::new(line, None);
        loop {
            let token = lexer.next_token();
            if token.kind == TokenKind::EOF {
                break;
            }
            println!("{token}");
        }
    }

    Ok(())
}

fn read_file(file: &Path) -> Result<(String, String), ()> {
    let source = read_to_string(file).map_err(|error| {
        eprintln!("Failed to read {}: {error}", file.display());
    })?;

    let file_name = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    Ok((source, file_name))
}

fn print_tokens(file: &Path) -> Result<(), ()> {
    let (source, file_name) = read_file(file)?;

    for token in tokenize(source, Some(file_name)) {
        println!("{}", token.debug());
    }

    Ok(())
}

fn print_ast(file: &Path) -> Result<(), ()> {
    let (source, file_name) = read_file(file)?;
    let (parser, program) = parse(source.clone(), Some(file_name));

    if !parser.diagnostics().is_empty() {
        for error in parser.diagnostics() {
            eprintln!("{}", display_error(error, &source));
        }
        return Err(());
    }

    for stmt in program.iter() {
        println!("{stmt}");
    }

    Ok(())
}
