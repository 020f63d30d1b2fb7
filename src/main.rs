use std::{
    env,
    fs::read_to_string,
    io,
    path::{Path, PathBuf},
    process::ExitCode,
};

use aquamarine::{
    config::{Config, DEFAULT_MAX_CALL_DEPTH},
    display_error,
    evaluator::evaluator::Evaluator,
    lexer::lexer::Lexer,
    object::{environment::Environment, object::Object},
    parser::parser::parse_program,
    repl,
};
use clap::Parser;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "aquamarine", about = "The Aquamarine programming language")]
struct Cli {
    /// Script to run. Starts an interactive session when omitted.
    file: Option<PathBuf>,

    /// Nested function calls allowed before evaluation is aborted.
    #[arg(long = "max-call-depth", default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_call_depth: usize,

    /// Print the parsed program instead of evaluating it.
    #[arg(long)]
    echo: bool,
}

/// Logs go to stderr and only when `RUST_LOG` is set,
/// e.g. `RUST_LOG=aquamarine=trace`.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let config = Config {
        max_call_depth: cli.max_call_depth,
        echo: cli.echo,
    };

    match &cli.file {
        Some(file) => run_file(file, &config),
        None => run_repl(&config),
    }
}

fn run_file(path: &Path, config: &Config) -> ExitCode {
    let source = match read_to_string(path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Error: could not read {}: {}", path.display(), error);
            return ExitCode::FAILURE;
        }
    };

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());
    let (program, errors) = parse_program(Lexer::new(source.clone(), file_name));

    if !errors.is_empty() {
        for error in &errors {
            display_error(error, path, &source);
        }
        return ExitCode::FAILURE;
    }

    if config.echo {
        println!("{}", program);
        return ExitCode::SUCCESS;
    }

    debug!(file = %path.display(), "evaluating");

    match Evaluator::new(config).eval_program(&program, &Environment::new()) {
        Ok(Object::Error(message)) => {
            eprintln!("ERROR: {}", message);
            ExitCode::FAILURE
        }
        Ok(Object::Null) => ExitCode::SUCCESS,
        Ok(value) => {
            println!("{}", value);
            ExitCode::SUCCESS
        }
        Err(error) => {
            display_error(&error, path, &source);
            ExitCode::FAILURE
        }
    }
}

fn run_repl(config: &Config) -> ExitCode {
    let user = env::var("USER").unwrap_or_else(|_| String::from("friend"));
    println!("Hello {}! This is the Aquamarine programming language!", user);
    println!("Feel free to type in commands");

    let stdin = io::stdin();
    match repl::start(stdin.lock(), io::stdout(), config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        }
    }
}
