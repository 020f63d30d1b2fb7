//! Line-at-a-time interactive session.
//!
//! Every line is parsed and evaluated on its own, but all lines share one
//! environment, so bindings made earlier stay visible.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::{
    ast::ast::Stmt,
    config::Config,
    errors::errors::Error,
    evaluator::evaluator::Evaluator,
    lexer::lexer::Lexer,
    object::{environment::Environment, object::Object},
    parser::parser::parse_program,
};

pub const PROMPT: &str = ">> ";

pub const BANNER: &str = r"
  ___                                                _
 / _ \                                              (_)
/ /_\ \  __ _  _   _   __ _  _ __ ___    __ _  _ __  _  _ __    ___
|  _  | / _' || | | | / _' || '_ \' _ \  / _' || '__|| || '_ \  / _ \
| | | || (_| || |_| || (_| || | | | | || (_| || |   | || | | ||  __/
\_| |_/ \__, | \__,_| \__,_||_| |_| |_| \__,_||_|   |_||_| |_|\___|
           | |
           |_|
";

/// Runs the session until `input` is exhausted.
pub fn start<R: BufRead, W: Write>(input: R, mut output: W, config: &Config) -> io::Result<()> {
    let env = Environment::new();
    let mut evaluator = Evaluator::new(config);

    writeln!(output, "{}", BANNER)?;

    let mut lines = input.lines();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => return Ok(()),
        };

        let (program, errors) = parse_program(Lexer::new(line, None));
        if !errors.is_empty() {
            print_parser_errors(&mut output, &errors)?;
            continue;
        }

        if config.echo {
            writeln!(output, "{}", program)?;
            continue;
        }

        match evaluator.eval_program(&program, &env) {
            // A trailing `let` that bound its value prints nothing
            Ok(Object::Null) if matches!(program.statements.last(), Some(Stmt::Let(_))) => {}
            Ok(value) => writeln!(output, "{}", value)?,
            Err(error) => {
                debug!(%error, "evaluation aborted");
                writeln!(output, "FATAL: {}", error)?;
            }
        }
    }
}

fn print_parser_errors<W: Write>(output: &mut W, errors: &[Error]) -> io::Result<()> {
    writeln!(output, "Error in Aquamarine script syntax errors:")?;
    for error in errors {
        writeln!(output, "\t{}", error)?;
    }
    Ok(())
}
