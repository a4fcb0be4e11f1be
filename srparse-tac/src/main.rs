//! Command-line interface for srparse-tac.
//!
//! Translates each expression given on the command line, or each non-empty
//! line of an input file, and prints the numbered three-address code.

use clap::Parser as ClapParser;
use srparse::DriverOptions;
use srparse_tac::{TacError, Translator};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(ClapParser, Debug)]
#[command(version, about = "Translate expressions to three-address code", long_about = None)]
struct Args {
    /// File with one expression per line
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Abort a parse after this many driver steps
    #[arg(long)]
    max_steps: Option<usize>,

    /// Expressions to translate, e.g. `a + b * c`
    exprs: Vec<String>,
}

fn translate_one(translator: &Translator, source: &str) -> Result<(), TacError> {
    let program = translator.translate(source)?;
    println!("{}", source.trim());
    print!("{}", program);
    println!("result = {}", program.operand(program.result())?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();

    let mut sources = args.exprs;
    if let Some(path) = &args.input {
        match std::fs::read_to_string(path) {
            Ok(text) => sources.extend(
                text.lines()
                    .filter(|line| !line.trim().is_empty())
                    .map(str::to_owned),
            ),
            Err(err) => {
                eprintln!("can't read {:?}: {}", path, err);
                return ExitCode::FAILURE;
            }
        }
    }

    let translator = match Translator::new() {
        Ok(translator) => translator,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    let translator = match args.max_steps {
        Some(limit) => translator.with_options(DriverOptions::new().max_steps(limit)),
        None => translator,
    };

    let mut status = ExitCode::SUCCESS;
    for (i, source) in sources.iter().enumerate() {
        if i > 0 {
            println!();
        }
        if let Err(err) = translate_one(&translator, source) {
            eprintln!("{}: {}", source.trim(), err);
            status = ExitCode::FAILURE;
        }
    }
    status
}
