//! Command-line interface for building parsing tables and tracing parses.
//!
//! ```text
//! srparse table [-g expr.g] [-m lr1|slr] [--sets] [-o expr.tab]
//! srparse parse [-g expr.g] [-t expr.tab] [-m lr1|slr] 'id+id*id$'
//! ```
//!
//! Without `-g` the built-in expression grammar is used; `parse` without `-g`
//! and `-t` uses its precomputed table. `parse` exits with status 1 when the
//! input is rejected.

#[cfg(feature = "cli")]
mod real {
    use anyhow::{Context, Result};
    use clap::{Parser, Subcommand};
    use srparse::{Driver, Grammar, ParseOutcome, ParsingTable};
    use srparse_gen::construct::Automaton;
    use srparse_gen::{report, text, Method};
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use std::process::ExitCode;

    #[derive(Parser)]
    #[command(version, about = "Build LR parsing tables and trace shift-reduce parses")]
    struct Args {
        /// Enable trace logging of every driver step (off by default).
        #[arg(short = 'd', long, global = true)]
        debug: bool,

        #[command(subcommand)]
        command: Command,
    }

    #[derive(Subcommand)]
    enum Command {
        /// Builds the parsing table of a grammar and prints it
        Table {
            /// Grammar file; the built-in expression grammar if omitted
            #[arg(short = 'g', long)]
            grammar: Option<PathBuf>,

            /// Construction method
            #[arg(short = 'm', long, value_enum, default_value_t = Method::Lr1)]
            method: Method,

            /// Also print FIRST/FOLLOW sets and the item sets
            #[arg(long)]
            sets: bool,

            /// Save the table in cell format to this file
            #[arg(short = 'o', long)]
            output: Option<PathBuf>,
        },

        /// Parses an input sentence and prints the trace
        Parse {
            /// Grammar file; the built-in expression grammar if omitted
            #[arg(short = 'g', long)]
            grammar: Option<PathBuf>,

            /// Table file in cell format; built from the grammar if omitted
            #[arg(short = 't', long)]
            table: Option<PathBuf>,

            /// Construction method when the table is built
            #[arg(short = 'm', long, value_enum, default_value_t = Method::Lr1)]
            method: Method,

            /// Input sentence, e.g. `id+id*id$`
            input: String,
        },
    }

    fn load_grammar(path: Option<&Path>) -> Result<Grammar> {
        match path {
            Some(path) => {
                let source = std::fs::read_to_string(path)
                    .with_context(|| format!("can't read {:?}", path))?;
                text::read_grammar(&source).with_context(|| format!("in {:?}", path))
            }
            None => Ok(Grammar::expression()),
        }
    }

    fn table(
        grammar: Option<PathBuf>,
        method: Method,
        sets: bool,
        output: Option<PathBuf>,
    ) -> Result<ExitCode> {
        let grammar = load_grammar(grammar.as_deref())?;
        let automaton = Automaton::build(&grammar, method);
        let mut out = std::io::stdout().lock();
        report::write_prods(&mut out, &grammar)?;
        writeln!(out)?;
        if sets {
            report::write_first_follow(&mut out, &grammar)?;
            writeln!(out)?;
            report::write_sets(&mut out, &automaton)?;
            writeln!(out)?;
        }
        let table = automaton.table(&grammar)?;
        report::write_table(&mut out, &table)?;
        if let Some(path) = output {
            let mut file = std::fs::File::create(&path)
                .with_context(|| format!("can't create {:?}", path))?;
            text::write_table(&mut file, &table)?;
            log::info!("table saved to {:?}", path);
        }
        Ok(ExitCode::SUCCESS)
    }

    fn parse(
        grammar_path: Option<PathBuf>,
        table_path: Option<PathBuf>,
        method: Method,
        input: &str,
    ) -> Result<ExitCode> {
        let grammar = load_grammar(grammar_path.as_deref())?;
        let table = match (&grammar_path, table_path) {
            (_, Some(path)) => {
                let source = std::fs::read_to_string(&path)
                    .with_context(|| format!("can't read {:?}", path))?;
                text::read_table(&grammar, &source).with_context(|| format!("in {:?}", path))?
            }
            (None, None) => ParsingTable::expression(&grammar)?,
            (Some(_), None) => srparse_gen::build_table(&grammar, method)?,
        };
        let symbols = text::read_input(input)?;
        let outcome = Driver::new(&grammar, &table).run(&symbols)?;

        let mut out = std::io::stdout().lock();
        report::write_trace(&mut out, &grammar, &table, &symbols, outcome.trace())?;
        let stats = outcome.trace().stats();
        match outcome {
            ParseOutcome::Accepted { .. } => {
                writeln!(
                    out,
                    "accepted in {} steps ({} shifts, {} reductions)",
                    stats.steps, stats.shifts, stats.reductions
                )?;
                Ok(ExitCode::SUCCESS)
            }
            ParseOutcome::Rejected { diagnostic, .. } => {
                writeln!(out, "rejected: {}", diagnostic)?;
                Ok(ExitCode::FAILURE)
            }
        }
    }

    /// Level forced by `--debug`; otherwise `RUST_LOG` decides.
    fn log_filter(debug: bool) -> Option<log::LevelFilter> {
        debug.then_some(log::LevelFilter::Trace)
    }

    pub fn main() -> Result<ExitCode> {
        let args = Args::parse();
        let mut logger = env_logger::Builder::from_default_env();
        if let Some(level) = log_filter(args.debug) {
            logger.filter_level(level);
        }
        logger.init();

        match args.command {
            Command::Table {
                grammar,
                method,
                sets,
                output,
            } => table(grammar, method, sets, output),
            Command::Parse {
                grammar,
                table,
                method,
                input,
            } => parse(grammar, table, method, &input),
        }
    }

}

#[cfg(feature = "cli")]
fn main() -> anyhow::Result<std::process::ExitCode> {
    real::main()
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("srparse disabled (compiled without `cli` feature)");
}
