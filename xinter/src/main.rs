mod cli;
mod logger;
mod repl;
mod rlpl;
mod rppl;

use std::{fs::File, io::BufReader, path::PathBuf, rc::Rc};

use clap::{Parser, Subcommand};
use cli::{print_finished, print_running};
use logger::LogLevel;
use termcolor::Color;
use xinter_core::{
    session::{Session, SessionOptions},
    utils::prelude::{Error, Output, OutputEmitterIO}
};

#[derive(Parser)]
#[command(version, about = "Interactive evaluator for a small expression language")]
struct Cli {
    /// Verbosity of internal logging
    #[arg(long, value_enum, global = true, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Starts an interactive session
    Repl {
        /// Echo the value of every bare expression
        #[arg(long, default_value_t = false)]
        calc: bool,
        /// Trace lexer and parser advances
        #[arg(long, default_value_t = false)]
        dev: bool,
        /// Prompt printed before every line
        #[arg(long, default_value = repl::PROMPT)]
        prompt: String,
    },
    /// Feeds a script file through a session, line by line
    Run {
        /// Path of script file
        path: PathBuf,
        /// Echo the value of every bare expression
        #[arg(long, default_value_t = false)]
        calc: bool,
        /// Trace lexer and parser advances
        #[arg(long, default_value_t = false)]
        dev: bool,
    },
    /// Runs Read Lex Print Loop
    Rlpl,
    /// Runs Read Parse Print Loop
    Rppl
}

fn main() {
    let cli = Cli::parse();
    logger::init_with_level(cli.log_level);

    let result = match cli.command {
        Command::Repl { calc, dev, prompt } => {
            let options = SessionOptions { calc_mode: calc, debug_mode: dev };

            repl::start(options, &prompt)
        },
        Command::Run { path, calc, dev } => {
            let options = SessionOptions { calc_mode: calc, debug_mode: dev };

            run_script(path, options)
        },
        Command::Rlpl => rlpl::start(),
        Command::Rppl => rppl::start()
    };

    if let Err(err) = result {
        ConsoleOutputEmitter.emit_output(Output::Error(Error::from(err)));
        std::process::exit(1);
    }
}

fn run_script(path: PathBuf, options: SessionOptions) -> std::io::Result<()> {
    let origin = path.display().to_string();
    let file = File::open(&path)?;

    print_running(&origin);
    let start = std::time::Instant::now();

    let mut session = Session::new(options, Rc::new(ConsoleOutputEmitter))
        .with_origin(origin.as_str());

    match session.feed_stream(&mut BufReader::new(file)) {
        Ok(_) => {},
        Err(err) => ConsoleOutputEmitter.emit_output(Output::Error(err))
    }

    tracing::info!(lines = session.history().len(), "script finished");
    print_finished(std::time::Instant::now() - start);

    Ok(())
}

/// Values and status lines go to stdout, traces and diagnostics to stderr.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleOutputEmitter;

impl OutputEmitterIO for ConsoleOutputEmitter {
    fn emit_output(&self, output: Output) {
        match output {
            Output::Trace(text) => cli::print_colourful_prefix("Trace", Color::Cyan, &text),
            Output::Error(error) => {
                let buffer_writer = cli::stderr_buffer_writer();
                let mut buffer = buffer_writer.buffer();

                let written = error.pretty(&mut buffer)
                    .and_then(|_| buffer_writer.print(&buffer));

                if let Err(err) = written {
                    tracing::warn!(%err, "failed to write diagnostic to stderr");
                }
            },
            output => println!("{output}")
        }
    }
}
