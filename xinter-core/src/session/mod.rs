
use std::{io::BufRead, rc::Rc};

use utf8_chars::BufReadCharsExt;

use crate::{
    environment::prelude::Environment,
    eval::prelude::evaluate,
    lexer::prelude::{tokenize, tokenize_traced},
    utils::prelude::{Error, Output, OutputEmitterIO}
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Echo the value of every bare expression statement.
    pub calc_mode: bool,
    /// Trace lexer and parser advances.
    pub debug_mode: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Lines handled by the session itself. They never reach the evaluator
/// and are not recorded for `run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Calc,
    Decalc,
    Dev,
    Undev,
    Run,
    Exit,
}

impl Command {
    pub fn from_line(line: &str) -> Option<Self> {
        Some(match line {
            "calc" => Self::Calc,
            "decalc" => Self::Decalc,
            "dev" => Self::Dev,
            "undev" => Self::Undev,
            "run" => Self::Run,
            "exit" => Self::Exit,
            _ => return None
        })
    }
}

pub struct Session {
    env: Environment,
    history: Vec<String>,
    options: SessionOptions,

    origin: String,
    line_number: usize,
    emitter: Rc<dyn OutputEmitterIO>,
}

impl Session {
    pub fn new(options: SessionOptions, emitter: Rc<dyn OutputEmitterIO>) -> Self {
        Self {
            env: Environment::new(),
            history: vec![],
            options,

            origin: "repl".to_string(),
            line_number: 0,
            emitter,
        }
    }

    /// Name shown in diagnostics, e.g. a script path.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }

    /// Handles one line of user input. Errors are reported to the output
    /// channel and never end the session.
    pub fn feed(&mut self, line: &str) -> Flow {
        let line = line.trim();
        self.line_number += 1;

        if line.is_empty() {
            return Flow::Continue;
        }

        if let Some(command) = Command::from_line(line) {
            return self.dispatch(command);
        }

        self.history.push(line.to_string());

        if let Err(err) = self.execute(line) {
            self.emitter.emit_output(Output::Error(err));
        }

        Flow::Continue
    }

    /// Feeds every line of `reader` until it is exhausted or `exit` is read.
    pub fn feed_stream<R: BufRead>(&mut self, reader: &mut R) -> Result<Flow, Error> {
        let mut line = String::new();

        for ch in reader.chars() {
            match ch? {
                '\n' => {
                    if self.feed(&line) == Flow::Exit {
                        return Ok(Flow::Exit);
                    }
                    line.clear();
                },
                ch => line.push(ch)
            }
        }

        if line.is_empty() {
            Ok(Flow::Continue)
        } else {
            Ok(self.feed(&line))
        }
    }

    /// Tokenizes and evaluates one line without recording it.
    pub fn execute(&mut self, line: &str) -> Result<(), Error> {
        let origin = format!("{}:{}", self.origin, self.line_number);

        self.execute_as(line, origin)
    }

    /// Re-executes the recorded lines in entry order against the live
    /// environment. A failing line is reported and skipped.
    pub fn replay(&mut self) {
        let history = self.history.clone();

        tracing::debug!(lines = history.len(), "replaying history");

        for (idx, line) in history.iter().enumerate() {
            let origin = format!("run:{}", idx + 1);

            if let Err(err) = self.execute_as(line, origin) {
                tracing::debug!(line = %line, "replayed line failed");
                self.emitter.emit_output(Output::Error(err));
            }
        }
    }

    fn execute_as(&mut self, line: &str, origin: String) -> Result<(), Error> {
        let SessionOptions { calc_mode, debug_mode } = self.options;

        let tokens = if debug_mode {
            tokenize_traced(line, &*self.emitter)
        } else {
            tokenize(line)
        };

        let tokens = tokens.map_err(|error| Error::Lex {
            origin: origin.clone(),
            src: line.to_string(),
            error
        })?;

        evaluate(tokens, &mut self.env, calc_mode, debug_mode, &*self.emitter)
            .map_err(|error| Error::Eval {
                origin,
                src: line.to_string(),
                error
            })
    }

    fn dispatch(&mut self, command: Command) -> Flow {
        tracing::debug!(?command, "session command");

        let status = match command {
            Command::Calc => {
                self.options.calc_mode = true;
                "Calc mode activated"
            },
            Command::Decalc => {
                self.options.calc_mode = false;
                "Calc mode deactivated"
            },
            Command::Dev => {
                self.options.debug_mode = true;
                "Developer mode activated"
            },
            Command::Undev => {
                self.options.debug_mode = false;
                "Developer mode deactivated"
            },
            Command::Run => {
                self.status("Running all commands...");
                self.replay();

                return Flow::Continue;
            },
            Command::Exit => {
                self.status("Exiting");

                return Flow::Exit;
            }
        };

        self.status(status);

        Flow::Continue
    }

    fn status(&self, text: &str) {
        self.emitter.emit_output(Output::Status(text.to_string()));
    }
}
