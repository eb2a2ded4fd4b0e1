use termcolor::Buffer;
use thiserror::Error;

use crate::{
    eval::prelude::{EvalError, EvalErrorType},
    lexer::prelude::LexicalError,
};
use super::{diagnostic::{Diagnostic, Label, Location}, src_span::SrcSpan};

/// A failed line, kept together with its source so it can be rendered.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("failed to tokenize line: {error}")]
    Lex {
        origin: String,
        src: String,
        error: LexicalError
    },
    #[error("failed to evaluate line: {error}")]
    Eval {
        origin: String,
        src: String,
        error: EvalError
    },
    #[error("IO operation failed")]
    StdIo {
        err: std::io::ErrorKind
    }
}

impl Error {
    /// Uncoloured rendering. Falls back to the one-line message if the
    /// diagnostic cannot be rendered.
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();

        match self.pretty(&mut nocolor) {
            Ok(()) => String::from_utf8_lossy(nocolor.as_slice()).into_owned(),
            Err(_) => self.to_string()
        }
    }

    pub fn pretty(&self, buf: &mut Buffer) -> std::io::Result<()> {
        self.to_diagnostic().write(buf)
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Error::Lex { origin, src, error } => {
                let (title, notes) = error.details();

                Diagnostic {
                    title: "Lexical error".into(),
                    notes,
                    location: Some(Location {
                        src,
                        origin,
                        label: Label {
                            text: Some(title.to_string()),
                            span: error.location,
                        },
                    }),
                }
            },
            Error::Eval { origin, src, error } => {
                let (title, notes) = error.details();

                let span = match &error.error {
                    EvalErrorType::UnexpectedToken { found: None, .. } => {
                        SrcSpan::at(src.len() as u32)
                    },
                    _ => error.location
                };

                let headline = match &error.error {
                    EvalErrorType::UnexpectedToken { .. } => "Syntax error",
                    _ => "Runtime error",
                };

                Diagnostic {
                    title: headline.into(),
                    notes,
                    location: Some(Location {
                        src,
                        origin,
                        label: Label {
                            text: Some(title.to_string()),
                            span,
                        },
                    }),
                }
            },
            Error::StdIo { err } => {
                Diagnostic {
                    title: "Standard IO error".into(),
                    notes: vec![format!("{err}")],
                    location: None,
                }
            }
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::StdIo { err: value.kind() }
    }
}
