use thiserror::Error;

use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalErrorType {
    /// `position` is the character index within the line, not a byte offset.
    UnexpectedCharacter { ch: char, position: u32 },
    UnterminatedString,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("{}", self.details().0)]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub location: SrcSpan
}

impl LexicalError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match self.error {
            LexicalErrorType::UnexpectedCharacter { ch, position } => {
                ("Unexpected character", vec![format!("`{ch}` at position {position} does not start any token")])
            },
            LexicalErrorType::UnterminatedString => {
                ("Unterminated string literal", vec!["Missing closing `\"`".to_string()])
            }
        }
    }
}
