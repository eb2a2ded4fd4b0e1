use thiserror::Error;

use crate::{lexer::prelude::Token, utils::prelude::SrcSpan};

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    UnexpectedToken {
        token: Token,
        expected: Vec<String>,
    },
    UnexpectedEof {
        expected: Vec<String>,
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{}", self.details().0)]
pub struct ParseError {
    pub error: ParseErrorType,
    pub span: SrcSpan
}

impl ParseError {
    pub fn found(&self) -> Option<&Token> {
        match &self.error {
            ParseErrorType::UnexpectedToken { token, .. } => Some(token),
            ParseErrorType::UnexpectedEof { .. } => None,
        }
    }

    pub fn expected(&self) -> &[String] {
        match &self.error {
            ParseErrorType::UnexpectedToken { expected, .. }
            | ParseErrorType::UnexpectedEof { expected } => expected,
        }
    }

    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            ParseErrorType::UnexpectedToken { token, expected } => {
                let found = describe_token(token);

                let messages = std::iter::once(format!("Found {found}, expected one of: "))
                    .chain(expected.iter().map(|s| format!("- {s}")))
                    .collect();

                ("Unexpected token", messages)
            },
            ParseErrorType::UnexpectedEof { expected } => {
                let messages = std::iter::once("Expected one of: ".to_string())
                    .chain(expected.iter().map(|s| format!("- {s}")))
                    .collect();

                ("Unexpected end of line", messages)
            }
        }
    }
}

pub fn describe_token(token: &Token) -> String {
    match token {
        Token::Number(_) => "a number".to_string(),
        Token::String(_) => "a string".to_string(),
        Token::Boolean(_) => "a boolean".to_string(),
        Token::Ident(name) => format!("the identifier `{name}`"),
        _ => format!("`{}`", token.as_literal())
    }
}
