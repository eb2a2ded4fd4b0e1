use thiserror::Error;

use crate::{
    environment::prelude::ValueType,
    lexer::prelude::Token,
    parser::prelude::{describe_token, ParseError},
    utils::prelude::SrcSpan
};

#[derive(Debug, Clone, PartialEq)]
pub enum EvalErrorType {
    UndefinedVariable {
        name: String
    },
    /// `right` is `None` for prefix operators.
    TypeMismatch {
        operator: String,
        left: ValueType,
        right: Option<ValueType>
    },
    DivisionByZero,
    /// `found` is `None` when the line ended too early.
    UnexpectedToken {
        found: Option<Token>,
        expected: Vec<String>
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{}", self.details().0)]
pub struct EvalError {
    pub error: EvalErrorType,
    pub location: SrcSpan
}

impl EvalError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            EvalErrorType::UndefinedVariable { name } => {
                ("Undefined variable", vec![format!("Variable `{name}` is not assigned.")])
            },
            EvalErrorType::TypeMismatch { operator, left, right: Some(right) } => {
                ("Type mismatch", vec![format!("Cannot apply `{operator}` to `{left}` and `{right}`")])
            },
            EvalErrorType::TypeMismatch { operator, left, right: None } => {
                ("Type mismatch", vec![format!("Cannot apply `{operator}` to `{left}`")])
            },
            EvalErrorType::DivisionByZero => ("Division by zero", vec![]),
            EvalErrorType::UnexpectedToken { found, expected } => {
                let found = match found {
                    Some(token) => describe_token(token),
                    None => "the end of line".to_string()
                };

                let messages = std::iter::once(format!("Found {found}, expected one of: "))
                    .chain(expected.iter().map(|s| format!("- {s}")))
                    .collect();

                ("Unexpected token", messages)
            }
        }
    }
}

impl From<ParseError> for EvalError {
    fn from(value: ParseError) -> Self {
        EvalError {
            error: EvalErrorType::UnexpectedToken {
                found: value.found().cloned(),
                expected: value.expected().to_vec()
            },
            location: value.span
        }
    }
}
