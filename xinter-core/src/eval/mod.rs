pub mod error;

pub mod prelude {
    pub use super::{
        error::*,
        evaluate
    };
}

#[cfg(test)]
mod tests;

use crate::{
    environment::prelude::{Environment, Value},
    lexer::prelude::{Spanned, Token},
    parser::prelude::{
        build_expr, ExpressionBuilder, Identifier, InfixOperator, Parse, Parser,
        PrefixOperator, Primitive, StatementKind
    },
    utils::prelude::{Output, OutputEmitterIO, SrcSpan}
};
use error::{EvalError, EvalErrorType};

/// Runs every statement of one line, in order, while it is being parsed.
///
/// Operands are evaluated as soon as they are read, so the first error in
/// reading order stops the line. Bindings made by earlier statements of
/// the same line are kept.
pub fn evaluate(
    tokens: Vec<Spanned>,
    env: &mut Environment,
    calc_mode: bool,
    debug_mode: bool,
    output: &dyn OutputEmitterIO
) -> Result<(), EvalError> {
    let mut parser = Parser::with_trace(tokens, debug_mode.then_some(output));

    while !parser.is_exhausted() {
        eval_statement(&mut parser, env, calc_mode, debug_mode, output)?;
    }

    Ok(())
}

fn eval_statement(
    parser: &mut Parser,
    env: &mut Environment,
    calc_mode: bool,
    debug_mode: bool,
    output: &dyn OutputEmitterIO
) -> Result<(), EvalError> {
    match parser.statement_kind() {
        StatementKind::Assignment => {
            let identifier = Identifier::parse(parser)?;
            parser.expect_one(Token::Equals)?;
            let value = eval_expr(parser, env)?;

            if debug_mode {
                output.emit_output(Output::Trace(format!("Assigned: {} = {}", identifier.value, value)));
            }

            env.set(identifier.value, value);
        },
        StatementKind::Log => {
            Identifier::parse(parser)?;
            let value = eval_expr(parser, env)?;

            output.emit_output(Output::Log(value));
        },
        StatementKind::Expression => {
            let value = eval_expr(parser, env)?;

            if calc_mode {
                output.emit_output(Output::Result(value));
            }
        }
    }

    Ok(())
}

fn eval_expr(parser: &mut Parser, env: &Environment) -> Result<Value, EvalError> {
    build_expr(parser, &mut Evaluator { env })
        .map(|operand| operand.value)
}

/// A computed value and the source it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Operand {
    pub value: Value,
    pub location: SrcSpan,
}

/// Folds an expression into its value while the parser reads it.
pub struct Evaluator<'a> {
    pub env: &'a Environment,
}

impl ExpressionBuilder for Evaluator<'_> {
    type Output = Operand;
    type Error = EvalError;

    fn primitive(&mut self, primitive: Primitive) -> Result<Operand, EvalError> {
        let location = primitive.location();

        let value = match primitive {
            Primitive::Int { value, .. } => Value::Integer { value },
            Primitive::String { value, .. } => Value::Text { value },
            Primitive::Bool { value, .. } => Value::Boolean { value }
        };

        Ok(Operand { value, location })
    }

    fn identifier(&mut self, identifier: Identifier) -> Result<Operand, EvalError> {
        match self.env.get(&identifier.value) {
            Some(value) => Ok(Operand { value: value.clone(), location: identifier.location }),
            None => Err(EvalError {
                error: EvalErrorType::UndefinedVariable { name: identifier.value },
                location: identifier.location
            })
        }
    }

    fn prefix(&mut self, operator: PrefixOperator, operand: Operand, location: SrcSpan) -> Result<Operand, EvalError> {
        let location = location.to(operand.location);

        match (operator, operand.value) {
            (PrefixOperator::Not, Value::Boolean { value }) => Ok(Operand {
                value: Value::Boolean { value: !value },
                location
            }),
            (operator, value) => Err(EvalError {
                error: EvalErrorType::TypeMismatch {
                    operator: operator.to_string(),
                    left: value._type(),
                    right: None
                },
                location
            })
        }
    }

    fn infix(&mut self, operator: InfixOperator, left: Operand, right: Operand) -> Result<Operand, EvalError> {
        let location = left.location.to(right.location);
        let value = eval_infix(operator, left.value, right.value, location, right.location)?;

        Ok(Operand { value, location })
    }

    fn nested(&mut self, inner: Operand, location: SrcSpan) -> Result<Operand, EvalError> {
        Ok(Operand { value: inner.value, location })
    }
}

// both sides are already evaluated, `&` and `|` do not short-circuit
fn eval_infix(
    operator: InfixOperator,
    left: Value,
    right: Value,
    location: SrcSpan,
    right_location: SrcSpan
) -> Result<Value, EvalError> {
    match (operator, left, right) {
        (
            InfixOperator::Plus,
            Value::Integer { value: left_value },
            Value::Integer { value: right_value }
        ) => Ok(Value::Integer { value: left_value.wrapping_add(right_value) }),
        (
            InfixOperator::Minus,
            Value::Integer { value: left_value },
            Value::Integer { value: right_value }
        ) => Ok(Value::Integer { value: left_value.wrapping_sub(right_value) }),
        (
            InfixOperator::Mult,
            Value::Integer { value: left_value },
            Value::Integer { value: right_value }
        ) => Ok(Value::Integer { value: left_value.wrapping_mul(right_value) }),
        (
            InfixOperator::Div,
            Value::Integer { .. },
            Value::Integer { value: 0 }
        ) => Err(EvalError {
            error: EvalErrorType::DivisionByZero,
            location: right_location
        }),
        (
            InfixOperator::Div,
            Value::Integer { value: left_value },
            Value::Integer { value: right_value }
        ) => Ok(Value::Integer { value: left_value.wrapping_div(right_value) }),
        (
            InfixOperator::And,
            Value::Boolean { value: left_value },
            Value::Boolean { value: right_value }
        ) => Ok(Value::Boolean { value: left_value && right_value }),
        (
            InfixOperator::Or,
            Value::Boolean { value: left_value },
            Value::Boolean { value: right_value }
        ) => Ok(Value::Boolean { value: left_value || right_value }),
        (operator, left, right) => Err(EvalError {
            error: EvalErrorType::TypeMismatch {
                operator: operator.to_string(),
                left: left._type(),
                right: Some(right._type())
            },
            location
        })
    }
}
