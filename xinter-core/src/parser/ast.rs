use std::fmt::Display;

use crate::{
    lexer::prelude::Token,
    parser::prelude::{parse_error, parse_expr, ExpressionBuilder, Parse, ParseError, ParseErrorType, Parser, Precedence, StatementKind},
    utils::prelude::SrcSpan
};

// statement -> <assignment> | <log> | <expression>
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Assignment(Assignment),
    Log(Log),
    Expression(Expression),
}

impl Statement {
    pub fn location(&self) -> SrcSpan {
        match self {
            Statement::Assignment(assignment) => assignment.location,
            Statement::Log(log) => log.location,
            Statement::Expression(expression) => expression.location(),
        }
    }
}

impl Parse for Statement {
    fn parse(parser: &mut Parser) -> Result<Self, ParseError> {
        Ok(match parser.statement_kind() {
            StatementKind::Assignment => Statement::Assignment(Assignment::parse(parser)?),
            StatementKind::Log => Statement::Log(Log::parse(parser)?),
            StatementKind::Expression => Statement::Expression(Expression::parse(parser)?),
        })
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Statement::Assignment(assignment) => write!(f, "{assignment}"),
            Statement::Log(log) => write!(f, "{log}"),
            Statement::Expression(expression) => write!(f, "{expression}"),
        }
    }
}

// assignment -> <identifier> = <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub identifier: Identifier,
    pub value: Expression,
    pub location: SrcSpan
}

impl Parse for Assignment {
    fn parse(parser: &mut Parser) -> Result<Self, ParseError> {
        let identifier = Identifier::parse(parser)?;
        parser.expect_one(Token::Equals)?;
        let value = Expression::parse(parser)?;

        let location = identifier.location.to(value.location());

        Ok(Self { identifier, value, location })
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.identifier, self.value)
    }
}

// log -> log <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Log {
    pub value: Expression,
    pub location: SrcSpan
}

impl Parse for Log {
    fn parse(parser: &mut Parser) -> Result<Self, ParseError> {
        let keyword = Identifier::parse(parser)?;
        let value = Expression::parse(parser)?;

        let location = keyword.location.to(value.location());

        Ok(Self { value, location })
    }
}

impl Display for Log {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "log {}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub value: String,
    pub location: SrcSpan
}

impl Parse for Identifier {
    fn parse(parser: &mut Parser) -> Result<Self, ParseError> {
        match parser.current_token().cloned() {
            Some((start, Token::Ident(value), end)) => {
                parser.step();
                Ok(Self { value, location: SrcSpan::from(start, end) })
            },
            Some((start, token, end)) => parse_error(
                ParseErrorType::UnexpectedToken {
                    token,
                    expected: vec!["an identifier".to_string()]
                },
                SrcSpan::from(start, end)
            ),
            None => parse_error(
                ParseErrorType::UnexpectedEof {
                    expected: vec!["an identifier".to_string()]
                },
                SrcSpan::at(parser.end_of_input())
            )
        }
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Int {
        value: i64,
        location: SrcSpan
    },
    String {
        value: String,
        location: SrcSpan
    },
    Bool {
        value: bool,
        location: SrcSpan
    }
}

impl Primitive {
    pub fn location(&self) -> SrcSpan {
        match self {
            Primitive::Int { location, .. }
            | Primitive::String { location, .. }
            | Primitive::Bool { location, .. } => *location
        }
    }
}

impl Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Primitive::Int { value, .. } => write!(f, "{value}"),
            Primitive::String { value, .. } => write!(f, "\"{value}\""),
            Primitive::Bool { value, .. } => write!(f, "{value}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOperator {
    Not,
}

impl Display for PrefixOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrefixOperator::Not => write!(f, "!"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOperator {
    Plus,
    Minus,
    Mult,
    Div,
    And,
    Or,
}

impl InfixOperator {
    pub fn from_token(token: &Token) -> Option<Self> {
        Some(match token {
            Token::Plus => Self::Plus,
            Token::Minus => Self::Minus,
            Token::Mult => Self::Mult,
            Token::Div => Self::Div,
            Token::And => Self::And,
            Token::Or => Self::Or,
            _ => return None
        })
    }

    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Plus | Self::Minus | Self::And | Self::Or => Precedence::Sum,
            Self::Mult | Self::Div => Precedence::Product,
        }
    }
}

impl Display for InfixOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let literal = match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Mult => "*",
            Self::Div => "/",
            Self::And => "&",
            Self::Or => "|",
        };

        write!(f, "{literal}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prefix {
    pub operator: PrefixOperator,
    pub expression: Box<Expression>,
    pub location: SrcSpan
}

#[derive(Debug, Clone, PartialEq)]
pub struct Infix {
    pub operator: InfixOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub location: SrcSpan
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Primitive(Primitive),
    Identifier(Identifier),
    Prefix(Prefix),
    Infix(Infix),
    Nested {
        expression: Box<Expression>,
        location: SrcSpan
    }
}

impl Expression {
    pub fn location(&self) -> SrcSpan {
        match self {
            Expression::Primitive(primitive) => primitive.location(),
            Expression::Identifier(identifier) => identifier.location,
            Expression::Prefix(prefix) => prefix.location,
            Expression::Infix(infix) => infix.location,
            Expression::Nested { location, .. } => *location,
        }
    }

    pub fn infix(operator: InfixOperator, left: Expression, right: Expression) -> Self {
        let location = left.location().to(right.location());

        Expression::Infix(Infix {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            location
        })
    }
}

/// Builds the syntax tree, as printed by the read-parse-print loop.
pub struct AstBuilder;

impl ExpressionBuilder for AstBuilder {
    type Output = Expression;
    type Error = ParseError;

    fn primitive(&mut self, primitive: Primitive) -> Result<Expression, ParseError> {
        Ok(Expression::Primitive(primitive))
    }

    fn identifier(&mut self, identifier: Identifier) -> Result<Expression, ParseError> {
        Ok(Expression::Identifier(identifier))
    }

    fn prefix(&mut self, operator: PrefixOperator, operand: Expression, location: SrcSpan) -> Result<Expression, ParseError> {
        Ok(Expression::Prefix(Prefix {
            operator,
            location: location.to(operand.location()),
            expression: Box::new(operand),
        }))
    }

    fn infix(&mut self, operator: InfixOperator, left: Expression, right: Expression) -> Result<Expression, ParseError> {
        Ok(Expression::infix(operator, left, right))
    }

    fn nested(&mut self, inner: Expression, location: SrcSpan) -> Result<Expression, ParseError> {
        Ok(Expression::Nested {
            expression: Box::new(inner),
            location
        })
    }
}

impl Parse for Expression {
    fn parse(parser: &mut Parser) -> Result<Self, ParseError> {
        parse_expr(parser)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Primitive(primitive) => write!(f, "{primitive}"),
            Expression::Identifier(identifier) => write!(f, "{identifier}"),
            Expression::Prefix(prefix) => write!(f, "{}{}", prefix.operator, prefix.expression),
            Expression::Infix(infix) => write!(f, "({} {} {})", infix.left, infix.operator, infix.right),
            Expression::Nested { expression, .. } => write!(f, "{expression}"),
        }
    }
}
