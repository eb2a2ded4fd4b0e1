use crate::{
    eval::prelude::EvalError,
    lexer::prelude::{tokenize, Spanned, Token},
    utils::prelude::{Error, Output, OutputEmitterIO, SrcSpan}
};
use super::error::{ParseError, ParseErrorType};
use super::ast::{AstBuilder, Expression, Identifier, InfixOperator, PrefixOperator, Primitive, Statement};

pub trait Parse
    where Self: Sized,
{
    fn parse(parser: &mut Parser) -> Result<Self, ParseError>;
}

/// Receives the pieces of an expression in the order the grammar
/// recognises them, so a builder can act on an operand before the rest
/// of the line is read.
pub trait ExpressionBuilder {
    type Output;
    type Error: From<ParseError>;

    fn primitive(&mut self, primitive: Primitive) -> Result<Self::Output, Self::Error>;
    fn identifier(&mut self, identifier: Identifier) -> Result<Self::Output, Self::Error>;
    /// `location` covers the operator token only.
    fn prefix(&mut self, operator: PrefixOperator, operand: Self::Output, location: SrcSpan) -> Result<Self::Output, Self::Error>;
    fn infix(&mut self, operator: InfixOperator, left: Self::Output, right: Self::Output) -> Result<Self::Output, Self::Error>;
    /// `location` spans both parentheses.
    fn nested(&mut self, inner: Self::Output, location: SrcSpan) -> Result<Self::Output, Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Assignment,
    Log,
    Expression,
}

/// Cursor over the tokens of one line. `idx` only ever moves forward.
pub struct Parser<'a> {
    tokens: Vec<Spanned>,
    idx: usize,

    trace: Option<&'a dyn OutputEmitterIO>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Spanned>) -> Self {
        Self::with_trace(tokens, None)
    }

    pub fn with_trace(tokens: Vec<Spanned>, trace: Option<&'a dyn OutputEmitterIO>) -> Self {
        let parser = Self {
            tokens,
            idx: 0,

            trace,
        };

        parser.trace_advance();

        parser
    }

    pub fn current_token(&self) -> Option<&Spanned> {
        self.tokens.get(self.idx)
    }

    pub fn peek_token(&self) -> Option<&Spanned> {
        self.tokens.get(self.idx + 1)
    }

    pub fn is_exhausted(&self) -> bool {
        self.idx >= self.tokens.len()
    }

    pub fn step(&mut self) {
        if !self.is_exhausted() {
            self.idx += 1;
        }

        self.trace_advance();
    }

    /// Byte offset just past the last token.
    pub fn end_of_input(&self) -> u32 {
        self.tokens.last()
            .map(|(_, _, end)| *end)
            .unwrap_or(0)
    }

    pub fn current_infix(&self, precedence: Precedence) -> Option<InfixOperator> {
        let (_, token, _) = self.current_token()?;
        let operator = InfixOperator::from_token(token)?;

        (operator.precedence() == precedence).then_some(operator)
    }

    pub fn expect_one(&mut self, token: Token) -> Result<(u32, u32), ParseError> {
        match self.current_token() {
            Some((start, tok, end)) if *tok == token => {
                let span = (*start, *end);
                self.step();
                Ok(span)
            },
            Some((start, tok, end)) => parse_error(
                ParseErrorType::UnexpectedToken {
                    token: tok.clone(),
                    expected: vec![format!("`{}`", token.as_literal())],
                },
                SrcSpan::from(*start, *end)
            ),
            None => parse_error(
                ParseErrorType::UnexpectedEof {
                    expected: vec![format!("`{}`", token.as_literal())],
                },
                SrcSpan::at(self.end_of_input())
            )
        }
    }

    /// `IDENTIFIER EQUALS` starts an assignment, so `log = 1` binds `log`.
    pub fn statement_kind(&self) -> StatementKind {
        match (self.current_token(), self.peek_token()) {
            (Some((_, Token::Ident(_), _)), Some((_, Token::Equals, _))) => StatementKind::Assignment,
            (Some((_, Token::Ident(name), _)), _) if name == "log" => StatementKind::Log,
            _ => StatementKind::Expression
        }
    }

    pub fn parse_statement(&mut self) -> Result<Option<Statement>, ParseError> {
        if self.is_exhausted() {
            return Ok(None);
        }

        Statement::parse(self).map(Some)
    }

    fn trace_advance(&self) {
        if let Some(trace) = self.trace {
            let current = match self.current_token() {
                Some((_, token, _)) => token.to_string(),
                None => "EOF".to_string()
            };

            trace.emit_output(Output::Trace(format!("Parser advance: idx={}, curr_tok={}", self.idx, current)));
        }
    }
}

impl Iterator for Parser<'_> {
    type Item = Result<Statement, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.parse_statement() {
            Ok(statement) => statement.map(Ok),
            Err(err) => {
                // an error abandons the rest of the line
                self.idx = self.tokens.len();
                Some(Err(err))
            }
        }
    }
}

/// Binary operator tiers. `&` and `|` deliberately sit with `+` and `-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precedence {
    Sum,
    Product,
}

/// Parses a whole line of already lexed tokens without evaluating it.
pub fn parse_tokens(tokens: Vec<Spanned>) -> Result<Vec<Statement>, ParseError> {
    Parser::new(tokens).collect()
}

/// Lexes and parses one source line. `origin` labels the line in diagnostics.
pub fn parse_line(origin: &str, line: &str) -> Result<Vec<Statement>, Error> {
    let tokens = tokenize(line).map_err(|error| Error::Lex {
        origin: origin.to_string(),
        src: line.to_string(),
        error
    })?;

    parse_tokens(tokens).map_err(|error| Error::Eval {
        origin: origin.to_string(),
        src: line.to_string(),
        error: EvalError::from(error)
    })
}

pub fn parse_expr(parser: &mut Parser) -> Result<Expression, ParseError> {
    build_expr(parser, &mut AstBuilder)
}

/// `expr := term ((PLUS|MINUS|AND|OR) term)*`
pub fn build_expr<B: ExpressionBuilder>(parser: &mut Parser, builder: &mut B) -> Result<B::Output, B::Error> {
    build_infix_chain(parser, builder, Precedence::Sum, build_term)
}

/// `term := factor ((MULTIPLY|DIVIDE) factor)*`
pub fn build_term<B: ExpressionBuilder>(parser: &mut Parser, builder: &mut B) -> Result<B::Output, B::Error> {
    build_infix_chain(parser, builder, Precedence::Product, build_factor)
}

const FACTOR_STARTS: [&str; 6] = [
    "a number",
    "a string",
    "a boolean",
    "an identifier",
    "`!`",
    "`(`",
];

/// `factor := NUMBER | STRING | BOOLEAN | IDENTIFIER | NOT factor | LPAREN expr RPAREN`
pub fn build_factor<B: ExpressionBuilder>(parser: &mut Parser, builder: &mut B) -> Result<B::Output, B::Error> {
    let (start, token, end) = match parser.current_token().cloned() {
        Some(spanned) => spanned,
        None => return Err(ParseError {
            error: ParseErrorType::UnexpectedEof {
                expected: FACTOR_STARTS.iter().map(|s| s.to_string()).collect()
            },
            span: SrcSpan::at(parser.end_of_input())
        }.into())
    };

    let location = SrcSpan::from(start, end);

    match token {
        Token::Number(value) => {
            parser.step();
            builder.primitive(Primitive::Int { value, location })
        },
        Token::String(value) => {
            parser.step();
            builder.primitive(Primitive::String { value, location })
        },
        Token::Boolean(value) => {
            parser.step();
            builder.primitive(Primitive::Bool { value, location })
        },
        Token::Ident(value) => {
            parser.step();
            builder.identifier(Identifier { value, location })
        },
        Token::Not => {
            parser.step();
            let operand = build_factor(parser, builder)?;

            builder.prefix(PrefixOperator::Not, operand, location)
        },
        Token::LParen => {
            parser.step();
            let inner = build_expr(parser, builder)?;
            let (_, close) = parser.expect_one(Token::RParen)?;

            builder.nested(inner, SrcSpan::from(start, close))
        },
        token => Err(ParseError {
            error: ParseErrorType::UnexpectedToken {
                token,
                expected: FACTOR_STARTS.iter().map(|s| s.to_string()).collect()
            },
            span: location
        }.into())
    }
}

// each operand is handed to the builder before the next operator is read
fn build_infix_chain<B: ExpressionBuilder>(
    parser: &mut Parser,
    builder: &mut B,
    precedence: Precedence,
    operand: fn(&mut Parser, &mut B) -> Result<B::Output, B::Error>
) -> Result<B::Output, B::Error> {
    let mut left = operand(parser, builder)?;

    while let Some(operator) = parser.current_infix(precedence) {
        parser.step();
        let right = operand(parser, builder)?;

        left = builder.infix(operator, left, right)?;
    }

    Ok(left)
}

pub fn parse_error<T>(error: ParseErrorType, span: SrcSpan) -> Result<T, ParseError> {
    Err(ParseError { error, span })
}
