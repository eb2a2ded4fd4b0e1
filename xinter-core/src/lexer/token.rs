use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    // Арифметика
    Plus, // +
    Minus, // -
    Mult, // *
    Div, // /

    // Присваивание
    Equals, // =

    // Логика
    And, // &
    Or, // |
    Not, // !

    LParen, // (
    RParen, // )

    // Литералы
    Number(i64),
    String(String),
    Boolean(bool),

    // <буква>{<буква>|<цифра>|_}
    Ident(String),
}

impl Token {
    pub fn from_char(ch: char) -> Option<Token> {
        Some(match ch {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Mult,
            '/' => Token::Div,
            '=' => Token::Equals,
            '&' => Token::And,
            '|' => Token::Or,
            '!' => Token::Not,
            '(' => Token::LParen,
            ')' => Token::RParen,
            _ => return None,
        })
    }

    /// Upper-case kind name, as shown in debug traces.
    pub fn kind(&self) -> &'static str {
        match self {
            Token::Plus => "PLUS",
            Token::Minus => "MINUS",
            Token::Mult => "MULTIPLY",
            Token::Div => "DIVIDE",
            Token::Equals => "EQUALS",
            Token::And => "AND",
            Token::Or => "OR",
            Token::Not => "NOT",
            Token::LParen => "LPAREN",
            Token::RParen => "RPAREN",
            Token::Number(_) => "NUMBER",
            Token::String(_) => "STRING",
            Token::Boolean(_) => "BOOLEAN",
            Token::Ident(_) => "IDENTIFIER",
        }
    }

    pub fn as_literal(&self) -> String {
        match self {
            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Mult => "*".to_string(),
            Token::Div => "/".to_string(),
            Token::Equals => "=".to_string(),
            Token::And => "&".to_string(),
            Token::Or => "|".to_string(),
            Token::Not => "!".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::Number(value) => format!("{}", value),
            Token::String(value) => format!("\"{}\"", value),
            Token::Boolean(value) => format!("{}", value),
            Token::Ident(value) => value.clone(),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(value) => write!(f, "{}({})", self.kind(), value),
            Token::String(value) => write!(f, "{}({:?})", self.kind(), value),
            Token::Boolean(value) => write!(f, "{}({})", self.kind(), value),
            Token::Ident(value) => write!(f, "{}({})", self.kind(), value),
            _ => write!(f, "{}", self.kind()),
        }
    }
}
