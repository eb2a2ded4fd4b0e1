use super::error::{LexicalError, LexicalErrorType};
use super::token::Token;
use crate::utils::prelude::{Output, OutputEmitterIO, SrcSpan};

pub type Spanned = (u32, Token, u32);
pub type LexResult = std::result::Result<Spanned, LexicalError>;

pub fn str_to_keyword(word: &str) -> Option<Token> {
	Some(match word {
		"true" => Token::Boolean(true),
		"false" => Token::Boolean(false),
		_ => return None
	})
}

/// Splits a whole line into tokens. The first lexical error aborts the line.
pub fn tokenize(line: &str) -> Result<Vec<Spanned>, LexicalError> {
	Lexer::new(line.char_indices().map(|(i, c)| (i as u32, c))).collect()
}

/// Same as [`tokenize`], but reports every character advance and the
/// resulting token list to `emitter`.
pub fn tokenize_traced(line: &str, emitter: &dyn OutputEmitterIO) -> Result<Vec<Spanned>, LexicalError> {
	let lexer = Lexer::with_trace(
		line.char_indices().map(|(i, c)| (i as u32, c)),
		Some(emitter)
	);
	let tokens = lexer.collect::<Result<Vec<Spanned>, LexicalError>>()?;

	let listing = tokens.iter()
		.map(|(_, token, _)| token.to_string())
		.collect::<Vec<String>>()
		.join(", ");

	emitter.emit_output(Output::Trace(format!("Lexer tokens: [{listing}]")));

	Ok(tokens)
}

pub struct Lexer<'a, T: Iterator<Item = (u32, char)>> {
	// byte offset of `ch`, or of the end of input once `ch` is `None`
	position: u32,
	// character index of `ch`
	index: u32,
	ch: Option<char>,
	input: T,

	trace: Option<&'a dyn OutputEmitterIO>,
}

impl<'a, T: Iterator<Item = (u32, char)>> Lexer<'a, T> {
	pub fn new(input: T) -> Self {
		Self::with_trace(input, None)
	}

	pub fn with_trace(input: T, trace: Option<&'a dyn OutputEmitterIO>) -> Self {
        let mut lexer = Self {
            position: 0,
            index: 0,
            ch: None,
            input,

			trace,
        };

        lexer.next_char();

        lexer
    }

    pub fn next_token(&mut self) -> Option<LexResult> {
		loop {
			let ch = self.ch?;

			if let Some(token) = Token::from_char(ch) {
				return Some(Ok(self.eat_one_char(token)));
			}

			let result = match ch {
				'"' => self.lex_string(),
				c if c.is_whitespace() => {
					let _ = self.next_char();
					continue;
				},
				'0'..='9' => Ok(self.lex_number()),
				'a'..='z' | 'A'..='Z' | '_' => Ok(self.lex_ident()),
				c => {
					let location = self.position;
					let position = self.index;
					let _ = self.next_char();

					Err(LexicalError {
						error: LexicalErrorType::UnexpectedCharacter { ch: c, position },
						location: SrcSpan::from(location, self.position),
					})
				}
			};

			return Some(result);
		}
    }

	fn next_char(&mut self) -> Option<char> {
		let ch = self.ch;

		match self.input.next() {
			Some((pos, next)) => {
				self.position = pos;
				self.ch = Some(next);
			},
			None => {
				if let Some(last) = ch {
					self.position += last.len_utf8() as u32;
				}
				self.ch = None;
			}
		}

		if ch.is_some() {
			self.index += 1;
		}

		if let Some(trace) = self.trace {
			let current = match self.ch {
				Some(c) => format!("{c:?}"),
				None => "EOF".to_string()
			};

			trace.emit_output(Output::Trace(format!("Lexer advance: pos={}, curr_char={}", self.index, current)));
		}

		ch
	}

	fn eat_one_char(&mut self, token: Token) -> Spanned {
		let start_pos = self.position;
		self.next_char();
		let end_pos = self.position;

		(start_pos, token, end_pos)
	}

	fn lex_ident(&mut self) -> Spanned {
        let start_pos = self.position;
		let mut ident = String::new();

		while let Some(ch) = self.ch {
			if !(ch.is_ascii_alphanumeric() || ch == '_') {
				break;
			}

			ident.push(ch);
			self.next_char();
		}

        let end_pos = self.position;

		let token = str_to_keyword(&ident).unwrap_or(Token::Ident(ident));

		(start_pos, token, end_pos)
	}

	fn lex_number(&mut self) -> Spanned {
		let start_pos = self.position;
		let mut value: i64 = 0;

		// overflow wraps around silently
		while let Some(digit) = self.ch.and_then(|ch| ch.to_digit(10)) {
			value = value.wrapping_mul(10).wrapping_add(digit as i64);
			self.next_char();
		}

		let end_pos = self.position;

		(start_pos, Token::Number(value), end_pos)
	}

	fn lex_string(&mut self) -> LexResult {
		let start_pos = self.position;
		let mut value = String::new();

		self.next_char(); // skip opening quote

		loop {
			match self.ch {
				Some('"') => {
					self.next_char(); // skip closing quote
					break;
				},
				Some(ch) => {
					value.push(ch);
					self.next_char();
				},
				None => {
					return Err(LexicalError {
						error: LexicalErrorType::UnterminatedString,
						location: SrcSpan::from(start_pos, self.position)
					})
				}
			}
		}

		Ok((start_pos, Token::String(value), self.position))
	}
}

impl<'a, T: Iterator<Item = (u32, char)>> Iterator for Lexer<'a, T> {
	type Item = LexResult;

	fn next(&mut self) -> Option<Self::Item> {
		self.next_token()
	}
}
