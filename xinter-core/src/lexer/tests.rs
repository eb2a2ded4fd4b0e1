use super::prelude::{tokenize, tokenize_traced, LexicalError, LexicalErrorType, Lexer, Token};
use crate::utils::prelude::{Output, SrcSpan, VectorOutputEmitterIO};

fn kinds(input: &str) -> Result<Vec<Token>, LexicalError> {
    Ok(tokenize(input)?
        .into_iter()
        .map(|(_, token, _)| token)
        .collect())
}

#[test]
fn test_operators() -> std::result::Result<(), LexicalError> {
    let tokens = kinds("+ - * / = & | ! ( )")?;

    let expected = vec![
        Token::Plus,
        Token::Minus,
        Token::Mult,
        Token::Div,
        Token::Equals,
        Token::And,
        Token::Or,
        Token::Not,
        Token::LParen,
        Token::RParen,
    ];

    assert_eq!(tokens, expected);

    Ok(())
}

#[test]
fn test_input() -> std::result::Result<(), LexicalError> {
    let input = r#"x_1 = (10 + 2) * y / 3 log "hi there" !false|true&ok"#;

    let tokens = vec![
        Token::Ident(String::from("x_1")),
        Token::Equals,
        Token::LParen,
        Token::Number(10),
        Token::Plus,
        Token::Number(2),
        Token::RParen,
        Token::Mult,
        Token::Ident(String::from("y")),
        Token::Div,
        Token::Number(3),
        Token::Ident(String::from("log")),
        Token::String(String::from("hi there")),
        Token::Not,
        Token::Boolean(false),
        Token::Or,
        Token::Boolean(true),
        Token::And,
        Token::Ident(String::from("ok")),
    ];

    let lexed = kinds(input)?;

    for (idx, token) in tokens.iter().enumerate() {
        assert_eq!(
            Some(token), lexed.get(idx),
            "Next token does not match expected token at {}", idx
        );
    }
    assert_eq!(tokens.len(), lexed.len());

    Ok(())
}

#[test]
fn test_spans() -> std::result::Result<(), LexicalError> {
    let tokens = tokenize("ab = \"é\" + 42")?;

    let spans = tokens.iter()
        .map(|(start, _, end)| (*start, *end))
        .collect::<Vec<(u32, u32)>>();

    // `é` is two bytes long
    assert_eq!(spans, vec![(0, 2), (3, 4), (5, 9), (10, 11), (12, 14)]);

    Ok(())
}

#[test]
fn test_strings() -> std::result::Result<(), LexicalError> {
    assert_eq!(kinds("\"ab\"")?, vec![Token::String("ab".to_string())]);
    assert_eq!(kinds("\"\"")?, vec![Token::String("".to_string())]);
    // no escape processing, everything up to the closing quote is kept
    assert_eq!(kinds(r#""a\n+1 ""#)?, vec![Token::String(r"a\n+1 ".to_string())]);

    Ok(())
}

#[test]
fn test_unterminated_string() {
    let err = tokenize("x = \"ab").unwrap_err();

    assert_eq!(err.error, LexicalErrorType::UnterminatedString);
    assert_eq!(err.location, SrcSpan::from(4, 7));
}

#[test]
fn test_booleans_and_identifiers() -> std::result::Result<(), LexicalError> {
    assert_eq!(kinds("true")?, vec![Token::Boolean(true)]);
    assert_eq!(kinds("false")?, vec![Token::Boolean(false)]);
    assert_eq!(kinds("truer")?, vec![Token::Ident("truer".to_string())]);
    assert_eq!(kinds("True")?, vec![Token::Ident("True".to_string())]);
    assert_eq!(kinds("_private")?, vec![Token::Ident("_private".to_string())]);

    Ok(())
}

#[test]
fn test_numbers() -> std::result::Result<(), LexicalError> {
    assert_eq!(kinds("0")?, vec![Token::Number(0)]);
    assert_eq!(kinds("007")?, vec![Token::Number(7)]);
    assert_eq!(kinds("9223372036854775807")?, vec![Token::Number(i64::MAX)]);
    // one past the maximum wraps around
    assert_eq!(kinds("9223372036854775808")?, vec![Token::Number(i64::MIN)]);
    // a digit run ends where letters begin
    assert_eq!(kinds("12ab")?, vec![Token::Number(12), Token::Ident("ab".to_string())]);

    Ok(())
}

#[test]
fn test_whitespace() -> std::result::Result<(), LexicalError> {
    assert_eq!(kinds("")?, vec![]);
    assert_eq!(kinds(" \t\u{3000}\u{a0} ")?, vec![]);
    assert_eq!(kinds("1\t+\u{2003}2")?, vec![Token::Number(1), Token::Plus, Token::Number(2)]);

    Ok(())
}

#[test]
fn test_unexpected_characters() {
    let fails = vec![
        ("x = 1 % 2", '%', 6),
        ("é = 1", 'é', 0),
        ("ab ; cd", ';', 3),
        ("\"é\" #", '#', 4),
    ];

    for (input, ch, position) in fails {
        match tokenize(input) {
            Err(err) => assert_eq!(
                err.error,
                LexicalErrorType::UnexpectedCharacter { ch, position },
                "Wrong error for {input:?}"
            ),
            Ok(tokens) => panic!("Expected Err for {input:?} but got Ok({tokens:?})")
        }
    }
}

#[test]
fn test_lexer_iterator_stops() {
    let mut lexer = Lexer::new("1 2".char_indices().map(|(i, c)| (i as u32, c)));

    assert_eq!(lexer.next(), Some(Ok((0, Token::Number(1), 1))));
    assert_eq!(lexer.next(), Some(Ok((2, Token::Number(2), 3))));
    assert_eq!(lexer.next(), None);
    assert_eq!(lexer.next(), None);
}

#[test]
fn test_traced_tokenize() -> std::result::Result<(), LexicalError> {
    let emitter = VectorOutputEmitterIO::new();

    let tokens = tokenize_traced("a+1", &emitter)?;
    assert_eq!(tokens.len(), 3);

    let traces = emitter.take()
        .into_iter()
        .map(|output| match output {
            Output::Trace(text) => text,
            other => panic!("unexpected output {other:?}")
        })
        .collect::<Vec<String>>();

    assert_eq!(traces, vec![
        "Lexer advance: pos=0, curr_char='a'".to_string(),
        "Lexer advance: pos=1, curr_char='+'".to_string(),
        "Lexer advance: pos=2, curr_char='1'".to_string(),
        "Lexer advance: pos=3, curr_char=EOF".to_string(),
        "Lexer tokens: [IDENTIFIER(a), PLUS, NUMBER(1)]".to_string(),
    ]);

    Ok(())
}
