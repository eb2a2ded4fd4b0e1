use crate::{
    environment::prelude::{Environment, Value, ValueType},
    lexer::prelude::{tokenize, Token},
    utils::prelude::{Output, SrcSpan, VectorOutputEmitterIO}
};

use super::{evaluate, error::{EvalError, EvalErrorType}};

fn eval_line(line: &str, env: &mut Environment, calc_mode: bool, debug_mode: bool) -> Result<Vec<Output>, EvalError> {
    let emitter = VectorOutputEmitterIO::new();
    let tokens = tokenize(line).expect("input should lex");

    evaluate(tokens, env, calc_mode, debug_mode, &emitter)?;

    Ok(emitter.take())
}

fn eval_quiet(line: &str, env: &mut Environment) -> Result<Vec<Output>, EvalError> {
    eval_line(line, env, false, false)
}

fn value_of(line: &str) -> Result<Value, EvalError> {
    let mut env = Environment::new();
    eval_quiet(&format!("result = {line}"), &mut env)?;

    Ok(env.get("result").cloned().expect("result should be bound"))
}

#[test]
fn test_arithmetic() -> Result<(), EvalError> {
    assert_eq!(value_of("2 + 3 * 4")?, Value::from(14));
    assert_eq!(value_of("(2 + 3) * 4")?, Value::from(20));
    assert_eq!(value_of("10 - 4 - 3")?, Value::from(3));
    assert_eq!(value_of("7 / 2")?, Value::from(3));
    assert_eq!(value_of("0 - 7 / 2")?, Value::from(-3));
    // division truncates toward zero
    assert_eq!(value_of("(0 - 7) / 2")?, Value::from(-3));
    assert_eq!(value_of("100 / 10 / 5")?, Value::from(2));

    Ok(())
}

#[test]
fn test_wrapping_arithmetic() -> Result<(), EvalError> {
    assert_eq!(value_of("9223372036854775807 + 1")?, Value::from(i64::MIN));
    assert_eq!(value_of("0 - 9223372036854775807 - 2")?, Value::from(i64::MAX));
    assert_eq!(value_of("(0 - 9223372036854775807 - 1) / (0 - 1)")?, Value::from(i64::MIN));

    Ok(())
}

#[test]
fn test_logic() -> Result<(), EvalError> {
    assert_eq!(value_of("true & false")?, Value::from(false));
    assert_eq!(value_of("true | false")?, Value::from(true));
    assert_eq!(value_of("!false")?, Value::from(true));
    assert_eq!(value_of("!!true")?, Value::from(true));
    assert_eq!(value_of("!(true & false)")?, Value::from(true));
    // same tier, left to right: (false & false) | true
    assert_eq!(value_of("false & false | true")?, Value::from(true));

    Ok(())
}

#[test]
fn test_text() -> Result<(), EvalError> {
    assert_eq!(value_of("\"hello world\"")?, Value::from("hello world"));

    Ok(())
}

#[test]
fn test_assignment_and_log() -> Result<(), EvalError> {
    let mut env = Environment::new();

    assert!(eval_quiet("x = 5", &mut env)?.is_empty());
    assert_eq!(eval_quiet("log x", &mut env)?, vec![Output::Log(Value::from(5))]);

    // rebinding changes the type freely
    eval_quiet("x = \"five\"", &mut env)?;
    assert_eq!(eval_quiet("log x", &mut env)?, vec![Output::Log(Value::from("five"))]);

    // `log` can itself be a variable name
    eval_quiet("log = 3", &mut env)?;
    assert_eq!(env.get("log"), Some(&Value::from(3)));
    assert_eq!(eval_quiet("log log", &mut env)?, vec![Output::Log(Value::from(3))]);

    Ok(())
}

#[test]
fn test_multiple_statements() -> Result<(), EvalError> {
    let mut env = Environment::new();

    let outputs = eval_quiet("a = 2 b = a * 10 log b log a", &mut env)?;

    assert_eq!(outputs, vec![Output::Log(Value::from(20)), Output::Log(Value::from(2))]);

    Ok(())
}

#[test]
fn test_calc_mode() -> Result<(), EvalError> {
    let mut env = Environment::new();

    assert_eq!(eval_line("1 + 1", &mut env, true, false)?, vec![Output::Result(Value::from(2))]);
    assert!(eval_line("1 + 1", &mut env, false, false)?.is_empty());

    // assignments and logs are not echoed
    assert!(eval_line("x = 4", &mut env, true, false)?.is_empty());
    assert_eq!(
        eval_line("log x x * 2", &mut env, true, false)?,
        vec![Output::Log(Value::from(4)), Output::Result(Value::from(8))]
    );
    assert_eq!(Output::Result(Value::from(8)).to_string(), "Result: 8");

    Ok(())
}

#[test]
fn test_debug_mode() -> Result<(), EvalError> {
    let mut env = Environment::new();

    let outputs = eval_line("x = 1", &mut env, false, true)?;

    let traces = outputs.iter()
        .map(|output| output.to_string())
        .collect::<Vec<String>>();

    assert_eq!(traces.first().map(String::as_str), Some("Parser advance: idx=0, curr_tok=IDENTIFIER(x)"));
    assert_eq!(traces.last().map(String::as_str), Some("Assigned: x = 1"));
    assert!(outputs.iter().all(|output| matches!(output, Output::Trace(_))));
    assert_eq!(env.get("x"), Some(&Value::from(1)));

    Ok(())
}

#[test]
fn test_undefined_variable() {
    let mut env = Environment::new();

    let err = eval_quiet("log y", &mut env).unwrap_err();

    assert_eq!(err.error, EvalErrorType::UndefinedVariable { name: "y".to_string() });
    assert_eq!(err.location, SrcSpan::from(4, 5));
}

#[test]
fn test_division_by_zero() {
    let mut env = Environment::new();

    let err = eval_quiet("x = 1 / (2 - 2)", &mut env).unwrap_err();

    assert_eq!(err.error, EvalErrorType::DivisionByZero);
    assert_eq!(err.location, SrcSpan::from(8, 15));
    assert!(!env.contains("x"));
}

#[test]
fn test_type_mismatch() {
    let cases = vec![
        ("1 + true", "+", ValueType::Integer, Some(ValueType::Boolean)),
        ("\"a\" + \"b\"", "+", ValueType::Text, Some(ValueType::Text)),
        ("1 & 2", "&", ValueType::Integer, Some(ValueType::Integer)),
        ("true * false", "*", ValueType::Boolean, Some(ValueType::Boolean)),
        ("!1", "!", ValueType::Integer, None),
        ("!\"x\"", "!", ValueType::Text, None),
    ];

    for (input, operator, left, right) in cases {
        let mut env = Environment::new();

        match eval_quiet(input, &mut env) {
            Err(err) => assert_eq!(
                err.error,
                EvalErrorType::TypeMismatch { operator: operator.to_string(), left, right },
                "Wrong error for {input:?}"
            ),
            Ok(outputs) => panic!("Expected Err for {input:?} but got Ok({outputs:?})")
        }
    }
}

#[test]
fn test_unexpected_token() {
    let mut env = Environment::new();

    let err = eval_quiet("x = (1 + 2", &mut env).unwrap_err();
    assert_eq!(
        err.error,
        EvalErrorType::UnexpectedToken { found: None, expected: vec!["`)`".to_string()] }
    );

    let err = eval_quiet("x = 1 + )", &mut env).unwrap_err();
    assert!(matches!(err.error, EvalErrorType::UnexpectedToken { found: Some(Token::RParen), .. }));
}

#[test]
fn test_partial_line_is_kept() {
    let mut env = Environment::new();

    let err = eval_quiet("a = 1 b = missing c = 3", &mut env).unwrap_err();

    assert!(matches!(err.error, EvalErrorType::UndefinedVariable { .. }));
    assert_eq!(env.get("a"), Some(&Value::from(1)));
    assert!(!env.contains("b"));
    assert!(!env.contains("c"));
}

#[test]
fn test_statement_before_syntax_error_runs() {
    let mut env = Environment::new();
    let emitter = VectorOutputEmitterIO::new();
    let tokens = tokenize("log 1 log )").expect("input should lex");

    let result = evaluate(tokens, &mut env, false, false, &emitter);

    assert!(result.is_err());
    assert_eq!(emitter.take(), vec![Output::Log(Value::from(1))]);
}

#[test]
fn test_runtime_error_precedes_later_syntax_error() {
    // operands are evaluated as soon as they are read
    let cases = vec![
        ("x = y + )", EvalErrorType::UndefinedVariable { name: "y".to_string() }, SrcSpan::from(4, 5)),
        ("x = (1 / 0", EvalErrorType::DivisionByZero, SrcSpan::from(9, 10)),
        ("log 1 + true )", EvalErrorType::TypeMismatch {
            operator: "+".to_string(),
            left: ValueType::Integer,
            right: Some(ValueType::Boolean)
        }, SrcSpan::from(4, 12)),
        ("!3 (", EvalErrorType::TypeMismatch {
            operator: "!".to_string(),
            left: ValueType::Integer,
            right: None
        }, SrcSpan::from(0, 2)),
    ];

    for (input, error, location) in cases {
        let mut env = Environment::new();

        match eval_quiet(input, &mut env) {
            Err(err) => {
                assert_eq!(err.error, error, "Wrong error for {input:?}");
                assert_eq!(err.location, location, "Wrong location for {input:?}");
            },
            Ok(outputs) => panic!("Expected Err for {input:?} but got Ok({outputs:?})")
        }
    }
}

#[test]
fn test_syntax_error_after_valid_operands() {
    let mut env = Environment::new();

    let err = eval_quiet("x = 1 + 2 )", &mut env).unwrap_err();

    // `x = 1 + 2` completes, the stray `)` then starts a bad statement
    assert!(matches!(err.error, EvalErrorType::UnexpectedToken { found: Some(Token::RParen), .. }));
    assert_eq!(env.get("x"), Some(&Value::from(3)));
}
