use std::io::Write;

use xinter_core::{
	parser::prelude::parse_line,
	utils::prelude::{Output, OutputEmitterIO}
};

use crate::ConsoleOutputEmitter;

const PROMPT: &str = ">> ";

pub fn start() -> std::io::Result<()> {
	let stdin = std::io::stdin();
	let mut line_number = 0;

	loop {
		let mut input = String::from("");

		print!("{}", PROMPT);
		std::io::stdout().flush()?;
		if stdin.read_line(&mut input)? == 0 {
			return Ok(());
		}
		line_number += 1;

		if let Some('\n') = input.chars().next_back() {
			input.pop();
		}
		if let Some('\r') = input.chars().next_back() {
			input.pop();
		}

		match input.as_str() {
			"" => {},
			".exit" => return Ok(()),
			_ => {
				match parse_line(&format!("rppl:{line_number}"), &input) {
					Ok(statements) => {
						for statement in statements {
							println!("{}", statement);
						}
					},
					Err(err) => ConsoleOutputEmitter.emit_output(Output::Error(err))
				}
			}
		}
	}
}
