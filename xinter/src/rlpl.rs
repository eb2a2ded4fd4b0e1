use std::io::Write;

use xinter_core::lexer::prelude::Lexer;

const PROMPT: &str = ">> ";

pub fn start() -> std::io::Result<()> {
	let stdin = std::io::stdin();

	loop {
		let mut input = String::from("");

		print!("{}", PROMPT);
		std::io::stdout().flush()?;
		if stdin.read_line(&mut input)? == 0 {
			return Ok(());
		}

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
				let lexer = Lexer::new(input.char_indices().map(|(i, c)| (i as u32, c)));

				for res in lexer {
					match res {
						Ok((start, token, end)) => {
							println!("{start: >3}..{end: <3} {token}");
						},
						Err(err) => {
							let details = err.details();
							let location = err.location;
							println!("[at {}] Lexical Error: {}", location.start, details.0);
							if !details.1.is_empty() {
								println!("{}", details.1.join("\n"));
							}
							break;
						}
					}
				}
			}
		}
	}
}
