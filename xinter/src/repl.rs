use std::{io::Write, rc::Rc};

use xinter_core::session::{Flow, Session, SessionOptions};

use crate::ConsoleOutputEmitter;

pub const PROMPT: &str = "Xinter ==> ";

pub fn start(options: SessionOptions, prompt: &str) -> std::io::Result<()> {
	ctrlc::set_handler(|| {
		println!();
		println!("Exiting");
		std::process::exit(0);
	}).map_err(std::io::Error::other)?;

	let stdin = std::io::stdin();
	let mut session = Session::new(options, Rc::new(ConsoleOutputEmitter));

	loop {
		let mut input = String::from("");

		print!("{}", prompt);
		std::io::stdout().flush()?;

		// end of input behaves like `exit`
		if stdin.read_line(&mut input)? == 0 {
			println!();
			session.feed("exit");
			return Ok(());
		}

		if session.feed(&input) == Flow::Exit {
			return Ok(());
		}
	}
}
