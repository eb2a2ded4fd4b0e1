pub mod lexer;
pub mod parser;
pub mod environment;
pub mod eval;
pub mod session;
pub mod utils;

pub use eval::evaluate;
pub use lexer::lexer::{tokenize, tokenize_traced};
