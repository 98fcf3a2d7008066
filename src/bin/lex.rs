use std::{env, error::Error, fs};

use cflat::{lexer, token};

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let path = match (args.next(), args.next()) {
        (Some(path), None) => path,
        _ => return Err("usage: lex <input-file>".into()),
    };

    let source = fs::read_to_string(path)?;
    let tokens = lexer::lex(&source);
    // `render` already carries the terminating newline. Lexical errors are
    // part of the stream, not a process failure.
    print!("{}", token::render(&tokens));
    Ok(())
}
