use std::{env, error::Error, fs};

use cflat::{parser, token};

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
        _ => return Err("usage: parse <input-file>".into()),
    };

    let input = fs::read_to_string(path)?;
    // The input is one line of `lex` output.
    let line = input.lines().next().unwrap_or("");
    let tokens = token::from_line(line);

    // A parse error is a result, not a process failure; both go to stdout.
    match parser::parse(&tokens) {
        Ok(program) => println!("{program}"),
        Err(error) => println!("{error}"),
    }
    Ok(())
}
