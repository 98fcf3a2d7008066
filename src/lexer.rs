use std::{iter::Peekable, ops::Range};

use crate::token::{Token, TokenKind, KEYWORDS};

/// Maps the source buffer into a sequence of tokens.
///
/// Lexical errors never abort the scan; they surface as [`TokenKind::Error`]
/// tokens in the output. The one exception is a comment that runs off the
/// end of the buffer, which produces a final `Error` token covering the rest
/// of the input and ends the stream there.
pub fn lex(src: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(src);
    loop {
        if let Trivia::EndedStream = lexer.skip_trivia() {
            break;
        }
        lexer.current_lo = lexer.cursor;
        let Some(c) = lexer.advance() else { break };
        let kind = lexer.scan_token_kind(c);
        lexer.push(kind);
    }
    lexer.tokens
}

struct Lexer<'src> {
    src: &'src str,
    iter: Peekable<std::str::Chars<'src>>,
    cursor: usize,
    current_lo: usize,
    tokens: Vec<Token>,
}

enum Trivia {
    Skipped,
    /// A comment reached the end of the buffer; its `Error` token has been
    /// pushed and no further tokens may follow.
    EndedStream,
}

impl Lexer<'_> {
    /// Consumes whitespace and comments until a token can start.
    ///
    /// Line comments run through and including their terminating newline.
    /// Block comments do not nest. Either kind hitting the end of the buffer
    /// becomes the stream's final `Error` token.
    fn skip_trivia(&mut self) -> Trivia {
        loop {
            while matches!(self.peek(), Some(c) if c.is_ascii_whitespace()) {
                self.advance();
            }
            if self.rest().starts_with("//") {
                self.current_lo = self.cursor;
                self.advance();
                self.advance();
                loop {
                    match self.advance() {
                        Some('\n') => break,
                        Some(_) => {}
                        None => {
                            self.push(TokenKind::Error);
                            return Trivia::EndedStream;
                        }
                    }
                }
            } else if self.rest().starts_with("/*") {
                self.current_lo = self.cursor;
                self.advance();
                self.advance();
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        Some(_) => {}
                        None => {
                            self.push(TokenKind::Error);
                            return Trivia::EndedStream;
                        }
                    }
                }
            } else {
                return Trivia::Skipped;
            }
        }
    }

    /// Scans the token starting at `c`, longest match first.
    fn scan_token_kind(&mut self, c: char) -> TokenKind {
        use TokenKind::*;
        match c {
            c if c.is_ascii_alphabetic() => self.identifier_or_keyword(),
            c if c.is_ascii_digit() => self.number(),
            '!' if self.peek() == Some('=') => self.advance_with(NotEq),
            '<' if self.peek() == Some('=') => self.advance_with(Lte),
            '>' if self.peek() == Some('=') => self.advance_with(Gte),
            '-' if self.peek() == Some('>') => self.advance_with(Arrow),
            '=' if self.peek() == Some('=') => self.advance_with(Equal),
            ':' => Colon,
            ';' => Semicolon,
            ',' => Comma,
            '&' => Ampersand,
            '+' => Plus,
            '-' => Dash,
            '*' => Star,
            '/' => Slash,
            '<' => Lt,
            '>' => Gt,
            '.' => Dot,
            '=' => Gets,
            '(' => OpenParen,
            ')' => CloseParen,
            '[' => OpenBracket,
            ']' => CloseBracket,
            '{' => OpenBrace,
            '}' => CloseBrace,
            '?' => QuestionMark,
            _ => self.error_run(),
        }
    }

    fn identifier_or_keyword(&mut self) -> TokenKind {
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            self.advance();
        }
        KEYWORDS
            .get(self.substr())
            .copied()
            .unwrap_or(TokenKind::Id)
    }

    fn number(&mut self) -> TokenKind {
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }
        TokenKind::Num
    }

    /// Extends an error token up to the next byte that could begin a token,
    /// swallowing whatever lies in between (whitespace included).
    fn error_run(&mut self) -> TokenKind {
        while matches!(self.peek(), Some(c) if !starts_token(c)) {
            self.advance();
        }
        TokenKind::Error
    }
}

impl<'src> Lexer<'src> {
    fn new(src: &'src str) -> Lexer<'src> {
        Lexer {
            src,
            iter: src.chars().peekable(),
            cursor: 0,
            current_lo: 0,
            tokens: Vec::with_capacity(1_024),
        }
    }

    /// Returns the next character and advances the iterator.
    fn advance(&mut self) -> Option<char> {
        let c = self.iter.next()?;
        self.cursor += c.len_utf8();
        Some(c)
    }

    /// Advances and returns the provided kind.
    fn advance_with(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    /// Returns the next character without advancing the iterator.
    fn peek(&mut self) -> Option<char> {
        self.iter.peek().copied()
    }

    /// Returns the unscanned remainder of the source.
    fn rest(&self) -> &'src str {
        &self.src[self.cursor..]
    }

    /// Returns the current marked range.
    fn range(&self) -> Range<usize> {
        self.current_lo..self.cursor
    }

    /// Returns the substring of the current marked bounds.
    fn substr(&self) -> &'src str {
        &self.src[self.range()]
    }

    /// Produces a token from the marked bounds, at the next stream ordinal.
    fn push(&mut self, kind: TokenKind) {
        let position = self.tokens.len();
        let lexeme = self.substr();
        self.tokens.push(Token::new(kind, lexeme, position));
    }
}

/// Whether `c` can begin a token: an identifier or number start, an operator
/// or punctuation lead byte, or a comment opener (covered by `/`).
fn starts_token(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '!' | ':'
                | ';'
                | ','
                | '&'
                | '+'
                | '-'
                | '*'
                | '/'
                | '<'
                | '>'
                | '.'
                | '='
                | '('
                | ')'
                | '['
                | ']'
                | '{'
                | '}'
                | '?'
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Lexes and strips positions, which are asserted separately to always
    /// be contiguous.
    fn lex_pairs(src: &str) -> Vec<(TokenKind, String)> {
        let tokens = lex(src);
        for (i, token) in tokens.iter().enumerate() {
            assert_eq!(token.position, i);
        }
        tokens
            .into_iter()
            .map(|t| (t.kind, t.lexeme))
            .collect()
    }

    macro_rules! cases {
        (match .. {
            $($src:expr => [$(($kind:ident, $lexeme:expr)),* $(,)?]),* $(,)?
        }) => {{
            &[$((
                $src,
                vec![$((TokenKind::$kind, $lexeme.to_string())),*],
            )),*]
        }};
    }

    #[test]
    fn keywords_numbers_and_identifiers() {
        let cases = cases!(match .. {
            "if (x <= 42) { return x; }" => [
                (If, "if"),
                (OpenParen, "("),
                (Id, "x"),
                (Lte, "<="),
                (Num, "42"),
                (CloseParen, ")"),
                (OpenBrace, "{"),
                (Return, "return"),
                (Id, "x"),
                (Semicolon, ";"),
                (CloseBrace, "}"),
            ],
            "int interior if iffy not nothing" => [
                (Int, "int"),
                (Id, "interior"),
                (If, "if"),
                (Id, "iffy"),
                (Not, "not"),
                (Id, "nothing"),
            ],
            "x1_2 123abc" => [
                (Id, "x1_2"),
                (Num, "123"),
                (Id, "abc"),
            ],
            "struct nil break continue new let extern fn and or else while" => [
                (Struct, "struct"),
                (Nil, "nil"),
                (Break, "break"),
                (Continue, "continue"),
                (New, "new"),
                (Let, "let"),
                (Extern, "extern"),
                (Fn, "fn"),
                (And, "and"),
                (Or, "or"),
                (Else, "else"),
                (While, "while"),
            ],
        });
        for (src, expected) in cases {
            assert_eq!(&lex_pairs(src), expected, "src: {src:?}");
        }
    }

    #[test]
    fn operators_munch_longest_first() {
        let cases = cases!(match .. {
            "a<=b!=c->d==e>=f" => [
                (Id, "a"),
                (Lte, "<="),
                (Id, "b"),
                (NotEq, "!="),
                (Id, "c"),
                (Arrow, "->"),
                (Id, "d"),
                (Equal, "=="),
                (Id, "e"),
                (Gte, ">="),
                (Id, "f"),
            ],
            "= == === - -> < <= > >=" => [
                (Gets, "="),
                (Equal, "=="),
                (Equal, "=="),
                (Gets, "="),
                (Dash, "-"),
                (Arrow, "->"),
                (Lt, "<"),
                (Lte, "<="),
                (Gt, ">"),
                (Gte, ">="),
            ],
            ": ; , & + - * / . ? ( ) [ ] { }" => [
                (Colon, ":"),
                (Semicolon, ";"),
                (Comma, ","),
                (Ampersand, "&"),
                (Plus, "+"),
                (Dash, "-"),
                (Star, "*"),
                (Slash, "/"),
                (Dot, "."),
                (QuestionMark, "?"),
                (OpenParen, "("),
                (CloseParen, ")"),
                (OpenBracket, "["),
                (CloseBracket, "]"),
                (OpenBrace, "{"),
                (CloseBrace, "}"),
            ],
        });
        for (src, expected) in cases {
            assert_eq!(&lex_pairs(src), expected, "src: {src:?}");
        }
    }

    #[test]
    fn comments_are_skipped() {
        let cases = cases!(match .. {
            "a = b + 1; // trailing\n" => [
                (Id, "a"),
                (Gets, "="),
                (Id, "b"),
                (Plus, "+"),
                (Num, "1"),
                (Semicolon, ";"),
            ],
            "// leading\nx" => [(Id, "x")],
            "a /* inline */ b" => [(Id, "a"), (Id, "b")],
            "/* multi\n line */ 7" => [(Num, "7")],
            // No nesting: the first `*/` closes the comment.
            "/* /* */ x" => [(Id, "x")],
            "a /**/ b" => [(Id, "a"), (Id, "b")],
            "x // rest of line = ignored\ny" => [(Id, "x"), (Id, "y")],
        });
        for (src, expected) in cases {
            assert_eq!(&lex_pairs(src), expected, "src: {src:?}");
        }
    }

    #[test]
    fn unterminated_comments_end_the_stream() {
        let cases = cases!(match .. {
            "/* unterminated" => [(Error, "/* unterminated")],
            "x /* gone" => [(Id, "x"), (Error, "/* gone")],
            "/*" => [(Error, "/*")],
            "/* almost *" => [(Error, "/* almost *")],
            "/*/" => [(Error, "/*/")],
            "// eof comment" => [(Error, "// eof comment")],
            "a; // no newline" => [
                (Id, "a"),
                (Semicolon, ";"),
                (Error, "// no newline"),
            ],
        });
        for (src, expected) in cases {
            assert_eq!(&lex_pairs(src), expected, "src: {src:?}");
        }
    }

    #[test]
    fn error_runs_extend_to_the_next_token_start() {
        let cases = cases!(match .. {
            "a $#@ b" => [(Id, "a"), (Error, "$#@ "), (Id, "b")],
            "^+" => [(Error, "^"), (Plus, "+")],
            "# #" => [(Error, "# #")],
            "x@1" => [(Id, "x"), (Error, "@"), (Num, "1")],
            "~;" => [(Error, "~"), (Semicolon, ";")],
            "a $\n" => [(Id, "a"), (Error, "$\n")],
            // A lone `!` is not a token; the error run absorbs it and the
            // whitespace after it.
            "! =" => [(Error, "! "), (Gets, "=")],
        });
        for (src, expected) in cases {
            assert_eq!(&lex_pairs(src), expected, "src: {src:?}");
        }
    }

    #[test]
    fn lexemes_and_skipped_whitespace_reconstruct_the_source() {
        // Comment-free, so the only skipped spans are whitespace runs and
        // the buffer must rebuild exactly from gaps plus lexemes. The `$%`
        // produces an Error token whose lexeme participates like any other.
        let src = "fn main() -> int {\n\tlet x: int;\n\tx = 1 $% 2;\n\treturn x;\n}\n";
        let tokens = lex(src);
        let mut rebuilt = String::with_capacity(src.len());
        let mut offset = 0;
        for token in &tokens {
            let skipped: usize = src[offset..]
                .chars()
                .take_while(|c| c.is_ascii_whitespace())
                .map(char::len_utf8)
                .sum();
            rebuilt.push_str(&src[offset..offset + skipped]);
            offset += skipped;
            assert!(
                src[offset..].starts_with(&token.lexeme),
                "lexeme {:?} not found at byte {offset}",
                token.lexeme
            );
            rebuilt.push_str(&token.lexeme);
            offset += token.lexeme.len();
        }
        // Whatever remains is trailing whitespace the lexer skipped before
        // hitting the end of the buffer.
        assert!(src[offset..].chars().all(|c| c.is_ascii_whitespace()));
        rebuilt.push_str(&src[offset..]);
        assert_eq!(rebuilt, src);
    }

    #[test]
    fn empty_and_blank_inputs_produce_no_tokens() {
        assert_eq!(lex(""), vec![]);
        assert_eq!(lex("   \t\n  "), vec![]);
        assert_eq!(lex("// gone\n"), vec![]);
        assert_eq!(lex("/* gone */"), vec![]);
    }
}
