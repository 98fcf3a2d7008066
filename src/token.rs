use std::fmt;

/// A single lexical token.
///
/// `lexeme` is the exact source slice that produced the token. The lexer
/// fills it for every token; [`from_line`] only fills it for the kinds whose
/// surface form carries a payload (`Num`, `Id`, `Error`). `position` is the
/// token's 0-based ordinal in its stream, which the parser uses when
/// reporting errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, position: usize) -> Token {
        Token {
            kind,
            lexeme: lexeme.into(),
            position,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Error,
    Num,
    Id,

    // Keywords
    Int,
    Struct,
    Nil,
    Break,
    Continue,
    Return,
    If,
    Else,
    While,
    New,
    Let,
    Extern,
    Fn,
    And,
    Or,
    Not,

    // Punctuation and operators
    Colon,
    Semicolon,
    Comma,
    Arrow,
    Ampersand,
    Plus,
    Dash,
    Star,
    Slash,
    Equal,
    NotEq,
    Lt,
    Lte,
    Gt,
    Gte,
    Dot,
    /// `=` (assignment); `==` is [`TokenKind::Equal`].
    Gets,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
    QuestionMark,
}

/// Reserved words. Any other `[A-Za-z][A-Za-z0-9_]*` run lexes as `Id`.
pub static KEYWORDS: phf::Map<&'static str, TokenKind> = phf::phf_map! {
    "int" => TokenKind::Int,
    "struct" => TokenKind::Struct,
    "nil" => TokenKind::Nil,
    "break" => TokenKind::Break,
    "continue" => TokenKind::Continue,
    "return" => TokenKind::Return,
    "if" => TokenKind::If,
    "else" => TokenKind::Else,
    "while" => TokenKind::While,
    "new" => TokenKind::New,
    "let" => TokenKind::Let,
    "extern" => TokenKind::Extern,
    "fn" => TokenKind::Fn,
    "and" => TokenKind::And,
    "or" => TokenKind::Or,
    "not" => TokenKind::Not,
};

/// Printed kind name back to kind, for [`from_line`]. Only the kinds that
/// render as a bare name appear here; `Num`, `Id` and `Error` always carry
/// their lexeme in parentheses.
static WIRE_NAMES: phf::Map<&'static str, TokenKind> = phf::phf_map! {
    "Int" => TokenKind::Int,
    "Struct" => TokenKind::Struct,
    "Nil" => TokenKind::Nil,
    "Break" => TokenKind::Break,
    "Continue" => TokenKind::Continue,
    "Return" => TokenKind::Return,
    "If" => TokenKind::If,
    "Else" => TokenKind::Else,
    "While" => TokenKind::While,
    "New" => TokenKind::New,
    "Let" => TokenKind::Let,
    "Extern" => TokenKind::Extern,
    "Fn" => TokenKind::Fn,
    "And" => TokenKind::And,
    "Or" => TokenKind::Or,
    "Not" => TokenKind::Not,
    "Colon" => TokenKind::Colon,
    "Semicolon" => TokenKind::Semicolon,
    "Comma" => TokenKind::Comma,
    "Arrow" => TokenKind::Arrow,
    "Ampersand" => TokenKind::Ampersand,
    "Plus" => TokenKind::Plus,
    "Dash" => TokenKind::Dash,
    "Star" => TokenKind::Star,
    "Slash" => TokenKind::Slash,
    "Equal" => TokenKind::Equal,
    "NotEq" => TokenKind::NotEq,
    "Lt" => TokenKind::Lt,
    "Lte" => TokenKind::Lte,
    "Gt" => TokenKind::Gt,
    "Gte" => TokenKind::Gte,
    "Dot" => TokenKind::Dot,
    "Gets" => TokenKind::Gets,
    "OpenParen" => TokenKind::OpenParen,
    "CloseParen" => TokenKind::CloseParen,
    "OpenBracket" => TokenKind::OpenBracket,
    "CloseBracket" => TokenKind::CloseBracket,
    "OpenBrace" => TokenKind::OpenBrace,
    "CloseBrace" => TokenKind::CloseBrace,
    "QuestionMark" => TokenKind::QuestionMark,
};

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Error => "Error",
            TokenKind::Num => "Num",
            TokenKind::Id => "Id",
            TokenKind::Int => "Int",
            TokenKind::Struct => "Struct",
            TokenKind::Nil => "Nil",
            TokenKind::Break => "Break",
            TokenKind::Continue => "Continue",
            TokenKind::Return => "Return",
            TokenKind::If => "If",
            TokenKind::Else => "Else",
            TokenKind::While => "While",
            TokenKind::New => "New",
            TokenKind::Let => "Let",
            TokenKind::Extern => "Extern",
            TokenKind::Fn => "Fn",
            TokenKind::And => "And",
            TokenKind::Or => "Or",
            TokenKind::Not => "Not",
            TokenKind::Colon => "Colon",
            TokenKind::Semicolon => "Semicolon",
            TokenKind::Comma => "Comma",
            TokenKind::Arrow => "Arrow",
            TokenKind::Ampersand => "Ampersand",
            TokenKind::Plus => "Plus",
            TokenKind::Dash => "Dash",
            TokenKind::Star => "Star",
            TokenKind::Slash => "Slash",
            TokenKind::Equal => "Equal",
            TokenKind::NotEq => "NotEq",
            TokenKind::Lt => "Lt",
            TokenKind::Lte => "Lte",
            TokenKind::Gt => "Gt",
            TokenKind::Gte => "Gte",
            TokenKind::Dot => "Dot",
            TokenKind::Gets => "Gets",
            TokenKind::OpenParen => "OpenParen",
            TokenKind::CloseParen => "CloseParen",
            TokenKind::OpenBracket => "OpenBracket",
            TokenKind::CloseBracket => "CloseBracket",
            TokenKind::OpenBrace => "OpenBrace",
            TokenKind::CloseBrace => "CloseBrace",
            TokenKind::QuestionMark => "QuestionMark",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Num => write!(f, "Num({})", self.lexeme),
            TokenKind::Id => write!(f, "Id({})", self.lexeme),
            // A lexeme that already ends in a newline gets one more so the
            // closing parenthesis lands on its own line.
            TokenKind::Error if self.lexeme.ends_with('\n') => {
                write!(f, "Error({}\n)", self.lexeme)
            }
            TokenKind::Error => write!(f, "Error({})", self.lexeme),
            _ => f.write_str(self.kind.name()),
        }
    }
}

/// Renders a token stream in its textual boundary form: kinds separated by
/// single spaces, one terminating newline. This is what `lex` prints and
/// what [`from_line`] reads back.
pub fn render(tokens: &[Token]) -> String {
    use fmt::Write;

    let mut out = String::with_capacity(tokens.len() * 8);
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        write!(out, "{token}").expect("writing to a String cannot fail");
    }
    out.push('\n');
    out
}

/// Reconstructs a token stream from one line of [`render`] output.
///
/// Words of the form `Kind(value)` carry `value` as their lexeme; bare words
/// resolve through the wire-name table. Anything unrecognized becomes an
/// `Error` token holding the raw word, which the parser will reject as an
/// unexpected token wherever it shows up.
pub fn from_line(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    for word in line.split(' ') {
        if word.is_empty() {
            continue;
        }
        let position = tokens.len();
        let token = match word.find('(') {
            Some(open) => {
                let name = &word[..open];
                let value = word[open + 1..].strip_suffix(')').unwrap_or(&word[open + 1..]);
                match name {
                    "Num" => Token::new(TokenKind::Num, value, position),
                    "Id" => Token::new(TokenKind::Id, value, position),
                    "Error" => Token::new(TokenKind::Error, value, position),
                    _ => match WIRE_NAMES.get(name) {
                        Some(kind) => Token::new(*kind, value, position),
                        None => Token::new(TokenKind::Error, word, position),
                    },
                }
            }
            None => match WIRE_NAMES.get(word) {
                Some(kind) => Token::new(*kind, "", position),
                None => Token::new(TokenKind::Error, word, position),
            },
        };
        tokens.push(token);
    }
    tokens
}
