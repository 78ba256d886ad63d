//! Logos-based lexer for path queries

use logos::Logos;

/// A token with its kind, text, and byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: usize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: TokenKind::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    /// `Err(offset)` for input that is not a token.
    type Item = Result<Token<'a>, usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.inner.next()?;
        let offset = self.inner.span().start;
        Some(match result {
            Ok(kind) => Ok(Token {
                kind,
                text: self.inner.slice(),
                offset,
            }),
            Err(()) => Err(offset),
        })
    }
}

/// Tokenize an entire query
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, usize> {
    Lexer::new(input).collect()
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum TokenKind {
    // =========================================================================
    // PATH PUNCTUATION (multi-character first)
    // =========================================================================
    #[token("//")]
    DoubleSlash,

    #[token("/")]
    Slash,

    #[token("..")]
    DotDot,

    #[token(".")]
    Dot,

    #[token("*")]
    Star,

    #[token("@")]
    At,

    #[token("|")]
    Pipe,

    // =========================================================================
    // PREDICATES
    // =========================================================================
    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("!=")]
    NotEq,

    #[token("=")]
    Eq,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[0-9]+")]
    Number,

    #[regex(r#""[^"]*""#)]
    #[regex(r"'[^']*'")]
    Literal,

    /// Element, attribute or function name; `-`, `.` and one `prefix:` allowed.
    #[regex(r"[A-Za-z_][A-Za-z0-9_.\-]*(:[A-Za-z_][A-Za-z0-9_.\-]*)?")]
    Name,
}

impl TokenKind {
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::DoubleSlash => "'//'",
            TokenKind::Slash => "'/'",
            TokenKind::DotDot => "'..'",
            TokenKind::Dot => "'.'",
            TokenKind::Star => "'*'",
            TokenKind::At => "'@'",
            TokenKind::Pipe => "'|'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::NotEq => "'!='",
            TokenKind::Eq => "'='",
            TokenKind::Number => "number",
            TokenKind::Literal => "string literal",
            TokenKind::Name => "name",
        }
    }
}
