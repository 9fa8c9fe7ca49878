//! Lexer for the schema notation.
//!
//! Whitespace and `//` comments are dropped. `///` comments are kept as
//! [`TokenKind::DocComment`] so the parser can attach them to the next item.
//! Consecutive unrecognized characters are coalesced into one
//! [`TokenKind::Garbage`] token.

use std::ops::Range;

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(":")]
    Colon,

    #[token("=")]
    Equals,

    #[token("*")]
    Star,

    #[token("..")]
    DotDot,

    #[token(".")]
    Dot,

    #[token("/")]
    Slash,

    #[token("@")]
    At,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    #[token("package")]
    KwPackage,

    #[token("struct")]
    KwStruct,

    #[token("enum")]
    KwEnum,

    #[token("alias")]
    KwAlias,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r#""(?:[^"\\\n]|\\.)*""#)]
    StringLiteral,

    #[regex(r"-?[0-9]+")]
    Integer,

    #[regex(r"-?[0-9]+\.[0-9]+")]
    Float,

    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    /// `///` comment; produced by [`lex`] from `LineComment`.
    DocComment,

    /// Unrecognized input.
    Garbage,
}

impl TokenKind {
    /// Human-readable name for diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::Colon => "`:`",
            TokenKind::Equals => "`=`",
            TokenKind::Star => "`*`",
            TokenKind::DotDot => "`..`",
            TokenKind::Dot => "`.`",
            TokenKind::Slash => "`/`",
            TokenKind::At => "`@`",
            TokenKind::Comma => "`,`",
            TokenKind::Semicolon => "`;`",
            TokenKind::KwPackage => "`package`",
            TokenKind::KwStruct => "`struct`",
            TokenKind::KwEnum => "`enum`",
            TokenKind::KwAlias => "`alias`",
            TokenKind::Ident => "identifier",
            TokenKind::StringLiteral => "string literal",
            TokenKind::Integer => "integer",
            TokenKind::Float => "float",
            TokenKind::Whitespace => "whitespace",
            TokenKind::LineComment => "comment",
            TokenKind::DocComment => "doc comment",
            TokenKind::Garbage => "unrecognized input",
        }
    }

    pub fn is_item_start(self) -> bool {
        matches!(
            self,
            TokenKind::KwStruct | TokenKind::KwEnum | TokenKind::KwAlias | TokenKind::KwPackage
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

/// Tokenize `source`, dropping trivia.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                let span = lexer.span();
                if let Some(start) = error_start.take() {
                    tokens.push(Token {
                        kind: TokenKind::Garbage,
                        span: start..span.start,
                    });
                }

                match kind {
                    TokenKind::Whitespace => {}
                    TokenKind::LineComment => {
                        let text = &source[span.clone()];
                        if text.starts_with("///") && !text.starts_with("////") {
                            tokens.push(Token {
                                kind: TokenKind::DocComment,
                                span,
                            });
                        }
                    }
                    _ => tokens.push(Token { kind, span }),
                }
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token {
                        kind: TokenKind::Garbage,
                        span: start..source.len(),
                    });
                }
                break;
            }
        }
    }

    tokens
}

/// Text of a doc comment token without the `///` marker.
pub fn doc_text(text: &str) -> &str {
    let body = text.strip_prefix("///").unwrap_or(text);
    body.strip_prefix(' ').unwrap_or(body).trim_end()
}

/// Decode the escapes of a string literal token, quotes included.
pub fn unquote(text: &str) -> String {
    let inner = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text);

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
