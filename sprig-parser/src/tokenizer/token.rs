use logos::Logos;
use std::ops::Range;

/// The different kinds of raw tokens that can be produced by the tokenizer.
///
/// Parentheses and the punctuation operators `+ * / ^` always stand alone, even without
/// surrounding whitespace. Everything else is grouped into words, which are classified as
/// numbers, operator names or variables by the parser. `-` is not punctuation: `-4` is a single
/// word, and so is `x-2`.
#[derive(Logos, Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[regex(r"[+*/^]")]
    Punct,

    #[regex(r"[^ \t\r\n\f()+*/^]+")]
    Word,
}

impl TokenKind {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::Whitespace)
    }
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// The region of the source code that this token originated from.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme that was parsed into this token.
    pub lexeme: &'source str,
}

impl Token<'_> {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.kind.is_whitespace()
    }
}
