#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Symbols
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Comma,
    LParen,
    RParen,

    // Literals / idents
    Number(f64),
    Ident(String),

    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset into the whitespace-stripped expression.
    pub pos: usize,
}

impl TokenKind {
    /// Whether a token of this kind can begin an operand. Used to detect
    /// implicit multiplication such as `2(3)` or `2pi`.
    pub fn starts_operand(&self) -> bool {
        matches!(self, TokenKind::Number(_) | TokenKind::Ident(_) | TokenKind::LParen)
    }
}
