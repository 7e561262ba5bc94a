use thiserror::Error;

use crate::expr::token::TokenKind;

/// Why an expression produced no value.
///
/// The public `evaluate`/`calculate` entry points collapse every variant into
/// the NaN sentinel; `try_calculate` hands the variant back so callers and
/// tests can tell a blank input from a malformed one or a runtime failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    #[error("expression is blank")]
    Blank,
    #[error("unexpected character '{ch}' at {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("invalid number literal '{text}' at {pos}")]
    InvalidNumber { text: String, pos: usize },
    #[error("unexpected token {found:?} at {pos}")]
    UnexpectedToken { found: TokenKind, pos: usize },
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unknown function '{0}'")]
    UnknownFunction(String),
    #[error("unknown variable '{0}'")]
    UnknownVariable(String),
    #[error("{name}() takes {expected} argument(s), got {got}")]
    Arity {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("division by zero")]
    DivisionByZero,
}
