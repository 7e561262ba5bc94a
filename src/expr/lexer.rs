use crate::expr::error::ExprError;
use crate::expr::token::{Token, TokenKind};

pub fn lex(input: &str) -> Result<Vec<Token>, ExprError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        if ch.is_whitespace() {
            continue;
        }

        let kind = match ch {
            '+' => Some(TokenKind::Plus),
            '-' => Some(TokenKind::Minus),
            '*' => Some(TokenKind::Star),
            '/' => Some(TokenKind::Slash),
            '%' => Some(TokenKind::Percent),
            '^' => Some(TokenKind::Caret),
            ',' => Some(TokenKind::Comma),
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            _ => None,
        };
        if let Some(kind) = kind {
            tokens.push(Token { kind, pos });
            continue;
        }

        // Number literal: digits, one dot, optional exponent
        if ch.is_ascii_digit() || ch == '.' {
            let mut text = String::new();
            text.push(ch);
            while let Some(&(_, nxt)) = chars.peek() {
                if nxt.is_ascii_digit() || nxt == '.' {
                    text.push(nxt);
                    chars.next();
                } else {
                    break;
                }
            }
            if let Some(exp) = take_exponent(&mut chars) {
                text.push_str(&exp);
            }
            let val: f64 = text
                .parse()
                .map_err(|_| ExprError::InvalidNumber { text: text.clone(), pos })?;
            tokens.push(Token {
                kind: TokenKind::Number(val),
                pos,
            });
            continue;
        }

        // Identifier: function name, constant or unsubstituted variable
        if is_ident_start(ch) {
            let mut ident = String::new();
            ident.push(ch);
            while let Some(&(_, nxt)) = chars.peek() {
                if is_ident_part(nxt) {
                    ident.push(nxt);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token {
                kind: TokenKind::Ident(ident),
                pos,
            });
            continue;
        }

        return Err(ExprError::UnexpectedChar { ch, pos });
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        pos: input.len(),
    });
    Ok(tokens)
}

/// Consumes `e3`, `e-3`, `E+3` after a number. A bare `e` is left alone so
/// that `2e` still reads as `2 * e`.
fn take_exponent(chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>) -> Option<String> {
    let mut lookahead = chars.clone();
    let (_, marker) = lookahead.next()?;
    if marker != 'e' && marker != 'E' {
        return None;
    }
    let mut exp = String::new();
    exp.push(marker);
    if let Some(&(_, sign)) = lookahead.peek() {
        if sign == '+' || sign == '-' {
            exp.push(sign);
            lookahead.next();
        }
    }
    let mut digits = 0;
    while let Some(&(_, d)) = lookahead.peek() {
        if d.is_ascii_digit() {
            exp.push(d);
            lookahead.next();
            digits += 1;
        } else {
            break;
        }
    }
    if digits == 0 {
        return None;
    }
    *chars = lookahead;
    Some(exp)
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
