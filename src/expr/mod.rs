//! Arithmetic expressions over on-screen values.
//!
//! The language covers decimal literals, `+ - * / % ^`, unary signs,
//! parentheses, implicit multiplication, a handful of constants and the
//! usual one-argument math functions. Variables are not resolved by the
//! evaluator itself: callers splice values in with [`substitute_values`]
//! first, and anything still unresolved is an error.
//!
//! Failure never escapes [`evaluate`] or [`calculate`]; it is reported as
//! `f64::NAN`. [`try_calculate`] returns the underlying [`ExprError`].

pub mod ast;
pub mod error;
pub mod eval;
pub mod functions;
pub mod lexer;
pub mod parser;
pub mod substitute;
pub mod token;

use std::collections::BTreeMap;

pub use error::ExprError;
pub use substitute::{format_number, format_result, substitute_for_display, substitute_values, Substitution, TextSource};

/// Substitutes `variables` (whole identifiers only) and evaluates.
pub fn evaluate(expression: &str, variables: &BTreeMap<String, f64>) -> f64 {
    evaluate_with(expression, variables, Substitution::Token)
}

pub fn evaluate_with(expression: &str, variables: &BTreeMap<String, f64>, mode: Substitution) -> f64 {
    let expr = substitute_values(expression.trim(), variables, mode);
    calculate(&expr)
}

/// Evaluates a variable-free expression. Blank input and every error map
/// to NaN.
pub fn calculate(expression: &str) -> f64 {
    match try_calculate(expression) {
        Ok(value) => value,
        Err(ExprError::Blank) => f64::NAN,
        Err(err) => {
            tracing::warn!(expression, error = %err, "error evaluating expression");
            f64::NAN
        }
    }
}

pub fn try_calculate(expression: &str) -> Result<f64, ExprError> {
    if expression.trim().is_empty() {
        return Err(ExprError::Blank);
    }
    let clean: String = expression.chars().filter(|c| !c.is_whitespace()).collect();
    let tokens = lexer::lex(&clean)?;
    let ast = parser::Parser::from_tokens(&tokens)?;
    eval::eval_expr(&ast)
}
