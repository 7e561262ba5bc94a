use std::collections::BTreeMap;

use colored::Colorize;

use actionkit::expr::{self, format_result, substitute_values, ExprError, Substitution};

use crate::cli::{render, util};

pub fn handle_eval(expression: &str, raw_vars: &[String], mode: Substitution) -> Result<(), String> {
    let mut vars = BTreeMap::new();
    for raw in raw_vars {
        let (name, value) = util::split_assignment(raw)?;
        let value: f64 = value
            .trim()
            .parse()
            .map_err(|_| format!("variable `{}`: `{}` is not a number", name, value))?;
        vars.insert(name.to_string(), value);
    }

    let result = expr::evaluate_with(expression, &vars, mode);
    if !result.is_nan() {
        println!("{}", format_result(result));
        return Ok(());
    }

    // NaN can be a legitimate result (e.g. 0%0); only report real errors.
    let substituted = substitute_values(expression.trim(), &vars, mode);
    match expr::try_calculate(&substituted) {
        Ok(_) => {
            println!("{}", "NaN".red());
            Ok(())
        }
        Err(err) => {
            let stripped: String = substituted.chars().filter(|c| !c.is_whitespace()).collect();
            if let Some(pos) = error_pos(&err) {
                render::print_snippet(&stripped, pos);
            }
            Err(err.to_string())
        }
    }
}

fn error_pos(err: &ExprError) -> Option<usize> {
    match err {
        ExprError::UnexpectedChar { pos, .. }
        | ExprError::InvalidNumber { pos, .. }
        | ExprError::UnexpectedToken { pos, .. } => Some(*pos),
        _ => None,
    }
}
