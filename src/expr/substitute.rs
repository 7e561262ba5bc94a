use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::Deserialize;

/// Anything that can show its current display text: an on-screen element,
/// or a plain string in tests and previews.
pub trait TextSource {
    fn current_text(&self) -> &str;
}

impl TextSource for str {
    fn current_text(&self) -> &str {
        self
    }
}

impl TextSource for String {
    fn current_text(&self) -> &str {
        self
    }
}

impl<T: TextSource + ?Sized> TextSource for &T {
    fn current_text(&self) -> &str {
        (**self).current_text()
    }
}

/// How numeric values are spliced into an expression before evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Substitution {
    /// Only whole identifier tokens are replaced.
    #[default]
    #[serde(alias = "token-bounded")]
    Token,
    /// Plain text replacement, variable by variable in map order. A variable
    /// `a` also rewrites the `a` inside `abc`. Values are rendered the same
    /// way as in token mode (parenthesised, no trailing `.0`), so results can
    /// differ from older evaluators: `x^2` with `x = -2` gives 4, not -4.
    Legacy,
}

impl std::str::FromStr for Substitution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "token" | "token-bounded" => Ok(Substitution::Token),
            "legacy" => Ok(Substitution::Legacy),
            other => Err(format!("unknown substitution mode '{other}' (expected token|legacy)")),
        }
    }
}

fn ident_regex() -> &'static Regex {
    static IDENT: OnceLock<Regex> = OnceLock::new();
    IDENT.get_or_init(|| Regex::new(r"\b[a-zA-Z][a-zA-Z0-9_]*\b").expect("identifier pattern is valid"))
}

/// Replaces every identifier with the display text of the element of the
/// same name. Identifiers without an entry are left as they are. Preview
/// only; never feed the result to the evaluator.
pub fn substitute_for_display<T: TextSource>(expression: &str, variables: &HashMap<String, T>) -> String {
    ident_regex()
        .replace_all(expression, |caps: &Captures<'_>| {
            let name = &caps[0];
            match variables.get(name) {
                Some(source) => source.current_text().to_string(),
                None => name.to_string(),
            }
        })
        .into_owned()
}

/// Splices numeric values into `expression` according to `mode`.
pub fn substitute_values(expression: &str, variables: &BTreeMap<String, f64>, mode: Substitution) -> String {
    match mode {
        Substitution::Legacy => {
            let mut expr = expression.to_string();
            for (name, value) in variables {
                if name.is_empty() {
                    continue;
                }
                expr = expr.replace(name.as_str(), &format_number(*value));
            }
            expr
        }
        Substitution::Token => {
            let replaced: Cow<'_, str> = ident_regex().replace_all(expression, |caps: &Captures<'_>| {
                let name = &caps[0];
                match variables.get(name) {
                    Some(value) => format_number(*value),
                    None => name.to_string(),
                }
            });
            replaced.into_owned()
        }
    }
}

/// Renders a value for splicing into an expression.
///
/// Uses the shortest round-trip decimal form, which never switches to
/// exponent notation (`1e21` renders as all digits), and always wraps it in
/// parentheses so a spliced value stays one operand: `x^2` with `x = -2` is
/// `(-2)^2`, and `a b` with `a = 3, b = 2` is `(3)(2)` rather than `32`.
pub fn format_number(value: f64) -> String {
    format!("({})", value)
}

/// Renders an evaluation result for display: `4` rather than `4.0`.
pub fn format_result(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spliced_values_are_parenthesised() {
        assert_eq!(format_number(-2.0), "(-2)");
        assert_eq!(format_number(2.5), "(2.5)");
        assert_eq!(format_number(3.0), "(3)");
        assert_eq!(format_number(1e21), "(1000000000000000000000)");
    }

    #[test]
    fn result_drops_trailing_zero() {
        assert_eq!(format_result(4.0), "4");
        assert_eq!(format_result(0.25), "0.25");
        assert_eq!(format_result(f64::NAN), "NaN");
    }

    #[test]
    fn parses_mode_names() {
        assert_eq!("legacy".parse::<Substitution>(), Ok(Substitution::Legacy));
        assert_eq!("token-bounded".parse::<Substitution>(), Ok(Substitution::Token));
        assert!("words".parse::<Substitution>().is_err());
    }
}
