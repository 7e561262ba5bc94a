use std::collections::{BTreeMap, HashMap};

use actionkit::expr::{self, evaluate, evaluate_with, substitute_for_display, substitute_values, try_calculate};
use actionkit::expr::{ExprError, Substitution};

fn vars(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn evaluates_plain_arithmetic() {
    assert_eq!(evaluate("2+2", &BTreeMap::new()), 4.0);
    assert_eq!(evaluate(" 2 * ( 3 + 4 ) ", &BTreeMap::new()), 14.0);
    assert_eq!(evaluate("7 % 4", &BTreeMap::new()), 3.0);
    assert_eq!(evaluate("1.5e2 / 3", &BTreeMap::new()), 50.0);
}

#[test]
fn precedence_and_associativity() {
    assert_eq!(expr::calculate("2+3*4"), 14.0);
    assert_eq!(expr::calculate("2^3^2"), 512.0);
    assert_eq!(expr::calculate("-2^2"), -4.0);
    assert_eq!(expr::calculate("(-2)^2"), 4.0);
    assert_eq!(expr::calculate("10-4-3"), 3.0);
    assert_eq!(expr::calculate("--3"), 3.0);
}

#[test]
fn implicit_multiplication() {
    assert_eq!(expr::calculate("2(3+1)"), 8.0);
    assert_eq!(expr::calculate("(1+1)(2+2)"), 8.0);
    assert!(close(expr::calculate("2pi"), 2.0 * std::f64::consts::PI));
}

#[test]
fn functions_and_constants() {
    assert!(close(expr::calculate("sqrt(16)"), 4.0));
    assert!(close(expr::calculate("sin(0)+cos(0)"), 1.0));
    assert!(close(expr::calculate("log(e)"), 1.0));
    assert!(close(expr::calculate("pow(2,10)"), 1024.0));
    assert!(close(expr::calculate("abs(-3)+floor(2.7)"), 5.0));
    assert_eq!(expr::calculate("signum(0)"), 0.0);
}

#[test]
fn substitutes_variables_before_evaluating() {
    assert_eq!(evaluate("a+1", &vars(&[("a", 3.0)])), 4.0);
    assert_eq!(evaluate("price*qty", &vars(&[("price", 2.5), ("qty", 4.0)])), 10.0);
    assert_eq!(evaluate("x^2", &vars(&[("x", -2.0)])), 4.0);
}

#[test]
fn failures_become_nan() {
    assert!(evaluate("", &BTreeMap::new()).is_nan());
    assert!(evaluate("   ", &BTreeMap::new()).is_nan());
    assert!(evaluate("2+", &BTreeMap::new()).is_nan());
    assert!(evaluate("2+b", &vars(&[("a", 1.0)])).is_nan());
    assert!(evaluate("1/0", &BTreeMap::new()).is_nan());
    assert!(evaluate("5%0", &BTreeMap::new()).is_nan());
    assert!(evaluate("nope(1)", &BTreeMap::new()).is_nan());
}

#[test]
fn try_calculate_names_the_failure() {
    assert_eq!(try_calculate(""), Err(ExprError::Blank));
    assert_eq!(try_calculate("1/0"), Err(ExprError::DivisionByZero));
    assert_eq!(try_calculate("2+"), Err(ExprError::UnexpectedEnd));
    assert_eq!(try_calculate("foo(1)"), Err(ExprError::UnknownFunction("foo".into())));
    assert_eq!(try_calculate("x+1"), Err(ExprError::UnknownVariable("x".into())));
    assert!(matches!(
        try_calculate("pow(2)"),
        Err(ExprError::Arity { expected: 2, got: 1, .. })
    ));
    assert!(matches!(try_calculate("2#3"), Err(ExprError::UnexpectedChar { ch: '#', pos: 1 })));
}

#[test]
fn token_mode_only_replaces_whole_identifiers() {
    let v = vars(&[("a", 2.0), ("abc", 10.0)]);
    assert_eq!(substitute_values("abc+a", &v, Substitution::Token), "(10)+(2)");
    assert_eq!(evaluate("abc+a", &v), 12.0);
}

#[test]
fn legacy_mode_replaces_inside_longer_names() {
    let v = vars(&[("a", 2.0), ("abc", 10.0)]);
    assert_eq!(substitute_values("abc+a", &v, Substitution::Legacy), "(2)bc+(2)");
    assert!(evaluate_with("abc+a", &v, Substitution::Legacy).is_nan());
    assert_eq!(evaluate_with("a*3", &v, Substitution::Legacy), 6.0);
}

#[test]
fn display_substitution_keeps_unknown_names() {
    let mut texts: HashMap<String, &str> = HashMap::new();
    texts.insert("x".into(), "5");
    assert_eq!(substitute_for_display("x+unknownVar", &texts), "5+unknownVar");

    texts.insert("price".into(), "");
    assert_eq!(substitute_for_display("price*x", &texts), "*5");
}

#[test]
fn adjacent_values_multiply_instead_of_merging() {
    let v = vars(&[("a", 3.0), ("b", 2.0)]);
    assert_eq!(evaluate("a b", &v), 6.0);
    assert_eq!(evaluate("2 a", &v), 6.0);
    assert_eq!(evaluate("a(b+1)", &v), 9.0);
    assert_eq!(evaluate_with("ab", &v, Substitution::Legacy), 6.0);
    assert_eq!(substitute_values("a b", &v, Substitution::Token), "(3) (2)");
}
