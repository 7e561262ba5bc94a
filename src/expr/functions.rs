use crate::expr::error::ExprError;

pub type UnaryFn = fn(f64) -> f64;

/// Named constants recognised after substitution.
pub fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" | "π" => Some(std::f64::consts::PI),
        "e" => Some(std::f64::consts::E),
        "φ" => Some(1.618_033_988_749_895),
        _ => None,
    }
}

fn unary(name: &str) -> Option<UnaryFn> {
    let f: UnaryFn = match name {
        "abs" => f64::abs,
        "acos" => f64::acos,
        "asin" => f64::asin,
        "atan" => f64::atan,
        "cbrt" => f64::cbrt,
        "ceil" => f64::ceil,
        "cos" => f64::cos,
        "cosh" => f64::cosh,
        "exp" => f64::exp,
        "expm1" => f64::exp_m1,
        "floor" => f64::floor,
        "log" => f64::ln,
        "log10" => f64::log10,
        "log1p" => f64::ln_1p,
        "log2" => f64::log2,
        "sin" => f64::sin,
        "sinh" => f64::sinh,
        "sqrt" => f64::sqrt,
        "tan" => f64::tan,
        "tanh" => f64::tanh,
        "signum" => signum,
        "toradian" => f64::to_radians,
        "todegree" => f64::to_degrees,
        _ => return None,
    };
    Some(f)
}

// f64::signum maps 0.0 to 1.0; the calculator expects 0 for 0.
fn signum(x: f64) -> f64 {
    if x == 0.0 || x.is_nan() {
        x
    } else {
        x.signum()
    }
}

pub fn call(name: &str, args: &[f64]) -> Result<f64, ExprError> {
    if name == "pow" {
        check_arity(name, 2, args.len())?;
        return Ok(args[0].powf(args[1]));
    }
    let f = unary(name).ok_or_else(|| ExprError::UnknownFunction(name.to_string()))?;
    check_arity(name, 1, args.len())?;
    Ok(f(args[0]))
}

fn check_arity(name: &str, expected: usize, got: usize) -> Result<(), ExprError> {
    if expected == got {
        Ok(())
    } else {
        Err(ExprError::Arity {
            name: name.to_string(),
            expected,
            got,
        })
    }
}
