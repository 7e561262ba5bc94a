use crate::expr::ast::{BinaryOp, Expr, UnaryOp};
use crate::expr::error::ExprError;
use crate::expr::functions;

pub fn eval_expr(expr: &Expr) -> Result<f64, ExprError> {
    match expr {
        Expr::Number(n) => Ok(*n),
        Expr::Var(name) => {
            functions::constant(name).ok_or_else(|| ExprError::UnknownVariable(name.clone()))
        }
        Expr::Binary { op, left, right } => {
            let l = eval_expr(left)?;
            let r = eval_expr(right)?;
            eval_binary(*op, l, r)
        }
        Expr::Unary { op, expr } => {
            let v = eval_expr(expr)?;
            Ok(match op {
                UnaryOp::Neg => -v,
                UnaryOp::Plus => v,
            })
        }
        Expr::Call { name, args } => {
            let values = args.iter().map(eval_expr).collect::<Result<Vec<_>, _>>()?;
            functions::call(name, &values)
        }
    }
}

fn eval_binary(op: BinaryOp, l: f64, r: f64) -> Result<f64, ExprError> {
    match op {
        BinaryOp::Add => Ok(l + r),
        BinaryOp::Sub => Ok(l - r),
        BinaryOp::Mul => Ok(l * r),
        BinaryOp::Div => {
            if r == 0.0 {
                Err(ExprError::DivisionByZero)
            } else {
                Ok(l / r)
            }
        }
        // x % 0 is NaN rather than an error
        BinaryOp::Mod => Ok(l % r),
        BinaryOp::Pow => Ok(l.powf(r)),
    }
}
