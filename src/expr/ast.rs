// AST for arithmetic expressions

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    /// Identifier left over after substitution: a constant such as `pi`,
    /// or a variable nobody supplied a value for.
    Var(String),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    Call {
        name: String,
        args: Vec<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnaryOp {
    Neg,
    Plus,
}
