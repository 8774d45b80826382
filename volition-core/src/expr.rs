//! A small parsed expression language for goals over named values.
//!
//! Expressions are whitespace-separated tokens: names, numbers, the
//! arithmetic operators `+ - * /`, one comparison operator `< <= > >= ==`
//! for conditions, or a leading `name =` for effects. Parsing happens once
//! at goal construction; evaluation against a [`WorldState`] never fails —
//! a referenced name that is absent makes the condition score zero.

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::memory::WorldState;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExprError {
    #[error("expression is empty")]
    Empty,
    #[error("no comparison operator in `{0}`")]
    MissingComparison(&'static str),
    #[error("`{0}` is not a name, number, or operator")]
    BadOperand(String),
    #[error("expected `name = expression` in `{0}`")]
    NotAssignment(&'static str),
    #[error("operator at end of expression")]
    TrailingOperator,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Operand {
    Name(&'static str),
    Num(f64),
}

impl Operand {
    fn parse(token: &'static str) -> Result<Self, ExprError> {
        if let Ok(n) = token.parse::<f64>() {
            return Ok(Operand::Num(n));
        }
        let mut chars = token.chars();
        let ident = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if ident {
            Ok(Operand::Name(token))
        } else {
            Err(ExprError::BadOperand(token.to_string()))
        }
    }

    fn eval(&self, state: &WorldState) -> Option<f64> {
        match self {
            Operand::Num(n) => Some(*n),
            Operand::Name(name) => state.value_of(name)?.as_num(),
        }
    }

    /// Evaluation in an empty namespace: absent names read as zero.
    fn eval_default(&self) -> f64 {
        match self {
            Operand::Num(n) => *n,
            Operand::Name(_) => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "+" => Some(ArithOp::Add),
            "-" => Some(ArithOp::Sub),
            "*" => Some(ArithOp::Mul),
            "/" => Some(ArithOp::Div),
            _ => None,
        }
    }

    fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            ArithOp::Add => lhs + rhs,
            ArithOp::Sub => lhs - rhs,
            ArithOp::Mul => lhs * rhs,
            ArithOp::Div => lhs / rhs,
        }
    }
}

/// A left-associative chain of operands: `money + 5`, `hp / max_hp`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ArithExpr {
    first: Operand,
    rest: Vec<(ArithOp, Operand)>,
}

impl ArithExpr {
    fn parse_tokens(tokens: &[&'static str]) -> Result<Self, ExprError> {
        let mut iter = tokens.iter();
        let first = Operand::parse(iter.next().ok_or(ExprError::Empty)?)?;
        let mut rest = Vec::new();
        while let Some(token) = iter.next() {
            let op = ArithOp::from_token(token)
                .ok_or_else(|| ExprError::BadOperand((*token).to_string()))?;
            let operand = Operand::parse(iter.next().ok_or(ExprError::TrailingOperator)?)?;
            rest.push((op, operand));
        }
        Ok(Self { first, rest })
    }

    /// `None` when any referenced name is absent or non-numeric.
    pub fn eval(&self, state: &WorldState) -> Option<f64> {
        let mut acc = self.first.eval(state)?;
        for (op, operand) in &self.rest {
            acc = op.apply(acc, operand.eval(state)?);
        }
        Some(acc)
    }

    /// Evaluation in an empty namespace: every name reads as zero.
    pub fn eval_default(&self) -> f64 {
        let mut acc = self.first.eval_default();
        for (op, operand) in &self.rest {
            acc = op.apply(acc, operand.eval_default());
        }
        acc
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum CmpOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
}

impl CmpOp {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "<" => Some(CmpOp::Lt),
            "<=" => Some(CmpOp::Le),
            ">" => Some(CmpOp::Gt),
            ">=" => Some(CmpOp::Ge),
            "==" => Some(CmpOp::Eq),
            _ => None,
        }
    }
}

fn clamp_unit(v: f64) -> f32 {
    if v.is_nan() {
        return 0.0;
    }
    v.clamp(0.0, 1.0) as f32
}

/// A binary comparison over two arithmetic sides: `money >= 100`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Comparison {
    lhs: ArithExpr,
    op: CmpOp,
    rhs: ArithExpr,
}

impl Comparison {
    pub fn parse(src: &'static str) -> Result<Self, ExprError> {
        let tokens: Vec<&'static str> = src.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(ExprError::Empty);
        }
        let pivot = tokens
            .iter()
            .position(|t| CmpOp::from_token(t).is_some())
            .ok_or(ExprError::MissingComparison(src))?;
        let op = CmpOp::from_token(tokens[pivot]).ok_or(ExprError::MissingComparison(src))?;
        Ok(Self {
            lhs: ArithExpr::parse_tokens(&tokens[..pivot])?,
            op,
            rhs: ArithExpr::parse_tokens(&tokens[pivot + 1..])?,
        })
    }

    /// Satisfaction in `[0, 1]`.
    ///
    /// Greater-style comparisons degrade proportionally: an unsatisfied
    /// `a >= b` scores `a / b` (clamped), zero when `a` is zero. Equal sides
    /// score 1.0 under `>` as well as `>=`. A side that references an absent
    /// name scores 0.0.
    pub fn score(&self, state: &WorldState) -> f32 {
        let (Some(a), Some(b)) = (self.lhs.eval(state), self.rhs.eval(state)) else {
            return 0.0;
        };
        match self.op {
            CmpOp::Gt | CmpOp::Ge => {
                if a == b {
                    1.0
                } else if a == 0.0 {
                    0.0
                } else {
                    clamp_unit(a / b)
                }
            }
            CmpOp::Lt => {
                if a < b {
                    1.0
                } else {
                    0.0
                }
            }
            CmpOp::Le => {
                if a <= b {
                    1.0
                } else {
                    0.0
                }
            }
            CmpOp::Eq => {
                if a == b {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// A named-value effect: `money = money + 5`.
///
/// The right-hand side is evaluated in an empty namespace (absent names read
/// as zero), so applying the same assignment twice produces the same datum —
/// effects are idempotent set assertions, not accumulating updates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Assignment {
    name: &'static str,
    expr: ArithExpr,
}

impl Assignment {
    pub fn parse(src: &'static str) -> Result<Self, ExprError> {
        let tokens: Vec<&'static str> = src.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(ExprError::Empty);
        }
        if tokens.len() < 3 || tokens[1] != "=" {
            return Err(ExprError::NotAssignment(src));
        }
        let Operand::Name(name) = Operand::parse(tokens[0])? else {
            return Err(ExprError::NotAssignment(src));
        };
        Ok(Self {
            name,
            expr: ArithExpr::parse_tokens(&tokens[2..])?,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The value this assignment asserts.
    pub fn value(&self) -> f64 {
        self.expr.eval_default()
    }
}
