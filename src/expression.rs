//! Share Expression Evaluator
//!
//! Share values arrive as short textual expressions such as `sum(2,3)` or
//! `hcf(48, 18)`. Parsing produces an [`Expression`] variant carrying its
//! operands; evaluation is a separate step on the parsed value.
//!
//! Grammar (whitespace is ignored everywhere):
//!
//! ```text
//! expr    := literal | name "(" literal "," literal ")"
//! name    := "sum" | "multiply" | "divide" | "lcm" | "hcf" | "gcd" | "power"
//! literal := [0-9]+
//! ```

use crate::crypto::arith::{gcd, lcm};
use crate::errors::{SolverError, SolverResult};
use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};
use std::fmt;
use std::str::FromStr;

/// A parsed share value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// `sum(a,b)` → a + b
    Sum(BigInt, BigInt),
    /// `multiply(a,b)` → a × b
    Multiply(BigInt, BigInt),
    /// `divide(a,b)` → a ÷ b, truncating toward zero
    Divide(BigInt, BigInt),
    /// `lcm(a,b)`
    Lcm(BigInt, BigInt),
    /// `hcf(a,b)` or `gcd(a,b)`
    Gcd(BigInt, BigInt),
    /// `power(a,b)` → a^b
    Power(BigInt, BigInt),
    /// a bare non-negative integer
    Literal(BigInt),
}

impl Expression {
    /// Parse raw share text into an expression.
    ///
    /// # Errors
    /// [`SolverError::UnrecognizedExpression`] with the raw text when it
    /// matches none of the supported shapes.
    pub fn parse(raw: &str) -> SolverResult<Self> {
        let unrecognized = || SolverError::UnrecognizedExpression(raw.to_string());

        let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

        if let Some(value) = parse_literal(&compact) {
            return Ok(Expression::Literal(value));
        }

        let (name, rest) = compact.split_once('(').ok_or_else(unrecognized)?;
        let args = rest.strip_suffix(')').ok_or_else(unrecognized)?;
        let (a, b) = args.split_once(',').ok_or_else(unrecognized)?;
        let a = parse_literal(a).ok_or_else(unrecognized)?;
        let b = parse_literal(b).ok_or_else(unrecognized)?;

        let expression = match name {
            "sum" => Expression::Sum(a, b),
            "multiply" => Expression::Multiply(a, b),
            "divide" => Expression::Divide(a, b),
            "lcm" => Expression::Lcm(a, b),
            "hcf" | "gcd" => Expression::Gcd(a, b),
            "power" => Expression::Power(a, b),
            _ => return Err(unrecognized()),
        };

        Ok(expression)
    }

    /// Compute the integer value of the expression.
    ///
    /// # Errors
    /// - [`SolverError::DivisionByZero`] for `divide(a,0)` and `lcm(0,0)`
    /// - [`SolverError::ExponentTooLarge`] when a `power` exponent exceeds `u32`
    pub fn evaluate(&self) -> SolverResult<BigInt> {
        match self {
            Expression::Sum(a, b) => Ok(a + b),
            Expression::Multiply(a, b) => Ok(a * b),
            Expression::Divide(a, b) => {
                if b.is_zero() {
                    return Err(SolverError::DivisionByZero);
                }
                // BigInt division truncates toward zero
                Ok(a / b)
            }
            Expression::Lcm(a, b) => lcm(a, b),
            Expression::Gcd(a, b) => Ok(gcd(a, b)),
            Expression::Power(base, exp) => {
                let exp = exp
                    .to_u32()
                    .ok_or_else(|| SolverError::ExponentTooLarge(exp.to_string()))?;
                Ok(base.pow(exp))
            }
            Expression::Literal(value) => Ok(value.clone()),
        }
    }
}

impl FromStr for Expression {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Expression::parse(s)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Sum(a, b) => write!(f, "sum({}, {})", a, b),
            Expression::Multiply(a, b) => write!(f, "multiply({}, {})", a, b),
            Expression::Divide(a, b) => write!(f, "divide({}, {})", a, b),
            Expression::Lcm(a, b) => write!(f, "lcm({}, {})", a, b),
            Expression::Gcd(a, b) => write!(f, "gcd({}, {})", a, b),
            Expression::Power(a, b) => write!(f, "power({}, {})", a, b),
            Expression::Literal(value) => write!(f, "{}", value),
        }
    }
}

/// Parse and evaluate in one step.
pub fn evaluate_expression(raw: &str) -> SolverResult<BigInt> {
    Expression::parse(raw)?.evaluate()
}

/// Non-empty run of ASCII digits. Signs are rejected.
fn parse_literal(s: &str) -> Option<BigInt> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigInt::parse_bytes(s.as_bytes(), 10)
}
