//! a module turns a String expression into a symbolic expression
//!
//! The grammar is split at the rightmost operator of the lowest precedence
//! level found outside brackets, then each side is parsed recursively:
//!
//! ```text
//!                 "x^2 + sin(x)/2"
//!                 |   div by '+'    |
//!                 | "x^2" | "sin(x)/2" |
//!                 |  '^'  |  div by '/' |
//!                 | x | 2 | "sin(x)" | 2 |
//! ```
//!
//! `+`/`-` bind loosest, then `*`/`/`, then `^` (right-associative), then
//! function applications, bracketed groups and atoms.

use crate::errors::QuadError;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::utils::{
    find_leftmost_operator_outside_brackets, find_matching_bracket,
    find_rightmost_operator_outside_brackets,
};
use std::f64::consts::{E, PI};

// Recognized function prefixes and their AST constructors. Aliases map to
// the same variant: tan/tg, cot/ctg, log/ln. sqrt becomes Pow(inner, 0.5).
const FUNCTIONS: [&str; 11] = [
    "exp", "ln", "log", "sin", "cos", "tg", "tan", "ctg", "cot", "sqrt", "abs",
];

pub fn parse_expression_str(input: &str) -> Result<Expr, QuadError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(QuadError::InvalidExpression("empty expression".to_string()));
    }

    // Whole-input numeric literal first, so exponent notation like "1e-6"
    // is never split at its sign.
    if let Ok(value) = input.parse::<f64>() {
        return Ok(Expr::Const(value));
    }

    // Addition and subtraction
    if let Some((pos, op)) = find_rightmost_operator_outside_brackets(input, &['+', '-']) {
        let left = input[..pos].trim();
        let right = input[pos + 1..].trim();
        if right.is_empty() {
            return Err(QuadError::InvalidExpression(format!(
                "dangling '{}' in '{}'",
                op, input
            )));
        }
        let lhs = parse_expression_str(left)?;
        let rhs = parse_expression_str(right)?;
        return Ok(match op {
            '+' => Expr::Add(lhs.boxed(), rhs.boxed()),
            _ => Expr::Sub(lhs.boxed(), rhs.boxed()),
        });
    }

    // Unary sign. The operator scan treats a sign in prefix position as part
    // of the operand, so a leading one here applies to everything that
    // follows: "-x^2" is -(x^2), "x^-2" reaches this through the exponent.
    if let Some(rest) = input.strip_prefix('-') {
        let inner = parse_expression_str(rest)?;
        return Ok(Expr::Mul(Expr::Const(-1.0).boxed(), inner.boxed()));
    }
    if let Some(rest) = input.strip_prefix('+') {
        return parse_expression_str(rest);
    }

    // Multiplication and division
    if let Some((pos, op)) = find_rightmost_operator_outside_brackets(input, &['*', '/']) {
        let left = input[..pos].trim();
        let right = input[pos + 1..].trim();
        if left.is_empty() || right.is_empty() {
            return Err(QuadError::InvalidExpression(format!(
                "dangling '{}' in '{}'",
                op, input
            )));
        }
        let lhs = parse_expression_str(left)?;
        let rhs = parse_expression_str(right)?;
        return Ok(match op {
            '*' => Expr::Mul(lhs.boxed(), rhs.boxed()),
            _ => Expr::Div(lhs.boxed(), rhs.boxed()),
        });
    }

    // Power, right-associative: split at the leftmost '^'
    if let Some(pos) = find_leftmost_operator_outside_brackets(input, '^') {
        let base = input[..pos].trim();
        let exponent = input[pos + 1..].trim();
        if base.is_empty() || exponent.is_empty() {
            return Err(QuadError::InvalidExpression(format!(
                "dangling '^' in '{}'",
                input
            )));
        }
        let base_expr = parse_expression_str(base)?;
        let exponent_expr = parse_expression_str(exponent)?;
        return Ok(Expr::Pow(base_expr.boxed(), exponent_expr.boxed()));
    }

    // Function application: the whole input must be "name( ... )"
    for name in FUNCTIONS {
        if let Some(rest) = input.strip_prefix(name) {
            if rest.starts_with('(')
                && find_matching_bracket(input, name.len()) == Some(input.len() - 1)
            {
                let inner = parse_expression_str(&input[name.len() + 1..input.len() - 1])?;
                return Ok(apply_function(name, inner));
            }
        }
    }

    // Whole input in brackets
    if input.starts_with('(') && find_matching_bracket(input, 0) == Some(input.len() - 1) {
        return parse_expression_str(&input[1..input.len() - 1]);
    }

    // Named constants
    match input {
        "pi" => return Ok(Expr::Const(PI)),
        "e" => return Ok(Expr::Const(E)),
        _ => {}
    }

    // Variables
    let mut chars = input.chars();
    let leading_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    if leading_alpha && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Ok(Expr::Var(input.to_string()));
    }

    Err(QuadError::InvalidExpression(format!(
        "cannot parse '{}'",
        input
    )))
}

fn apply_function(name: &str, inner: Expr) -> Expr {
    match name {
        "exp" => Expr::Exp(inner.boxed()),
        "ln" | "log" => Expr::Ln(inner.boxed()),
        "sin" => Expr::sin(inner.boxed()),
        "cos" => Expr::cos(inner.boxed()),
        "tg" | "tan" => Expr::tg(inner.boxed()),
        "ctg" | "cot" => Expr::ctg(inner.boxed()),
        "sqrt" => inner.sqrt(),
        "abs" => Expr::abs(inner.boxed()),
        _ => unreachable!("unknown function prefix '{}'", name),
    }
}
