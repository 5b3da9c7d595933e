//! # Symbolic Engine Module
//!
//! Core symbolic expression type for the quadrature core. A textual formula
//! in one free variable (conventionally "x") is parsed into an `Expr` tree,
//! which can then be evaluated directly or compiled into a Rust closure.
//!
//! The variable is bound by name during evaluation. The original tool this
//! crate descends from substituted the variable textually into the formula,
//! which corrupts any function name containing the variable letter
//! ("exp" with variable "x" becomes "e3.0p"); binding by name preserves the
//! numeric behavior for well-formed inputs without that failure mode.

#![allow(non_camel_case_types)]

use crate::errors::QuadError;
use crate::symbolic::parse_expr::parse_expression_str;
use std::fmt;

/// Symbolic expression tree. Uses Box<Expr> for recursive structure,
/// allowing arbitrarily deep nesting.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Symbolic variable with a name (e.g., "x")
    Var(String),
    /// Numerical constant value
    Const(f64),
    /// Addition operation: left + right
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction operation: left - right
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication operation: left * right
    Mul(Box<Expr>, Box<Expr>),
    /// Division operation: left / right
    Div(Box<Expr>, Box<Expr>),
    /// Power operation: base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
    /// Exponential function: e^x
    Exp(Box<Expr>),
    /// Natural logarithm: ln(x)
    Ln(Box<Expr>),
    /// Sine function: sin(x)
    sin(Box<Expr>),
    /// Cosine function: cos(x)
    cos(Box<Expr>),
    /// Tangent function: tan(x) - uses mathematical notation 'tg'
    tg(Box<Expr>),
    /// Cotangent function: cot(x) - uses mathematical notation 'ctg'
    ctg(Box<Expr>),
    /// Absolute value: |x|
    abs(Box<Expr>),
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Add(lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            Expr::Sub(lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            Expr::Mul(lhs, rhs) => write!(f, "({} * {})", lhs, rhs),
            Expr::Div(lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Expr::Pow(base, exp) => write!(f, "({} ^ {})", base, exp),
            Expr::Exp(expr) => write!(f, "exp({})", expr),
            Expr::Ln(expr) => write!(f, "ln({})", expr),
            Expr::sin(expr) => write!(f, "sin({})", expr),
            Expr::cos(expr) => write!(f, "cos({})", expr),
            Expr::tg(expr) => write!(f, "tg({})", expr),
            Expr::ctg(expr) => write!(f, "ctg({})", expr),
            Expr::abs(expr) => write!(f, "abs({})", expr),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(self))
    }
}

impl Expr {
    /// Convenience method to wrap expression in Box for recursive structures.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Creates exponential function e^(self).
    pub fn exp(self) -> Expr {
        Expr::Exp(self.boxed())
    }

    /// Creates natural logarithm ln(self).
    pub fn ln(self) -> Expr {
        Expr::Ln(self.boxed())
    }

    /// Creates power expression self^rhs.
    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Pow(self.boxed(), rhs.boxed())
    }

    /// Square root as self^0.5, the form the parser produces for sqrt(...).
    pub fn sqrt(self) -> Expr {
        Expr::Pow(self.boxed(), Expr::Const(0.5).boxed())
    }

    /// check if the expression contains a variable
    pub fn contains_variable(&self, var_name: &str) -> bool {
        match self {
            Expr::Var(name) => name == var_name,
            Expr::Const(_) => false,
            Expr::Add(left, right)
            | Expr::Sub(left, right)
            | Expr::Mul(left, right)
            | Expr::Div(left, right)
            | Expr::Pow(left, right) => {
                left.contains_variable(var_name) || right.contains_variable(var_name)
            }
            Expr::Exp(expr)
            | Expr::Ln(expr)
            | Expr::sin(expr)
            | Expr::cos(expr)
            | Expr::tg(expr)
            | Expr::ctg(expr)
            | Expr::abs(expr) => expr.contains_variable(var_name),
        }
    }

    /// Extracts all unique variable names from the expression, sorted and
    /// deduplicated.
    pub fn extract_variables(&self) -> Vec<String> {
        let mut vars = Vec::new();
        self.collect_variables(&mut vars);
        vars.sort();
        vars.dedup();
        vars
    }

    fn collect_variables(&self, vars: &mut Vec<String>) {
        match self {
            Expr::Var(name) => vars.push(name.clone()),
            Expr::Const(_) => {}
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => {
                lhs.collect_variables(vars);
                rhs.collect_variables(vars);
            }
            Expr::Exp(expr)
            | Expr::Ln(expr)
            | Expr::sin(expr)
            | Expr::cos(expr)
            | Expr::tg(expr)
            | Expr::ctg(expr)
            | Expr::abs(expr) => expr.collect_variables(vars),
        }
    }

    /// Verifies that `var` is the only free variable of the expression.
    ///
    /// A constant expression (no variables at all) is accepted; the error
    /// estimator takes "24" as a perfectly good fourth derivative of x^4.
    pub fn check_univariate(&self, var: &str) -> Result<(), QuadError> {
        let vars = self.extract_variables();
        if let Some(unknown) = vars.iter().find(|name| name.as_str() != var) {
            return Err(QuadError::InvalidExpression(format!(
                "unknown variable '{}' in '{}', expected only '{}'",
                unknown, self, var
            )));
        }
        Ok(())
    }

    /// DIRECT EXPRESSION EVALUATION

    /// Evaluates the expression at `x` with the single variable `var` bound
    /// by name. Recursively evaluates the expression tree; an unbound
    /// variable yields NaN, which the public API rejects as non-finite.
    pub fn eval1d(&self, var: &str, x: f64) -> f64 {
        match self {
            Expr::Var(name) => {
                if name == var {
                    x
                } else {
                    f64::NAN
                }
            }
            Expr::Const(val) => *val,
            Expr::Add(lhs, rhs) => lhs.eval1d(var, x) + rhs.eval1d(var, x),
            Expr::Sub(lhs, rhs) => lhs.eval1d(var, x) - rhs.eval1d(var, x),
            Expr::Mul(lhs, rhs) => lhs.eval1d(var, x) * rhs.eval1d(var, x),
            Expr::Div(lhs, rhs) => lhs.eval1d(var, x) / rhs.eval1d(var, x),
            Expr::Pow(base, exp) => base.eval1d(var, x).powf(exp.eval1d(var, x)),
            Expr::Exp(expr) => expr.eval1d(var, x).exp(),
            Expr::Ln(expr) => expr.eval1d(var, x).ln(),
            Expr::sin(expr) => expr.eval1d(var, x).sin(),
            Expr::cos(expr) => expr.eval1d(var, x).cos(),
            Expr::tg(expr) => expr.eval1d(var, x).tan(),
            Expr::ctg(expr) => 1.0 / expr.eval1d(var, x).tan(),
            Expr::abs(expr) => expr.eval1d(var, x).abs(),
        }
    }

    /// LAMBDIFICATION

    /// Converts the expression into an executable Rust closure of one
    /// variable. The closure mirrors the expression tree, so repeated
    /// evaluation (as in point generation) pays no re-parsing cost.
    pub fn lambdify1d(&self, var: &str) -> Box<dyn Fn(f64) -> f64> {
        match self {
            Expr::Var(name) => {
                if name == var {
                    Box::new(|x| x)
                } else {
                    Box::new(|_| f64::NAN)
                }
            }
            Expr::Const(val) => {
                let val = *val;
                Box::new(move |_| val)
            }
            Expr::Add(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1d(var);
                let rhs_fn = rhs.lambdify1d(var);
                Box::new(move |x| lhs_fn(x) + rhs_fn(x))
            }
            Expr::Sub(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1d(var);
                let rhs_fn = rhs.lambdify1d(var);
                Box::new(move |x| lhs_fn(x) - rhs_fn(x))
            }
            Expr::Mul(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1d(var);
                let rhs_fn = rhs.lambdify1d(var);
                Box::new(move |x| lhs_fn(x) * rhs_fn(x))
            }
            Expr::Div(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1d(var);
                let rhs_fn = rhs.lambdify1d(var);
                Box::new(move |x| lhs_fn(x) / rhs_fn(x))
            }
            Expr::Pow(base, exp) => {
                let base_fn = base.lambdify1d(var);
                let exp_fn = exp.lambdify1d(var);
                Box::new(move |x| base_fn(x).powf(exp_fn(x)))
            }
            Expr::Exp(expr) => {
                let expr_fn = expr.lambdify1d(var);
                Box::new(move |x| expr_fn(x).exp())
            }
            Expr::Ln(expr) => {
                let expr_fn = expr.lambdify1d(var);
                Box::new(move |x| expr_fn(x).ln())
            }
            Expr::sin(expr) => {
                let expr_fn = expr.lambdify1d(var);
                Box::new(move |x| expr_fn(x).sin())
            }
            Expr::cos(expr) => {
                let expr_fn = expr.lambdify1d(var);
                Box::new(move |x| expr_fn(x).cos())
            }
            Expr::tg(expr) => {
                let expr_fn = expr.lambdify1d(var);
                Box::new(move |x| expr_fn(x).tan())
            }
            Expr::ctg(expr) => {
                let expr_fn = expr.lambdify1d(var);
                Box::new(move |x| 1.0 / expr_fn(x).tan())
            }
            Expr::abs(expr) => {
                let expr_fn = expr.lambdify1d(var);
                Box::new(move |x| expr_fn(x).abs())
            }
        }
    }

    /// EXPRESSION PARSING FROM STRINGS

    /// Parses a mathematical expression from string representation.
    ///
    /// # Supported Syntax
    /// - Variables: x, var_name
    /// - Constants: 3.14, -2.5, 1e-6, pi, e
    /// - Operators: +, -, *, /, ^
    /// - Functions: sin, cos, tg/tan, ctg/cot, exp, ln/log, sqrt, abs
    /// - Parentheses for grouping
    pub fn parse_expression(input: &str) -> Result<Expr, QuadError> {
        parse_expression_str(input)
    }
}

/// Evaluates a textual single-variable expression at `x`.
///
/// The variable "x" is bound by name in the parsed tree. Fails with
/// `QuadError::InvalidExpression` when the text does not parse, references
/// any other variable, or evaluates to a non-finite value (e.g. "1/x" at 0).
pub fn evaluate(expression: &str, x: f64) -> Result<f64, QuadError> {
    let expr = Expr::parse_expression(expression)?;
    expr.check_univariate("x")?;
    let result = expr.eval1d("x", x);
    if !result.is_finite() {
        return Err(QuadError::InvalidExpression(format!(
            "'{}' does not evaluate to a finite number at x = {}",
            expression, x
        )));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{E, PI};

    #[test]
    fn test_evaluate_polynomial() {
        assert_eq!(evaluate("x^2 + 1", 3.0).unwrap(), 10.0);
    }

    #[test]
    fn test_evaluate_division_by_zero_fails() {
        let result = evaluate("1/x", 0.0);
        assert!(matches!(result, Err(QuadError::InvalidExpression(_))));
    }

    #[test]
    fn test_evaluate_nan_fails() {
        // ln of a negative number is NaN
        let result = evaluate("ln(x)", -1.0);
        assert!(matches!(result, Err(QuadError::InvalidExpression(_))));
    }

    #[test]
    fn test_evaluate_unknown_variable_fails() {
        let result = evaluate("y + 1", 1.0);
        assert!(matches!(result, Err(QuadError::InvalidExpression(_))));
    }

    #[test]
    fn test_evaluate_multibyte_input_fails_cleanly() {
        // "π" is multibyte; slicing around the minus must not panic
        let result = evaluate("π-1", 0.0);
        assert!(matches!(result, Err(QuadError::InvalidExpression(_))));
    }

    #[test]
    fn test_evaluate_negative_exponent() {
        assert_relative_eq!(evaluate("x^-2", 2.0).unwrap(), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_evaluate_named_constants() {
        assert_relative_eq!(evaluate("2*pi", 0.0).unwrap(), 2.0 * PI, epsilon = 1e-12);
        assert_relative_eq!(evaluate("e^x", 1.0).unwrap(), E, epsilon = 1e-12);
    }

    #[test]
    fn test_evaluate_sqrt_and_trig() {
        assert_relative_eq!(evaluate("sqrt(x)", 9.0).unwrap(), 3.0, epsilon = 1e-12);
        assert_relative_eq!(
            evaluate("sin(x)", PI / 2.0).unwrap(),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_variable_name_collides_with_function_names() {
        // "exp(x)" contains the letter x inside the function name; binding by
        // name leaves the function intact where textual substitution would not
        assert_relative_eq!(evaluate("exp(x)", 0.0).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_eval1d_matches_lambdify1d() {
        let expr = Expr::parse_expression("x^3 - 2*x + cos(x)").unwrap();
        let f = expr.lambdify1d("x");
        for &x in &[-2.0, -0.5, 0.0, 1.3, 4.0] {
            assert_relative_eq!(expr.eval1d("x", x), f(x), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_extract_variables() {
        let expr = Expr::parse_expression("x^2 + x").unwrap();
        assert_eq!(expr.extract_variables(), vec!["x".to_string()]);
        let constant = Expr::parse_expression("24").unwrap();
        assert!(constant.extract_variables().is_empty());
    }

    #[test]
    fn test_operator_overloads_and_builders() {
        let x = Expr::Var("x".to_string());
        let expr = x.clone() * x.clone() + Expr::Const(1.0);
        assert_eq!(expr.eval1d("x", 3.0), 10.0);
        assert_eq!((-Expr::Const(2.0)).eval1d("x", 0.0), -2.0);

        let built = x.clone().pow(Expr::Const(2.0)) - x.clone().exp().ln();
        assert_relative_eq!(built.eval1d("x", 2.0), 2.0, epsilon = 1e-12);
        assert_relative_eq!(x.clone().sqrt().eval1d("x", 16.0), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_contains_variable() {
        let expr = Expr::parse_expression("sin(x) + 2").unwrap();
        assert!(expr.contains_variable("x"));
        assert!(!expr.contains_variable("y"));
    }
}
