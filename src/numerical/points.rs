//! sampling of a parsed expression into (x, f(x)) pairs on a uniform grid,
//! the input the quadrature routines work on

use crate::errors::QuadError;
use crate::symbolic::symbolic_engine::Expr;
use log::debug;

/// A sample (x, f(x)). Immutable once created and owned by the caller's
/// point collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Samples `expression` at `subdivisions + 1` evenly spaced nodes over
/// [start, end].
///
/// The step is `h = (end - start) / subdivisions`, the nodes
/// `x_i = start + i*h` for i in `0..=subdivisions`. Generation aborts on the
/// first node where the expression is not finite; partial results are
/// discarded, not returned.
pub fn generate_points(
    expression: &str,
    start: f64,
    end: f64,
    subdivisions: usize,
) -> Result<Vec<Point>, QuadError> {
    if subdivisions < 1 {
        return Err(QuadError::InvalidParameter(
            "subdivisions must be at least 1".to_string(),
        ));
    }
    if !start.is_finite() || !end.is_finite() {
        return Err(QuadError::InvalidParameter(format!(
            "interval bounds must be finite, got [{}, {}]",
            start, end
        )));
    }

    let expr = Expr::parse_expression(expression)?;
    expr.check_univariate("x")?;
    let f = expr.lambdify1d("x");

    let h = (end - start) / subdivisions as f64;
    let mut points = Vec::with_capacity(subdivisions + 1);
    for i in 0..=subdivisions {
        let x = start + i as f64 * h;
        let y = f(x);
        if !y.is_finite() {
            return Err(QuadError::InvalidExpression(format!(
                "'{}' does not evaluate to a finite number at x = {}",
                expression, x
            )));
        }
        points.push(Point::new(x, y));
    }

    debug!(
        "generated {} points of '{}' on [{}, {}], h = {}",
        points.len(),
        expression,
        start,
        end,
        h
    );
    Ok(points)
}
