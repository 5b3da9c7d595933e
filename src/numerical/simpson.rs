//! Simpson's 1/3 rule over a caller-supplied point set.
//!
//! Two paths, chosen by point count with no fallback between them:
//! exactly 3 points uses the simple 3-point formula on the points in the
//! order given; more than 3 uses the composite formula on a sorted copy and
//! requires an even interval count. The truncation error bound for the
//! composite rule is estimated from a user-supplied fourth-derivative
//! expression sampled at the integration nodes.

use crate::errors::QuadError;
use crate::numerical::points::{Point, generate_points};
use crate::symbolic::symbolic_engine::Expr;
use log::{debug, warn};

/// Approximates the definite integral of the function sampled by `points`.
///
/// Fails with `InsufficientPoints` for fewer than 3 points and with
/// `OddIntervalCount` when the composite path gets an odd number of
/// intervals.
pub fn integrate(points: &[Point]) -> Result<f64, QuadError> {
    match points.len() {
        n if n < 3 => Err(QuadError::InsufficientPoints { got: n }),
        3 => Ok(simpson_simple(points)),
        _ => simpson_composite(points),
    }
}

// The 3-point rule trusts the order given by the caller: (a, m, b) are taken
// exactly as supplied, without sorting. The composite path sorts; this one
// deliberately does not, matching the behavior the tool always had.
fn simpson_simple(points: &[Point]) -> f64 {
    let (a, m, b) = (points[0], points[1], points[2]);
    let h = (b.x - a.x) / 2.0;
    h / 3.0 * (a.y + 4.0 * m.y + b.y)
}

fn simpson_composite(points: &[Point]) -> Result<f64, QuadError> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|p, q| p.x.total_cmp(&q.x));

    let n = sorted.len() - 1;
    if n % 2 != 0 {
        return Err(QuadError::OddIntervalCount { intervals: n });
    }

    let h = (sorted[n].x - sorted[0].x) / n as f64;
    // Uniform spacing is assumed, not enforced; the formula below is only
    // exact for equally spaced nodes.
    let tolerance = 1e-9 * h.abs().max(1.0);
    if sorted
        .windows(2)
        .any(|w| ((w[1].x - w[0].x) - h).abs() > tolerance)
    {
        warn!(
            "composite Simpson assumes uniform spacing, node spacing deviates from h = {}",
            h
        );
    }

    let mut sum = sorted[0].y + sorted[n].y;
    for i in (1..n).step_by(2) {
        sum += 4.0 * sorted[i].y;
    }
    for i in (2..n).step_by(2) {
        sum += 2.0 * sorted[i].y;
    }

    debug!("composite Simpson over {} intervals, h = {}", n, h);
    Ok(h / 3.0 * sum)
}

/// Samples `expression` over [start, end] and integrates the resulting
/// point set in one call.
pub fn integrate_function(
    expression: &str,
    start: f64,
    end: f64,
    subdivisions: usize,
) -> Result<f64, QuadError> {
    let points = generate_points(expression, start, end, subdivisions)?;
    integrate(&points)
}

/// Estimates the truncation error bound of the composite rule,
/// `|-(b - a) * h^4 / 180 * max f''''|`.
///
/// `fourth_derivative` is evaluated at every node's x and the maximum of the
/// sampled values (not the maximum absolute value) stands in for the true
/// maximum over the interval, so this is an approximation of the theoretical
/// bound, not an exact one.
pub fn estimate_error(points: &[Point], fourth_derivative: &str) -> Result<f64, QuadError> {
    if points.len() < 2 {
        return Err(QuadError::InsufficientPoints { got: points.len() });
    }

    let expr = Expr::parse_expression(fourth_derivative)?;
    expr.check_univariate("x")?;
    let f4 = expr.lambdify1d("x");

    let mut f4_max = f64::NEG_INFINITY;
    for p in points {
        let value = f4(p.x);
        if !value.is_finite() {
            return Err(QuadError::InvalidExpression(format!(
                "'{}' does not evaluate to a finite number at x = {}",
                fourth_derivative, p.x
            )));
        }
        f4_max = f4_max.max(value);
    }

    let n = points.len() - 1;
    let span = points[n].x - points[0].x;
    let h = span / n as f64;
    Ok((-(span * h.powi(4) / 180.0) * f4_max).abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_simple_rule_exact_for_parabola() {
        // f(x) = x^2 at x = 0, 1, 2: the 3-point rule is exact, 8/3
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 4.0),
        ];
        assert_relative_eq!(integrate(&points).unwrap(), 8.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_composite_exact_for_cubic() {
        // f(x) = x^3 over [0, 4] at unit spacing: exact up to degree 3, 64
        let points: Vec<Point> = (0..=4)
            .map(|i| Point::new(i as f64, (i as f64).powi(3)))
            .collect();
        assert_relative_eq!(integrate(&points).unwrap(), 64.0, epsilon = 1e-12);
    }

    #[test]
    fn test_three_point_path_keeps_caller_order() {
        // Known quirk, kept on purpose: the 3-point path applies the formula
        // to the points exactly as given, while the composite path sorts.
        // Passing (2, 1, 0) must reproduce the formula on that order, here
        // with h = (0 - 2)/2 = -1.
        let reversed = vec![
            Point::new(2.0, 4.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 0.0),
        ];
        assert_relative_eq!(integrate(&reversed).unwrap(), -8.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_composite_sorts_its_input() {
        let mut points: Vec<Point> = (0..=4)
            .map(|i| Point::new(i as f64, (i as f64).powi(3)))
            .collect();
        points.reverse();
        assert_relative_eq!(integrate(&points).unwrap(), 64.0, epsilon = 1e-12);
    }

    #[test]
    fn test_odd_interval_count_rejected() {
        // 4 points means 3 intervals
        let points: Vec<Point> = (0..4).map(|i| Point::new(i as f64, 1.0)).collect();
        assert_eq!(
            integrate(&points),
            Err(QuadError::OddIntervalCount { intervals: 3 })
        );
    }

    #[test]
    fn test_insufficient_points_rejected() {
        let two = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        assert_eq!(integrate(&two), Err(QuadError::InsufficientPoints { got: 2 }));
        assert_eq!(integrate(&[]), Err(QuadError::InsufficientPoints { got: 0 }));
    }

    #[test]
    fn test_round_trip_polynomials_up_to_degree_three() {
        // Simpson is exact for degree <= 3 on any even interval count, so the
        // generate -> integrate round trip must match the closed form.
        // integral of 2x^3 - x + 5 over [-1, 2] is 21
        for n in [2, 4, 6, 10] {
            let result = integrate_function("2*x^3 - x + 5", -1.0, 2.0, n).unwrap();
            assert_relative_eq!(result, 21.0, epsilon = 1e-10);
        }
        // integral of x^2 over [0, 3] is 9
        for n in [2, 8] {
            let result = integrate_function("x^2", 0.0, 3.0, n).unwrap();
            assert_relative_eq!(result, 9.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_integrate_function_converges_for_sine() {
        // integral of sin(x) over [0, pi] is 2; not exact, but close at n = 100
        let result = integrate_function("sin(x)", 0.0, std::f64::consts::PI, 100).unwrap();
        assert_relative_eq!(result, 2.0, epsilon = 1e-7);
    }

    #[test]
    fn test_error_bound_constant_fourth_derivative() {
        // f(x) = x^4 has f'''' = 24; over [0, 2] with 4 intervals h = 0.5,
        // bound = |-(2 * 0.5^4 / 180) * 24| = 1/60
        let points = generate_points("x^4", 0.0, 2.0, 4).unwrap();
        let bound = estimate_error(&points, "24").unwrap();
        assert_relative_eq!(bound, 1.0 / 60.0, epsilon = 1e-12);

        // and the true error is within it
        let approx_integral = integrate(&points).unwrap();
        let true_integral = 32.0 / 5.0;
        assert!((approx_integral - true_integral).abs() <= bound + 1e-12);
    }

    #[test]
    fn test_error_bound_uses_maximum_not_maximum_absolute() {
        // fourth derivative sampled as -2 everywhere: the estimator takes the
        // maximum of the sampled values (-2), then the absolute value of the
        // whole bound expression
        let points: Vec<Point> = (0..=2).map(|i| Point::new(i as f64, 0.0)).collect();
        let bound = estimate_error(&points, "-2").unwrap();
        // |-(2 * 1^4 / 180) * (-2)| = 4/180
        assert_relative_eq!(bound, 4.0 / 180.0, epsilon = 1e-12);
    }

    #[test]
    fn test_error_bound_requires_two_points() {
        let one = vec![Point::new(0.0, 0.0)];
        assert_eq!(
            estimate_error(&one, "24"),
            Err(QuadError::InsufficientPoints { got: 1 })
        );
    }

    #[test]
    fn test_error_bound_propagates_expression_failures() {
        let points: Vec<Point> = (0..=2).map(|i| Point::new(i as f64, 0.0)).collect();
        assert!(matches!(
            estimate_error(&points, "1/x"),
            Err(QuadError::InvalidExpression(_))
        ));
        assert!(matches!(
            estimate_error(&points, "x +"),
            Err(QuadError::InvalidExpression(_))
        ));
    }
}
