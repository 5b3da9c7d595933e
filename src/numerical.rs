/// point type and evenly spaced sampling of f(x) over an interval
pub mod points;
/// Simpson's 1/3 rule (simple and composite) and the truncation error bound
pub mod simpson;
