/// a module turns a String expression into a symbolic expression
///# Example
/// ```
/// use simpson_quad::symbolic::symbolic_engine::Expr;
/// let input = "x^2 + sin(x)";
/// let parsed_expression = Expr::parse_expression(input).unwrap();
/// println!("parsed_expression {}", parsed_expression);
/// let f = parsed_expression.lambdify1d("x");
/// println!("{}, f(1.0) = {}", input, f(1.0));
/// ```
pub mod parse_expr;
/// # Symbolic engine
/// a module
/// 1) holds the symbolic expression tree
/// 2) turns a symbolic expression into a Rust closure of one variable
/// 3) evaluates a string expression at a given x with the variable bound
///    by name (no textual substitution)
///# Example
/// ```
/// use simpson_quad::symbolic::symbolic_engine::evaluate;
/// let y = evaluate("x^2 + 1", 3.0).unwrap();
/// assert_eq!(y, 10.0);
/// ```
pub mod symbolic_engine;
/// the collection of utility functions mainly for bracket parsing and proceeding
pub mod utils;
