//MIT License
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
pub mod Utils;
pub mod errors;
pub mod numerical;
pub mod symbolic;

pub use errors::QuadError;
pub use numerical::points::{Point, generate_points};
pub use numerical::simpson::{estimate_error, integrate, integrate_function};
pub use symbolic::symbolic_engine::{Expr, evaluate};
