pub mod error;
pub mod expm;
pub mod matrix;

pub use error::DenseError;
pub use expm::{evolution_operator, expm};
pub use matrix::{cross_product, Matrix, C64};
