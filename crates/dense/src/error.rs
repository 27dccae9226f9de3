use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DenseError {
    #[error("dimension mismatch: left is {left}, right is {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("Kronecker product of an empty operator list")]
    EmptyProduct,
}
