use dense::DenseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuantumError {
    /// Out-of-domain input: spin count, shots, steps, time grid, noise rates.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The parity filter discarded every outcome.
    #[error("parity filter retained no counts (total weight {total})")]
    NoRetainedCounts { total: f64 },

    #[error("readout calibration matrix is singular")]
    SingularCalibration,

    #[error(transparent)]
    Dense(#[from] DenseError),
}

pub type QuantumResult<T> = Result<T, QuantumError>;

pub(crate) fn invalid(msg: impl Into<String>) -> QuantumError {
    QuantumError::InvalidArgument(msg.into())
}
