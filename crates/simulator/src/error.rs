use dense::DenseError;
use quantum::QuantumError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Quantum(#[from] QuantumError),

    #[error("backend execution failed: {0}")]
    Execution(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DenseError> for SimError {
    fn from(err: DenseError) -> Self {
        SimError::Quantum(err.into())
    }
}

pub type SimResult<T> = Result<T, SimError>;

pub(crate) fn invalid(msg: impl Into<String>) -> SimError {
    SimError::Quantum(QuantumError::InvalidArgument(msg.into()))
}
