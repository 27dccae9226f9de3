pub mod backend;
pub mod classical;
pub mod error;
pub mod output;
pub mod series;
pub mod trotterized;

pub use backend::{Backend, NoisyBackend, StatevectorBackend};
pub use classical::classical_simulator;
pub use error::{SimError, SimResult};
pub use series::Observables;
pub use trotterized::{
    fit_readout_calibration, noiseless_observables, quantum_simulator, resolve_mitigation,
    MitigationMode, QuantumRun,
};
