pub mod circuit;
pub mod counts;
pub mod error;
pub mod gates;
pub mod hamiltonian;
pub mod measurement;
pub mod mitigation;
pub mod noise;
pub mod observables;
pub mod operators;
pub mod state;
pub mod time;
pub mod transpile;

pub use circuit::{trotter_circuit, Circuit, Gate, GateKind};
pub use counts::Counts;
pub use error::{QuantumError, QuantumResult};
pub use hamiltonian::DickeModel;
pub use measurement::{reconstruct, Reconstruction};
pub use mitigation::{MitigationPolicy, ReadoutCalibration};
pub use noise::{KrausChannel, NoiseModel, NoiseParams};
pub use state::StateVector;
pub use time::TimeGrid;
