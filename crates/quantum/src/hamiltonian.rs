use crate::error::{invalid, QuantumResult};
use crate::operators::{check_spins, operator_sxx, operator_sz};
use crate::state::StateVector;
use dense::Matrix;

/// Spin ensemble with a collective X-X coupling:
/// `H = ω·S_z − 2g·S_xx`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DickeModel {
    pub spins: usize,
    /// ω, the two-level energy gap.
    pub frequency: f64,
    /// g
    pub coupling: f64,
}

impl DickeModel {
    pub fn new(spins: usize, frequency: f64, coupling: f64) -> QuantumResult<Self> {
        let model = Self {
            spins,
            frequency,
            coupling,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> QuantumResult<()> {
        check_spins(self.spins)?;
        if !self.frequency.is_finite() || self.frequency == 0.0 {
            return Err(invalid(format!(
                "frequency must be finite and non-zero, got {}",
                self.frequency
            )));
        }
        if !self.coupling.is_finite() {
            return Err(invalid(format!("coupling must be finite, got {}", self.coupling)));
        }
        Ok(())
    }

    pub fn dim(&self) -> usize {
        1 << self.spins
    }

    /// `H0 = ω·S_z`
    pub fn internal_hamiltonian(&self) -> QuantumResult<Matrix> {
        Ok(operator_sz(self.spins)?.scale_re(self.frequency))
    }

    /// `H1 = −2g·S_xx`
    pub fn coupling_hamiltonian(&self) -> QuantumResult<Matrix> {
        Ok(operator_sxx(self.spins)?.scale_re(-2.0 * self.coupling))
    }

    pub fn hamiltonian(&self) -> QuantumResult<Matrix> {
        Ok(self
            .internal_hamiltonian()?
            .add(&self.coupling_hamiltonian()?)?)
    }

    /// Basis index of the all-down state `|1…1⟩`.
    pub fn initial_index(&self) -> usize {
        self.dim() - 1
    }

    /// Basis index of the all-up reference state `|0…0⟩`.
    pub fn reference_index(&self) -> usize {
        0
    }

    pub fn initial_state(&self) -> StateVector {
        StateVector::basis(self.spins, self.initial_index())
    }

    pub fn reference_state(&self) -> StateVector {
        StateVector::basis(self.spins, self.reference_index())
    }
}
