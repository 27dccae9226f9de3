use crate::error::{invalid, QuantumResult};
use crate::gates::C64;
use dense::Matrix;

/// `Re⟨ψ|op|ψ⟩`
pub fn expectation_value(psi: &[C64], op: &Matrix) -> QuantumResult<f64> {
    Ok(op.expectation(psi)?.re)
}

/// `|⟨state|evolved⟩|²`
pub fn state_probability(evolved: &[C64], state: &[C64]) -> QuantumResult<f64> {
    if evolved.len() != state.len() {
        return Err(invalid(format!(
            "state lengths differ: {} vs {}",
            evolved.len(),
            state.len()
        )));
    }
    let amplitude: C64 = state
        .iter()
        .zip(evolved)
        .map(|(s, e)| s.conj() * e)
        .sum();
    Ok(amplitude.norm_sqr())
}
