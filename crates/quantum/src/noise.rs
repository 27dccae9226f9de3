//! Noise channels and their registration against gates and qubits.
//!
//! Channels are single-qubit Kraus sets. Backends unravel them into
//! quantum trajectories: each application picks one Kraus operator with
//! probability `‖K ψ‖²` and renormalises.

use crate::circuit::{Gate, GateKind};
use crate::error::{invalid, QuantumResult};
use crate::gates::{dagger_2x2, identity, matmul_2x2, pauli_x, pauli_y, pauli_z, scale_2x2, C64};
use crate::state::StateVector;
use rng::ShotRng;

const TP_TOL: f64 = 1e-9;

/// The five physical error rates plus the gate duration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseParams {
    /// Readout bit-flip probability.
    pub p_meas: f64,
    /// Single-qubit depolarizing probability.
    pub p_dep: f64,
    /// Per-qubit depolarizing probability of a two-qubit gate.
    pub p_cnot: f64,
    pub t1: f64,
    pub t2: f64,
    pub gate_time: f64,
}

impl NoiseParams {
    pub fn validate(&self) -> QuantumResult<()> {
        for (name, p) in [
            ("p_meas", self.p_meas),
            ("p_dep", self.p_dep),
            ("p_cnot", self.p_cnot),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(format!("{} must lie in [0, 1], got {}", name, p)));
            }
        }
        if !(self.t1 > 0.0 && self.t2 > 0.0) {
            return Err(invalid(format!(
                "t1 and t2 must be positive, got t1={} t2={}",
                self.t1, self.t2
            )));
        }
        if 2.0 * self.t1 <= self.t2 {
            return Err(invalid(format!(
                "t2 must be below 2·t1, got t1={} t2={}",
                self.t1, self.t2
            )));
        }
        if !(self.gate_time >= 0.0 && self.gate_time.is_finite()) {
            return Err(invalid(format!("gate_time must be non-negative, got {}", self.gate_time)));
        }
        Ok(())
    }

    /// Pure dephasing time `t1·t2/(2·t1 − t2)`.
    pub fn t_phi(&self) -> f64 {
        self.t1 * self.t2 / (2.0 * self.t1 - self.t2)
    }

    /// `(p1, pz)`: amplitude- and phase-damping parameters for one gate.
    pub fn relaxation(&self) -> (f64, f64) {
        let p1 = 1.0 - (-self.gate_time / self.t1).exp();
        let p_phi = 1.0 - (-self.gate_time / self.t_phi()).exp();
        (p1, (1.0 - p1) * p_phi)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct KrausChannel {
    ops: Vec<[[C64; 2]; 2]>,
}

impl KrausChannel {
    pub fn from_ops(ops: Vec<[[C64; 2]; 2]>) -> QuantumResult<Self> {
        let channel = Self { ops };
        if !channel.is_trace_preserving(TP_TOL) {
            return Err(invalid("Kraus operators are not trace preserving"));
        }
        Ok(channel)
    }

    pub fn identity() -> Self {
        Self {
            ops: vec![identity()],
        }
    }

    /// `(1 − λ)ρ + λ·I/2`
    pub fn depolarizing(lambda: f64) -> QuantumResult<Self> {
        if !(0.0..=1.0).contains(&lambda) {
            return Err(invalid(format!("depolarizing probability {} outside [0, 1]", lambda)));
        }
        let ops = vec![
            scale_2x2(identity(), (1.0 - 0.75 * lambda).sqrt()),
            scale_2x2(pauli_x(), (lambda / 4.0).sqrt()),
            scale_2x2(pauli_y(), (lambda / 4.0).sqrt()),
            scale_2x2(pauli_z(), (lambda / 4.0).sqrt()),
        ];
        Ok(Self::pruned(ops))
    }

    /// Combined amplitude and phase damping towards a thermal state with
    /// `excited_population` in `|1⟩`.
    pub fn phase_amplitude_damping(
        amp: f64,
        phase: f64,
        excited_population: f64,
    ) -> QuantumResult<Self> {
        if amp < 0.0 || phase < 0.0 || amp + phase > 1.0 + TP_TOL {
            return Err(invalid(format!(
                "damping parameters amp={} phase={} must be non-negative with sum at most 1",
                amp, phase
            )));
        }
        if !(0.0..=1.0).contains(&excited_population) {
            return Err(invalid(format!(
                "excited population {} outside [0, 1]",
                excited_population
            )));
        }

        let z = C64::new(0.0, 0.0);
        let r = |x: f64| C64::new(x.max(0.0).sqrt(), 0.0);
        let par = r(1.0 - amp - phase);
        let (sa, sb) = (r(amp), r(phase));
        let c0 = (1.0 - excited_population).sqrt();
        let c1 = excited_population.sqrt();

        let ops = vec![
            scale_2x2([[C64::new(1.0, 0.0), z], [z, par]], c0),
            scale_2x2([[z, sa], [z, z]], c0),
            scale_2x2([[z, z], [z, sb]], c0),
            scale_2x2([[par, z], [z, C64::new(1.0, 0.0)]], c1),
            scale_2x2([[z, z], [sa, z]], c1),
            scale_2x2([[sb, z], [z, z]], c1),
        ];
        Ok(Self::pruned(ops))
    }

    /// X with probability `p`, identity otherwise.
    pub fn bit_flip(p: f64) -> QuantumResult<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(invalid(format!("bit-flip probability {} outside [0, 1]", p)));
        }
        Ok(Self::pruned(vec![
            scale_2x2(identity(), (1.0 - p).sqrt()),
            scale_2x2(pauli_x(), p.sqrt()),
        ]))
    }

    /// `self` first, then `next`.
    pub fn compose(&self, next: &KrausChannel) -> KrausChannel {
        let mut ops = Vec::with_capacity(self.ops.len() * next.ops.len());
        for b in &next.ops {
            for a in &self.ops {
                ops.push(matmul_2x2(*b, *a));
            }
        }
        Self::pruned(ops)
    }

    pub fn ops(&self) -> &[[[C64; 2]; 2]] {
        &self.ops
    }

    pub fn is_trace_preserving(&self, tol: f64) -> bool {
        let mut sum = [[C64::new(0.0, 0.0); 2]; 2];
        for k in &self.ops {
            let kk = matmul_2x2(dagger_2x2(*k), *k);
            for i in 0..2 {
                for j in 0..2 {
                    sum[i][j] += kk[i][j];
                }
            }
        }
        let id = identity();
        (0..2).all(|i| (0..2).all(|j| (sum[i][j] - id[i][j]).norm() < tol))
    }

    /// Applies one randomly selected Kraus operator to qubit `k`.
    pub fn unravel(&self, psi: &mut StateVector, k: usize, rng: &mut ShotRng) {
        if self.ops.len() == 1 {
            psi.apply_1q(k, self.ops[0]);
            psi.normalize();
            return;
        }

        let candidates: Vec<StateVector> = self
            .ops
            .iter()
            .map(|op| {
                let mut next = psi.clone();
                next.apply_1q(k, *op);
                next
            })
            .collect();
        let weights: Vec<f64> = candidates.iter().map(StateVector::norm_sqr).collect();

        let chosen = rng.choose(&weights, b"KRAUS");
        let mut next = candidates.into_iter().nth(chosen).unwrap_or_else(|| psi.clone());
        next.normalize();
        *psi = next;
    }

    fn pruned(ops: Vec<[[C64; 2]; 2]>) -> Self {
        let ops: Vec<_> = ops
            .into_iter()
            .filter(|op| op.iter().flatten().any(|v| v.norm() > 0.0))
            .collect();
        if ops.is_empty() {
            return Self::identity();
        }
        Self { ops }
    }
}

/// Error attached to a gate: one channel per gate qubit.
#[derive(Clone, Debug, PartialEq)]
pub enum GateError {
    Local(KrausChannel),
    /// Independent channels on the first and second qubit.
    Pair(KrausChannel, KrausChannel),
}

#[derive(Clone, Debug, PartialEq)]
struct GateRule {
    kinds: Vec<GateKind>,
    qubits: Vec<usize>,
    error: GateError,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NoiseModel {
    rules: Vec<GateRule>,
    readout: Vec<(usize, f64)>,
}

impl NoiseModel {
    pub fn ideal() -> Self {
        Self::default()
    }

    /// Depolarizing composed with relaxation on `X`/`SX` of every qubit,
    /// readout flips on every qubit, and the tensored two-qubit error on
    /// `CX` between index neighbours only.
    pub fn from_params(params: &NoiseParams, num_qubits: usize) -> QuantumResult<Self> {
        params.validate()?;

        let (p1, pz) = params.relaxation();
        let relaxation = KrausChannel::phase_amplitude_damping(p1, pz, 1.0)?;
        let single = KrausChannel::depolarizing(params.p_dep)?.compose(&relaxation);
        let pair = KrausChannel::depolarizing(params.p_cnot)?.compose(&relaxation);

        let mut model = Self::ideal();
        for q in 0..num_qubits {
            model.add_quantum_error(GateError::Local(single.clone()), &[GateKind::X, GateKind::Sx], &[q]);
            model.add_readout_error(params.p_meas, q);
        }
        for j in 0..num_qubits {
            for k in 0..num_qubits {
                if Self::connected(j, k) {
                    model.add_quantum_error(
                        GateError::Pair(pair.clone(), pair.clone()),
                        &[GateKind::Cx],
                        &[j, k],
                    );
                }
            }
        }
        Ok(model)
    }

    /// Nearest index neighbours.
    pub fn connected(j: usize, k: usize) -> bool {
        j.abs_diff(k) == 1
    }

    pub fn add_quantum_error(&mut self, error: GateError, kinds: &[GateKind], qubits: &[usize]) {
        self.rules.push(GateRule {
            kinds: kinds.to_vec(),
            qubits: qubits.to_vec(),
            error,
        });
    }

    pub fn add_readout_error(&mut self, p: f64, qubit: usize) {
        if p > 0.0 {
            self.readout.push((qubit, p));
        }
    }

    pub fn is_ideal(&self) -> bool {
        self.rules.is_empty() && self.readout.is_empty()
    }

    /// Errors registered for exactly this gate on exactly these qubits.
    pub fn errors_for<'a>(&'a self, gate: &Gate) -> impl Iterator<Item = &'a GateError> + 'a {
        let kind = gate.kind();
        let qubits = gate.qubits();
        self.rules
            .iter()
            .filter(move |r| kind.is_some_and(|k| r.kinds.contains(&k)) && r.qubits == qubits)
            .map(|r| &r.error)
    }

    /// Combined flip probability of all readout errors on `qubit`.
    pub fn readout_error(&self, qubit: usize) -> f64 {
        self.readout
            .iter()
            .filter(|(q, _)| *q == qubit)
            .fold(0.0, |acc, (_, p)| acc * (1.0 - p) + (1.0 - acc) * p)
    }

    /// Applies every matching error after `gate` has acted on `psi`.
    pub fn apply_after(&self, gate: &Gate, psi: &mut StateVector, rng: &mut ShotRng) {
        let qubits = gate.qubits();
        for error in self.errors_for(gate) {
            match error {
                GateError::Local(channel) => {
                    for &q in &qubits {
                        channel.unravel(psi, q, rng);
                    }
                }
                GateError::Pair(first, second) => {
                    if let [a, b] = qubits.as_slice() {
                        first.unravel(psi, *a, rng);
                        second.unravel(psi, *b, rng);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damping_with_full_excited_population_relaxes_to_one() {
        let ch = KrausChannel::phase_amplitude_damping(1.0, 0.0, 1.0).unwrap();
        assert!(ch.is_trace_preserving(1e-12));

        let mut psi = StateVector::new_zero(1);
        let mut rng = ShotRng::new(b"damp");
        ch.unravel(&mut psi, 0, &mut rng);
        assert!((psi.probabilities()[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn readout_errors_combine_as_xor() {
        let mut model = NoiseModel::ideal();
        model.add_readout_error(0.1, 0);
        model.add_readout_error(0.2, 0);
        let p = model.readout_error(0);
        assert!((p - (0.1 * 0.8 + 0.9 * 0.2)).abs() < 1e-12);
        assert_eq!(model.readout_error(1), 0.0);
    }
}
