//! Circuit executors returning measurement counts.
//!
//! Both backends derive one random stream per circuit (ideal) or per shot
//! (noisy) from the base seed, so counts do not depend on the rayon pool
//! size.

use crate::error::{SimError, SimResult};
use quantum::{
    counts::Counts, noise::NoiseParams, operators::MAX_SPINS, transpile::transpile, Circuit,
    NoiseModel, StateVector,
};
use rayon::prelude::*;
use rng::ShotRng;
use tracing::debug;

pub trait Backend: Sync {
    fn name(&self) -> &str;

    /// Executes every circuit with `shots` repetitions. Results follow the
    /// input order.
    fn run(&self, circuits: &[Circuit], shots: u64) -> SimResult<Vec<Counts>>;
}

/// Noiseless evolution of a circuit from `|0…0⟩`.
pub fn evolve(circuit: &Circuit) -> StateVector {
    let mut psi = StateVector::new_zero(circuit.num_qubits());
    for gate in circuit.gates() {
        psi.apply_gate(gate);
    }
    psi
}

fn admit(backend: &str, max_qubits: usize, circuit: &Circuit, shots: u64) -> SimResult<()> {
    if shots == 0 {
        return Err(SimError::Execution(format!("{}: shots must be at least 1", backend)));
    }
    if circuit.num_qubits() > max_qubits {
        return Err(SimError::Execution(format!(
            "{}: circuit '{}' needs {} qubits, backend has {}",
            backend,
            circuit.name(),
            circuit.num_qubits(),
            max_qubits
        )));
    }
    if !circuit.is_measured() {
        return Err(SimError::Execution(format!(
            "{}: circuit '{}' has no measurement",
            backend,
            circuit.name()
        )));
    }
    Ok(())
}

fn stream_label(circuit: &Circuit, index: usize) -> String {
    format!("{}#{}", circuit.name(), index)
}

/// Exact state-vector simulation; shots are drawn from the final
/// distribution.
#[derive(Clone, Debug)]
pub struct StatevectorBackend {
    seed: String,
    max_qubits: usize,
}

impl StatevectorBackend {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            max_qubits: MAX_SPINS,
        }
    }

    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }
}

impl Backend for StatevectorBackend {
    fn name(&self) -> &str {
        "statevector"
    }

    fn run(&self, circuits: &[Circuit], shots: u64) -> SimResult<Vec<Counts>> {
        debug!(circuits = circuits.len(), shots, "statevector batch");
        circuits
            .par_iter()
            .enumerate()
            .map(|(index, circuit)| {
                admit(self.name(), self.max_qubits, circuit, shots)?;

                let probabilities = evolve(circuit).probabilities();
                let mut rng = ShotRng::derive(self.seed.as_bytes(), &stream_label(circuit, index));
                let mut counts = Counts::new(circuit.num_qubits());
                for _ in 0..shots {
                    counts.add_index(rng.choose(&probabilities, b"MEASURE"), 1.0);
                }
                Ok(counts)
            })
            .collect()
    }
}

/// Trajectory simulation under a [`NoiseModel`].
///
/// Circuits are lowered to `{X, SX, Rz, CX}` first. Each shot evolves its
/// own state, unravelling the registered channels after every gate, then
/// samples one outcome and applies readout flips.
#[derive(Clone, Debug)]
pub struct NoisyBackend {
    noise: NoiseModel,
    seed: String,
    max_qubits: usize,
}

impl NoisyBackend {
    pub fn new(noise: NoiseModel, seed: impl Into<String>) -> Self {
        Self {
            noise,
            seed: seed.into(),
            max_qubits: MAX_SPINS,
        }
    }

    /// Backend with the standard error layout for `num_qubits` qubits.
    pub fn from_params(
        params: &NoiseParams,
        num_qubits: usize,
        seed: impl Into<String>,
    ) -> SimResult<Self> {
        Ok(Self::new(NoiseModel::from_params(params, num_qubits)?, seed))
    }

    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    pub fn noise(&self) -> &NoiseModel {
        &self.noise
    }

    fn shot(&self, circuit: &Circuit, label: &str, shot: u64) -> usize {
        let n = circuit.num_qubits();
        let mut rng = ShotRng::derive(self.seed.as_bytes(), &format!("{}/shot-{}", label, shot));

        let mut psi = StateVector::new_zero(n);
        for gate in circuit.gates() {
            psi.apply_gate(gate);
            self.noise.apply_after(gate, &mut psi, &mut rng);
        }

        let mut outcome = psi.sample(&mut rng);
        for q in 0..n {
            let p = self.noise.readout_error(q);
            if p > 0.0 && rng.next_f64(b"READOUT") < p {
                outcome ^= 1 << (n - 1 - q);
            }
        }
        outcome
    }
}

impl Backend for NoisyBackend {
    fn name(&self) -> &str {
        "noisy"
    }

    fn run(&self, circuits: &[Circuit], shots: u64) -> SimResult<Vec<Counts>> {
        let mut results = Vec::with_capacity(circuits.len());
        for (index, circuit) in circuits.iter().enumerate() {
            admit(self.name(), self.max_qubits, circuit, shots)?;

            let lowered = transpile(circuit);
            let label = stream_label(circuit, index);
            debug!(
                circuit = circuit.name(),
                gates = lowered.gates().len(),
                shots,
                "noisy trajectories"
            );

            let outcomes: Vec<usize> = (0..shots)
                .into_par_iter()
                .map(|shot| self.shot(&lowered, &label, shot))
                .collect();

            let mut counts = Counts::new(circuit.num_qubits());
            for outcome in outcomes {
                counts.add_index(outcome, 1.0);
            }
            results.push(counts);
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_differ_per_position() {
        let c = Circuit::new(1).with_name("z-t0");
        assert_ne!(stream_label(&c, 0), stream_label(&c, 1));
    }

    #[test]
    fn zero_shots_is_rejected() {
        let c = Circuit::new(1).measure_all();
        assert!(admit("test", 4, &c, 0).is_err());
        assert!(admit("test", 4, &c, 1).is_ok());
    }
}
