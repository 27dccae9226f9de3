//! Gate-level circuit description and Trotterized Dicke evolution.
//!
//! A circuit for time `t` is built fresh by [`trotter_circuit`]; nothing is
//! parameterised and re-bound afterwards.

use crate::error::{invalid, QuantumResult};
use crate::operators::pairs;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gate {
    X(usize),
    Sx(usize),
    H(usize),
    /// exp(-iθZ/2)
    Rz(usize, f64),
    /// exp(-iθ X⊗X/2)
    Rxx(usize, usize, f64),
    /// control, target
    Cx(usize, usize),
    Barrier,
}

/// Gate family, used to register noise against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GateKind {
    X,
    Sx,
    H,
    Rz,
    Rxx,
    Cx,
}

impl Gate {
    pub fn kind(&self) -> Option<GateKind> {
        match self {
            Gate::X(_) => Some(GateKind::X),
            Gate::Sx(_) => Some(GateKind::Sx),
            Gate::H(_) => Some(GateKind::H),
            Gate::Rz(..) => Some(GateKind::Rz),
            Gate::Rxx(..) => Some(GateKind::Rxx),
            Gate::Cx(..) => Some(GateKind::Cx),
            Gate::Barrier => None,
        }
    }

    pub fn qubits(&self) -> Vec<usize> {
        match *self {
            Gate::X(q) | Gate::Sx(q) | Gate::H(q) | Gate::Rz(q, _) => vec![q],
            Gate::Rxx(a, b, _) | Gate::Cx(a, b) => vec![a, b],
            Gate::Barrier => Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Circuit {
    name: String,
    num_qubits: usize,
    gates: Vec<Gate>,
    measured: bool,
}

impl Circuit {
    pub fn new(num_qubits: usize) -> Self {
        Self {
            name: String::from("circuit"),
            num_qubits,
            gates: Vec::new(),
            measured: false,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn is_measured(&self) -> bool {
        self.measured
    }

    pub fn push(&mut self, gate: Gate) -> &mut Self {
        for q in gate.qubits() {
            assert!(q < self.num_qubits, "gate {:?} addresses qubit {} of {}", gate, q, self.num_qubits);
        }
        self.gates.push(gate);
        self
    }

    pub fn x(&mut self, q: usize) -> &mut Self {
        self.push(Gate::X(q))
    }

    pub fn h(&mut self, q: usize) -> &mut Self {
        self.push(Gate::H(q))
    }

    pub fn rz(&mut self, q: usize, theta: f64) -> &mut Self {
        self.push(Gate::Rz(q, theta))
    }

    pub fn rxx(&mut self, a: usize, b: usize, theta: f64) -> &mut Self {
        self.push(Gate::Rxx(a, b, theta))
    }

    pub fn barrier(&mut self) -> &mut Self {
        self.push(Gate::Barrier)
    }

    pub fn compose(&mut self, other: &Circuit) -> &mut Self {
        assert_eq!(self.num_qubits, other.num_qubits, "composing circuits of different width");
        for g in &other.gates {
            self.push(*g);
        }
        self
    }

    /// Computational-basis readout of every qubit.
    #[must_use]
    pub fn measure_all(mut self) -> Self {
        self.measured = true;
        self
    }

    /// Copy that rotates every qubit into the X basis before readout.
    pub fn x_basis(&self) -> Circuit {
        let mut c = self.clone();
        for q in 0..self.num_qubits {
            c.h(q);
        }
        c.measure_all()
    }

    pub fn count(&self, kind: GateKind) -> usize {
        self.gates.iter().filter(|g| g.kind() == Some(kind)).count()
    }
}

/// One first-order step: `Rz(ω·dt)` on every qubit, then `Rxx(−g·dt)` on
/// every pair.
pub fn trotter_layer(spins: usize, dt: f64, frequency: f64, coupling: f64) -> Circuit {
    let mut circuit = Circuit::new(spins);
    for q in 0..spins {
        circuit.rz(q, frequency * dt);
    }
    for (first, second) in pairs(spins) {
        circuit.rxx(first, second, -coupling * dt);
    }
    circuit
}

/// All-down preparation followed by `steps` Trotter layers covering `time`.
pub fn trotter_circuit(
    spins: usize,
    time: f64,
    steps: usize,
    frequency: f64,
    coupling: f64,
) -> QuantumResult<Circuit> {
    if spins < 1 {
        return Err(invalid(format!("spins must be at least 1, got {}", spins)));
    }
    if steps == 0 {
        return Err(invalid("trotter steps must be at least 1"));
    }
    if !time.is_finite() {
        return Err(invalid(format!("evolution time must be finite, got {}", time)));
    }

    let dt = time / steps as f64;
    let layer = trotter_layer(spins, dt, frequency, coupling);

    let mut circuit = Circuit::new(spins).with_name("trotter");
    for q in 0..spins {
        circuit.x(q);
    }
    for step in 0..steps {
        if step > 0 {
            circuit.barrier();
        }
        circuit.compose(&layer);
    }

    debug!(spins, steps, time, gates = circuit.gates().len(), "built Trotter circuit");
    Ok(circuit)
}

/// Prepares the computational basis state `index` and measures it.
pub fn basis_state_circuit(num_qubits: usize, index: usize) -> Circuit {
    let mut circuit = Circuit::new(num_qubits).with_name(format!("cal-{}", index));
    for q in 0..num_qubits {
        if index & (1 << (num_qubits - 1 - q)) != 0 {
            circuit.x(q);
        }
    }
    circuit.measure_all()
}
