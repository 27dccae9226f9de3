//! Lowering to the `{X, SX, Rz, CX}` basis that noise is attached to.
//!
//! Decompositions hold up to a global phase:
//! `H = Rz(π/2)·SX·Rz(π/2)` and
//! `Rxx(θ) = (H⊗H)·CX·(I⊗Rz(θ))·CX·(H⊗H)`.

use crate::circuit::{Circuit, Gate};
use std::f64::consts::FRAC_PI_2;

pub fn transpile(circuit: &Circuit) -> Circuit {
    let mut out = Circuit::new(circuit.num_qubits()).with_name(circuit.name());
    for gate in circuit.gates() {
        lower(&mut out, *gate);
    }
    if circuit.is_measured() {
        out.measure_all()
    } else {
        out
    }
}

fn lower(out: &mut Circuit, gate: Gate) {
    match gate {
        Gate::H(q) => lower_h(out, q),
        Gate::Rxx(a, b, theta) => {
            lower_h(out, a);
            lower_h(out, b);
            out.push(Gate::Cx(a, b));
            out.push(Gate::Rz(b, theta));
            out.push(Gate::Cx(a, b));
            lower_h(out, a);
            lower_h(out, b);
        }
        Gate::X(_) | Gate::Sx(_) | Gate::Rz(..) | Gate::Cx(..) | Gate::Barrier => {
            out.push(gate);
        }
    }
}

fn lower_h(out: &mut Circuit, q: usize) {
    out.push(Gate::Rz(q, FRAC_PI_2));
    out.push(Gate::Sx(q));
    out.push(Gate::Rz(q, FRAC_PI_2));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{trotter_circuit, GateKind};
    use crate::state::StateVector;

    fn fidelity(a: &StateVector, b: &StateVector) -> f64 {
        a.amplitudes()
            .iter()
            .zip(b.amplitudes())
            .map(|(x, y)| x.conj() * y)
            .sum::<crate::gates::C64>()
            .norm_sqr()
    }

    #[test]
    fn lowered_circuit_uses_basis_gates_only() {
        let c = trotter_circuit(3, 1.0, 2, 1.0, 0.7).unwrap();
        let t = transpile(&c);
        assert_eq!(t.count(GateKind::H), 0);
        assert_eq!(t.count(GateKind::Rxx), 0);
        assert_eq!(t.count(GateKind::Cx), 2 * 3 * 2);
    }

    #[test]
    fn lowering_preserves_state_up_to_phase() {
        let c = trotter_circuit(3, 0.9, 3, 1.3, 0.6).unwrap().x_basis();
        let t = transpile(&c);

        let mut a = StateVector::new_zero(3);
        let mut b = StateVector::new_zero(3);
        for g in c.gates() {
            a.apply_gate(g);
        }
        for g in t.gates() {
            b.apply_gate(g);
        }
        let f = fidelity(&a, &b);
        assert!((f - 1.0).abs() < 1e-12, "fidelity = {}", f);
        assert!(t.is_measured());
    }
}
