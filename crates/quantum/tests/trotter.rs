use quantum::{
    circuit::{basis_state_circuit, trotter_circuit},
    GateKind, StateVector,
};

fn run(spins: usize, time: f64, steps: usize, frequency: f64, coupling: f64) -> StateVector {
    let circuit = trotter_circuit(spins, time, steps, frequency, coupling).unwrap();
    let mut psi = StateVector::new_zero(spins);
    for gate in circuit.gates() {
        psi.apply_gate(gate);
    }
    psi
}

#[test]
fn circuit_has_one_layer_per_step() {
    let c = trotter_circuit(4, 2.0, 3, 1.0, 0.5).unwrap();
    assert_eq!(c.count(GateKind::X), 4);
    assert_eq!(c.count(GateKind::Rz), 3 * 4);
    assert_eq!(c.count(GateKind::Rxx), 3 * 6);
    assert_eq!(c.gates().iter().filter(|g| g.kind().is_none()).count(), 2);
    assert!(!c.is_measured());
}

#[test]
fn invalid_arguments_are_rejected() {
    assert!(trotter_circuit(0, 1.0, 1, 1.0, 1.0).is_err());
    assert!(trotter_circuit(2, 1.0, 0, 1.0, 1.0).is_err());
    assert!(trotter_circuit(2, f64::NAN, 1, 1.0, 1.0).is_err());
}

#[test]
fn zero_time_leaves_all_down() {
    let psi = run(3, 0.0, 4, 1.0, 1.0);
    assert!((psi.probabilities()[7] - 1.0).abs() < 1e-12);
}

#[test]
fn x_basis_adds_hadamards_and_measures() {
    let c = trotter_circuit(3, 1.0, 1, 1.0, 1.0).unwrap();
    let x = c.x_basis();
    assert_eq!(x.count(GateKind::H), 3);
    assert!(x.is_measured());
    assert_eq!(c.count(GateKind::H), 0);
}

#[test]
fn fine_steps_approach_two_spin_closed_form() {
    // two spins stay in span{|00⟩, |11⟩}: P = 0.2·sin²(√1.25·t)
    for &t in &[0.5, 1.0, 2.0] {
        let exact = 0.2 * (1.25f64.sqrt() * t).sin().powi(2);
        let p = run(2, t, 400, 1.0, 1.0).probabilities()[0];
        assert!((p - exact).abs() < 5e-3, "t={}: trotter {} vs exact {}", t, p, exact);
    }
}

#[test]
fn parity_sector_is_conserved() {
    let probs = run(3, 1.7, 5, 1.2, 0.8).probabilities();
    // odd-weight flips away from |111⟩ never appear
    for (index, p) in probs.iter().enumerate() {
        if index.count_ones() % 2 == 0 {
            assert!(*p < 1e-12, "index {:03b} has weight {}", index, p);
        }
    }
}

#[test]
fn calibration_circuits_prepare_their_index() {
    for index in 0..8 {
        let c = basis_state_circuit(3, index);
        assert_eq!(c.name(), format!("cal-{}", index));
        let mut psi = StateVector::new_zero(3);
        for gate in c.gates() {
            psi.apply_gate(gate);
        }
        assert!((psi.probabilities()[index] - 1.0).abs() < 1e-12);
    }
}
