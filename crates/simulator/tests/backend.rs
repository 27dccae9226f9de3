use quantum::{
    circuit::{basis_state_circuit, trotter_circuit},
    noise::NoiseParams,
    Circuit,
};
use simulator::{fit_readout_calibration, Backend, NoisyBackend, SimError, StatevectorBackend};

fn noisy_params() -> NoiseParams {
    NoiseParams {
        p_meas: 0.02,
        p_dep: 0.01,
        p_cnot: 0.03,
        t1: 50e-6,
        t2: 40e-6,
        gate_time: 100e-9,
    }
}

#[test]
fn certain_readout_flip_inverts_every_bit() {
    let params = NoiseParams {
        p_meas: 1.0,
        p_dep: 0.0,
        p_cnot: 0.0,
        t1: 1.0,
        t2: 1.0,
        gate_time: 0.0,
    };
    let backend = NoisyBackend::from_params(&params, 2, "flip").unwrap();
    let counts = backend.run(&[basis_state_circuit(2, 3)], 50).unwrap();
    assert_eq!(counts[0].get("00"), 50.0);
    assert_eq!(counts[0].total(), 50.0);
}

#[test]
fn ideal_basis_states_are_deterministic() {
    let backend = StatevectorBackend::new("basis");
    let circuits: Vec<Circuit> = (0..4).map(|i| basis_state_circuit(2, i)).collect();
    let counts = backend.run(&circuits, 20).unwrap();
    for (i, c) in counts.iter().enumerate() {
        assert_eq!(c.get_index(i), 20.0);
        assert_eq!(c.len(), 1);
    }
}

#[test]
fn noisy_counts_are_seed_reproducible() {
    let circuit = trotter_circuit(3, 0.8, 2, 1.0, 0.9).unwrap().measure_all();
    let a = NoisyBackend::from_params(&noisy_params(), 3, "seed-a").unwrap();
    let b = NoisyBackend::from_params(&noisy_params(), 3, "seed-a").unwrap();

    let first = a.run(std::slice::from_ref(&circuit), 200).unwrap();
    let second = b.run(std::slice::from_ref(&circuit), 200).unwrap();
    assert_eq!(first, second);
    assert_eq!(first[0].total(), 200.0);
}

#[test]
fn noisy_counts_do_not_depend_on_thread_count() {
    let circuit = trotter_circuit(2, 1.0, 3, 1.0, 1.0).unwrap().measure_all();
    let backend = NoisyBackend::from_params(&noisy_params(), 2, "threads").unwrap();

    let single = rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .unwrap()
        .install(|| backend.run(std::slice::from_ref(&circuit), 300).unwrap());
    let many = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .unwrap()
        .install(|| backend.run(std::slice::from_ref(&circuit), 300).unwrap());
    assert_eq!(single, many);
}

#[test]
fn unmeasured_circuit_is_an_execution_error() {
    let circuit = trotter_circuit(2, 1.0, 1, 1.0, 1.0).unwrap();
    let ideal = StatevectorBackend::new("u");
    let noisy = NoisyBackend::from_params(&noisy_params(), 2, "u").unwrap();
    assert!(matches!(ideal.run(std::slice::from_ref(&circuit), 1), Err(SimError::Execution(_))));
    assert!(matches!(noisy.run(std::slice::from_ref(&circuit), 1), Err(SimError::Execution(_))));
}

#[test]
fn calibration_of_ideal_backend_is_identity() {
    let calibration = fit_readout_calibration(&StatevectorBackend::new("cal"), 2, 10).unwrap();
    let a = calibration.assignment();
    for i in 0..a.nrows() {
        for j in 0..a.ncols() {
            assert_eq!(a.read(i, j), if i == j { 1.0 } else { 0.0 });
        }
    }
}

#[test]
fn calibration_sees_readout_noise() {
    let params = NoiseParams {
        p_meas: 0.1,
        p_dep: 0.0,
        p_cnot: 0.0,
        t1: 1.0,
        t2: 1.0,
        gate_time: 0.0,
    };
    let backend = NoisyBackend::from_params(&params, 1, "cal-noise").unwrap();
    let calibration = fit_readout_calibration(&backend, 1, 4000).unwrap();
    let a = calibration.assignment();
    assert!((a.read(1, 0) - 0.1).abs() < 0.03, "{:?}", a);
    assert!((a.read(0, 1) - 0.1).abs() < 0.03, "{:?}", a);
}
