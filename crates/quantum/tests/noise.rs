use proptest::prelude::*;
use quantum::{
    circuit::Gate,
    noise::GateError,
    KrausChannel, NoiseModel, NoiseParams, StateVector,
};
use rng::ShotRng;

fn params() -> NoiseParams {
    NoiseParams {
        p_meas: 0.02,
        p_dep: 0.001,
        p_cnot: 0.01,
        t1: 100e-6,
        t2: 80e-6,
        gate_time: 50e-9,
    }
}

#[test]
fn relaxation_rates_follow_t1_t2() {
    let p = params();
    assert!((p.t_phi() - 100e-6 * 80e-6 / 120e-6).abs() < 1e-18);
    let (p1, pz) = p.relaxation();
    assert!((p1 - (1.0 - (-5e-4f64).exp())).abs() < 1e-15);
    assert!(pz > 0.0 && pz < p1 * 2.0);
}

#[test]
fn invalid_parameters_are_rejected() {
    let mut p = params();
    p.p_meas = 1.5;
    assert!(p.validate().is_err());

    let mut p = params();
    p.t2 = 2.5 * p.t1;
    assert!(p.validate().is_err());

    let mut p = params();
    p.t1 = 0.0;
    assert!(NoiseModel::from_params(&p, 2).is_err());
}

#[test]
fn model_channels_are_trace_preserving() {
    let p = params();
    let (p1, pz) = p.relaxation();
    let relaxation = KrausChannel::phase_amplitude_damping(p1, pz, 1.0).unwrap();
    assert!(relaxation.is_trace_preserving(1e-12));
    let single = KrausChannel::depolarizing(p.p_dep).unwrap().compose(&relaxation);
    assert!(single.is_trace_preserving(1e-12));
    assert!(KrausChannel::bit_flip(0.3).unwrap().is_trace_preserving(1e-12));
}

#[test]
fn two_qubit_errors_only_on_neighbours() {
    let model = NoiseModel::from_params(&params(), 4).unwrap();
    assert!(!model.is_ideal());

    for (c, t) in [(0, 1), (1, 0), (2, 3), (3, 2)] {
        let errors: Vec<_> = model.errors_for(&Gate::Cx(c, t)).collect();
        assert_eq!(errors.len(), 1, "CX({}, {})", c, t);
        assert!(matches!(errors[0], GateError::Pair(_, _)));
    }
    for (c, t) in [(0, 2), (0, 3), (3, 1)] {
        assert_eq!(model.errors_for(&Gate::Cx(c, t)).count(), 0, "CX({}, {})", c, t);
    }
}

#[test]
fn virtual_rz_is_error_free() {
    let model = NoiseModel::from_params(&params(), 3).unwrap();
    assert_eq!(model.errors_for(&Gate::Rz(1, 0.3)).count(), 0);
    assert_eq!(model.errors_for(&Gate::X(1)).count(), 1);
    assert_eq!(model.errors_for(&Gate::Sx(2)).count(), 1);
    assert_eq!(model.errors_for(&Gate::Barrier).count(), 0);
}

#[test]
fn readout_errors_combine_by_xor() {
    let mut model = NoiseModel::ideal();
    model.add_readout_error(0.1, 0);
    model.add_readout_error(0.2, 0);
    assert!((model.readout_error(0) - (0.1 * 0.8 + 0.9 * 0.2)).abs() < 1e-15);
    assert_eq!(model.readout_error(1), 0.0);
}

#[test]
fn certain_decay_relaxes_to_one() {
    // excited population 1 drives every trajectory into |1⟩
    let channel = KrausChannel::phase_amplitude_damping(1.0, 0.0, 1.0).unwrap();
    let mut rng = ShotRng::new(b"decay");
    for _ in 0..16 {
        let mut psi = StateVector::new_zero(1);
        channel.unravel(&mut psi, 0, &mut rng);
        let p = psi.probabilities();
        assert!((p[1] - 1.0).abs() < 1e-12, "{:?}", p);
    }
}

#[test]
fn unravelling_keeps_states_normalised() {
    let model = NoiseModel::from_params(&params(), 2).unwrap();
    let mut rng = ShotRng::new(b"trajectory");
    let mut psi = StateVector::new_zero(2);
    for gate in [Gate::X(0), Gate::Sx(1), Gate::Cx(0, 1), Gate::X(1)] {
        psi.apply_gate(&gate);
        model.apply_after(&gate, &mut psi, &mut rng);
        assert!((psi.norm_sqr() - 1.0).abs() < 1e-12);
    }
}

proptest! {
    #[test]
    fn depolarizing_is_trace_preserving(lambda in 0.0f64..=1.0) {
        prop_assert!(KrausChannel::depolarizing(lambda).unwrap().is_trace_preserving(1e-12));
    }

    #[test]
    fn damping_is_trace_preserving(amp in 0.0f64..=1.0, phase in 0.0f64..=1.0) {
        prop_assume!(amp + phase <= 1.0);
        let channel = KrausChannel::phase_amplitude_damping(amp, phase, 1.0).unwrap();
        prop_assert!(channel.is_trace_preserving(1e-12));
    }
}
