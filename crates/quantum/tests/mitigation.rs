use quantum::{
    counts::Counts, MitigationPolicy, QuantumError, ReadoutCalibration,
};

fn flip_matrix(p: f64) -> Vec<Vec<f64>> {
    flip_matrix_on(2, p)
}

// single-qubit readout flips with probability p, tensored over every qubit
fn flip_matrix_on(qubits: usize, p: f64) -> Vec<Vec<f64>> {
    let dim = 1usize << qubits;
    (0..dim)
        .map(|m| {
            (0..dim)
                .map(|s| {
                    (0..qubits)
                        .map(|q| if (m >> q) & 1 == (s >> q) & 1 { 1.0 - p } else { p })
                        .product()
                })
                .collect()
        })
        .collect()
}

#[test]
fn calibration_circuits_cover_every_basis_state() {
    let circuits = ReadoutCalibration::circuits(3);
    assert_eq!(circuits.len(), 8);
    assert!(circuits.iter().all(|c| c.is_measured()));
}

#[test]
fn known_confusion_is_inverted() {
    let calibration = ReadoutCalibration::from_assignment(2, flip_matrix(0.1)).unwrap();

    // ideal: 700 × "00", 300 × "11"
    let ideal = [700.0, 0.0, 0.0, 300.0];
    let a = flip_matrix(0.1);
    let observed: Vec<f64> = (0..4)
        .map(|m| (0..4).map(|s| a[m][s] * ideal[s]).sum())
        .collect();

    let corrected = calibration
        .apply(&Counts::from_vector(2, &observed))
        .unwrap();
    for (i, want) in ideal.iter().enumerate() {
        assert!((corrected.get_index(i) - want).abs() < 1e-9, "{}: {}", i, corrected.get_index(i));
    }
}

#[test]
fn five_qubit_confusion_is_inverted() {
    let a = flip_matrix_on(5, 0.07);
    let calibration = ReadoutCalibration::from_assignment(5, a.clone()).unwrap();

    let ideal: Vec<f64> = (0..32).map(|i| if i % 3 == 0 { 10.0 + i as f64 } else { 0.0 }).collect();
    let observed: Vec<f64> = (0..32)
        .map(|m| (0..32).map(|s| a[m][s] * ideal[s]).sum())
        .collect();

    let corrected = calibration
        .apply(&Counts::from_vector(5, &observed))
        .unwrap();
    for (i, want) in ideal.iter().enumerate() {
        assert!((corrected.get_index(i) - want).abs() < 1e-8, "{}: {}", i, corrected.get_index(i));
    }
}

#[test]
fn fitted_calibration_matches_results() {
    let results: Vec<Counts> = (0..4)
        .map(|prepared| {
            let mut c = Counts::new(2);
            c.add_index(prepared, 90.0);
            c.add_index(prepared ^ 1, 10.0);
            c
        })
        .collect();
    let calibration = ReadoutCalibration::from_counts(2, &results).unwrap();
    let a = calibration.assignment();
    assert!((a.read(0, 0) - 0.9).abs() < 1e-15);
    assert!((a.read(1, 0) - 0.1).abs() < 1e-15);
    assert_eq!(a.read(2, 0), 0.0);
}

#[test]
fn wrong_number_of_results_is_invalid() {
    assert!(ReadoutCalibration::from_counts(2, &[Counts::new(2)]).is_err());
}

#[test]
fn mismatched_or_oversized_calibration_is_invalid() {
    let narrow: Vec<Counts> = (0..4).map(|_| Counts::from_pairs(1, [("0", 1.0)])).collect();
    assert!(matches!(
        ReadoutCalibration::from_counts(2, &narrow),
        Err(QuantumError::InvalidArgument(_))
    ));
    assert!(matches!(
        ReadoutCalibration::from_assignment(64, Vec::new()),
        Err(QuantumError::InvalidArgument(_))
    ));
}

#[test]
fn singular_calibration_is_reported() {
    let calibration = ReadoutCalibration::from_assignment(1, vec![vec![0.5, 0.5], vec![0.5, 0.5]]).unwrap();
    let counts = Counts::from_pairs(1, [("0", 10.0)]);
    assert!(matches!(
        calibration.apply(&counts),
        Err(QuantumError::SingularCalibration)
    ));
}

#[test]
fn negative_estimates_are_clipped_and_rescaled() {
    let calibration = ReadoutCalibration::from_assignment(1, vec![vec![0.8, 0.2], vec![0.2, 0.8]]).unwrap();
    // observed more extreme than any physical state
    let counts = Counts::from_pairs(1, [("0", 100.0)]);
    let corrected = calibration.apply(&counts).unwrap();
    assert_eq!(corrected.get("1"), 0.0);
    assert!((corrected.total() - 100.0).abs() < 1e-9);
}

#[test]
fn policy_labels() {
    assert_eq!(MitigationPolicy::None.label(), "none");
    assert_eq!(MitigationPolicy::ParityFilter.label(), "parity");
}
