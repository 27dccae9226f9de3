//! Observables reconstructed from measurement counts.
//!
//! Every function enumerates the full computational basis, reading absent
//! bitstrings as zero, and normalises by the requested shot budget.

use crate::counts::{bitstring, Counts};
use crate::error::{invalid, QuantumError, QuantumResult};
use crate::gates::C64;
use crate::mitigation::MitigationPolicy;
use crate::operators::{check_spins, pairs};
use std::f64::consts::{PI, TAU};

const PARITY_TOL: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reconstruction {
    pub probability: f64,
    pub internal_energy: f64,
    pub coupling_energy: f64,
}

fn check(counts: &Counts, spins: usize, shots: u64) -> QuantumResult<()> {
    check_spins(spins)?;
    if shots == 0 {
        return Err(invalid("shots must be at least 1"));
    }
    if counts.num_qubits() != spins {
        return Err(invalid(format!(
            "counts cover {} qubits, expected {}",
            counts.num_qubits(),
            spins
        )));
    }
    Ok(())
}

/// `+1` for `'0'` (up), `−1` for `'1'` (down).
pub fn spin_signs(bits: &str) -> impl Iterator<Item = f64> + '_ {
    bits.chars().map(|c| if c == '0' { 1.0 } else { -1.0 })
}

/// `S_z` eigenvalue of a bitstring: `Σ_k s_k / 2`.
pub fn total_spin(bits: &str) -> f64 {
    spin_signs(bits).sum::<f64>() / 2.0
}

/// `exp(iπ·S mod 2π)`
pub fn parity(total_spin: f64) -> C64 {
    C64::from_polar(1.0, (PI * total_spin).rem_euclid(TAU))
}

/// Relative frequency of the all-up reference bitstring.
pub fn probability(counts: &Counts, spins: usize, shots: u64) -> QuantumResult<f64> {
    check(counts, spins, shots)?;
    Ok(counts.get(&"0".repeat(spins)) / shots as f64)
}

/// `⟨S_z⟩/spins + 1/2` estimated from Z-basis counts.
pub fn internal_energy(counts: &Counts, spins: usize, shots: u64) -> QuantumResult<f64> {
    check(counts, spins, shots)?;

    let mut acc = 0.0;
    for index in 0..1usize << spins {
        let bits = bitstring(index, spins);
        let weight = counts.get(&bits);
        acc += spin_signs(&bits).sum::<f64>() * weight;
    }

    Ok(acc / (spins as f64 * shots as f64 * 2.0) + 0.5)
}

/// Internal energy over the outcomes whose parity matches the all-down
/// initial state, normalised by the retained weight.
///
/// The dynamics conserve this parity, so other outcomes can only come from
/// noise. Dropping them shrinks the effective sample and biases the
/// estimate towards the symmetric sector.
pub fn parity_filtered_internal_energy(counts: &Counts, spins: usize) -> QuantumResult<f64> {
    check(counts, spins, 1)?;

    let reference = parity(-(spins as f64) / 2.0);
    let mut acc = 0.0;
    let mut counted = 0.0;
    for index in 0..1usize << spins {
        let bits = bitstring(index, spins);
        if (parity(total_spin(&bits)) - reference).norm() >= PARITY_TOL {
            continue;
        }
        let weight = counts.get(&bits);
        acc += spin_signs(&bits).sum::<f64>() * weight;
        counted += weight;
    }

    if counted <= 0.0 {
        return Err(QuantumError::NoRetainedCounts {
            total: counts.total(),
        });
    }
    Ok(acc / (spins as f64 * counted * 2.0) + 0.5)
}

/// Pairwise X-X correlation from X-basis counts, scaled by
/// `coupling / (spins·shots·2)`. Equal bits contribute `−1`, unequal `+1`.
pub fn coupling_energy(
    counts: &Counts,
    spins: usize,
    shots: u64,
    coupling: f64,
) -> QuantumResult<f64> {
    check(counts, spins, shots)?;

    let mut acc = 0.0;
    for index in 0..1usize << spins {
        let bits = bitstring(index, spins);
        let weight = counts.get(&bits);
        if weight == 0.0 {
            continue;
        }
        let b = bits.as_bytes();
        for (first, second) in pairs(spins) {
            let coefficient = if b[first] == b[second] { -1.0 } else { 1.0 };
            acc += coefficient * weight;
        }
    }

    Ok(acc * coupling / (spins as f64 * shots as f64 * 2.0))
}

/// All three observables for one time point.
pub fn reconstruct(
    z_counts: &Counts,
    x_counts: &Counts,
    spins: usize,
    shots: u64,
    coupling: f64,
    policy: &MitigationPolicy,
) -> QuantumResult<Reconstruction> {
    match policy {
        MitigationPolicy::None => plain(z_counts, x_counts, spins, shots, coupling),
        MitigationPolicy::ReadoutCalibration(calibration) => {
            let z = calibration.apply(z_counts)?;
            let x = calibration.apply(x_counts)?;
            plain(&z, &x, spins, shots, coupling)
        }
        MitigationPolicy::ParityFilter => Ok(Reconstruction {
            probability: probability(z_counts, spins, shots)?,
            internal_energy: parity_filtered_internal_energy(z_counts, spins)?,
            coupling_energy: coupling_energy(x_counts, spins, shots, coupling)?,
        }),
    }
}

fn plain(
    z_counts: &Counts,
    x_counts: &Counts,
    spins: usize,
    shots: u64,
    coupling: f64,
) -> QuantumResult<Reconstruction> {
    Ok(Reconstruction {
        probability: probability(z_counts, spins, shots)?,
        internal_energy: internal_energy(z_counts, spins, shots)?,
        coupling_energy: coupling_energy(x_counts, spins, shots, coupling)?,
    })
}
