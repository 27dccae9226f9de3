//! Collective spin operators as dense `2^n × 2^n` matrices.
//!
//! Qubit 0 is the leftmost factor of every Kronecker product, which makes it
//! the most significant bit of the basis index.

use crate::error::{invalid, QuantumResult};
use crate::gates::{identity, pauli_x, pauli_z, scale_2x2};
use dense::{cross_product, Matrix};

/// Largest spin count for which dense operators are built.
pub const MAX_SPINS: usize = 10;

pub fn check_spins(spins: usize) -> QuantumResult<()> {
    if spins < 1 {
        return Err(invalid(format!("spins must be at least 1, got {}", spins)));
    }
    if spins > MAX_SPINS {
        return Err(invalid(format!(
            "at most {} spins are supported, got {}",
            MAX_SPINS, spins
        )));
    }
    Ok(())
}

/// All unordered pairs `(j, k)` with `j < k`, in lexicographic order.
pub fn pairs(spins: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..spins).flat_map(move |j| (j + 1..spins).map(move |k| (j, k)))
}

/// `Z/2` on `index`, identity elsewhere.
pub fn single_sz(spins: usize, index: usize) -> QuantumResult<Matrix> {
    check_spins(spins)?;
    if index >= spins {
        return Err(invalid(format!("spin index {} out of range for {} spins", index, spins)));
    }

    let half_z = Matrix::from_2x2(scale_2x2(pauli_z(), 0.5));
    let id = Matrix::from_2x2(identity());
    let ops: Vec<Matrix> = (0..spins)
        .map(|i| if i == index { half_z.clone() } else { id.clone() })
        .collect();
    Ok(cross_product(&ops)?)
}

/// `X/2 ⊗ X/2` on `(first, second)`, identity elsewhere.
pub fn single_sxx(spins: usize, first: usize, second: usize) -> QuantumResult<Matrix> {
    check_spins(spins)?;
    if first >= spins || second >= spins || first == second {
        return Err(invalid(format!(
            "invalid spin pair ({}, {}) for {} spins",
            first, second, spins
        )));
    }

    let half_x = Matrix::from_2x2(scale_2x2(pauli_x(), 0.5));
    let id = Matrix::from_2x2(identity());
    let ops: Vec<Matrix> = (0..spins)
        .map(|i| {
            if i == first || i == second {
                half_x.clone()
            } else {
                id.clone()
            }
        })
        .collect();
    Ok(cross_product(&ops)?)
}

/// Total `S_z = Σ_k Z_k/2`.
pub fn operator_sz(spins: usize) -> QuantumResult<Matrix> {
    check_spins(spins)?;
    let mut sz = single_sz(spins, 0)?;
    for i in 1..spins {
        sz = sz.add(&single_sz(spins, i)?)?;
    }
    Ok(sz)
}

/// Total `S_xx = Σ_{j<k} X_j X_k / 4`. The zero matrix for a single spin.
pub fn operator_sxx(spins: usize) -> QuantumResult<Matrix> {
    check_spins(spins)?;
    let mut sxx = Matrix::zeros(1 << spins);
    for (first, second) in pairs(spins) {
        sxx = sxx.add(&single_sxx(spins, first, second)?)?;
    }
    Ok(sxx)
}

#[cfg(test)]
mod tests {
    use super::pairs;

    #[test]
    fn pairs_enumerates_combinations() {
        let p: Vec<_> = pairs(4).collect();
        assert_eq!(p, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        assert_eq!(pairs(1).count(), 0);
    }
}
