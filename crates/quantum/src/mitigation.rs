use crate::circuit::{basis_state_circuit, Circuit};
use crate::counts::Counts;
use crate::error::{invalid, QuantumError, QuantumResult};
use crate::operators::check_spins;
use faer::prelude::*;
use tracing::{debug, warn};

const PIVOT_TOL: f64 = 1e-12;

/// How raw counts are post-processed before observables are read off.
#[derive(Clone, Debug)]
pub enum MitigationPolicy {
    None,
    /// Invert the readout assignment matrix before reconstruction.
    ReadoutCalibration(ReadoutCalibration),
    /// Keep only outcomes in the initial state's parity sector.
    ParityFilter,
}

impl MitigationPolicy {
    pub fn label(&self) -> &'static str {
        match self {
            MitigationPolicy::None => "none",
            MitigationPolicy::ReadoutCalibration(_) => "readout",
            MitigationPolicy::ParityFilter => "parity",
        }
    }
}

/// Full `2^n × 2^n` readout assignment matrix,
/// `assignment[(i, j)] = P(measured i | prepared j)`.
#[derive(Clone, Debug)]
pub struct ReadoutCalibration {
    num_qubits: usize,
    assignment: Mat<f64>,
}

impl ReadoutCalibration {
    /// One preparation circuit per basis state, in index order.
    pub fn circuits(num_qubits: usize) -> Vec<Circuit> {
        (0..1usize << num_qubits)
            .map(|index| basis_state_circuit(num_qubits, index))
            .collect()
    }

    /// Builds the matrix from the results of [`ReadoutCalibration::circuits`].
    pub fn from_counts(num_qubits: usize, results: &[Counts]) -> QuantumResult<Self> {
        check_spins(num_qubits)?;
        let dim = 1usize << num_qubits;
        if results.len() != dim {
            return Err(invalid(format!(
                "calibration needs {} results, got {}",
                dim,
                results.len()
            )));
        }

        let mut assignment = Mat::<f64>::zeros(dim, dim);
        for (prepared, counts) in results.iter().enumerate() {
            if counts.num_qubits() != num_qubits {
                return Err(invalid(format!(
                    "calibration circuit {} covers {} qubits, expected {}",
                    prepared,
                    counts.num_qubits(),
                    num_qubits
                )));
            }
            let total = counts.total();
            if total <= 0.0 {
                return Err(invalid(format!(
                    "calibration circuit {} returned no counts",
                    prepared
                )));
            }
            for (measured, w) in counts.to_vector().into_iter().enumerate() {
                assignment.write(measured, prepared, w / total);
            }
        }

        debug!(num_qubits, "fitted readout calibration");
        Ok(Self {
            num_qubits,
            assignment,
        })
    }

    pub fn from_assignment(num_qubits: usize, assignment: Vec<Vec<f64>>) -> QuantumResult<Self> {
        check_spins(num_qubits)?;
        let dim = 1usize << num_qubits;
        if assignment.len() != dim || assignment.iter().any(|row| row.len() != dim) {
            return Err(invalid(format!("assignment matrix must be {0}x{0}", dim)));
        }
        Ok(Self {
            num_qubits,
            assignment: Mat::from_fn(dim, dim, |i, j| assignment[i][j]),
        })
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn assignment(&self) -> MatRef<'_, f64> {
        self.assignment.as_ref()
    }

    /// Corrected counts: solve `A·x = b`, clip negatives, rescale to the
    /// original total.
    pub fn apply(&self, counts: &Counts) -> QuantumResult<Counts> {
        if counts.num_qubits() != self.num_qubits {
            return Err(invalid(format!(
                "counts cover {} qubits, calibration covers {}",
                counts.num_qubits(),
                self.num_qubits
            )));
        }

        let total = counts.total();
        let mut x = solve(self.assignment.as_ref(), &counts.to_vector())?;

        let clipped: f64 = x.iter().filter(|v| **v < 0.0).map(|v| -v).sum();
        for v in &mut x {
            *v = v.max(0.0);
        }
        let kept: f64 = x.iter().sum();
        if kept <= 0.0 {
            return Ok(Counts::new(self.num_qubits));
        }
        if clipped > 1e-9 * total {
            warn!(clipped, total, "readout correction produced negative weight");
        }

        let scale = total / kept;
        for v in &mut x {
            *v *= scale;
        }
        Ok(Counts::from_vector(self.num_qubits, &x))
    }
}

/// LU with partial pivoting; a vanishing pivot means the readout cannot be
/// inverted.
fn solve(a: MatRef<'_, f64>, b: &[f64]) -> QuantumResult<Vec<f64>> {
    let lu = a.partial_piv_lu();
    let u = lu.compute_u();
    if (0..b.len()).any(|i| u.read(i, i).abs() < PIVOT_TOL) {
        return Err(QuantumError::SingularCalibration);
    }
    let x = lu.solve(faer::col::from_slice(b));
    Ok((0..x.nrows()).map(|i| x.read(i)).collect())
}
