use crate::error::{invalid, SimResult};
use quantum::Reconstruction;

/// Observables per time point, as produced by both pipelines.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Observables {
    pub times: Vec<f64>,
    pub probabilities: Vec<f64>,
    pub internal_energy: Vec<f64>,
    pub coupling_energy: Vec<f64>,
}

impl Observables {
    pub fn with_capacity(points: usize) -> Self {
        Self {
            times: Vec::with_capacity(points),
            probabilities: Vec::with_capacity(points),
            internal_energy: Vec::with_capacity(points),
            coupling_energy: Vec::with_capacity(points),
        }
    }

    pub fn push(&mut self, time: f64, r: Reconstruction) {
        self.times.push(time);
        self.probabilities.push(r.probability);
        self.internal_energy.push(r.internal_energy);
        self.coupling_energy.push(r.coupling_energy);
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Largest absolute difference over all three observables.
    pub fn max_deviation(&self, other: &Observables) -> SimResult<f64> {
        if self.len() != other.len() {
            return Err(invalid(format!(
                "series lengths differ: {} vs {}",
                self.len(),
                other.len()
            )));
        }
        let columns = [
            (&self.probabilities, &other.probabilities),
            (&self.internal_energy, &other.internal_energy),
            (&self.coupling_energy, &other.coupling_energy),
        ];
        Ok(columns
            .iter()
            .flat_map(|(a, b)| a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()))
            .fold(0.0, f64::max))
    }

    /// `(time, value)` of the largest internal energy.
    pub fn peak_internal_energy(&self) -> Option<(f64, f64)> {
        self.times
            .iter()
            .copied()
            .zip(self.internal_energy.iter().copied())
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// `(time, P)` of the largest average charging power
    /// `P = E_a(t) / (N·ω²·t)`, over `t > 0`.
    ///
    /// `internal_energy` is already the stored energy per spin in units of
    /// ω, so `P = internal_energy / (ω·t)`.
    pub fn max_power(&self, frequency: f64) -> Option<(f64, f64)> {
        self.times
            .iter()
            .copied()
            .zip(self.internal_energy.iter().copied())
            .filter(|(t, _)| *t > 0.0)
            .map(|(t, e)| (t, e / (frequency * t)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}
