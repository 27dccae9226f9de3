use crate::error::{invalid, QuantumResult};

/// Ordered, non-empty sequence of sampling times.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeGrid {
    points: Vec<f64>,
}

impl TimeGrid {
    pub fn new(points: Vec<f64>) -> QuantumResult<Self> {
        if points.is_empty() {
            return Err(invalid("time grid is empty"));
        }
        if let Some(t) = points.iter().find(|t| !t.is_finite()) {
            return Err(invalid(format!("time grid contains non-finite point {}", t)));
        }
        Ok(Self { points })
    }

    /// `points` evenly spaced values from `start` to `end` inclusive.
    pub fn linspace(start: f64, end: f64, points: usize) -> QuantumResult<Self> {
        match points {
            0 => Err(invalid("time grid needs at least one point")),
            1 => Self::new(vec![start]),
            n => {
                let step = (end - start) / (n - 1) as f64;
                Self::new((0..n).map(|i| start + step * i as f64).collect())
            }
        }
    }

    /// Grid given in units of `ω·t`, converted to physical time.
    pub fn dimensionless(start: f64, end: f64, points: usize, frequency: f64) -> QuantumResult<Self> {
        if !frequency.is_finite() || frequency == 0.0 {
            return Err(invalid(format!("frequency must be finite and non-zero, got {}", frequency)));
        }
        Self::linspace(start / frequency, end / frequency, points)
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::TimeGrid;

    #[test]
    fn linspace_includes_endpoints() {
        let g = TimeGrid::linspace(0.0, 1.0, 5).unwrap();
        assert_eq!(g.points(), &[0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn empty_grid_is_rejected() {
        assert!(TimeGrid::new(Vec::new()).is_err());
        assert!(TimeGrid::linspace(0.0, 1.0, 0).is_err());
    }

    #[test]
    fn dimensionless_divides_by_frequency() {
        let g = TimeGrid::dimensionless(0.0, 4.0, 3, 2.0).unwrap();
        assert_eq!(g.points(), &[0.0, 1.0, 2.0]);
    }
}
