use crate::error::{invalid, QuantumResult};
use std::collections::BTreeMap;

/// `index` as a `width`-character bitstring, qubit 0 first.
pub fn bitstring(index: usize, width: usize) -> String {
    format!("{:0width$b}", index, width = width)
}

/// Measurement outcomes for one circuit: bitstring → weight.
///
/// Weights are integral for sampled counts and fractional once readout
/// correction has been applied. Bitstrings never observed read as zero.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Counts {
    num_qubits: usize,
    entries: BTreeMap<String, f64>,
}

impl Counts {
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            entries: BTreeMap::new(),
        }
    }

    /// Panics if a bitstring has the wrong width.
    pub fn from_pairs<'a>(
        num_qubits: usize,
        pairs: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Self {
        let mut counts = Self::new(num_qubits);
        for (bits, weight) in pairs {
            counts.add(bits, weight);
        }
        counts
    }

    /// Expected counts `shots·p_i`, no sampling noise.
    ///
    /// Panics if the length is not a power of two; see
    /// [`Counts::try_from_probabilities`].
    pub fn from_probabilities(probabilities: &[f64], shots: f64) -> Self {
        match Self::try_from_probabilities(probabilities, shots) {
            Ok(counts) => counts,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn try_from_probabilities(probabilities: &[f64], shots: f64) -> QuantumResult<Self> {
        if !probabilities.len().is_power_of_two() {
            return Err(invalid(format!(
                "distribution length {} is not a power of two",
                probabilities.len()
            )));
        }
        let num_qubits = probabilities.len().trailing_zeros() as usize;
        let mut counts = Self::new(num_qubits);
        for (i, p) in probabilities.iter().enumerate() {
            if *p > 0.0 {
                counts.add_index(i, p * shots);
            }
        }
        Ok(counts)
    }

    /// Dense vector indexed by basis index; inverse of [`Counts::to_vector`].
    pub fn from_vector(num_qubits: usize, weights: &[f64]) -> Self {
        let mut counts = Self::new(num_qubits);
        for (i, w) in weights.iter().enumerate() {
            if *w != 0.0 {
                counts.add_index(i, *w);
            }
        }
        counts
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Panics on a malformed bitstring; see [`Counts::try_add`].
    pub fn add(&mut self, bits: &str, weight: f64) {
        if let Err(e) = self.try_add(bits, weight) {
            panic!("{}", e);
        }
    }

    pub fn try_add(&mut self, bits: &str, weight: f64) -> QuantumResult<()> {
        if bits.len() != self.num_qubits {
            return Err(invalid(format!(
                "bitstring '{}' does not have {} bits",
                bits, self.num_qubits
            )));
        }
        if bits.chars().any(|c| c != '0' && c != '1') {
            return Err(invalid(format!("bitstring '{}' is not binary", bits)));
        }
        *self.entries.entry(bits.to_string()).or_insert(0.0) += weight;
        Ok(())
    }

    pub fn add_index(&mut self, index: usize, weight: f64) {
        let bits = bitstring(index, self.num_qubits);
        *self.entries.entry(bits).or_insert(0.0) += weight;
    }

    pub fn get(&self, bits: &str) -> f64 {
        self.entries.get(bits).copied().unwrap_or(0.0)
    }

    pub fn get_index(&self, index: usize) -> f64 {
        self.get(&bitstring(index, self.num_qubits))
    }

    pub fn total(&self) -> f64 {
        self.entries.values().sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn to_vector(&self) -> Vec<f64> {
        (0..1usize << self.num_qubits)
            .map(|i| self.get_index(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuantumError;

    #[test]
    fn bitstring_is_big_endian() {
        assert_eq!(bitstring(1, 3), "001");
        assert_eq!(bitstring(6, 3), "110");
    }

    #[test]
    fn missing_bitstrings_read_as_zero() {
        let counts = Counts::from_pairs(2, [("00", 3.0), ("11", 5.0)]);
        assert_eq!(counts.get("01"), 0.0);
        assert_eq!(counts.get_index(3), 5.0);
        assert_eq!(counts.total(), 8.0);
        assert_eq!(counts.to_vector(), vec![3.0, 0.0, 0.0, 5.0]);
    }

    #[test]
    fn malformed_bitstrings_are_rejected() {
        let mut counts = Counts::new(3);
        assert!(matches!(counts.try_add("01", 1.0), Err(QuantumError::InvalidArgument(_))));
        assert!(matches!(counts.try_add("0a1", 1.0), Err(QuantumError::InvalidArgument(_))));
        assert!(counts.is_empty());
        counts.try_add("011", 2.0).unwrap();
        counts.try_add("011", 0.5).unwrap();
        assert_eq!(counts.get("011"), 2.5);
    }

    #[test]
    fn distribution_length_must_be_a_power_of_two() {
        assert!(matches!(
            Counts::try_from_probabilities(&[0.5, 0.25, 0.25], 100.0),
            Err(QuantumError::InvalidArgument(_))
        ));
        let counts = Counts::try_from_probabilities(&[0.5, 0.0, 0.25, 0.25], 100.0).unwrap();
        assert_eq!(counts.num_qubits(), 2);
        assert_eq!(counts.to_vector(), vec![50.0, 0.0, 25.0, 25.0]);
        assert_eq!(counts.len(), 3);
    }

    #[test]
    #[should_panic(expected = "does not have 2 bits")]
    fn add_panics_on_wrong_width() {
        Counts::new(2).add("0", 1.0);
    }
}
