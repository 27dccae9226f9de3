use crate::circuit::Gate;
use crate::gates::{cnot, hadamard, pauli_x, rxx, rz, sx, C64};
use rng::ShotRng;

/// Dense state vector, qubit 0 in the most significant bit of the index.
#[derive(Clone, Debug)]
pub struct StateVector {
    amplitudes: Vec<C64>,
    num_qubits: usize,
}

impl StateVector {
    /// |0…0⟩
    pub fn new_zero(num_qubits: usize) -> Self {
        Self::basis(num_qubits, 0)
    }

    pub fn basis(num_qubits: usize, index: usize) -> Self {
        let size = 1usize << num_qubits;
        assert!(index < size, "basis index {} out of range", index);
        let mut amplitudes = vec![C64::new(0.0, 0.0); size];
        amplitudes[index] = C64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    pub fn from_amplitudes(amplitudes: Vec<C64>) -> Self {
        let size = amplitudes.len();
        assert!(size.is_power_of_two(), "state length {} is not a power of two", size);
        Self {
            num_qubits: size.trailing_zeros() as usize,
            amplitudes,
        }
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn amplitudes(&self) -> &[C64] {
        &self.amplitudes
    }

    #[inline]
    fn mask(&self, qubit: usize) -> usize {
        assert!(qubit < self.num_qubits, "qubit {} out of range", qubit);
        1 << (self.num_qubits - 1 - qubit)
    }

    pub fn apply_1q(&mut self, k: usize, u: [[C64; 2]; 2]) {
        let mask = self.mask(k);
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = u[0][0] * a + u[0][1] * b;
                self.amplitudes[j] = u[1][0] * a + u[1][1] * b;
            }
        }
    }

    /// Applies `u` with `a` as the high bit of the 4×4 basis order.
    pub fn apply_2q(&mut self, a: usize, b: usize, u: [[C64; 4]; 4]) {
        assert!(a != b, "two-qubit gate on a single qubit {}", a);
        let ma = self.mask(a);
        let mb = self.mask(b);
        for i in 0..self.amplitudes.len() {
            if i & ma != 0 || i & mb != 0 {
                continue;
            }
            let idx = [i, i | mb, i | ma, i | ma | mb];
            let v = idx.map(|x| self.amplitudes[x]);
            for (row, &target) in idx.iter().enumerate() {
                let mut acc = C64::new(0.0, 0.0);
                for (col, x) in v.iter().enumerate() {
                    acc += u[row][col] * x;
                }
                self.amplitudes[target] = acc;
            }
        }
    }

    pub fn apply_gate(&mut self, gate: &Gate) {
        match *gate {
            Gate::X(q) => self.apply_1q(q, pauli_x()),
            Gate::Sx(q) => self.apply_1q(q, sx()),
            Gate::H(q) => self.apply_1q(q, hadamard()),
            Gate::Rz(q, theta) => self.apply_1q(q, rz(theta)),
            Gate::Rxx(a, b, theta) => self.apply_2q(a, b, rxx(theta)),
            Gate::Cx(c, t) => self.apply_2q(c, t, cnot()),
            Gate::Barrier => {}
        }
    }

    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    pub fn normalize(&mut self) {
        let norm = self.norm_sqr().sqrt();
        if norm > 0.0 {
            for a in &mut self.amplitudes {
                *a /= norm;
            }
        }
    }

    /// Born-rule probabilities over the computational basis.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// One computational-basis outcome.
    pub fn sample(&self, rng: &mut ShotRng) -> usize {
        rng.choose(&self.probabilities(), b"MEASURE")
    }
}
