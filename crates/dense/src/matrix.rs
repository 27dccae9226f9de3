use crate::error::DenseError;
use faer::{Col, Mat};
use num_complex::Complex64;

pub type C64 = Complex64;

const ZERO: C64 = C64::new(0.0, 0.0);

/// Dense square complex matrix.
#[derive(Clone, Debug)]
pub struct Matrix {
    data: Mat<C64>,
}

impl Matrix {
    pub fn zeros(dim: usize) -> Self {
        Self {
            data: Mat::<C64>::zeros(dim, dim),
        }
    }

    pub fn identity(dim: usize) -> Self {
        Self {
            data: Mat::<C64>::identity(dim, dim),
        }
    }

    pub fn from_2x2(u: [[C64; 2]; 2]) -> Self {
        Self {
            data: Mat::from_fn(2, 2, |i, j| u[i][j]),
        }
    }

    pub fn from_diagonal(diag: &[f64]) -> Self {
        let n = diag.len();
        Self {
            data: Mat::from_fn(n, n, |i, j| if i == j { C64::new(diag[i], 0.0) } else { ZERO }),
        }
    }

    pub fn dim(&self) -> usize {
        self.data.nrows()
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> C64 {
        self.data.read(i, j)
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, v: C64) {
        self.data.write(i, j, v);
    }

    /// Kronecker product `self ⊗ other`.
    pub fn kron(&self, other: &Matrix) -> Matrix {
        Matrix {
            data: self.data.kron(&other.data),
        }
    }

    pub fn add(&self, other: &Matrix) -> Result<Matrix, DenseError> {
        self.check_dim(other.dim())?;
        Ok(self.sum(other))
    }

    /// Sum without the dimension check; callers guarantee equal sizes.
    pub(crate) fn sum(&self, other: &Matrix) -> Matrix {
        Matrix {
            data: self.data.as_ref() + other.data.as_ref(),
        }
    }

    pub fn scale(&self, factor: C64) -> Matrix {
        Matrix {
            data: faer::scale(factor) * self.data.as_ref(),
        }
    }

    pub fn scale_re(&self, factor: f64) -> Matrix {
        self.scale(C64::new(factor, 0.0))
    }

    pub fn matmul(&self, other: &Matrix) -> Result<Matrix, DenseError> {
        self.check_dim(other.dim())?;
        Ok(self.product(other))
    }

    /// Matrix product without the dimension check; callers guarantee equal sizes.
    pub(crate) fn product(&self, other: &Matrix) -> Matrix {
        Matrix {
            data: self.data.as_ref() * other.data.as_ref(),
        }
    }

    /// `self · v`
    pub fn apply(&self, v: &[C64]) -> Result<Vec<C64>, DenseError> {
        self.check_dim(v.len())?;
        let col = Col::<C64>::from_fn(v.len(), |i| v[i]);
        let out: Col<C64> = self.data.as_ref() * col.as_ref();
        Ok((0..out.nrows()).map(|i| out.read(i)).collect())
    }

    /// `⟨v|self|v⟩`
    pub fn expectation(&self, v: &[C64]) -> Result<C64, DenseError> {
        let mv = self.apply(v)?;
        Ok(v.iter().zip(mv.iter()).map(|(a, b)| a.conj() * b).sum())
    }

    pub fn adjoint(&self) -> Matrix {
        Matrix {
            data: self.data.adjoint().to_owned(),
        }
    }

    pub fn is_hermitian(&self, tol: f64) -> bool {
        (self.data.as_ref() - self.data.adjoint()).norm_max() <= tol
    }

    /// Maximum column sum of entry magnitudes.
    pub fn norm_1(&self) -> f64 {
        (0..self.dim())
            .map(|j| self.data.col(j).norm_l1())
            .fold(0.0, f64::max)
    }

    pub fn max_abs_diff(&self, other: &Matrix) -> Result<f64, DenseError> {
        self.check_dim(other.dim())?;
        Ok((self.data.as_ref() - other.data.as_ref()).norm_max())
    }

    fn check_dim(&self, other: usize) -> Result<(), DenseError> {
        if self.dim() != other {
            return Err(DenseError::DimensionMismatch {
                left: self.dim(),
                right: other,
            });
        }
        Ok(())
    }
}

/// Left-folded Kronecker product `ops[0] ⊗ ops[1] ⊗ …`.
pub fn cross_product(ops: &[Matrix]) -> Result<Matrix, DenseError> {
    let (first, rest) = ops.split_first().ok_or(DenseError::EmptyProduct)?;
    Ok(rest.iter().fold(first.clone(), |acc, op| acc.kron(op)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64) -> C64 {
        C64::new(re, 0.0)
    }

    #[test]
    fn kron_places_blocks() {
        let x = Matrix::from_2x2([[c(0.0), c(1.0)], [c(1.0), c(0.0)]]);
        let z = Matrix::from_2x2([[c(1.0), c(0.0)], [c(0.0), c(-1.0)]]);
        let xz = x.kron(&z);
        assert_eq!(xz.dim(), 4);
        assert_eq!(xz.get(0, 2), c(1.0));
        assert_eq!(xz.get(1, 3), c(-1.0));
        assert_eq!(xz.get(2, 0), c(1.0));
        assert_eq!(xz.get(0, 0), c(0.0));
    }

    #[test]
    fn mismatched_add_fails() {
        let err = Matrix::identity(2).add(&Matrix::identity(4)).unwrap_err();
        assert_eq!(err, DenseError::DimensionMismatch { left: 2, right: 4 });
    }

    #[test]
    fn empty_cross_product_fails() {
        assert_eq!(cross_product(&[]).unwrap_err(), DenseError::EmptyProduct);
    }

    #[test]
    fn apply_agrees_with_product() {
        let a = Matrix::from_2x2([[c(1.0), C64::new(0.0, 2.0)], [c(-1.0), c(0.5)]]);
        let b = Matrix::from_2x2([[c(0.0), c(3.0)], [C64::new(1.0, -1.0), c(2.0)]]);
        let ab = a.kron(&b);
        let v: Vec<C64> = (0..4).map(|k| C64::new(k as f64, 1.0 - k as f64)).collect();
        let direct = ab.matmul(&ab.adjoint()).unwrap().apply(&v).unwrap();
        let stepwise = ab.apply(&ab.adjoint().apply(&v).unwrap()).unwrap();
        for (x, y) in direct.iter().zip(stepwise.iter()) {
            assert!((x - y).norm() < 1e-12);
        }
        assert!(ab.matmul(&ab.adjoint()).unwrap().is_hermitian(1e-12));
        assert!(!ab.is_hermitian(1e-12));
    }
}
