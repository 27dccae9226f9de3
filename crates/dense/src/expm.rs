//! Matrix exponential by scaling and squaring with a truncated Taylor series.
//!
//! The argument is scaled by `2^-s` until its 1-norm is at most
//! `SCALED_NORM`, the series is summed until the next term no longer changes
//! the result at double precision, and the result is squared `s` times.

use crate::matrix::{Matrix, C64};

const SCALED_NORM: f64 = 0.5;
const MAX_ORDER: usize = 30;

/// `exp(a)`
pub fn expm(a: &Matrix) -> Matrix {
    let n = a.dim();
    if n == 0 {
        return Matrix::zeros(0);
    }

    let norm = a.norm_1();
    let s = if norm > SCALED_NORM {
        (norm / SCALED_NORM).log2().ceil() as i32
    } else {
        0
    };
    let scaled = a.scale_re(0.5f64.powi(s));

    let mut result = Matrix::identity(n);
    let mut term = Matrix::identity(n);
    for k in 1..=MAX_ORDER {
        term = term.product(&scaled).scale_re(1.0 / k as f64);
        let term_norm = term.norm_1();
        result = result.sum(&term);
        if term_norm <= f64::EPSILON * result.norm_1() {
            break;
        }
    }

    for _ in 0..s {
        result = result.product(&result);
    }
    result
}

/// `exp(-i·h·t)`
pub fn evolution_operator(h: &Matrix, t: f64) -> Matrix {
    expm(&h.scale(C64::new(0.0, -t)))
}
