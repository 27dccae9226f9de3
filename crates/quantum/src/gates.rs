pub use dense::C64;

const Z: C64 = C64::new(0.0, 0.0);
const O: C64 = C64::new(1.0, 0.0);

pub fn identity() -> [[C64; 2]; 2] {
    [[O, Z], [Z, O]]
}

pub fn hadamard() -> [[C64; 2]; 2] {
    let s = 1.0 / 2.0_f64.sqrt();
    [
        [C64::new(s, 0.0), C64::new(s, 0.0)],
        [C64::new(s, 0.0), C64::new(-s, 0.0)],
    ]
}

pub fn pauli_x() -> [[C64; 2]; 2] {
    [[Z, O], [O, Z]]
}

pub fn pauli_y() -> [[C64; 2]; 2] {
    let i = C64::new(0.0, 1.0);
    [[Z, -i], [i, Z]]
}

pub fn pauli_z() -> [[C64; 2]; 2] {
    [[O, Z], [Z, -O]]
}

/// √X
pub fn sx() -> [[C64; 2]; 2] {
    let p = C64::new(0.5, 0.5);
    let m = C64::new(0.5, -0.5);
    [[p, m], [m, p]]
}

/// exp(-iθZ/2)
pub fn rz(theta: f64) -> [[C64; 2]; 2] {
    let c = (theta / 2.0).cos();
    let s = (theta / 2.0).sin();
    [[C64::new(c, -s), Z], [Z, C64::new(c, s)]]
}

/// exp(-iθ X⊗X/2), basis order |00>, |01>, |10>, |11>.
pub fn rxx(theta: f64) -> [[C64; 4]; 4] {
    let c = C64::new((theta / 2.0).cos(), 0.0);
    let s = C64::new(0.0, -(theta / 2.0).sin());
    [
        [c, Z, Z, s],
        [Z, c, s, Z],
        [Z, s, c, Z],
        [s, Z, Z, c],
    ]
}

/// |00>→|00>, |01>→|01>, |10>→|11>, |11>→|10>
pub fn cnot() -> [[C64; 4]; 4] {
    [
        [O, Z, Z, Z],
        [Z, O, Z, Z],
        [Z, Z, Z, O],
        [Z, Z, O, Z],
    ]
}

pub fn matmul_2x2(a: [[C64; 2]; 2], b: [[C64; 2]; 2]) -> [[C64; 2]; 2] {
    let mut out = [[Z; 2]; 2];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, o) in row.iter_mut().enumerate() {
            *o = a[i][0] * b[0][j] + a[i][1] * b[1][j];
        }
    }
    out
}

pub fn scale_2x2(a: [[C64; 2]; 2], f: f64) -> [[C64; 2]; 2] {
    let mut out = a;
    for row in out.iter_mut() {
        for v in row.iter_mut() {
            *v *= f;
        }
    }
    out
}

pub fn dagger_2x2(a: [[C64; 2]; 2]) -> [[C64; 2]; 2] {
    [
        [a[0][0].conj(), a[1][0].conj()],
        [a[0][1].conj(), a[1][1].conj()],
    ]
}
