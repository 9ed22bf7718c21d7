//! Pre-computed operator matrices
//!
//! Constant matrices for the fixed qubit and qutrit gates, stored row-major in
//! the computational basis, plus generators for the matrices that depend on
//! a register width (Fourier transform, modular shifts).

use num_complex::Complex64;
use std::f64::consts::PI;

// Compile-time constant helpers
const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);
const NEG_I: Complex64 = Complex64::new(0.0, -1.0);
const NEG_ONE: Complex64 = Complex64::new(-1.0, 0.0);

const INV_SQRT2: f64 = std::f64::consts::FRAC_1_SQRT_2;
const SQRT3_2: f64 = 0.8660254037844386; // √3/2

/// Primitive cube root of unity ω = e^(2πi/3)
pub const OMEGA: Complex64 = Complex64::new(-0.5, SQRT3_2);

/// ω² = e^(4πi/3) = conj(ω)
pub const OMEGA_SQ: Complex64 = Complex64::new(-0.5, -SQRT3_2);

// Single-qubit gate matrices (2x2)

/// Identity gate matrix
pub const IDENTITY: [[Complex64; 2]; 2] = [[ONE, ZERO], [ZERO, ONE]];

/// Hadamard gate matrix
/// H = 1/√2 * [[1,  1],
///             [1, -1]]
pub const HADAMARD: [[Complex64; 2]; 2] = [
    [
        Complex64::new(INV_SQRT2, 0.0),
        Complex64::new(INV_SQRT2, 0.0),
    ],
    [
        Complex64::new(INV_SQRT2, 0.0),
        Complex64::new(-INV_SQRT2, 0.0),
    ],
];

/// Pauli-X gate matrix
pub const PAULI_X: [[Complex64; 2]; 2] = [[ZERO, ONE], [ONE, ZERO]];

/// Pauli-Y gate matrix
pub const PAULI_Y: [[Complex64; 2]; 2] = [[ZERO, NEG_I], [I, ZERO]];

/// Pauli-Z gate matrix
pub const PAULI_Z: [[Complex64; 2]; 2] = [[ONE, ZERO], [ZERO, NEG_ONE]];

// Two-qubit gate matrices (4x4)

/// SWAP gate matrix
/// SWAP = [[1, 0, 0, 0],
///         [0, 0, 1, 0],
///         [0, 1, 0, 0],
///         [0, 0, 0, 1]]
pub const SWAP: [[Complex64; 4]; 4] = [
    [ONE, ZERO, ZERO, ZERO],
    [ZERO, ZERO, ONE, ZERO],
    [ZERO, ONE, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ONE],
];

// Single-qutrit matrices (3x3)

/// Qutrit shift: |j⟩ → |j+1 mod 3⟩
/// TShift = [[0, 0, 1],
///           [1, 0, 0],
///           [0, 1, 0]]
pub const TSHIFT: [[Complex64; 3]; 3] = [
    [ZERO, ZERO, ONE],
    [ONE, ZERO, ZERO],
    [ZERO, ONE, ZERO],
];

/// Qutrit clock: diag(1, ω, ω²)
pub const TCLOCK: [[Complex64; 3]; 3] = [
    [ONE, ZERO, ZERO],
    [ZERO, OMEGA, ZERO],
    [ZERO, ZERO, OMEGA_SQ],
];

// Two-qutrit matrices (9x9)

/// Qutrit controlled-add: |i, j⟩ → |i, i+j mod 3⟩
pub const TADD: [[Complex64; 9]; 9] = [
    [ONE, ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ZERO],
    [ZERO, ONE, ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ZERO],
    [ZERO, ZERO, ONE, ZERO, ZERO, ZERO, ZERO, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ZERO, ZERO, ONE, ZERO, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ONE, ZERO, ZERO, ZERO, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ZERO, ONE, ZERO, ZERO, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ONE, ZERO],
    [ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ONE],
    [ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ONE, ZERO, ZERO],
];

/// Qutrit swap: |i, j⟩ → |j, i⟩
pub const TSWAP: [[Complex64; 9]; 9] = [
    [ONE, ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ONE, ZERO, ZERO, ZERO, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ONE, ZERO, ZERO],
    [ZERO, ONE, ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ZERO, ONE, ZERO, ZERO, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ONE, ZERO],
    [ZERO, ZERO, ONE, ZERO, ZERO, ZERO, ZERO, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ZERO, ZERO, ONE, ZERO, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ONE],
];

// Register-width dependent generators

/// Fourier transform over `num_wires` qubits
/// F[j][k] = ω_N^(jk) / √N with N = 2^num_wires
pub fn fourier(num_wires: usize) -> Vec<Complex64> {
    let n = 1usize << num_wires;
    let norm = 1.0 / (n as f64).sqrt();
    let mut data = Vec::with_capacity(n * n);
    for j in 0..n {
        for k in 0..n {
            // reduce jk mod N before scaling to keep the angle small
            let angle = 2.0 * PI * ((j * k) % n) as f64 / n as f64;
            data.push(Complex64::from_polar(norm, angle));
        }
    }
    data
}

/// Basis permutation adding `k` modulo `modulus` to values below `modulus`
///
/// Values at or above `modulus` are fixed, so the result is a bijection on
/// `0..size` for any `size >= modulus`.
pub fn modular_shift(size: usize, k: u64, modulus: u64) -> Vec<usize> {
    (0..size)
        .map(|x| {
            let v = x as u64;
            if v < modulus {
                ((v + k % modulus) % modulus) as usize
            } else {
                x
            }
        })
        .collect()
}
