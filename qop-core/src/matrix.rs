//! Dense complex matrices for operator representations
//!
//! Operators report their action as square, row-major [`Matrix`] values in
//! the computational basis. Wire ordering is big-endian: the first wire of an
//! operator is the most significant digit of the basis index.
//!
//! # Example
//!
//! ```
//! use qop_core::Matrix;
//! use num_complex::Complex64;
//!
//! let x = Matrix::from_rows(vec![
//!     vec![Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
//!     vec![Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
//! ])
//! .unwrap();
//!
//! assert!(x.matmul(&x).unwrap().approx_eq(&Matrix::identity(2), 1e-12));
//! ```

use crate::{OperatorError, Result, DEFAULT_TOLERANCE};
use num_complex::Complex64;
use std::fmt;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Square complex matrix stored row-major
#[derive(Clone, PartialEq)]
pub struct Matrix {
    dim: usize,
    data: Vec<Complex64>,
}

impl Matrix {
    /// All-zero matrix
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            data: vec![ZERO; dim * dim],
        }
    }

    /// Identity matrix
    pub fn identity(dim: usize) -> Self {
        let mut m = Self::zeros(dim);
        for i in 0..dim {
            m.data[i * dim + i] = ONE;
        }
        m
    }

    /// Diagonal matrix
    pub fn diagonal(entries: &[Complex64]) -> Self {
        let mut m = Self::zeros(entries.len());
        for (i, &v) in entries.iter().enumerate() {
            m.data[i * entries.len() + i] = v;
        }
        m
    }

    /// Build from a flattened row-major vector
    ///
    /// # Errors
    /// Returns error if the length is not a perfect square
    pub fn from_vec(data: Vec<Complex64>) -> Result<Self> {
        let dim = (data.len() as f64).sqrt().round() as usize;
        if dim * dim != data.len() {
            return Err(OperatorError::DimensionMismatch {
                expected: dim * dim,
                actual: data.len(),
            });
        }
        Ok(Self { dim, data })
    }

    /// Build from rows
    ///
    /// # Errors
    /// Returns error if the rows do not form a square matrix
    pub fn from_rows(rows: Vec<Vec<Complex64>>) -> Result<Self> {
        let dim = rows.len();
        let mut data = Vec::with_capacity(dim * dim);
        for row in rows {
            if row.len() != dim {
                return Err(OperatorError::DimensionMismatch {
                    expected: dim,
                    actual: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self { dim, data })
    }

    /// Build from a fixed-size constant matrix
    pub fn from_array<const N: usize>(array: &[[Complex64; N]; N]) -> Self {
        Self {
            dim: N,
            data: array.iter().flatten().copied().collect(),
        }
    }

    /// Permutation matrix sending basis state `j` to `perm[j]`
    pub fn permutation(perm: &[usize]) -> Self {
        let dim = perm.len();
        let mut m = Self::zeros(dim);
        for (col, &row) in perm.iter().enumerate() {
            m.data[row * dim + col] = ONE;
        }
        m
    }

    /// Number of rows (and columns)
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Element at `(row, col)`
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.data[row * self.dim + col]
    }

    /// Set element at `(row, col)`
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: Complex64) {
        self.data[row * self.dim + col] = value;
    }

    /// Flattened row-major data
    #[inline]
    pub fn as_slice(&self) -> &[Complex64] {
        &self.data
    }

    /// Consume into flattened row-major data
    pub fn into_vec(self) -> Vec<Complex64> {
        self.data
    }

    /// Column `col` as a vector
    pub fn column(&self, col: usize) -> Vec<Complex64> {
        (0..self.dim).map(|row| self.get(row, col)).collect()
    }

    /// Diagonal entries
    pub fn diag(&self) -> Vec<Complex64> {
        (0..self.dim).map(|i| self.get(i, i)).collect()
    }

    /// Matrix product `self * other` (`other` applied first)
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix> {
        if self.dim != other.dim {
            return Err(OperatorError::DimensionMismatch {
                expected: self.dim,
                actual: other.dim,
            });
        }
        let n = self.dim;
        let mut result = Self::zeros(n);
        for i in 0..n {
            for k in 0..n {
                let a = self.data[i * n + k];
                if a == ZERO {
                    continue;
                }
                for j in 0..n {
                    result.data[i * n + j] += a * other.data[k * n + j];
                }
            }
        }
        Ok(result)
    }

    /// Matrix-vector product
    pub fn apply(&self, vector: &[Complex64]) -> Result<Vec<Complex64>> {
        if vector.len() != self.dim {
            return Err(OperatorError::DimensionMismatch {
                expected: self.dim,
                actual: vector.len(),
            });
        }
        Ok((0..self.dim)
            .map(|i| {
                self.data[i * self.dim..(i + 1) * self.dim]
                    .iter()
                    .zip(vector)
                    .map(|(a, b)| a * b)
                    .sum()
            })
            .collect())
    }

    /// Conjugate transpose
    pub fn dagger(&self) -> Matrix {
        let n = self.dim;
        let mut result = Self::zeros(n);
        for i in 0..n {
            for j in 0..n {
                result.data[j * n + i] = self.data[i * n + j].conj();
            }
        }
        result
    }

    /// Kronecker product `self ⊗ other`
    pub fn kron(&self, other: &Matrix) -> Matrix {
        let (a, b) = (self.dim, other.dim);
        let n = a * b;
        let mut result = Self::zeros(n);
        for i in 0..a {
            for j in 0..a {
                let x = self.data[i * a + j];
                if x == ZERO {
                    continue;
                }
                for k in 0..b {
                    for l in 0..b {
                        result.data[(i * b + k) * n + (j * b + l)] = x * other.data[k * b + l];
                    }
                }
            }
        }
        result
    }

    /// Multiply every entry by `factor`
    pub fn scale(&self, factor: Complex64) -> Matrix {
        Matrix {
            dim: self.dim,
            data: self.data.iter().map(|v| v * factor).collect(),
        }
    }

    /// Entry-wise sum
    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        if self.dim != other.dim {
            return Err(OperatorError::DimensionMismatch {
                expected: self.dim,
                actual: other.dim,
            });
        }
        Ok(Matrix {
            dim: self.dim,
            data: self.data.iter().zip(&other.data).map(|(a, b)| a + b).collect(),
        })
    }

    /// Integer power by repeated squaring; negative powers use the dagger
    ///
    /// Only valid as an inverse for unitary matrices.
    pub fn pow(&self, z: i64) -> Matrix {
        let mut base = if z < 0 { self.dagger() } else { self.clone() };
        let mut exp = z.unsigned_abs();
        let mut result = Matrix::identity(self.dim);
        while exp > 0 {
            if exp & 1 == 1 {
                result = mul_square(&result, &base);
            }
            exp >>= 1;
            if exp > 0 {
                base = mul_square(&base, &base);
            }
        }
        result
    }

    /// Top-left `size × size` block
    pub fn top_left(&self, size: usize) -> Matrix {
        let size = size.min(self.dim);
        let mut block = Matrix::zeros(size);
        for i in 0..size {
            for j in 0..size {
                block.data[i * size + j] = self.get(i, j);
            }
        }
        block
    }

    /// Largest entry-wise distance to `other`
    pub fn max_deviation(&self, other: &Matrix) -> f64 {
        if self.dim != other.dim {
            return f64::INFINITY;
        }
        self.data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| (a - b).norm())
            .fold(0.0, f64::max)
    }

    /// Check if two matrices are approximately equal
    #[inline]
    pub fn approx_eq(&self, other: &Matrix, epsilon: f64) -> bool {
        self.max_deviation(other) <= epsilon
    }

    /// Check whether U†U = I within tolerance
    pub fn is_unitary(&self, epsilon: f64) -> bool {
        self.unitarity_deviation() <= epsilon
    }

    /// Largest deviation of U†U from the identity
    pub fn unitarity_deviation(&self) -> f64 {
        mul_square(&self.dagger(), self).max_deviation(&Matrix::identity(self.dim))
    }

    /// Whether every off-diagonal entry vanishes
    pub fn is_diagonal(&self) -> bool {
        (0..self.dim).all(|i| {
            (0..self.dim).all(|j| i == j || self.get(i, j).norm() <= DEFAULT_TOLERANCE)
        })
    }
}

// Both operands share a dimension by construction.
fn mul_square(a: &Matrix, b: &Matrix) -> Matrix {
    let n = a.dim;
    let mut result = Matrix::zeros(n);
    for i in 0..n {
        for k in 0..n {
            let x = a.data[i * n + k];
            if x == ZERO {
                continue;
            }
            for j in 0..n {
                result.data[i * n + j] += x * b.data[k * n + j];
            }
        }
    }
    result
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix({}x{})", self.dim, self.dim)?;
        for i in 0..self.dim {
            write!(f, "  [")?;
            for j in 0..self.dim {
                let v = self.get(i, j);
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{:.3}{:+.3}i", v.re, v.im)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const I: Complex64 = Complex64::new(0.0, 1.0);

    fn pauli_x() -> Matrix {
        Matrix::permutation(&[1, 0])
    }

    #[test]
    fn test_identity_multiplication() {
        let id = Matrix::identity(3);
        let result = id.matmul(&id).unwrap();
        assert!(result.approx_eq(&id, 1e-12));
    }

    #[test]
    fn test_permutation_layout() {
        // |0> -> |2>, |1> -> |0>, |2> -> |1>
        let shift = Matrix::permutation(&[2, 0, 1]);
        let state = shift.apply(&[ONE, ZERO, ZERO]).unwrap();
        assert_eq!(state, vec![ZERO, ZERO, ONE]);
        assert_eq!(shift.get(0, 1), ONE);
    }

    #[test]
    fn test_kron_ordering() {
        let x = pauli_x();
        let id = Matrix::identity(2);
        // X on the most significant qubit maps |00> to |10>
        let x_i = x.kron(&id);
        let out = x_i.apply(&[ONE, ZERO, ZERO, ZERO]).unwrap();
        assert_eq!(out[2], ONE);
    }

    #[test]
    fn test_dagger_of_phase() {
        let s = Matrix::diagonal(&[ONE, I]);
        let s_dag = s.dagger();
        assert_eq!(s_dag.get(1, 1), -I);
        assert!(s.matmul(&s_dag).unwrap().approx_eq(&Matrix::identity(2), 1e-12));
    }

    #[test]
    fn test_pow_and_negative_pow() {
        let shift = Matrix::permutation(&[1, 2, 0]);
        assert!(shift.pow(3).approx_eq(&Matrix::identity(3), 1e-12));
        assert!(shift.pow(-1).approx_eq(&shift.pow(2), 1e-12));
        assert!(shift.pow(0).approx_eq(&Matrix::identity(3), 1e-12));
    }

    #[test]
    fn test_from_vec_rejects_non_square() {
        assert!(Matrix::from_vec(vec![ONE; 3]).is_err());
        assert_eq!(Matrix::from_vec(vec![ONE; 9]).unwrap().dim(), 3);
    }

    #[test]
    fn test_unitarity_check() {
        assert!(pauli_x().is_unitary(1e-12));
        let not_unitary = Matrix::diagonal(&[ONE, Complex64::new(2.0, 0.0)]);
        assert!(!not_unitary.is_unitary(1e-6));
        assert_relative_eq!(not_unitary.unitarity_deviation(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_top_left_block() {
        let m = pauli_x().kron(&Matrix::identity(2));
        let block = m.top_left(2);
        assert!(block.approx_eq(&Matrix::zeros(2), 1e-12));
    }
}
