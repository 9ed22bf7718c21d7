//! Wire-order expansion of operator matrices
//!
//! Operators report matrices over their own wires. The helpers here place
//! those matrices inside a larger register given by an explicit wire order,
//! apply them to state vectors, and compose whole operator sequences into a
//! single matrix.
//!
//! All registers use big-endian digit order: the first wire in `wire_order`
//! is the most significant digit of the basis index.

use crate::{Matrix, Op, Operator, OperatorError, Result, Wires};
use num_complex::Complex64;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Basis index of `digits` in base `dim`
pub fn basis_index(digits: &[usize], dim: usize) -> usize {
    digits.iter().fold(0, |acc, &d| acc * dim + d)
}

/// Big-endian digits of `index` over `num_wires` wires of dimension `dim`
pub fn digits_of(index: usize, num_wires: usize, dim: usize) -> Vec<usize> {
    let mut digits = vec![0; num_wires];
    let mut rest = index;
    for slot in digits.iter_mut().rev() {
        *slot = rest % dim;
        rest /= dim;
    }
    digits
}

/// Computational basis state for `digits`
pub fn basis_state(digits: &[usize], dim: usize) -> Vec<Complex64> {
    let mut state = vec![ZERO; dim.pow(digits.len() as u32)];
    state[basis_index(digits, dim)] = ONE;
    state
}

/// Basis index carrying (almost) all probability, if the state is a basis state
pub fn dominant_basis_index(state: &[Complex64], epsilon: f64) -> Option<usize> {
    state
        .iter()
        .position(|amp| (amp.norm_sqr() - 1.0).abs() <= epsilon)
}

/// Positions of `wires` inside `wire_order`
pub fn wire_positions(wires: &Wires, wire_order: &Wires) -> Result<Vec<usize>> {
    wires
        .iter()
        .map(|w| {
            wire_order
                .position(w)
                .ok_or_else(|| OperatorError::WireNotFound(w.clone()))
        })
        .collect()
}

/// Apply `matrix` on the wires at `targets` of an `num_wires`-wire state
///
/// # Errors
/// Returns error if the state or matrix size does not match the register
pub fn apply_matrix(
    state: &[Complex64],
    matrix: &Matrix,
    targets: &[usize],
    num_wires: usize,
    dim: usize,
) -> Result<Vec<Complex64>> {
    let total = dim.pow(num_wires as u32);
    if state.len() != total {
        return Err(OperatorError::DimensionMismatch {
            expected: total,
            actual: state.len(),
        });
    }
    let local = dim.pow(targets.len() as u32);
    if matrix.dim() != local {
        return Err(OperatorError::DimensionMismatch {
            expected: local,
            actual: matrix.dim(),
        });
    }

    let strides: Vec<usize> = (0..num_wires)
        .map(|p| dim.pow((num_wires - 1 - p) as u32))
        .collect();
    let offsets: Vec<usize> = (0..local)
        .map(|l| {
            digits_of(l, targets.len(), dim)
                .iter()
                .zip(targets)
                .map(|(&d, &t)| d * strides[t])
                .sum()
        })
        .collect();

    let mut out = vec![ZERO; total];
    let mut amps = vec![ZERO; local];
    for base in 0..total {
        if targets.iter().any(|&t| (base / strides[t]) % dim != 0) {
            continue;
        }
        for (amp, &off) in amps.iter_mut().zip(&offsets) {
            *amp = state[base + off];
        }
        if amps.iter().all(|a| *a == ZERO) {
            continue;
        }
        for (row, &off) in offsets.iter().enumerate() {
            let mut acc = ZERO;
            for (col, amp) in amps.iter().enumerate() {
                acc += matrix.get(row, col) * amp;
            }
            out[base + off] = acc;
        }
    }
    Ok(out)
}

/// Apply an operator to a state over `wire_order`
pub fn apply_operator(
    state: &[Complex64],
    op: &dyn Operator,
    wire_order: &Wires,
    dim: usize,
) -> Result<Vec<Complex64>> {
    check_dim(op, dim)?;
    let targets = wire_positions(op.wires(), wire_order)?;
    apply_matrix(state, &op.matrix()?, &targets, wire_order.len(), dim)
}

/// Apply an operator sequence (first element first) to a state
pub fn apply_sequence(
    state: &[Complex64],
    ops: &[Op],
    wire_order: &Wires,
    dim: usize,
) -> Result<Vec<Complex64>> {
    let prepared = prepare(ops, wire_order, dim)?;
    let mut current = state.to_vec();
    for (matrix, targets) in &prepared {
        current = apply_matrix(&current, matrix, targets, wire_order.len(), dim)?;
    }
    Ok(current)
}

/// Matrix of `op` over `wire_order`
pub fn operator_matrix(op: &dyn Operator, wire_order: &Wires) -> Result<Matrix> {
    let matrix = op.matrix()?;
    if op.wires() == wire_order {
        return Ok(matrix);
    }
    let targets = wire_positions(op.wires(), wire_order)?;
    columns_to_matrix(wire_order.len(), op.wire_dim(), |column| {
        apply_matrix(&column, &matrix, &targets, wire_order.len(), op.wire_dim())
    })
}

/// Matrix of an operator sequence (first element applied first) over `wire_order`
pub fn sequence_matrix(ops: &[Op], wire_order: &Wires, dim: usize) -> Result<Matrix> {
    let prepared = prepare(ops, wire_order, dim)?;
    columns_to_matrix(wire_order.len(), dim, |column| {
        let mut current = column;
        for (matrix, targets) in &prepared {
            current = apply_matrix(&current, matrix, targets, wire_order.len(), dim)?;
        }
        Ok(current)
    })
}

fn prepare(ops: &[Op], wire_order: &Wires, dim: usize) -> Result<Vec<(Matrix, Vec<usize>)>> {
    ops.iter()
        .map(|op| {
            check_dim(op.as_ref(), dim)?;
            Ok((op.matrix()?, wire_positions(op.wires(), wire_order)?))
        })
        .collect()
}

fn check_dim(op: &dyn Operator, dim: usize) -> Result<()> {
    if op.wire_dim() != dim {
        return Err(OperatorError::DimensionMismatch {
            expected: dim,
            actual: op.wire_dim(),
        });
    }
    Ok(())
}

fn columns_to_matrix<F>(num_wires: usize, dim: usize, mut column_image: F) -> Result<Matrix>
where
    F: FnMut(Vec<Complex64>) -> Result<Vec<Complex64>>,
{
    let total = dim.pow(num_wires as u32);
    let mut result = Matrix::zeros(total);
    for col in 0..total {
        let mut column = vec![ZERO; total];
        column[col] = ONE;
        for (row, value) in column_image(column)?.into_iter().enumerate() {
            if value != ZERO {
                result.set(row, col, value);
            }
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_round_trip() {
        let digits = digits_of(23, 4, 3);
        assert_eq!(digits, vec![0, 2, 1, 2]);
        assert_eq!(basis_index(&digits, 3), 23);
    }

    #[test]
    fn test_apply_on_second_wire() {
        // X on wire 1 of a 2-qubit register maps |00> to |01>
        let x = Matrix::permutation(&[1, 0]);
        let state = basis_state(&[0, 0], 2);
        let out = apply_matrix(&state, &x, &[1], 2, 2).unwrap();
        assert_eq!(dominant_basis_index(&out, 1e-12), Some(1));
    }

    #[test]
    fn test_apply_reversed_targets() {
        // |i, j> -> |i, i+j mod 3> applied with targets swapped
        let mut perm = vec![0; 9];
        for i in 0..3 {
            for j in 0..3 {
                perm[i * 3 + j] = i * 3 + (i + j) % 3;
            }
        }
        let add = Matrix::permutation(&perm);
        let state = basis_state(&[2, 1], 3);
        // control is wire 1 (value 1), target is wire 0 (value 2)
        let out = apply_matrix(&state, &add, &[1, 0], 2, 3).unwrap();
        assert_eq!(dominant_basis_index(&out, 1e-12), Some(basis_index(&[0, 1], 3)));
    }

    #[test]
    fn test_size_checks() {
        let x = Matrix::permutation(&[1, 0]);
        assert!(apply_matrix(&[ONE; 3], &x, &[0], 2, 2).is_err());
        assert!(apply_matrix(&[ONE; 4], &x, &[0, 1], 2, 2).is_err());
    }
}
