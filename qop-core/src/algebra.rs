//! Integer-power algebra shared by all operators

use crate::{Op, OperatorError, Result};

/// Largest number of copies a non-cyclic power may expand into
pub const MAX_POWER_REPEATS: u64 = 1 << 16;

/// Integer power of `op` as an operator sequence
///
/// For operators of cyclic order `n`, the exponent is reduced with
/// `z.rem_euclid(n)`: a remainder of 0 is the empty sequence (identity),
/// 1 is `[op]`, `n - 1` is `[op†]`, anything else repeats `op`.
///
/// Without a known order, positive exponents repeat `op` and negative
/// exponents repeat `op†`.
///
/// # Errors
/// Returns `PowerTooLarge` if the power would expand into more than
/// [`MAX_POWER_REPEATS`] copies
pub fn integer_pow(op: &Op, z: i64, order: Option<u32>) -> Result<Vec<Op>> {
    let (base, count) = match order {
        Some(order) if order > 0 => {
            let order = i64::from(order);
            match z.rem_euclid(order) {
                0 => return Ok(Vec::new()),
                r if r == order - 1 && r > 1 => (op.adjoint(), 1),
                r => (op.clone(), r.unsigned_abs()),
            }
        },
        _ if z >= 0 => (op.clone(), z.unsigned_abs()),
        _ => (op.adjoint(), z.unsigned_abs()),
    };
    if count > MAX_POWER_REPEATS {
        return Err(OperatorError::PowerTooLarge {
            exponent: z,
            limit: MAX_POWER_REPEATS,
        });
    }
    Ok(std::iter::repeat(base).take(count as usize).collect())
}
